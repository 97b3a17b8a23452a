//! Filtered Simplicial Complexes
//!
//! Simplices are appended lazily with their entry time and put in filtration
//! order by `finalize`: ascending time, ties broken by the simplex order
//! (dimension, then vertices). After finalizing, every simplex has a stable
//! position which is the row/column index used by the boundary operators.

use std::collections::HashMap;
use std::ops::Index;

use tracing::{debug, warn};

use super::simplex::Simplex;
use crate::algebra::FiltrationTime;
use crate::error::{Error, Result};

/// Simplicial complex with a filtration time for every simplex
#[derive(Debug, Clone)]
pub struct FilteredComplex<T: FiltrationTime> {
    /// (simplex, entry time), in filtration order once finalized
    simplices: Vec<(Simplex, T)>,
    /// Position of every simplex in `simplices`
    index: HashMap<Simplex, usize>,
    finalized: bool,
}

impl<T: FiltrationTime> FilteredComplex<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            simplices: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            finalized: false,
        }
    }

    /// Insert every `(simplex, time)` pair and finalize
    pub fn from_pairs<S: Into<Simplex>>(pairs: impl IntoIterator<Item = (S, T)>) -> Self {
        let mut complex = Self::new();
        for (simplex, time) in pairs {
            complex.insert(simplex, time);
        }
        complex.finalize();
        complex
    }

    /// Append a simplex entering at `time`
    ///
    /// # Panics
    /// When the complex is already finalized, the simplex is empty or the
    /// time is undefined.
    pub fn insert(&mut self, simplex: impl Into<Simplex>, time: T) {
        assert!(!self.finalized, "cannot insert into a finalized complex");
        let simplex = simplex.into();
        assert!(!simplex.is_empty(), "cannot insert the empty simplex");
        assert!(time.is_defined(), "simplex [{}] inserted at an undefined time", simplex);
        self.simplices.push((simplex, time));
    }

    /// Sort into filtration order and index the simplices
    ///
    /// A simplex inserted more than once keeps its earliest time.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }

        let mut pending = std::mem::take(&mut self.simplices);
        pending.sort_by(|(sa, ta), (sb, tb)| ta.cmp(tb).then_with(|| sa.cmp(sb)));

        let mut conflicts = 0;
        for (simplex, time) in pending {
            if let Some(&existing) = self.index.get(&simplex) {
                if self.simplices[existing].1 != time {
                    conflicts += 1;
                    warn!(
                        simplex = %simplex,
                        kept = %self.simplices[existing].1,
                        dropped = %time,
                        "simplex inserted at two different times, keeping the earliest"
                    );
                }
                continue;
            }
            self.index.insert(simplex.clone(), self.simplices.len());
            self.simplices.push((simplex, time));
        }

        self.finalized = true;
        debug!(
            simplices = self.simplices.len(),
            max_dim = self.max_dim(),
            conflicts,
            "finalized complex"
        );
    }

    /// Check that the complex is closed under faces and faces never enter
    /// after their cofaces
    pub fn verify(&self) -> Result<()> {
        self.assert_finalized();

        for (simplex, time) in &self.simplices {
            for (_, face) in simplex.faces() {
                let Some(&face_n) = self.index.get(&face) else {
                    return Err(Error::MissingFace {
                        simplex: simplex.to_string(),
                        face: face.to_string(),
                    });
                };
                let face_time = self.simplices[face_n].1;
                if face_time > *time {
                    return Err(Error::FaceAfterCoface {
                        simplex: simplex.to_string(),
                        simplex_time: time.to_string(),
                        face: face.to_string(),
                        face_time: face_time.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.verify().is_ok()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn len(&self) -> usize {
        self.assert_finalized();
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, simplex: &Simplex) -> bool {
        self.index_of(simplex).is_some()
    }

    /// Filtration position of a simplex
    pub fn index_of(&self, simplex: &Simplex) -> Option<usize> {
        self.assert_finalized();
        self.index.get(simplex).copied()
    }

    /// Entry time of the simplex at position `i`
    pub fn time(&self, i: usize) -> T {
        self.assert_finalized();
        self.simplices[i].1
    }

    pub fn time_of(&self, simplex: &Simplex) -> Option<T> {
        self.index_of(simplex).map(|i| self.simplices[i].1)
    }

    pub fn simplex(&self, i: usize) -> &Simplex {
        self.assert_finalized();
        &self.simplices[i].0
    }

    /// Entry times in filtration order
    pub fn times(&self) -> Vec<T> {
        self.iter().map(|(_, t)| t).collect()
    }

    /// `(simplex, time)` in filtration order
    pub fn iter(&self) -> impl Iterator<Item = (&Simplex, T)> + '_ {
        self.assert_finalized();
        self.simplices.iter().map(|(s, t)| (s, *t))
    }

    /// Highest simplex dimension, `None` for an empty complex
    pub fn max_dim(&self) -> Option<usize> {
        self.assert_finalized();
        self.simplices.iter().map(|(s, _)| s.dim()).max()
    }

    fn assert_finalized(&self) {
        assert!(self.finalized, "complex must be finalized first");
    }
}

impl<T: FiltrationTime> Default for FilteredComplex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FiltrationTime> Index<usize> for FilteredComplex<T> {
    type Output = Simplex;

    fn index(&self, i: usize) -> &Simplex {
        self.simplex(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::DiscreteTime;

    fn t(step: u32) -> DiscreteTime {
        DiscreteTime::new(step)
    }

    #[test]
    fn test_filtration_order() {
        let mut complex = FilteredComplex::new();
        complex.insert([0, 1, 2], t(2));
        complex.insert([1, 2], t(1));
        complex.insert([0, 2], t(1));
        complex.insert([0, 1], t(2));
        complex.insert([2], t(0));
        complex.insert([1], t(0));
        complex.insert([0], t(0));
        complex.finalize();

        let order: Vec<String> = complex.iter().map(|(s, _)| s.to_string()).collect();
        assert_eq!(order, vec!["0", "1", "2", "0, 2", "1, 2", "0, 1", "0, 1, 2"]);
        assert_eq!(complex.times(), DiscreteTime::steps(&[0, 0, 0, 1, 1, 2, 2]));
        assert!(complex.verify().is_ok());
        assert_eq!(complex.max_dim(), Some(2));
    }

    #[test]
    fn test_lookup() {
        let complex = FilteredComplex::from_pairs(vec![
            (vec![0], t(0)),
            (vec![1], t(0)),
            (vec![1, 0], t(3)),
        ]);

        let edge = Simplex::from([0, 1]);
        assert!(complex.contains(&edge));
        assert_eq!(complex.index_of(&edge), Some(2));
        assert_eq!(complex.time_of(&edge), Some(t(3)));
        assert_eq!(complex.time(2), t(3));
        assert_eq!(complex[2], edge);
        assert_eq!(complex.index_of(&Simplex::vertex(5)), None);
        assert_eq!(complex.len(), 3);
    }

    #[test]
    fn test_duplicates_keep_earliest_time() {
        let mut complex = FilteredComplex::new();
        complex.insert([0], t(0));
        complex.insert([1], t(0));
        complex.insert([0, 1], t(4));
        complex.insert([0, 1], t(2));
        complex.insert([1], t(0));
        complex.finalize();
        complex.finalize();

        assert_eq!(complex.len(), 3);
        assert_eq!(complex.time_of(&Simplex::from([0, 1])), Some(t(2)));
    }

    #[test]
    fn test_verify_missing_face() {
        let complex = FilteredComplex::from_pairs(vec![(vec![0], t(0)), (vec![0, 1], t(1))]);

        assert_eq!(
            complex.verify(),
            Err(Error::MissingFace {
                simplex: "0, 1".to_string(),
                face: "1".to_string(),
            })
        );
        assert!(!complex.is_closed());
    }

    #[test]
    fn test_verify_face_after_coface() {
        let complex = FilteredComplex::from_pairs(vec![
            (vec![0], t(0)),
            (vec![1], t(3)),
            (vec![0, 1], t(1)),
        ]);

        assert!(matches!(
            complex.verify(),
            Err(Error::FaceAfterCoface { ref face, .. }) if face == "1"
        ));
    }

    #[test]
    fn test_empty_complex() {
        let complex = FilteredComplex::<DiscreteTime>::from_pairs(Vec::<(Simplex, _)>::new());
        assert!(complex.is_empty());
        assert_eq!(complex.max_dim(), None);
        assert!(complex.verify().is_ok());
    }

    #[test]
    #[should_panic(expected = "finalized complex")]
    fn test_insert_after_finalize_panics() {
        let mut complex = FilteredComplex::from_pairs(vec![(vec![0], t(0))]);
        complex.insert([1], t(1));
    }

    #[test]
    #[should_panic(expected = "must be finalized")]
    fn test_query_before_finalize_panics() {
        let mut complex = FilteredComplex::new();
        complex.insert([0], t(0));
        let _ = complex.len();
    }
}
