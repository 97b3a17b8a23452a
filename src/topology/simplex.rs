//! Simplices: Sorted Vertex Sets
//!
//! A k-simplex [v₀, ..., vₖ] is stored as its sorted, duplicate-free vertex
//! list. Simplices are ordered by dimension first and lexicographically
//! second, so within one filtration time every face precedes its cofaces.
//!
//! The boundary of a simplex is the alternating sum of its codimension-1
//! faces:
//!
//!   ∂[v₀, ..., vₖ] = Σᵢ (-1)ⁱ [v₀, ..., v̂ᵢ, ..., vₖ]

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::algebra::Field;

/// A simplex represented by its vertex indices
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Simplex {
    /// Vertex indices (sorted, no duplicates)
    vertices: Vec<usize>,
}

impl Simplex {
    /// Build from any vertex list; order and repetitions are normalized away
    pub fn new(vertices: impl IntoIterator<Item = usize>) -> Self {
        let mut vertices: Vec<usize> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices }
    }

    /// 0-simplex
    pub fn vertex(v: usize) -> Self {
        Self { vertices: vec![v] }
    }

    /// Add a vertex, keeping the list sorted and duplicate-free
    pub fn insert(&mut self, vertex: usize) {
        if let Err(pos) = self.vertices.binary_search(&vertex) {
            self.vertices.insert(pos, vertex);
        }
    }

    /// Dimension = number of vertices - 1
    pub fn dim(&self) -> usize {
        assert!(!self.is_empty(), "the empty simplex has no dimension");
        self.vertices.len() - 1
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// The k-th codimension-1 face (vertex k removed)
    pub fn erase(&self, k: usize) -> Self {
        assert!(
            k < self.vertices.len(),
            "cannot erase vertex {} of a {}-simplex",
            k,
            self.vertices.len().saturating_sub(1)
        );
        let mut vertices = self.vertices.clone();
        vertices.remove(k);
        Self { vertices }
    }

    /// All codimension-1 faces as `(k, erase(k))`, empty for vertices
    pub fn faces(&self) -> impl Iterator<Item = (usize, Simplex)> + '_ {
        let count = if self.vertices.len() > 1 { self.vertices.len() } else { 0 };
        (0..count).map(move |k| (k, self.erase(k)))
    }

    /// Incidence sign (-1)^k of the k-th face
    pub fn boundary_sign<F: Field>(k: usize) -> F {
        if k % 2 == 0 {
            F::one()
        } else {
            -F::one()
        }
    }
}

impl From<Vec<usize>> for Simplex {
    fn from(vertices: Vec<usize>) -> Self {
        Self::new(vertices)
    }
}

impl<const N: usize> From<[usize; N]> for Simplex {
    fn from(vertices: [usize; N]) -> Self {
        Self::new(vertices)
    }
}

impl Index<usize> for Simplex {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.vertices[i]
    }
}

impl Ord for Simplex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices
            .len()
            .cmp(&other.vertices.len())
            .then_with(|| self.vertices.cmp(&other.vertices))
    }
}

impl PartialOrd for Simplex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}
