//! Barcodes: Birth/Death Intervals of Homology Classes
//!
//! A barcode is the complete invariant of a pointwise finite persistence
//! module: one interval [birth, death) per indecomposable summand. Classes
//! that never die are essential and carry `death = INFINITY`.
//!
//! Summary statistics follow the usual TDA conventions:
//!
//!   total persistence  L = Σᵢ (dᵢ - bᵢ)
//!   persistent entropy H = -Σᵢ pᵢ ln(pᵢ),  pᵢ = (dᵢ - bᵢ) / L
//!
//! both taken over the finite intervals of one dimension.

use std::fmt;

use tracing::debug;

use super::module::PersistenceModule;
use crate::algebra::{Field, FiltrationTime};
use crate::error::Result;
use crate::topology::{boundary, relative_boundary, FilteredComplex};

/// Configuration for barcode computation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistenceConfig {
    /// Keep intervals with birth == death
    pub keep_empty_intervals: bool,
    /// Drop intervals above this homological dimension
    pub max_dim: Option<usize>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            keep_empty_intervals: true,
            max_dim: None,
        }
    }
}

/// Persistence interval [birth, death)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    pub birth: T,
    pub death: T,
    /// Filtration position of the cell that created the class
    pub generator: usize,
    /// Homological dimension, once known
    pub dimension: Option<usize>,
}

impl<T: FiltrationTime> Interval<T> {
    pub fn new(birth: T, death: T, generator: usize) -> Self {
        assert!(birth <= death, "interval dies at {} before it is born at {}", death, birth);
        Self {
            birth,
            death,
            generator,
            dimension: None,
        }
    }

    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    /// Born and killed at the same time
    pub fn is_empty(&self) -> bool {
        self.birth == self.death
    }

    /// Whether the class is alive at `t`
    pub fn contains(&self, t: T) -> bool {
        self.birth <= t && t < self.death
    }

    /// Lifetime, infinite for essential classes
    pub fn persistence(&self) -> f64 {
        if self.is_essential() {
            f64::INFINITY
        } else {
            self.death.to_f64() - self.birth.to_f64()
        }
    }
}

impl<T: FiltrationTime> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.birth, self.death)?;
        if let Some(d) = self.dimension {
            write!(f, " H{}", d)?;
        }
        Ok(())
    }
}

/// Multiset of persistence intervals
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Barcode<T> {
    intervals: Vec<Interval<T>>,
}

impl<T: FiltrationTime> Barcode<T> {
    pub fn new(intervals: Vec<Interval<T>>) -> Self {
        Self { intervals }
    }

    pub fn intervals(&self) -> &[Interval<T>] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Whether some interval is exactly [birth, death)
    pub fn contains(&self, birth: T, death: T) -> bool {
        self.intervals
            .iter()
            .any(|i| i.birth == birth && i.death == death)
    }

    /// Get intervals for dimension d
    pub fn dim(&self, d: usize) -> Vec<&Interval<T>> {
        self.intervals
            .iter()
            .filter(|i| i.dimension == Some(d))
            .collect()
    }

    /// Get finite intervals for dimension d
    pub fn finite(&self, d: usize) -> Vec<&Interval<T>> {
        self.intervals
            .iter()
            .filter(|i| i.dimension == Some(d) && !i.is_essential())
            .collect()
    }

    pub fn essential(&self) -> Vec<&Interval<T>> {
        self.intervals.iter().filter(|i| i.is_essential()).collect()
    }

    pub fn without_empty(mut self) -> Self {
        self.intervals.retain(|i| !i.is_empty());
        self
    }

    /// β_d(t) for every dimension up to the highest labelled one
    ///
    /// Intervals without a dimension are not counted.
    pub fn betti_numbers(&self, t: T) -> Vec<usize> {
        let Some(max_dim) = self.intervals.iter().filter_map(|i| i.dimension).max() else {
            return Vec::new();
        };

        let mut betti = vec![0; max_dim + 1];
        for interval in &self.intervals {
            if let Some(d) = interval.dimension {
                if interval.contains(t) {
                    betti[d] += 1;
                }
            }
        }
        betti
    }

    /// Total persistence for dimension d
    pub fn total_persistence(&self, d: usize) -> f64 {
        self.finite(d).iter().map(|i| i.persistence()).sum()
    }

    /// Compute persistence entropy for dimension d
    pub fn persistence_entropy(&self, d: usize) -> f64 {
        let lifetimes: Vec<f64> = self
            .finite(d)
            .iter()
            .map(|i| i.persistence())
            .filter(|&p| p > 0.0)
            .collect();

        let total: f64 = lifetimes.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }

        let mut entropy = 0.0;
        for l in lifetimes {
            let p = l / total;
            entropy -= p * p.ln();
        }
        entropy
    }

    /// Label every interval with the dimension of its generating simplex
    pub fn with_dimensions(self, complex: &FilteredComplex<T>) -> Self {
        self.with_cell_dimensions(|generator| complex.simplex(generator).dim())
    }

    /// Order by birth, then death, then generator
    pub fn sorted(mut self) -> Self {
        self.intervals.sort_by(|a, b| {
            a.birth
                .cmp(&b.birth)
                .then_with(|| a.death.cmp(&b.death))
                .then_with(|| a.generator.cmp(&b.generator))
        });
        self
    }

    fn with_cell_dimensions(mut self, dim_of: impl Fn(usize) -> usize) -> Self {
        for interval in &mut self.intervals {
            interval.dimension = Some(dim_of(interval.generator));
        }
        self
    }

    fn filtered(mut self, config: &PersistenceConfig) -> Self {
        if !config.keep_empty_intervals {
            self = self.without_empty();
        }
        if let Some(max_dim) = config.max_dim {
            self.intervals
                .retain(|i| i.dimension.map_or(true, |d| d <= max_dim));
        }
        self.sorted()
    }
}

impl<T: FiltrationTime> fmt::Display for Barcode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}

/// Barcode of a filtered complex over the field `F`
pub fn compute_barcode<F: Field, T: FiltrationTime>(
    complex: &FilteredComplex<T>,
    config: &PersistenceConfig,
) -> Result<Barcode<T>> {
    let module = PersistenceModule::new(&boundary::<F, T>(complex)?)?;
    let barcode = module.barcode().with_dimensions(complex).filtered(config);

    debug!(
        simplices = complex.len(),
        intervals = barcode.len(),
        essential = barcode.essential().len(),
        "computed barcode"
    );
    Ok(barcode)
}

/// Barcode of the pair `(complex, sub)`, i.e. of H(complex_t, sub_t)
///
/// Generators refer to positions among the relative cells, see
/// `relative_boundary`.
pub fn compute_relative_barcode<F: Field, T: FiltrationTime>(
    complex: &FilteredComplex<T>,
    sub: &FilteredComplex<T>,
    config: &PersistenceConfig,
) -> Result<Barcode<T>> {
    let relative = relative_boundary::<F, T>(complex, sub)?;
    let module = PersistenceModule::new(&relative.map)?;
    let barcode = module
        .barcode()
        .with_cell_dimensions(|generator| relative.cells[generator].dim)
        .filtered(config);

    debug!(
        simplices = complex.len(),
        subcomplex = sub.len(),
        intervals = barcode.len(),
        "computed relative barcode"
    );
    Ok(barcode)
}
