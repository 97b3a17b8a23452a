//! Sparse Vectors over a Prime Field
//!
//! A vector stores its nonzero coordinates as `(index, value)` pairs with
//! strictly increasing indices. Zero coefficients are never stored, so the
//! last entry is always the pivot: the highest nonzero coordinate, which is
//! the anchor of every elimination step.

use std::fmt;
use std::ops::Add;

use super::field::Field;

/// Sparse vector of fixed dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseVector<F: Field> {
    /// Nonzero entries, sorted by index
    entries: Vec<(usize, F)>,
    dim: usize,
}

impl<F: Field> SparseVector<F> {
    /// Zero vector of dimension `dim`
    pub fn new(dim: usize) -> Self {
        Self {
            entries: Vec::new(),
            dim,
        }
    }

    /// Vector with a single (possibly zero) coordinate set
    pub fn unit(dim: usize, index: usize, value: F) -> Self {
        assert!(index < dim, "index {} out of range for dimension {}", index, dim);
        let mut v = Self::new(dim);
        if !value.is_zero() {
            v.entries.push((index, value));
        }
        v
    }

    /// Build from a dense list of integers (reduced into the field)
    pub fn from_dense(values: &[i64]) -> Self {
        let entries = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i, F::from_i64(v)))
            .filter(|(_, v)| !v.is_zero())
            .collect();
        Self {
            entries,
            dim: values.len(),
        }
    }

    /// Build from unordered entries; repeated indices are summed
    pub fn from_entries(dim: usize, entries: impl IntoIterator<Item = (usize, F)>) -> Self {
        let mut raw: Vec<(usize, F)> = entries.into_iter().collect();
        raw.sort_by_key(|(i, _)| *i);

        let mut merged: Vec<(usize, F)> = Vec::with_capacity(raw.len());
        for (index, value) in raw {
            assert!(index < dim, "index {} out of range for dimension {}", index, dim);
            match merged.last_mut() {
                Some((last, acc)) if *last == index => *acc += value,
                _ => merged.push((index, value)),
            }
        }
        merged.retain(|(_, v)| !v.is_zero());

        Self {
            entries: merged,
            dim,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (nonzero) entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn make_zero(&mut self) {
        self.entries.clear();
    }

    /// Nonzero entries in increasing index order
    pub fn entries(&self) -> &[(usize, F)] {
        &self.entries
    }

    /// Index of the highest nonzero coordinate
    pub fn pivot_dim(&self) -> Option<usize> {
        self.entries.last().map(|(i, _)| *i)
    }

    /// Value at the pivot
    pub fn pivot(&self) -> Option<F> {
        self.entries.last().map(|(_, v)| *v)
    }

    /// Coordinate `i`, zero when not stored
    pub fn get(&self, i: usize) -> F {
        assert!(i < self.dim, "index {} out of range for dimension {}", i, self.dim);
        match self.entries.binary_search_by_key(&i, |(idx, _)| *idx) {
            Ok(pos) => self.entries[pos].1,
            Err(_) => F::zero(),
        }
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &Self) -> F {
        assert_eq!(self.dim, other.dim, "dimension mismatch in dot product");

        let (a, b) = (&self.entries, &other.entries);
        let (mut ia, mut ib) = (0, 0);
        let mut result = F::zero();

        while ia < a.len() && ib < b.len() {
            let (row_a, val_a) = a[ia];
            let (row_b, val_b) = b[ib];
            if row_a == row_b {
                result += val_a * val_b;
            }
            if row_a <= row_b {
                ia += 1;
            }
            if row_b <= row_a {
                ib += 1;
            }
        }

        result
    }

    /// `self + other` as a new vector
    pub fn add(&self, other: &Self) -> Self {
        self.add_scaled(other, F::one())
    }

    /// `self + k * other` as a new vector, cancelled entries dropped
    pub fn add_scaled(&self, other: &Self, k: F) -> Self {
        assert_eq!(self.dim, other.dim, "dimension mismatch in vector sum");

        let mut out = Vec::with_capacity(self.entries.len() + other.entries.len());
        if k.is_zero() {
            out.extend_from_slice(&self.entries);
            return Self {
                entries: out,
                dim: self.dim,
            };
        }

        let (a, b) = (&self.entries, &other.entries);
        let (mut ia, mut ib) = (0, 0);

        while ia < a.len() && ib < b.len() {
            let (row_a, val_a) = a[ia];
            let (row_b, val_b) = b[ib];

            if row_a == row_b {
                let sum = val_a + k * val_b;
                if !sum.is_zero() {
                    out.push((row_a, sum));
                }
                ia += 1;
                ib += 1;
            } else if row_a < row_b {
                out.push((row_a, val_a));
                ia += 1;
            } else {
                out.push((row_b, k * val_b));
                ib += 1;
            }
        }

        out.extend_from_slice(&a[ia..]);
        out.extend(b[ib..].iter().map(|&(row, val)| (row, k * val)));

        Self {
            entries: out,
            dim: self.dim,
        }
    }

    /// In place `self += k * other`
    pub fn add_multiple(&mut self, other: &Self, k: F) {
        let sum = self.add_scaled(other, k);
        *self = sum;
    }

    /// `k * self`
    pub fn scale(&self, k: F) -> Self {
        if k.is_zero() {
            return Self::new(self.dim);
        }
        Self {
            entries: self.entries.iter().map(|&(i, v)| (i, k * v)).collect(),
            dim: self.dim,
        }
    }

    pub fn negate(&mut self) {
        for (_, v) in self.entries.iter_mut() {
            *v = -*v;
        }
    }

    /// Append an entry above the current pivot
    pub(crate) fn push(&mut self, index: usize, value: F) {
        debug_assert!(index < self.dim);
        debug_assert!(self.pivot_dim().map_or(true, |p| p < index));
        if !value.is_zero() {
            self.entries.push((index, value));
        }
    }
}

impl<'a, F: Field> Add<&'a SparseVector<F>> for &'a SparseVector<F> {
    type Output = SparseVector<F>;

    fn add(self, rhs: &'a SparseVector<F>) -> SparseVector<F> {
        SparseVector::add(self, rhs)
    }
}

impl<F: Field> fmt::Display for SparseVector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.dim {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.get(i))?;
        }
        Ok(())
    }
}
