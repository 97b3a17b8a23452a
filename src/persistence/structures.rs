//! Spaces and Maps of Persistence Modules
//!
//! Both are thin views over one graded `SparseMatrix`:
//! - a `Space` is the span of its columns, each column a basis vector that
//!   appears at its column time
//! - a `Map` sends the domain basis (columns) to combinations of the codomain
//!   basis (rows)

use std::fmt;

use crate::algebra::{Field, FiltrationTime, SparseMatrix, SparseVector};
use crate::error::Result;

/// Graded subspace given by a basis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space<F: Field, T: FiltrationTime> {
    basis: SparseMatrix<F, T>,
}

impl<F: Field, T: FiltrationTime> Space<F, T> {
    pub fn new(basis: SparseMatrix<F, T>) -> Self {
        Self { basis }
    }

    /// Number of basis vectors
    pub fn vector_count(&self) -> usize {
        self.basis.cols()
    }

    /// Dimension of the ambient space
    pub fn dim(&self) -> usize {
        self.basis.rows()
    }

    pub fn basis_vector(&self, i: usize) -> &SparseVector<F> {
        self.basis.column(i)
    }

    /// Appearance time of every basis vector
    pub fn times(&self) -> &[T] {
        self.basis.col_times()
    }

    pub fn matrix(&self) -> &SparseMatrix<F, T> {
        &self.basis
    }

    pub fn into_matrix(self) -> SparseMatrix<F, T> {
        self.basis
    }
}

/// Graded linear map between persistence modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map<F: Field, T: FiltrationTime> {
    matrix: SparseMatrix<F, T>,
}

impl<F: Field, T: FiltrationTime> Map<F, T> {
    pub fn new(matrix: SparseMatrix<F, T>) -> Self {
        Self { matrix }
    }

    pub fn domain_dim(&self) -> usize {
        self.matrix.cols()
    }

    pub fn codomain_dim(&self) -> usize {
        self.matrix.rows()
    }

    /// Image of every basis vector of `space`
    pub fn apply(&self, space: &Space<F, T>) -> Space<F, T> {
        Space::new(self.matrix.multiply(space.matrix()))
    }

    pub fn apply_vector(&self, vector: &SparseVector<F>) -> SparseVector<F> {
        self.matrix.multiply_vector(vector)
    }

    /// `(kernel, image)` of the map, see `SparseMatrix::decompose`
    pub fn decompose(&self) -> Result<(Space<F, T>, Space<F, T>)> {
        let (kernel, image) = self.matrix.decompose()?;
        Ok((Space::new(kernel), Space::new(image)))
    }

    /// Kernel basis of the map, the first half of `decompose`
    pub fn kernel(&self) -> Result<Space<F, T>> {
        let (kernel, _) = self.matrix.decompose()?;
        Ok(Space::new(kernel))
    }

    /// Reduced span of the columns of `self` and `other`
    ///
    /// Columns of both maps are merged in time order (`self` first on ties),
    /// then column-reduced with the vanished columns dropped.
    pub fn sum(&self, other: &Self) -> Result<Self> {
        self.merge(other, false)
    }

    /// Like `sum`, with the columns of `other` negated
    pub fn difference(&self, other: &Self) -> Result<Self> {
        self.merge(other, true)
    }

    /// The map `X` with `domain · X = image`
    ///
    /// `domain` must be in reduced form. Fails with `NotInImageSpace` when
    /// some vector of `image` is not spanned by `domain`.
    pub fn solve(domain: &Space<F, T>, image: &Space<F, T>) -> Result<Self> {
        Ok(Self::new(domain.matrix().solve(image.matrix())?))
    }

    pub fn is_reduced_form(&self) -> bool {
        self.matrix.is_reduced_form()
    }

    pub fn matrix(&self) -> &SparseMatrix<F, T> {
        &self.matrix
    }

    /// `(row, birth, death)` for every codomain basis vector
    ///
    /// Reads the map as a presentation: rows are generators born at their row
    /// time, and a generator dies at the time of the column whose pivot it
    /// is. Generators that are no column's pivot never die.
    pub fn interval_endpoints(&self) -> Vec<(usize, T, T)> {
        assert!(self.is_reduced_form(), "interval endpoints require a map in reduced form");

        let mut deaths = vec![T::INFINITY; self.codomain_dim()];
        for (col_n, col) in self.matrix.columns().iter().enumerate() {
            if let Some(pivot) = col.pivot_dim() {
                if deaths[pivot].is_infinite() {
                    deaths[pivot] = self.matrix.col_time(col_n);
                }
            }
        }

        deaths
            .into_iter()
            .enumerate()
            .map(|(row, death)| (row, self.matrix.row_time(row), death))
            .collect()
    }

    fn merge(&self, other: &Self, negate_other: bool) -> Result<Self> {
        assert_eq!(
            self.matrix.row_times(),
            other.matrix.row_times(),
            "maps with different codomain gradings cannot be combined"
        );

        let (left, right) = (&self.matrix, &other.matrix);
        let mut columns = Vec::with_capacity(left.cols() + right.cols());
        let mut times = Vec::with_capacity(left.cols() + right.cols());
        let (mut i, mut j) = (0, 0);
        while i < left.cols() || j < right.cols() {
            let take_left = j == right.cols() || (i < left.cols() && left.col_time(i) <= right.col_time(j));

            if take_left {
                columns.push(left.column(i).clone());
                times.push(left.col_time(i));
                i += 1;
            } else {
                let mut column = right.column(j).clone();
                if negate_other {
                    column.negate();
                }
                columns.push(column);
                times.push(right.col_time(j));
                j += 1;
            }
        }

        let mut merged = SparseMatrix::from_columns(columns, left.row_times().to_vec(), times);
        merged.reduce(true)?;
        Ok(Self::new(merged))
    }
}

impl<F: Field, T: FiltrationTime> fmt::Display for Space<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.basis, f)
    }
}

impl<F: Field, T: FiltrationTime> fmt::Display for Map<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}
