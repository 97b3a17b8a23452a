//! Gaussian Elimination on Graded Sparse Matrices
//!
//! All three routines share one left-to-right column sweep:
//!
//! 1. Take column j and look at its pivot (highest nonzero row)
//! 2. Find the most recent earlier column owning the same pivot
//! 3. Cancel the pivot: `col_j += (-pivot_j / pivot_i) * col_i`
//! 4. Repeat until column j is zero or owns a pivot nobody else has
//!
//! Because earlier columns are never modified after their own sweep, the
//! result is deterministic and only depends on the column order. With a
//! filtration-ordered boundary matrix this is exactly the standard
//! persistence reduction (Edelsbrunner, Letscher, Zomorodian 2002), run over
//! Z/pZ instead of Z/2Z.
//!
//! `decompose` additionally records, for every column, which combination of
//! the original columns produced it. Columns that vanish give a kernel basis,
//! the survivors give an image basis.

use tracing::{debug, trace};

use super::field::Field;
use super::matrix::SparseMatrix;
use super::time::FiltrationTime;
use super::vector::SparseVector;
use crate::error::{Error, Result};

impl<F: Field, T: FiltrationTime> SparseMatrix<F, T> {
    /// Reduced form: nonzero columns have pairwise distinct pivot rows
    pub fn is_reduced_form(&self) -> bool {
        self.is_echelon_form()
    }

    /// Column-reduce in place, optionally dropping the columns that vanish
    pub fn reduce(&mut self, drop_zeros: bool) -> Result<()> {
        let zeroed = self.eliminate(None)?;
        debug!(cols = self.cols(), zeroed, drop_zeros, "reduced matrix");

        if drop_zeros {
            self.drop_zero_columns();
        }
        Ok(())
    }

    /// Split the column space into `(kernel, image)` bases
    ///
    /// The kernel is expressed in the original columns: its rows carry the
    /// original column times and each kernel vector keeps the time of the
    /// column that vanished. The image keeps the original row times and the
    /// times of the surviving columns, and is in reduced form.
    pub fn decompose(&self) -> Result<(Self, Self)> {
        let mut image = self.clone();
        let mut follower = Self::graded_identity(self.col_times.clone());

        image.eliminate(Some(&mut follower))?;

        let mut kernel = Self::with_times(self.col_times.clone(), Vec::new());
        for (col_n, (reduced, combination)) in image.columns.iter().zip(follower.columns).enumerate() {
            if reduced.is_zero() {
                kernel.push_column(combination, self.col_times[col_n]);
            }
        }
        image.drop_zero_columns();

        debug!(
            cols = self.cols(),
            kernel = kernel.cols(),
            image = image.cols(),
            "decomposed map"
        );
        Ok((kernel, image))
    }

    /// Find `X` with `self * X == rhs`
    ///
    /// `self` must be in reduced form. Each column of `rhs` is cleared pivot by
    /// pivot with the unique basis column owning that pivot; the factors used
    /// become the column of `X`. Fails with `NotInImageSpace` as soon as a
    /// pivot has no owner, i.e. the column is not a combination of `self`.
    pub fn solve(&self, rhs: &Self) -> Result<Self> {
        assert!(self.is_reduced_form(), "solve requires a basis in reduced form");
        assert_eq!(self.rows(), rhs.rows(), "basis and right-hand side row counts differ");

        let owners = self.pivot_owners();
        let mut solution = Self::with_times(self.col_times.clone(), rhs.col_times.clone());

        for (col_n, target) in rhs.columns.iter().enumerate() {
            let mut rest = target.clone();
            let mut coefficients: Vec<(usize, F)> = Vec::new();

            while let Some(pivot) = rest.pivot_dim() {
                let basis_n = owners[pivot].ok_or(Error::NotInImageSpace {
                    column: col_n,
                    pivot,
                })?;
                let basis = &self.columns[basis_n];
                let factor = rest.get(pivot).div(basis.get(pivot))?;

                trace!(column = col_n, pivot, basis = basis_n, "solve step");
                rest.add_multiple(basis, -factor);
                coefficients.push((basis_n, factor));
            }

            coefficients.reverse();
            solution.columns[col_n] = SparseVector::from_entries(self.cols(), coefficients);
        }

        debug!(basis = self.cols(), targets = rhs.cols(), "solved linear system");
        Ok(solution)
    }

    /// Owning column of each pivot row (reduced matrices only)
    fn pivot_owners(&self) -> Vec<Option<usize>> {
        let mut owners = vec![None; self.rows()];
        for (col_n, col) in self.columns.iter().enumerate() {
            if let Some(pivot) = col.pivot_dim() {
                owners[pivot] = Some(col_n);
            }
        }
        owners
    }

    /// Left-to-right sweep; returns the number of columns that vanished
    ///
    /// The same column operations are replayed on `follower` when given.
    fn eliminate(&mut self, mut follower: Option<&mut Self>) -> Result<usize> {
        // most recent finished column owning each pivot row
        let mut owners: Vec<Option<usize>> = vec![None; self.rows()];
        let mut zeroed = 0;

        for col_n in 0..self.cols() {
            while let Some(pivot) = self.columns[col_n].pivot_dim() {
                let Some(eliminator_n) = owners[pivot] else {
                    break;
                };

                let (done, rest) = self.columns.split_at_mut(col_n);
                let current = &mut rest[0];
                let eliminator = &done[eliminator_n];

                let factor = -current.get(pivot).div(eliminator.get(pivot))?;
                trace!(column = col_n, pivot, eliminator = eliminator_n, "eliminate");
                current.add_multiple(eliminator, factor);

                if let Some(f) = follower.as_deref_mut() {
                    let (done, rest) = f.columns.split_at_mut(col_n);
                    rest[0].add_multiple(&done[eliminator_n], factor);
                }
            }

            match self.columns[col_n].pivot_dim() {
                Some(pivot) => owners[pivot] = Some(col_n),
                None => zeroed += 1,
            }
        }

        Ok(zeroed)
    }
}
