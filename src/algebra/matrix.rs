//! Time-Graded Sparse Matrices
//!
//! A matrix is a list of sparse column vectors together with a filtration
//! time for every row and every column. The entry at `(i, j)` lives at the
//! time difference `col_times[j] - row_times[i]`, which is why every stored
//! entry must satisfy `col_times[j] >= row_times[i]`: a basis element can only
//! be expressed through elements that already exist.
//!
//! Elimination (`reduce`, `decompose`, `solve`) lives in `elimination.rs`.

use std::fmt;
use std::ops::Mul;

use ndarray::Array2;

use super::field::Field;
use super::time::FiltrationTime;
use super::vector::SparseVector;

/// Value of a matrix entry together with its grading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixEntry<F, T> {
    pub value: F,
    pub time: T,
}

/// Column-major sparse matrix with graded rows and columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix<F: Field, T: FiltrationTime> {
    pub(super) columns: Vec<SparseVector<F>>,
    pub(super) row_times: Vec<T>,
    pub(super) col_times: Vec<T>,
}

impl<F: Field, T: FiltrationTime> SparseMatrix<F, T> {
    /// Zero matrix with every row and column at time zero
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::with_times(vec![T::ZERO; rows], vec![T::ZERO; cols])
    }

    /// Zero matrix with the given gradings
    pub fn with_times(row_times: Vec<T>, col_times: Vec<T>) -> Self {
        let rows = row_times.len();
        Self {
            columns: vec![SparseVector::new(rows); col_times.len()],
            row_times,
            col_times,
        }
    }

    /// Identity of size `n`, all times zero
    pub fn identity(n: usize) -> Self {
        Self::graded_identity(vec![T::ZERO; n])
    }

    /// Identity whose rows and columns both carry `times`
    pub fn graded_identity(times: Vec<T>) -> Self {
        let n = times.len();
        Self {
            columns: (0..n).map(|i| SparseVector::unit(n, i, F::one())).collect(),
            row_times: times.clone(),
            col_times: times,
        }
    }

    /// Dense literal, all times zero
    pub fn from_dense(values: &Array2<i64>) -> Self {
        let (rows, cols) = values.dim();
        Self::from_dense_timed(values, vec![T::ZERO; rows], vec![T::ZERO; cols])
    }

    /// Dense literal with explicit row and column times
    ///
    /// # Panics
    /// When the time sequences do not match the shape of `values`, or a
    /// nonzero entry sits in a column that is earlier than its row.
    pub fn from_dense_timed(values: &Array2<i64>, row_times: Vec<T>, col_times: Vec<T>) -> Self {
        let (rows, cols) = values.dim();
        assert_eq!(rows, row_times.len(), "expected {} row times, got {}", rows, row_times.len());
        assert_eq!(cols, col_times.len(), "expected {} column times, got {}", cols, col_times.len());

        let columns: Vec<SparseVector<F>> = (0..cols)
            .map(|c| {
                let dense: Vec<i64> = values.column(c).iter().copied().collect();
                SparseVector::from_dense(&dense)
            })
            .collect();

        let matrix = Self {
            columns,
            row_times,
            col_times,
        };
        assert!(matrix.is_graded(), "entry placed before its row exists");
        matrix
    }

    /// Assemble from column vectors
    pub fn from_columns(columns: Vec<SparseVector<F>>, row_times: Vec<T>, col_times: Vec<T>) -> Self {
        assert_eq!(columns.len(), col_times.len(), "one time per column required");
        for col in &columns {
            assert_eq!(col.dim(), row_times.len(), "column dimension does not match row count");
        }

        let matrix = Self {
            columns,
            row_times,
            col_times,
        };
        assert!(matrix.is_graded(), "entry placed before its row exists");
        matrix
    }

    pub fn rows(&self) -> usize {
        self.row_times.len()
    }

    pub fn cols(&self) -> usize {
        self.col_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    pub fn column(&self, col: usize) -> &SparseVector<F> {
        assert!(col < self.cols(), "column {} out of range ({} columns)", col, self.cols());
        &self.columns[col]
    }

    pub fn columns(&self) -> &[SparseVector<F>] {
        &self.columns
    }

    pub fn row_times(&self) -> &[T] {
        &self.row_times
    }

    pub fn col_times(&self) -> &[T] {
        &self.col_times
    }

    pub fn row_time(&self, row: usize) -> T {
        self.row_times[row]
    }

    pub fn col_time(&self, col: usize) -> T {
        self.col_times[col]
    }

    /// Coefficient at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> F {
        self.column(col).get(row)
    }

    /// Coefficient and grading at `(row, col)`
    pub fn entry(&self, row: usize, col: usize) -> MatrixEntry<F, T> {
        MatrixEntry {
            value: self.get(row, col),
            time: self.entry_time(row, col),
        }
    }

    /// `col_times[col] - row_times[row]`
    pub fn entry_time(&self, row: usize, col: usize) -> T {
        assert!(row < self.rows() && col < self.cols(), "entry ({}, {}) out of range", row, col);
        let (row_time, col_time) = (self.row_times[row], self.col_times[col]);
        assert!(
            col_time.can_subtract(&row_time),
            "column time {} precedes row time {}",
            col_time,
            row_time
        );
        col_time - row_time
    }

    /// Append a column at time `time`
    pub fn push_column(&mut self, column: SparseVector<F>, time: T) {
        assert_eq!(column.dim(), self.rows(), "column dimension does not match row count");
        self.columns.push(column);
        self.col_times.push(time);
    }

    /// Every stored entry satisfies `col_time >= row_time`
    pub fn is_graded(&self) -> bool {
        self.columns.iter().zip(&self.col_times).all(|(col, col_time)| {
            col.entries()
                .iter()
                .all(|(row, _)| self.row_times[*row] <= *col_time)
        })
    }

    /// No two nonzero columns share a pivot row
    pub fn is_echelon_form(&self) -> bool {
        let mut seen = vec![false; self.rows()];
        for pivot in self.columns.iter().filter_map(|c| c.pivot_dim()) {
            if seen[pivot] {
                return false;
            }
            seen[pivot] = true;
        }
        true
    }

    /// Swap the roles of rows and columns (gradings included)
    pub fn transpose(&self) -> Self {
        let mut transposed = Self::with_times(self.col_times.clone(), self.row_times.clone());
        for (col_n, col) in self.columns.iter().enumerate() {
            for &(row_n, value) in col.entries() {
                transposed.columns[row_n].push(col_n, value);
            }
        }
        transposed
    }

    /// `self * other`
    ///
    /// The left factor is transposed once so every output coefficient is a
    /// merge-walk dot product of a row of `self` with a column of `other`.
    pub fn multiply(&self, other: &Self) -> Self {
        assert_eq!(
            self.cols(),
            other.rows(),
            "cannot multiply {}x{} by {}x{}",
            self.rows(),
            self.cols(),
            other.rows(),
            other.cols()
        );

        let a_rows = self.transpose();
        let mut product = Self::with_times(self.row_times.clone(), other.col_times.clone());

        for (col_n, b_col) in other.columns.iter().enumerate() {
            let out = &mut product.columns[col_n];
            for (row_n, a_row) in a_rows.columns.iter().enumerate() {
                out.push(row_n, a_row.dot(b_col));
            }
        }

        product
    }

    /// `self * vector`, as a combination of the columns picked by `vector`
    pub fn multiply_vector(&self, vector: &SparseVector<F>) -> SparseVector<F> {
        assert_eq!(vector.dim(), self.cols(), "vector dimension does not match column count");

        let mut result = SparseVector::new(self.rows());
        for &(col_n, value) in vector.entries() {
            result.add_multiple(&self.columns[col_n], value);
        }
        result
    }

    /// Dense copy of the coefficients (canonical representatives)
    pub fn to_dense(&self) -> Array2<i64> {
        let mut dense = Array2::<i64>::zeros((self.rows(), self.cols()));
        for (col_n, col) in self.columns.iter().enumerate() {
            for &(row_n, value) in col.entries() {
                dense[[row_n, col_n]] = value.value() as i64;
            }
        }
        dense
    }

    /// Remove zero columns together with their times
    pub(super) fn drop_zero_columns(&mut self) {
        let keep: Vec<bool> = self.columns.iter().map(|c| !c.is_zero()).collect();
        let mut flags = keep.iter();
        self.col_times.retain(|_| *flags.next().unwrap_or(&false));
        self.columns.retain(|c| !c.is_zero());
    }
}

impl<'a, F: Field, T: FiltrationTime> Mul<&'a SparseMatrix<F, T>> for &'a SparseMatrix<F, T> {
    type Output = SparseMatrix<F, T>;

    fn mul(self, rhs: &'a SparseMatrix<F, T>) -> SparseMatrix<F, T> {
        self.multiply(rhs)
    }
}

impl<F: Field, T: FiltrationTime> fmt::Display for SparseMatrix<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row_n in 0..self.rows() {
            if row_n > 0 {
                writeln!(f)?;
            }
            for col_n in 0..self.cols() {
                if col_n > 0 {
                    write!(f, ", ")?;
                }
                let value = self.get(row_n, col_n);
                if value.is_zero() {
                    write!(f, "0")?;
                } else {
                    write!(f, "({},{})", value, self.entry_time(row_n, col_n))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::field::{Binary, Ternary};
    use crate::algebra::time::DiscreteTime;
    use ndarray::array;
    use rand::Rng;

    type TM = SparseMatrix<Ternary, DiscreteTime>;
    type BM = SparseMatrix<Binary, DiscreteTime>;

    fn steps(values: &[u32]) -> Vec<DiscreteTime> {
        DiscreteTime::steps(values)
    }

    #[test]
    fn test_dense_literal() {
        let identity = BM::from_dense(&array![[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
        assert_eq!(identity, BM::identity(3));
        assert_eq!(identity.get(0, 0), Binary::new(1));
        assert_eq!(identity.get(1, 2), Binary::new(0));

        let a = TM::from_dense_timed(
            &array![[1, -1, 0], [0, 0, 1], [0, 1, -1]],
            steps(&[0, 2, 1]),
            steps(&[1, 2, 3]),
        );

        assert_eq!(a.entry(0, 0), MatrixEntry { value: Ternary::new(1), time: DiscreteTime::new(1) });
        assert_eq!(a.entry(0, 1), MatrixEntry { value: Ternary::new(2), time: DiscreteTime::new(2) });
        assert_eq!(a.entry(1, 2), MatrixEntry { value: Ternary::new(1), time: DiscreteTime::new(1) });
        assert_eq!(a.entry(2, 1), MatrixEntry { value: Ternary::new(1), time: DiscreteTime::new(1) });
        assert_eq!(a.get(1, 1), Ternary::new(0));
        assert!(a.is_graded());
    }

    #[test]
    #[should_panic(expected = "row times")]
    fn test_row_time_count_mismatch() {
        TM::from_dense_timed(&array![[2, 1, 0], [0, 2, 1]], steps(&[2, 1, 0]), steps(&[1, 3, 8]));
    }

    #[test]
    #[should_panic(expected = "column times")]
    fn test_col_time_count_mismatch() {
        TM::from_dense_timed(&array![[2, 1, 0], [0, 2, 1]], steps(&[2, 4]), steps(&[1, 3, 8, 10]));
    }

    #[test]
    #[should_panic(expected = "before its row")]
    fn test_entry_before_row_time() {
        TM::from_dense_timed(&array![[2, 1, 0], [0, 2, 1]], steps(&[2, 3]), steps(&[1, 3, 8]));
    }

    #[test]
    fn test_equality_includes_times() {
        let values = array![[1, -1, 0], [0, 0, 1], [0, 1, -1]];
        let a = TM::from_dense_timed(&values, steps(&[0, 0, 1]), steps(&[1, 2, 3]));
        let b = TM::from_dense_timed(&values, steps(&[0, 0, 1]), steps(&[1, 2, 4]));
        let c = TM::from_dense_timed(&array![[1, -1, 0], [0, 0, 1], [0, -1, -1]], steps(&[0, 0, 1]), steps(&[1, 2, 3]));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.get(1, 1), c.get(1, 1));
        assert_ne!(a.get(2, 1), c.get(2, 1));
    }

    #[test]
    fn test_multiply() {
        let a = TM::from_dense(&array![[2, 2, 0, 2, 2], [2, 1, 1, 0, 1], [0, 0, 2, 2, 2]]);
        let b = TM::from_dense(&array![
            [0, 1, 2, 2, 2, 1],
            [1, 0, 2, 0, 2, 1],
            [2, 2, 1, 0, 0, 2],
            [2, 2, 1, 0, 2, 2],
            [2, 2, 0, 0, 0, 0]
        ]);
        let expected = TM::from_dense(&array![[1, 1, 1, 1, 0, 2], [2, 0, 1, 1, 0, 2], [0, 0, 1, 0, 1, 2]]);

        let identity = BM::identity(3);
        assert_eq!(identity, &identity * &identity);
        assert_eq!(&a * &b, expected);
        assert_eq!((&a * &b).rows(), 3);
        assert_eq!((&a * &b).cols(), 6);
    }

    #[test]
    fn test_multiply_keeps_outer_gradings() {
        let a = TM::from_dense_timed(&array![[1, 1], [0, 1]], steps(&[0, 1]), steps(&[1, 2]));
        let b = TM::from_dense_timed(&array![[1], [1]], steps(&[1, 2]), steps(&[4]));
        let c = &a * &b;

        assert_eq!(c.row_times(), &steps(&[0, 1])[..]);
        assert_eq!(c.col_times(), &steps(&[4])[..]);
        assert_eq!(c.to_dense(), array![[2], [1]]);
    }

    fn random_matrix(rng: &mut impl Rng, rows: usize, cols: usize) -> TM {
        let values = Array2::from_shape_fn((rows, cols), |_| rng.gen_range(0..3));
        TM::from_dense(&values)
    }

    #[test]
    fn test_multiply_is_associative() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let (m, n, k, l) = (
                rng.gen_range(1..6),
                rng.gen_range(1..6),
                rng.gen_range(1..6),
                rng.gen_range(1..6),
            );
            let a = random_matrix(&mut rng, m, n);
            let b = random_matrix(&mut rng, n, k);
            let c = random_matrix(&mut rng, k, l);

            assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        }
    }

    #[test]
    fn test_transpose() {
        let a = TM::from_dense_timed(&array![[1, 2, 0], [0, 1, 1]], steps(&[0, 1]), steps(&[1, 2, 3]));
        let t = a.transpose();

        assert_eq!(t.to_dense(), array![[1, 0], [2, 1], [0, 1]]);
        assert_eq!(t.row_times(), a.col_times());
        assert_eq!(t.col_times(), a.row_times());
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_multiply_vector() {
        let a = TM::from_dense(&array![[1, 0, 2], [0, 1, 1]]);
        let v = SparseVector::from_dense(&[1, 1, 1]);
        assert_eq!(a.multiply_vector(&v), SparseVector::from_dense(&[0, 2]));
    }

    #[test]
    fn test_echelon_form() {
        let echelon = TM::from_dense(&array![[1, 1, 0], [0, 1, 0], [0, 0, 0]]);
        let clash = TM::from_dense(&array![[1, 1, 0], [1, 1, 0], [0, 0, 0]]);
        assert!(echelon.is_echelon_form());
        assert!(!clash.is_echelon_form());
    }

    #[test]
    fn test_display() {
        let a = TM::from_dense_timed(&array![[1, 0], [0, 2]], steps(&[0, 1]), steps(&[1, 3]));
        assert_eq!(a.to_string(), "(1,t1), 0\n0, (2,t2)");
    }

    #[test]
    #[should_panic(expected = "cannot multiply")]
    fn test_multiply_shape_mismatch() {
        let _ = &TM::zeros(2, 3) * &TM::zeros(2, 3);
    }
}
