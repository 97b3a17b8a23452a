//! Algebra Module: Exact Graded Linear Algebra over Z/pZ
//!
//! Provides the building blocks every topological computation rests on:
//! - Prime field coefficients with table-driven inverses
//! - Filtration times (discrete steps or continuous magnitudes)
//! - Sparse vectors and time-graded sparse matrices
//! - Column elimination: reduction, kernel/image decomposition, solving
//!
//! ## Grading
//!
//! Each row and column of a matrix carries the time at which its basis
//! element appears. An entry `(i, j)` is only allowed when column j does
//! not appear before row i, so every matrix is a map of persistence modules
//! and elimination never mixes in elements from the future.

mod elimination;
mod field;
mod matrix;
mod time;
mod vector;

pub use field::{Binary, Field, Fp, Ternary, INVERSE_TABLE_LIMIT};
pub use matrix::{MatrixEntry, SparseMatrix};
pub use time::{ContinuousTime, DiscreteTime, FiltrationTime};
pub use vector::SparseVector;
