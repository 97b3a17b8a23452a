//! Boundary Operators of Filtered Complexes
//!
//! ## Absolute boundary
//!
//! Rows and columns are the simplices in filtration order; column i holds
//!
//!   ∂σᵢ = Σⱼ (-1)ʲ erase_j(σᵢ)
//!
//! and both gradings are the simplex entry times.
//!
//! ## Relative boundary
//!
//! The persistent homology of a pair (A, B), with B a filtered subcomplex of
//! A, is computed through the algebraic mapping cone of the inclusion B → A.
//! Besides the simplices of A, every simplex τ of B contributes a cone cell
//! ĉτ of dimension dim τ + 1, entering at its B-time, with
//!
//!   ∂ĉτ = τ - Σⱼ (-1)ʲ ĉ(erase_j τ)
//!
//! The homology of the cone at time t is H(A_t, B_t).

use tracing::debug;

use super::complex::FilteredComplex;
use super::simplex::Simplex;
use crate::algebra::{Field, FiltrationTime, SparseMatrix, SparseVector};
use crate::error::{Error, Result};
use crate::persistence::Map;

/// Origin of a cell of the relative boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Simplex of the ambient complex
    Simplex,
    /// Cone over a simplex of the subcomplex
    Cone,
}

/// One row/column of the relative boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeCell<T> {
    pub kind: CellKind,
    /// Filtration position in the complex the cell comes from
    pub source: usize,
    /// Homological degree (simplex dimension, plus one for cone cells)
    pub dim: usize,
    pub time: T,
}

/// Boundary map of a pair together with the meaning of its basis
#[derive(Debug, Clone)]
pub struct RelativeBoundary<F: Field, T: FiltrationTime> {
    pub map: Map<F, T>,
    pub cells: Vec<RelativeCell<T>>,
}

/// Boundary map of a finalized complex
///
/// The complex is verified first, so a `MissingFace` or `FaceAfterCoface`
/// error is returned instead of an ill-graded matrix.
pub fn boundary<F: Field, T: FiltrationTime>(complex: &FilteredComplex<T>) -> Result<Map<F, T>> {
    complex.verify()?;

    let n = complex.len();
    let mut columns = Vec::with_capacity(n);
    for (simplex, _) in complex.iter() {
        let mut entries = Vec::with_capacity(simplex.len());
        for (k, face) in simplex.faces() {
            entries.push((face_index(complex, simplex, &face)?, Simplex::boundary_sign::<F>(k)));
        }
        columns.push(SparseVector::from_entries(n, entries));
    }

    let times = complex.times();
    let nnz: usize = columns.iter().map(|c| c.nnz()).sum();
    debug!(simplices = n, nnz, "built boundary matrix");

    Ok(Map::new(SparseMatrix::from_columns(columns, times.clone(), times)))
}

/// Boundary map of the pair `(complex, sub)`
///
/// Every simplex of `sub` must belong to `complex` and enter it no later than
/// it enters `sub`; otherwise `NotASubcomplex` is returned.
pub fn relative_boundary<F: Field, T: FiltrationTime>(
    complex: &FilteredComplex<T>,
    sub: &FilteredComplex<T>,
) -> Result<RelativeBoundary<F, T>> {
    complex.verify()?;
    sub.verify()?;

    for (simplex, time) in sub.iter() {
        match complex.time_of(simplex) {
            Some(ambient_time) if ambient_time <= time => {}
            _ => {
                return Err(Error::NotASubcomplex {
                    simplex: simplex.to_string(),
                })
            }
        }
    }

    let cells = merge_cells(complex, sub);

    // merged position of every simplex and every cone cell
    let mut simplex_pos = vec![0; complex.len()];
    let mut cone_pos = vec![0; sub.len()];
    for (pos, cell) in cells.iter().enumerate() {
        match cell.kind {
            CellKind::Simplex => simplex_pos[cell.source] = pos,
            CellKind::Cone => cone_pos[cell.source] = pos,
        }
    }

    let n = cells.len();
    let mut columns = Vec::with_capacity(n);
    for cell in &cells {
        let mut entries = Vec::new();
        match cell.kind {
            CellKind::Simplex => {
                let simplex = complex.simplex(cell.source);
                for (k, face) in simplex.faces() {
                    let face_n = face_index(complex, simplex, &face)?;
                    entries.push((simplex_pos[face_n], Simplex::boundary_sign::<F>(k)));
                }
            }
            CellKind::Cone => {
                let base = sub.simplex(cell.source);
                let base_n = face_index(complex, base, base)?;
                entries.push((simplex_pos[base_n], F::one()));
                for (k, face) in base.faces() {
                    let face_n = face_index(sub, base, &face)?;
                    entries.push((cone_pos[face_n], -Simplex::boundary_sign::<F>(k)));
                }
            }
        }
        columns.push(SparseVector::from_entries(n, entries));
    }

    let times: Vec<T> = cells.iter().map(|c| c.time).collect();
    debug!(
        simplices = complex.len(),
        cone_cells = sub.len(),
        "built relative boundary matrix"
    );

    Ok(RelativeBoundary {
        map: Map::new(SparseMatrix::from_columns(columns, times.clone(), times)),
        cells,
    })
}

/// Two-pointer merge of the simplices of `complex` with the cone cells over
/// `sub`, keyed by (time, degree) with simplices first on ties
fn merge_cells<T: FiltrationTime>(
    complex: &FilteredComplex<T>,
    sub: &FilteredComplex<T>,
) -> Vec<RelativeCell<T>> {
    let simplex_cell = |i: usize| RelativeCell {
        kind: CellKind::Simplex,
        source: i,
        dim: complex.simplex(i).dim(),
        time: complex.time(i),
    };
    let cone_cell = |i: usize| RelativeCell {
        kind: CellKind::Cone,
        source: i,
        dim: sub.simplex(i).dim() + 1,
        time: sub.time(i),
    };

    let mut cells = Vec::with_capacity(complex.len() + sub.len());
    let (mut a, mut b) = (0, 0);
    while a < complex.len() || b < sub.len() {
        let take_simplex = if a == complex.len() {
            false
        } else if b == sub.len() {
            true
        } else {
            let next_simplex = simplex_cell(a);
            let next_cone = cone_cell(b);
            (next_simplex.time, next_simplex.dim) <= (next_cone.time, next_cone.dim)
        };

        if take_simplex {
            cells.push(simplex_cell(a));
            a += 1;
        } else {
            cells.push(cone_cell(b));
            b += 1;
        }
    }
    cells
}

fn face_index<T: FiltrationTime>(
    complex: &FilteredComplex<T>,
    simplex: &Simplex,
    face: &Simplex,
) -> Result<usize> {
    complex.index_of(face).ok_or_else(|| Error::MissingFace {
        simplex: simplex.to_string(),
        face: face.to_string(),
    })
}
