//! Topology Module: Filtered Simplicial Complexes
//!
//! Implements the combinatorial side of persistent homology:
//! - Simplices and filtered complexes with face-closure checks
//! - Boundary operators, absolute and relative to a subcomplex
//! - Vietoris-Rips filtrations of point clouds
//!
//! ## Mathematical Background
//!
//! A filtration is a nested family of simplicial complexes K_t ⊆ K_s for
//! t ≤ s. Listing simplices by entry time (faces before cofaces) turns the
//! boundary operator into a single graded matrix whose reduction yields the
//! birth and death of every homology class across the filtration.

mod boundary;
mod complex;
mod simplex;
mod vietoris_rips;

pub use boundary::{boundary, relative_boundary, CellKind, RelativeBoundary, RelativeCell};
pub use complex::FilteredComplex;
pub use simplex::Simplex;
pub use vietoris_rips::{RipsConfig, VietorisRips};
