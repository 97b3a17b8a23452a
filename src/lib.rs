//! # tda-barcodes
//!
//! Persistent Homology of Filtered Simplicial Complexes over Prime Fields
//!
//! ## Overview
//!
//! Given a filtration of a simplicial complex (every simplex tagged with the
//! time at which it appears), this crate computes its barcode: the multiset
//! of intervals [birth, death) during which each homology class is alive.
//!
//! ### Methodology
//!
//! 1. **Exact arithmetic**: coefficients live in Z/pZ, so every elimination
//!    step is exact and the result is reproducible
//!
//! 2. **Graded matrices**: rows and columns carry filtration times, and the
//!    boundary operator becomes a map of persistence modules
//!
//! 3. **Presentation**: cycles (kernel) modulo boundaries (image) are solved
//!    against each other; the pivots of the resulting structure map pair
//!    births with deaths
//!
//! 4. **Relative homology**: the barcode of a pair (A, B) is obtained from
//!    the mapping cone of the inclusion B → A
//!
//! ## Example
//!
//! ```
//! use tda_barcodes::{compute_barcode, DiscreteTime, FilteredComplex, PersistenceConfig, Ternary};
//!
//! let t = DiscreteTime::new;
//! let complex = FilteredComplex::from_pairs(vec![
//!     (vec![0], t(0)),
//!     (vec![1], t(0)),
//!     (vec![0, 1], t(1)),
//! ]);
//!
//! let barcode = compute_barcode::<Ternary, _>(&complex, &PersistenceConfig::default()).unwrap();
//! assert!(barcode.contains(t(0), t(1)));
//! assert!(barcode.contains(t(0), DiscreteTime::INFINITY));
//! ```
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Zomorodian & Carlsson, "Computing Persistent Homology", DCG 33 (2005)
//! - Edelsbrunner, Letscher, Zomorodian, "Topological Persistence and
//!   Simplification", DCG 28 (2002)

pub mod algebra;
pub mod error;
pub mod persistence;
pub mod topology;

// Re-exports from algebra
pub use algebra::{
    Binary,
    ContinuousTime,
    DiscreteTime,
    Field,
    FiltrationTime,
    Fp,
    SparseMatrix,
    SparseVector,
    Ternary,
};

// Re-exports from topology
pub use topology::{
    boundary,
    relative_boundary,
    FilteredComplex,
    RelativeBoundary,
    RipsConfig,
    Simplex,
    VietorisRips,
};

// Re-exports from persistence
pub use persistence::{
    compute_barcode,
    compute_relative_barcode,
    Barcode,
    Interval,
    Map,
    PersistenceConfig,
    PersistenceModule,
    Space,
};

pub use error::{Error, Result};
