//! Persistence Module: From Boundary Maps to Barcodes
//!
//! Implements the algebraic side of persistent homology:
//! - Graded spaces and maps over a shared sparse matrix type
//! - Presentation of homology as generators (cycles) modulo relations
//!   (boundaries)
//! - Barcode extraction and summary statistics
//!
//! ## Pipeline
//!
//! ```text
//! FilteredComplex ──boundary──▶ Map ──decompose──▶ (cycles, boundaries)
//!        ──solve──▶ structure map ──pivots──▶ Barcode
//! ```

mod barcode;
mod module;
mod structures;

pub use barcode::{compute_barcode, compute_relative_barcode, Barcode, Interval, PersistenceConfig};
pub use module::PersistenceModule;
pub use structures::{Map, Space};
