//! Error types for tda-barcodes
//!
//! Precondition violations (shape mismatches, out-of-range indices, querying
//! an unfinalized complex) are assertions and panic. Everything in here is a
//! condition a caller can observe and act on.

use thiserror::Error;

/// Result type alias using the crate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the algebra and topology layers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Attempted to invert zero in a prime field
    #[error("Zero has no inverse in Z/{modulus}Z")]
    DomainError {
        /// The field modulus
        modulus: u32,
    },

    /// A target column of `solve` is not a combination of the basis columns
    #[error("Column {column} is not in the image space (no basis column with pivot row {pivot})")]
    NotInImageSpace {
        /// Column of the right-hand side that could not be expressed
        column: usize,
        /// Pivot row left over when elimination got stuck
        pivot: usize,
    },

    /// A simplex of the complex is missing one of its faces
    #[error("Simplex [{simplex}] is missing its face [{face}]")]
    MissingFace {
        /// The simplex, rendered as comma-separated vertex ids
        simplex: String,
        /// The absent face
        face: String,
    },

    /// A face enters the filtration strictly after one of its cofaces
    #[error("Face [{face}] enters at {face_time}, after its coface [{simplex}] at {simplex_time}")]
    FaceAfterCoface {
        /// The coface
        simplex: String,
        /// Entry time of the coface
        simplex_time: String,
        /// The late face
        face: String,
        /// Entry time of the face
        face_time: String,
    },

    /// Relative boundary requested for a pair that is not a filtered subcomplex
    #[error("Simplex [{simplex}] of the subcomplex is absent from the complex or enters it later")]
    NotASubcomplex {
        /// The offending simplex
        simplex: String,
    },
}
