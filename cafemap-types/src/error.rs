//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum CafemapTypesError {
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// The coordinate reference system is not known to the crate.
    #[error("unsupported coordinate reference system: {0}")]
    UnknownCrs(String),
    /// A projection could not be constructed or applied.
    #[error("projection error: {0}")]
    Projection(String),
}
