//! Error types used by the crate.

use std::path::PathBuf;

use cafemap_types::error::CafemapTypesError;
use thiserror::Error;

/// Cafemap error type.
#[derive(Debug, Error)]
pub enum CafemapError {
    /// The data file does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    /// Error reading a file.
    #[error("failed to read file: {0}")]
    FsIo(#[from] std::io::Error),
    /// The file is larger than the configured object size limit.
    #[error("file is {size} bytes, which exceeds the OGR_GEOJSON_MAX_OBJ_SIZE limit of {limit} bytes")]
    TooLarge {
        /// Size of the file, bytes.
        size: u64,
        /// Configured limit, bytes.
        limit: u64,
    },
    /// The content is not valid GeoJSON.
    #[error("failed to parse GeoJSON: {0}")]
    GeoJson(#[from] Box<geojson::Error>),
    /// Geometry conversion or projection error.
    #[error(transparent)]
    Geometry(#[from] CafemapTypesError),
    /// A feature has no geometry.
    #[error("feature {0} has no geometry")]
    MissingGeometry(usize),
    /// The table has no features, so it has no extent.
    #[error("dataset has no features")]
    Empty,
    /// A geometry could not be reprojected.
    #[error("failed to project feature {index} into {crs}")]
    Projection {
        /// Index of the feature.
        index: usize,
        /// Target CRS.
        crs: String,
    },
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Error filling a template.
    #[error("failed to render template: {0}")]
    Template(#[from] strfmt::FmtError),
    /// JSON serialization or deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<geojson::Error> for CafemapError {
    fn from(value: geojson::Error) -> Self {
        Self::GeoJson(Box::new(value))
    }
}
