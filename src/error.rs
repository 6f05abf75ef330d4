//! Crate-level error type and `Result` alias for stable, structured error
//! handling. Converts the typed errors of each stage — parsing, resolution,
//! conversion, validation — plus underlying I/O and GDAL failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] crate::core::grammar::ParseError),

    #[error("resolution error: {0}")]
    Resolution(#[from] crate::core::inventory::ResolutionError),

    #[error("conversion error: {0}")]
    Conversion(#[from] crate::io::cog::ConversionError),

    #[error("validation error: {0}")]
    Validation(#[from] crate::stac::item::ValidationError),

    #[error("raster header error: {0}")]
    Header(#[from] crate::io::gdal::HeaderError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
