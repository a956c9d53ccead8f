//! Error types for tessel.

use std::io;

/// Errors produced by tessel.
///
/// Geometric degeneracy (empty targets, transparent slices, undersized
/// rectangles) is never reported here. Only asset loading, configuration and
/// backend faults surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum TesselError {
    #[error("image error: {0}")]
    Image(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("theme error: {0}")]
    Theme(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TesselError>;
