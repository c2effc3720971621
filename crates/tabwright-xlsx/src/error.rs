//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while writing an XLSX package
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Moving the finished temp file into place failed
    #[error("Could not publish {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The workbook has not been finalized
    #[error("Workbook must be finalized before it is written")]
    NotFinalized,

    /// Two parts with the same name were added to a package
    #[error("Duplicate package part: {0}")]
    DuplicatePart(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] tabwright_core::Error),
}
