//! Error types for tabwright-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range cell/range reference text
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Row or column beyond the worksheet limits
    #[error("Cell (row {row}, col {col}) out of bounds (max row: {max_row}, max col: {max_col})")]
    OutOfBounds {
        row: u32,
        col: u16,
        max_row: u32,
        max_col: u16,
    },

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Array formula range intersects a different array formula
    #[error("Array formula range {range} overlaps existing array formula {existing}")]
    OverlappingArrayFormula { range: String, existing: String },

    /// Plain write into a cell owned by a multi-cell array formula
    #[error("Cell {cell} is part of array formula {range}")]
    PartOfArrayFormula { cell: String, range: String },

    /// Formula text that cannot be stored
    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    /// Value that has no representation in the file format
    #[error("Unsupported cell value: {0}")]
    UnsupportedValue(String),

    /// String longer than a cell can hold
    #[error("String of {0} characters exceeds the cell limit of 32767")]
    StringTooLong(usize),

    /// Mutation attempted after the workbook was finalized
    #[error("Workbook is closed")]
    AlreadyClosed,

    /// Packaging or I/O failure while writing the workbook
    #[error("Serialization failed: {0}")]
    Serialization(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a writer-side failure
    pub fn serialization<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Serialization(Box::new(err))
    }
}
