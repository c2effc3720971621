//! # tabwright
//!
//! A Rust library for writing spreadsheets (XLSX) from an in-memory
//! document model.
//!
//! ## Features
//!
//! - Numbers, strings, booleans, blanks and formulas
//! - Array formulas over cell ranges
//! - Cell formatting (fonts, fills, borders, alignment, number formats)
//! - Shared strings and style deduplication
//! - Deterministic output, written atomically
//!
//! ## Example
//!
//! ```rust,no_run
//! use tabwright::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! workbook.add_worksheet(None)?;
//!
//! let mut bold = workbook.add_format();
//! bold.set_bold(true);
//!
//! let mut sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.write_string(0, 0, "Total", Some(&bold))?;
//! sheet.write_number(0, 1, 42.0, None)?;
//! sheet.write_formula(0, 2, "=B1*2", None)?;
//!
//! workbook.close("report.xlsx")?;
//! # Ok::<(), tabwright::Error>(())
//! ```

pub mod prelude;

use std::path::Path;

use log::debug;

// Re-export core types
pub use tabwright_core::{
    // Style types
    Alignment,
    BorderEdge,
    BorderLineStyle,
    BorderStyle,
    // Cell types
    CellAddress,
    CellData,
    CellRange,
    CellValue,
    Color,
    DocProperties,
    // Error types
    Error,
    FillStyle,
    FontScript,
    FontStyle,
    Format,
    HorizontalAlignment,
    NumberFormat,
    PatternType,
    Protection,
    Result,
    StringTable,
    StyleTable,
    Underline,
    VerticalAlignment,
    // Main types
    Workbook,
    WorkbookSettings,
    Worksheet,
    WorksheetMut,
    // Constants
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
    MAX_STRING_LEN,
};

// Re-export I/O types
pub use tabwright_xlsx::{Package, Part, XlsxError, XlsxWriter};

/// Extension trait for Workbook to add file output
pub trait WorkbookExt {
    /// Finalize the workbook and write it to `path`
    ///
    /// After this call every mutator fails with [`Error::AlreadyClosed`],
    /// including when writing the file failed.
    fn close<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;

    /// Write an already finalized workbook to `path`
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Serialize an already finalized workbook into memory
    fn to_xlsx_bytes(&self) -> Result<Vec<u8>>;
}

impl WorkbookExt for Workbook {
    fn close<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.save(path)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        XlsxWriter::write_file(self, path).map_err(Error::serialization)?;
        debug!("saved workbook to {}", path.display());
        Ok(())
    }

    fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        XlsxWriter::to_bytes(self).map_err(Error::serialization)
    }
}
