//! # tabwright-core
//!
//! Core document model for the tabwright spreadsheet writer.
//!
//! This crate provides the types a workbook is built from before it is
//! serialized:
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing
//! - [`CellValue`] - The closed set of values a cell can hold
//! - [`Format`] and [`StyleTable`] - Cell formatting and its deduplication
//! - [`StringTable`] - Shared string deduplication
//! - [`Workbook`], [`Worksheet`] - The document itself
//!
//! ## Example
//!
//! ```rust
//! use tabwright_core::{CellRange, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let index = workbook.add_worksheet(None).unwrap();
//! let mut bold = workbook.add_format();
//! bold.set_bold(true);
//!
//! let mut sheet = workbook.worksheet_mut(index).unwrap();
//! sheet.write_number(0, 1, 0.0, None).unwrap();
//! sheet.write_string(0, 2, "Hello", None).unwrap();
//!
//! let range = CellRange::parse("A1:A3").unwrap();
//! sheet
//!     .write_array_formula(range, "{=SUM(B1:C1*B2:C2)}", Some(&bold))
//!     .unwrap();
//!
//! workbook.finalize().unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod formula;
pub mod properties;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellGrid, CellRange, CellValue, StringTable};
pub use error::{Error, Result};
pub use properties::DocProperties;
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::{Worksheet, WorksheetMut};

// Re-export all style types for convenience
pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontScript, FontStyle,
    Format, HorizontalAlignment, NumberFormat, PatternType, Protection, StyleTable, Underline,
    VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum number of characters in a string cell
pub const MAX_STRING_LEN: usize = 32_767;
