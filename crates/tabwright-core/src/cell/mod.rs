//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellData`] - Complete cell data including value and style
//! - [`CellGrid`] - Sparse per-worksheet cell storage
//! - [`StringTable`] - Shared string deduplication

mod address;
mod grid;
mod strings;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use grid::{CellData, CellGrid, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};
pub use strings::StringTable;
pub use value::CellValue;
