//! # tabwright-xlsx
//!
//! XLSX (Office Open XML) writer for tabwright.
//!
//! [`XlsxWriter`] turns a finalized [`tabwright_core::Workbook`] into an
//! ordered [`Package`] of parts and writes it as a zip archive.

pub mod error;
pub mod package;
pub mod writer;

mod styles;
mod xml;

pub use error::{XlsxError, XlsxResult};
pub use package::{Package, Part};
pub use writer::XlsxWriter;
