//! Prelude module - common imports for tabwright users
//!
//! ```rust
//! use tabwright::prelude::*;
//! ```

pub use crate::{
    // Style types
    BorderLineStyle,
    CellRange,
    CellValue,
    Color,
    DocProperties,
    // Error types
    Error,
    Format,
    HorizontalAlignment,
    Result,
    VerticalAlignment,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
};
