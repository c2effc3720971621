//! Cell value types

use super::CellAddress;
use super::CellRange;

/// Represents the value stored in a cell
///
/// Text is not stored inline: string cells hold an index into the workbook's
/// [`StringTable`](super::StringTable).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value), possibly carrying a style
    #[default]
    Blank,

    /// Numeric value (all numbers stored as f64, including dates)
    Number(f64),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Shared string reference
    String(u32),

    /// Formula text without the leading `=`
    Formula {
        text: String,
        /// Cached result written alongside the formula
        result: Option<f64>,
    },

    /// Top-left cell of an array formula
    ArrayFormula {
        /// Formula text without braces or the leading `=`
        text: String,
        /// Full region the formula applies to
        range: CellRange,
        result: Option<f64>,
    },

    /// Non-anchor cell of an array formula region
    ArrayMember {
        /// Top-left cell holding the formula
        anchor: CellAddress,
    },
}

impl CellValue {
    /// Check if the cell is blank
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Check if the cell contains a formula (normal or array anchor)
    pub fn is_formula(&self) -> bool {
        matches!(
            self,
            CellValue::Formula { .. } | CellValue::ArrayFormula { .. }
        )
    }

    /// Check if the cell belongs to an array formula region
    pub fn is_array_part(&self) -> bool {
        matches!(
            self,
            CellValue::ArrayFormula { .. } | CellValue::ArrayMember { .. }
        )
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Formula { result, .. } | CellValue::ArrayFormula { result, .. } => *result,
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Shared string index, if this is a string cell
    pub fn string_index(&self) -> Option<u32> {
        match self {
            CellValue::String(idx) => Some(*idx),
            _ => None,
        }
    }

    /// Get the formula text if this is a formula or array anchor cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula { text, .. } | CellValue::ArrayFormula { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Region of the array formula this cell anchors
    pub fn array_range(&self) -> Option<CellRange> {
        match self {
            CellValue::ArrayFormula { range, .. } => Some(*range),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Blank => "blank",
            CellValue::Number(_) => "number",
            CellValue::Boolean(_) => "boolean",
            CellValue::String(_) => "string",
            CellValue::Formula { .. } => "formula",
            CellValue::ArrayFormula { .. } => "array_formula",
            CellValue::ArrayMember { .. } => "array_member",
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from(2.5), CellValue::Number(2.5));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));
        assert_eq!(CellValue::default(), CellValue::Blank);
    }

    #[test]
    fn test_cell_value_accessors() {
        let formula = CellValue::Formula {
            text: "A1+1".into(),
            result: Some(3.0),
        };
        assert_eq!(formula.as_number(), Some(3.0));
        assert_eq!(formula.formula_text(), Some("A1+1"));
        assert!(formula.is_formula());
        assert!(!formula.is_array_part());

        let range = CellRange::parse("A1:A3").unwrap();
        let anchor = CellValue::ArrayFormula {
            text: "SUM(B1:C1*B2:C2)".into(),
            range,
            result: None,
        };
        assert_eq!(anchor.array_range(), Some(range));
        assert!(anchor.is_array_part());

        let member = CellValue::ArrayMember {
            anchor: CellAddress::new(0, 0),
        };
        assert!(member.is_array_part());
        assert!(!member.is_formula());
        assert_eq!(member.type_name(), "array_member");

        assert_eq!(CellValue::String(4).string_index(), Some(4));
        assert_eq!(CellValue::Boolean(false).as_bool(), Some(false));
        assert_eq!(CellValue::Blank.as_number(), None);
    }
}
