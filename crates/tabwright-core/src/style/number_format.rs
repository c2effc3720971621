//! Number format types

/// Built-in format codes, indexed by their reserved id
const BUILTIN_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "m/d/yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mm:ss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

/// First id available to custom format codes
pub const FIRST_CUSTOM_FORMAT_ID: u32 = 164;

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format string
    Custom(String),
}

impl NumberFormat {
    /// 1 - 0
    pub const ID_NUMBER_INT: u32 = 1;
    /// 2 - 0.00
    pub const ID_NUMBER_DEC2: u32 = 2;
    /// 9 - 0%
    pub const ID_PERCENT_INT: u32 = 9;
    /// 14 - m/d/yy
    pub const ID_DATE_SHORT: u32 = 14;
    /// 49 - @
    pub const ID_TEXT: u32 = 49;

    /// Create a number format from a format code
    ///
    /// Codes that match a built-in format resolve to its reserved id, so
    /// `"0.00"` and `NumberFormat::BuiltIn(2)` are the same format.
    pub fn from_code(code: &str) -> Self {
        if code.is_empty() || code == "General" {
            return NumberFormat::General;
        }
        match BUILTIN_FORMATS.iter().find(|(_, c)| *c == code) {
            Some(&(id, _)) => NumberFormat::BuiltIn(id),
            None => NumberFormat::Custom(code.to_string()),
        }
    }

    /// Create a built-in format by ID
    pub fn from_id(id: u32) -> Self {
        if id == 0 {
            NumberFormat::General
        } else {
            NumberFormat::BuiltIn(id)
        }
    }

    /// Check if this is the general format
    pub fn is_general(&self) -> bool {
        matches!(self, NumberFormat::General)
    }

    /// Get the format code, if one is known
    pub fn code(&self) -> Option<&str> {
        match self {
            NumberFormat::General => Some("General"),
            NumberFormat::BuiltIn(id) => BUILTIN_FORMATS
                .iter()
                .find(|(i, _)| i == id)
                .map(|(_, code)| *code),
            NumberFormat::Custom(s) => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_builtin_ids() {
        assert_eq!(NumberFormat::from_code("0.00"), NumberFormat::BuiltIn(2));
        assert_eq!(NumberFormat::from_code("@"), NumberFormat::BuiltIn(49));
        assert_eq!(NumberFormat::from_code("General"), NumberFormat::General);
        assert_eq!(NumberFormat::from_code(""), NumberFormat::General);
        assert_eq!(
            NumberFormat::from_code("0.000"),
            NumberFormat::Custom("0.000".into())
        );
    }

    #[test]
    fn test_code_lookup() {
        assert_eq!(NumberFormat::from_id(9).code(), Some("0%"));
        assert_eq!(NumberFormat::from_id(0), NumberFormat::General);
        // Locale-dependent ids have no fixed code
        assert_eq!(NumberFormat::BuiltIn(27).code(), None);
    }
}
