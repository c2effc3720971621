//! Formula text normalization
//!
//! Formulas are stored as text only; nothing here parses or evaluates them.
//! Callers may pass formulas the way they would type them (`=A1+1`,
//! `{=SUM(A1:A3*B1:B3)}`); the stored form drops the decoration.

use crate::error::{Error, Result};

/// Normalize a regular formula: one leading `=` is removed
///
/// ```
/// use tabwright_core::formula::normalize_formula;
///
/// assert_eq!(normalize_formula("=A1+B1").unwrap(), "A1+B1");
/// assert_eq!(normalize_formula("A1+B1").unwrap(), "A1+B1");
/// assert!(normalize_formula("=").is_err());
/// ```
pub fn normalize_formula(text: &str) -> Result<String> {
    let body = text.strip_prefix('=').unwrap_or(text);
    non_empty(body, text)
}

/// Normalize an array formula: one matching `{`/`}` pair, then one leading
/// `=`, are removed
///
/// ```
/// use tabwright_core::formula::normalize_array_formula;
///
/// assert_eq!(
///     normalize_array_formula("{=SUM(B1:C1*B2:C2)}").unwrap(),
///     "SUM(B1:C1*B2:C2)"
/// );
/// assert_eq!(normalize_array_formula("=TRANSPOSE(A1:B2)").unwrap(), "TRANSPOSE(A1:B2)");
/// ```
pub fn normalize_array_formula(text: &str) -> Result<String> {
    let unbraced = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .unwrap_or(text);
    let body = unbraced.strip_prefix('=').unwrap_or(unbraced);
    non_empty(body, text)
}

fn non_empty(body: &str, input: &str) -> Result<String> {
    if body.trim().is_empty() {
        return Err(Error::InvalidFormula(format!(
            "empty formula '{}'",
            input
        )));
    }
    Ok(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_equals_is_removed() {
        assert_eq!(normalize_formula("==A1").unwrap(), "=A1");
    }

    #[test]
    fn test_unbalanced_braces_are_kept() {
        assert_eq!(normalize_array_formula("{=A1").unwrap(), "{=A1");
        assert_eq!(normalize_array_formula("=A1}").unwrap(), "A1}");
    }

    #[test]
    fn test_single_brace_pair_is_removed() {
        assert_eq!(normalize_array_formula("{{=A1}}").unwrap(), "{=A1}");
        assert_eq!(normalize_array_formula("{A1:A3*2}").unwrap(), "A1:A3*2");
    }

    #[test]
    fn test_empty_formulas_rejected() {
        for text in ["", "=", "{}", "{=}", "  ", "= "] {
            assert!(
                matches!(normalize_array_formula(text), Err(Error::InvalidFormula(_))),
                "{:?} should be rejected",
                text
            );
        }
        assert!(matches!(normalize_formula(""), Err(Error::InvalidFormula(_))));
    }
}
