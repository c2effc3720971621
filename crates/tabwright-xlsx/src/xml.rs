//! Small helpers for building SpreadsheetML markup

use std::borrow::Cow;
use std::fmt::Write;

use quick_xml::escape::{escape, partial_escape};

pub(crate) const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

pub(crate) const SPREADSHEETML_NS: &str =
    "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

pub(crate) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Escape text for an attribute value
pub(crate) fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Escape element text (`<`, `>` and `&` only)
pub(crate) fn escape_text(s: &str) -> Cow<'_, str> {
    partial_escape(s)
}

/// Escape string cell content
///
/// Control characters other than tab, line feed and carriage return cannot
/// appear in XML 1.0, so they are written in the `_xHHHH_` form spreadsheet
/// readers decode.
pub(crate) fn escape_cell_text(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_restricted_char) {
        return escape_text(s);
    }

    let mut encoded = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if is_restricted_char(c) {
            let _ = write!(encoded, "_x{:04X}_", c as u32);
        } else {
            encoded.push(c);
        }
    }
    Cow::Owned(escape_text(&encoded).into_owned())
}

/// Text that readers would trim unless told to preserve it
pub(crate) fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

/// Magnitudes outside this range are written in exponent form
const PLAIN_NUMBER_RANGE: std::ops::Range<f64> = 1e-5..1e16;

/// Shortest text that round-trips an `f64`
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Collapses -0 as well
        return "0".to_string();
    }
    if PLAIN_NUMBER_RANGE.contains(&n.abs()) {
        n.to_string()
    } else {
        format!("{:E}", n)
    }
}

fn is_restricted_char(c: char) -> bool {
    c.is_control() && (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r')
}
