//! Cell formatting types
//!
//! This module contains types for cell formatting:
//! - [`Format`] - Complete cell format
//! - [`StyleTable`] - Deduplicated table of formats in use
//! - [`FontStyle`] - Font settings
//! - [`FillStyle`] - Background fill
//! - [`BorderStyle`] - Cell borders
//! - [`Alignment`] - Text alignment
//! - [`Color`] - Color representation

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod table;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::Color;
pub use fill::{FillStyle, PatternType};
pub use font::{FontScript, FontStyle, Underline};
pub use number_format::{NumberFormat, FIRST_CUSTOM_FORMAT_ID};
pub use table::StyleTable;

/// Complete cell format
///
/// A `Format` is a plain value: it is obtained from
/// [`Workbook::add_format`](crate::Workbook::add_format), adjusted with the
/// `set_*` methods, and passed by reference to cell writes. The workbook's
/// [`StyleTable`] assigns it an index the first time a cell uses it, so two
/// formats with equal attributes share one entry.
///
/// ```
/// use tabwright_core::{Color, Format, HorizontalAlignment};
///
/// let mut header = Format::new();
/// header
///     .set_bold(true)
///     .set_bg_color(Color::rgb(0xDD, 0xEE, 0xFF))
///     .set_align(HorizontalAlignment::Center);
///
/// assert!(header.font.bold);
/// assert_ne!(header, Format::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Format {
    pub font: FontStyle,
    pub fill: FillStyle,
    pub border: BorderStyle,
    pub alignment: Alignment,
    pub number_format: NumberFormat,
    pub protection: Protection,
}

impl Format {
    /// Create a new default format
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the format is indistinguishable from the default
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn set_bold(&mut self, bold: bool) -> &mut Self {
        self.font.bold = bold;
        self
    }

    pub fn set_italic(&mut self, italic: bool) -> &mut Self {
        self.font.italic = italic;
        self
    }

    pub fn set_underline(&mut self, underline: Underline) -> &mut Self {
        self.font.underline = underline;
        self
    }

    pub fn set_font_strikeout(&mut self, strikeout: bool) -> &mut Self {
        self.font.strikethrough = strikeout;
        self
    }

    pub fn set_font_script(&mut self, script: FontScript) -> &mut Self {
        self.font.script = script;
        self
    }

    pub fn set_font_name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.font.name = name.into();
        self
    }

    /// Set font size in points; sizes that are not finite and positive are
    /// ignored
    pub fn set_font_size(&mut self, size: f64) -> &mut Self {
        if size.is_finite() && size > 0.0 {
            self.font.size = size;
        }
        self
    }

    pub fn set_font_color(&mut self, color: Color) -> &mut Self {
        self.font.color = color;
        self
    }

    /// Set the number format from a format code such as `"0.00%"`
    ///
    /// Codes matching a built-in format use its reserved id.
    pub fn set_num_format(&mut self, code: &str) -> &mut Self {
        self.number_format = NumberFormat::from_code(code);
        self
    }

    /// Set a built-in number format by id
    pub fn set_num_format_index(&mut self, id: u32) -> &mut Self {
        self.number_format = NumberFormat::from_id(id);
        self
    }

    /// Solid background fill
    pub fn set_bg_color(&mut self, color: Color) -> &mut Self {
        self.fill = FillStyle::solid(color);
        self
    }

    pub fn set_fill(&mut self, fill: FillStyle) -> &mut Self {
        self.fill = fill;
        self
    }

    /// Same line style on all four edges
    pub fn set_border(&mut self, style: BorderLineStyle) -> &mut Self {
        self.border = BorderStyle::all(style, Color::Auto);
        self
    }

    pub fn set_border_left(&mut self, style: BorderLineStyle) -> &mut Self {
        self.border.left = BorderEdge::new(style, Color::Auto).into_edge();
        self
    }

    pub fn set_border_right(&mut self, style: BorderLineStyle) -> &mut Self {
        self.border.right = BorderEdge::new(style, Color::Auto).into_edge();
        self
    }

    pub fn set_border_top(&mut self, style: BorderLineStyle) -> &mut Self {
        self.border.top = BorderEdge::new(style, Color::Auto).into_edge();
        self
    }

    pub fn set_border_bottom(&mut self, style: BorderLineStyle) -> &mut Self {
        self.border.bottom = BorderEdge::new(style, Color::Auto).into_edge();
        self
    }

    /// Recolor every edge that currently has a line
    pub fn set_border_color(&mut self, color: Color) -> &mut Self {
        for edge in [
            &mut self.border.left,
            &mut self.border.right,
            &mut self.border.top,
            &mut self.border.bottom,
        ]
        .into_iter()
        .flatten()
        {
            edge.color = color;
        }
        self
    }

    pub fn set_align(&mut self, align: HorizontalAlignment) -> &mut Self {
        self.alignment.horizontal = align;
        self
    }

    pub fn set_vertical_align(&mut self, align: VerticalAlignment) -> &mut Self {
        self.alignment.vertical = align;
        self
    }

    pub fn set_text_wrap(&mut self, wrap: bool) -> &mut Self {
        self.alignment.wrap_text = wrap;
        self
    }

    pub fn set_shrink(&mut self, shrink: bool) -> &mut Self {
        self.alignment.shrink_to_fit = shrink;
        self
    }

    pub fn set_indent(&mut self, level: u8) -> &mut Self {
        self.alignment.indent = level;
        self
    }

    /// Rotation in degrees, clamped to -90..=90; 270 stacks text vertically
    pub fn set_rotation(&mut self, degrees: i16) -> &mut Self {
        self.alignment.rotation = if degrees == 270 {
            255
        } else {
            degrees.clamp(-90, 90)
        };
        self
    }

    pub fn set_unlocked(&mut self) -> &mut Self {
        self.protection.locked = false;
        self
    }

    /// Hide formulas when the sheet is protected
    pub fn set_hidden(&mut self) -> &mut Self {
        self.protection.hidden = true;
        self
    }
}

/// Cell protection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Protection {
    /// Cell is locked (protected when sheet is protected)
    pub locked: bool,
    /// Formula is hidden when sheet is protected
    pub hidden: bool,
}

impl Default for Protection {
    fn default() -> Self {
        Self {
            locked: true,
            hidden: false,
        }
    }
}
