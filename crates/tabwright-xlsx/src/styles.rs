//! XLSX styles (styles.xml) writer
//!
//! Every entry of the workbook's style table becomes one `cellXfs` record at
//! the same index, so cell `s` attributes are the style table indices
//! unchanged. Fonts, fills, borders and custom number formats are
//! deduplicated into their own lists in first-use order.

use std::fmt::Write;

use ahash::AHashMap;

use tabwright_core::style::{
    Alignment, BorderEdge, BorderStyle, Color, FillStyle, FontScript, FontStyle, Format,
    NumberFormat, PatternType, Protection, StyleTable, Underline, FIRST_CUSTOM_FORMAT_ID,
};

use crate::xml::{escape_attr, SPREADSHEETML_NS, XML_DECLARATION};

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    num_fmt_id: u32,
}

/// Component tables resolved from a [`StyleTable`]
#[derive(Debug)]
pub(crate) struct XlsxStyleTable<'a> {
    formats: Vec<&'a Format>,
    resolved: Vec<ResolvedXfIds>,
    fonts: Vec<&'a FontStyle>,
    fills: Vec<FillStyle>,
    borders: Vec<&'a BorderStyle>,
    num_fmts: Vec<(u32, &'a str)>,
}

impl<'a> XlsxStyleTable<'a> {
    pub(crate) fn build(table: &'a StyleTable) -> Self {
        let mut font_ids: AHashMap<&FontStyle, u32> = AHashMap::new();
        let mut fonts: Vec<&FontStyle> = Vec::new();

        // The first two fills are reserved: none and gray125
        let mut fill_ids: AHashMap<FillStyle, u32> = AHashMap::new();
        let mut fills: Vec<FillStyle> = vec![
            FillStyle::None,
            FillStyle::pattern(PatternType::Gray125, Color::Auto, Color::Auto),
        ];
        fill_ids.insert(FillStyle::None, 0);

        let mut border_ids: AHashMap<&BorderStyle, u32> = AHashMap::new();
        let mut borders: Vec<&BorderStyle> = Vec::new();

        let mut num_fmt_ids: AHashMap<&str, u32> = AHashMap::new();
        let mut num_fmts: Vec<(u32, &str)> = Vec::new();

        let mut formats = Vec::with_capacity(table.len());
        let mut resolved = Vec::with_capacity(table.len());

        for (_, format) in table.iter() {
            let font_id = *font_ids.entry(&format.font).or_insert_with(|| {
                fonts.push(&format.font);
                fonts.len() as u32 - 1
            });

            let fill_id = *fill_ids.entry(format.fill.clone()).or_insert_with(|| {
                fills.push(format.fill.clone());
                fills.len() as u32 - 1
            });

            let border_id = *border_ids.entry(&format.border).or_insert_with(|| {
                borders.push(&format.border);
                borders.len() as u32 - 1
            });

            let num_fmt_id = match &format.number_format {
                NumberFormat::General => 0,
                NumberFormat::BuiltIn(id) => *id,
                NumberFormat::Custom(code) => {
                    *num_fmt_ids.entry(code.as_str()).or_insert_with(|| {
                        let id = FIRST_CUSTOM_FORMAT_ID + num_fmts.len() as u32;
                        num_fmts.push((id, code.as_str()));
                        id
                    })
                }
            };

            formats.push(format);
            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
            });
        }

        Self {
            formats,
            resolved,
            fonts,
            fills,
            borders,
            num_fmts,
        }
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        let _ = write!(xml, "<styleSheet xmlns=\"{}\">", SPREADSHEETML_NS);

        if !self.num_fmts.is_empty() {
            let _ = write!(xml, "<numFmts count=\"{}\">", self.num_fmts.len());
            for (id, code) in &self.num_fmts {
                let _ = write!(
                    xml,
                    "<numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_attr(code)
                );
            }
            xml.push_str("</numFmts>");
        }

        let _ = write!(xml, "<fonts count=\"{}\">", self.fonts.len());
        for font in &self.fonts {
            write_font(&mut xml, font);
        }
        xml.push_str("</fonts>");

        let _ = write!(xml, "<fills count=\"{}\">", self.fills.len());
        for fill in &self.fills {
            write_fill(&mut xml, fill);
        }
        xml.push_str("</fills>");

        let _ = write!(xml, "<borders count=\"{}\">", self.borders.len());
        for border in &self.borders {
            write_border(&mut xml, border);
        }
        xml.push_str("</borders>");

        xml.push_str(
            "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>",
        );

        let _ = write!(xml, "<cellXfs count=\"{}\">", self.formats.len());
        for (format, ids) in self.formats.iter().zip(&self.resolved) {
            write_xf(&mut xml, format, *ids);
        }
        xml.push_str("</cellXfs>");

        xml.push_str(
            "<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>",
        );
        xml.push_str("<dxfs count=\"0\"/>");
        xml.push_str(
            "<tableStyles count=\"0\" defaultTableStyle=\"TableStyleMedium9\" defaultPivotStyle=\"PivotStyleLight16\"/>",
        );
        xml.push_str("</styleSheet>\n");
        xml
    }
}

/// `<tag .../>` for a color; `Auto` maps to the system foreground index
fn write_color(xml: &mut String, tag: &str, color: &Color) {
    let _ = match color {
        Color::Auto => write!(xml, "<{} indexed=\"64\"/>", tag),
        Color::Rgb { .. } | Color::Argb { .. } => write!(
            xml,
            "<{} rgb=\"{}\"/>",
            tag,
            color.to_argb_hex().unwrap_or_default()
        ),
        Color::Indexed(i) => write!(xml, "<{} indexed=\"{}\"/>", tag, i),
        Color::Theme { index, tint: 0 } => write!(xml, "<{} theme=\"{}\"/>", tag, index),
        Color::Theme { index, tint } => write!(
            xml,
            "<{} theme=\"{}\" tint=\"{}\"/>",
            tag,
            index,
            f64::from(*tint) / 100.0
        ),
    };
}

fn write_font(xml: &mut String, font: &FontStyle) {
    xml.push_str("<font>");
    if font.bold {
        xml.push_str("<b/>");
    }
    if font.italic {
        xml.push_str("<i/>");
    }
    if font.strikethrough {
        xml.push_str("<strike/>");
    }
    match font.underline {
        Underline::None => {}
        other => match other.as_xml_val() {
            Some(val) => {
                let _ = write!(xml, "<u val=\"{}\"/>", val);
            }
            None => xml.push_str("<u/>"),
        },
    }
    match font.script {
        FontScript::Baseline => {}
        FontScript::Superscript => xml.push_str("<vertAlign val=\"superscript\"/>"),
        FontScript::Subscript => xml.push_str("<vertAlign val=\"subscript\"/>"),
    }
    let size = if font.size.is_finite() && font.size > 0.0 {
        font.size
    } else {
        FontStyle::default().size
    };
    let _ = write!(xml, "<sz val=\"{}\"/>", size);
    if !font.color.is_auto() {
        write_color(xml, "color", &font.color);
    }
    let _ = write!(xml, "<name val=\"{}\"/>", escape_attr(&font.name));
    xml.push_str("<family val=\"2\"/></font>");
}

fn write_fill(xml: &mut String, fill: &FillStyle) {
    match fill {
        FillStyle::None => xml.push_str("<fill><patternFill patternType=\"none\"/></fill>"),
        FillStyle::Solid { color } => {
            xml.push_str("<fill><patternFill patternType=\"solid\">");
            write_color(xml, "fgColor", color);
            xml.push_str("<bgColor indexed=\"64\"/></patternFill></fill>");
        }
        FillStyle::Pattern {
            pattern,
            foreground,
            background,
        } => {
            let _ = write!(
                xml,
                "<fill><patternFill patternType=\"{}\"",
                pattern.as_xml_str()
            );
            if foreground.is_auto() && background.is_auto() {
                xml.push_str("/></fill>");
                return;
            }
            xml.push('>');
            if !foreground.is_auto() {
                write_color(xml, "fgColor", foreground);
            }
            if !background.is_auto() {
                write_color(xml, "bgColor", background);
            }
            xml.push_str("</patternFill></fill>");
        }
    }
}

fn write_border_edge(xml: &mut String, tag: &str, edge: &Option<BorderEdge>) {
    match edge.as_ref().and_then(|e| Some((e.style.as_xml_str()?, e.color))) {
        None => {
            let _ = write!(xml, "<{}/>", tag);
        }
        Some((style, color)) => {
            let _ = write!(xml, "<{} style=\"{}\">", tag, style);
            write_color(xml, "color", &color);
            let _ = write!(xml, "</{}>", tag);
        }
    }
}

fn write_border(xml: &mut String, border: &BorderStyle) {
    xml.push_str("<border>");
    write_border_edge(xml, "left", &border.left);
    write_border_edge(xml, "right", &border.right);
    write_border_edge(xml, "top", &border.top);
    write_border_edge(xml, "bottom", &border.bottom);
    xml.push_str("<diagonal/></border>");
}

fn write_alignment(xml: &mut String, al: &Alignment) {
    let default = Alignment::default();
    xml.push_str("<alignment");
    if al.horizontal != default.horizontal {
        let _ = write!(xml, " horizontal=\"{}\"", al.horizontal.as_xml_str());
    }
    if al.vertical != default.vertical {
        let _ = write!(xml, " vertical=\"{}\"", al.vertical.as_xml_str());
    }
    if al.rotation != 0 {
        // Negative angles are stored as 90 + |angle|
        let rotation = if al.rotation < 0 {
            90 - al.rotation
        } else {
            al.rotation
        };
        let _ = write!(xml, " textRotation=\"{}\"", rotation);
    }
    if al.wrap_text {
        xml.push_str(" wrapText=\"1\"");
    }
    if al.indent != 0 {
        let _ = write!(xml, " indent=\"{}\"", al.indent);
    }
    if al.shrink_to_fit {
        xml.push_str(" shrinkToFit=\"1\"");
    }
    xml.push_str("/>");
}

fn write_protection(xml: &mut String, p: &Protection) {
    xml.push_str("<protection");
    if !p.locked {
        xml.push_str(" locked=\"0\"");
    }
    if p.hidden {
        xml.push_str(" hidden=\"1\"");
    }
    xml.push_str("/>");
}

fn write_xf(xml: &mut String, format: &Format, ids: ResolvedXfIds) {
    let _ = write!(
        xml,
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"",
        ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id
    );
    if ids.num_fmt_id != 0 {
        xml.push_str(" applyNumberFormat=\"1\"");
    }
    if ids.font_id != 0 {
        xml.push_str(" applyFont=\"1\"");
    }
    if ids.fill_id != 0 {
        xml.push_str(" applyFill=\"1\"");
    }
    if ids.border_id != 0 {
        xml.push_str(" applyBorder=\"1\"");
    }

    let has_alignment = !format.alignment.is_default();
    let has_protection = format.protection != Protection::default();
    if has_alignment {
        xml.push_str(" applyAlignment=\"1\"");
    }
    if has_protection {
        xml.push_str(" applyProtection=\"1\"");
    }

    if !has_alignment && !has_protection {
        xml.push_str("/>");
        return;
    }

    xml.push('>');
    if has_alignment {
        write_alignment(xml, &format.alignment);
    }
    if has_protection {
        write_protection(xml, &format.protection);
    }
    xml.push_str("</xf>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabwright_core::style::{BorderLineStyle, HorizontalAlignment};

    fn styles_xml(table: &StyleTable) -> String {
        XlsxStyleTable::build(table).to_styles_xml()
    }

    #[test]
    fn test_default_stylesheet() {
        let xml = styles_xml(&StyleTable::new());

        assert!(xml.contains("<fonts count=\"1\"><font><sz val=\"11\"/><name val=\"Calibri\"/><family val=\"2\"/></font></fonts>"));
        assert!(xml.contains("<fills count=\"2\"><fill><patternFill patternType=\"none\"/></fill><fill><patternFill patternType=\"gray125\"/></fill></fills>"));
        assert!(xml.contains("<borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"));
        assert!(xml.contains("<cellXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/></cellXfs>"));
        assert!(!xml.contains("<numFmts"));
    }

    #[test]
    fn test_bold_format_gets_one_xf() {
        let mut table = StyleTable::new();
        let mut bold = Format::new();
        bold.set_bold(true);
        table.intern(&bold);

        let xml = styles_xml(&table);
        assert!(xml.contains("<font><b/><sz val=\"11\"/><name val=\"Calibri\"/><family val=\"2\"/></font>"));
        assert!(xml.contains(
            "<cellXfs count=\"2\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/><xf numFmtId=\"0\" fontId=\"1\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyFont=\"1\"/></cellXfs>"
        ));
    }

    #[test]
    fn test_components_are_shared() {
        let mut table = StyleTable::new();

        let mut red_fill = Format::new();
        red_fill.set_bg_color(Color::RED);
        let mut red_fill_bold = red_fill.clone();
        red_fill_bold.set_bold(true);
        let mut bordered = Format::new();
        bordered.set_border(BorderLineStyle::Thin);

        table.intern(&red_fill);
        table.intern(&red_fill_bold);
        table.intern(&bordered);

        let xml = styles_xml(&table);
        assert!(xml.contains("<fills count=\"3\">"));
        assert!(xml.contains("<patternFill patternType=\"solid\"><fgColor rgb=\"FFFF0000\"/><bgColor indexed=\"64\"/></patternFill>"));
        assert!(xml.contains("<fonts count=\"2\">"));
        assert!(xml.contains("<borders count=\"2\">"));
        assert!(xml.contains("<left style=\"thin\"><color indexed=\"64\"/></left>"));
        assert!(xml.contains("<cellXfs count=\"4\">"));
    }

    #[test]
    fn test_number_formats() {
        let mut table = StyleTable::new();

        let mut builtin = Format::new();
        builtin.set_num_format("0.00");
        let mut custom = Format::new();
        custom.set_num_format("0.000\"<x>\"");
        let mut custom_bold = custom.clone();
        custom_bold.set_bold(true);

        table.intern(&builtin);
        table.intern(&custom);
        table.intern(&custom_bold);

        let xml = styles_xml(&table);
        assert!(xml.contains(
            "<numFmts count=\"1\"><numFmt numFmtId=\"164\" formatCode=\"0.000&quot;&lt;x&gt;&quot;\"/></numFmts>"
        ));
        assert!(xml.contains("<xf numFmtId=\"2\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyNumberFormat=\"1\"/>"));
        assert_eq!(xml.matches("numFmtId=\"164\"").count(), 3);
    }

    #[test]
    fn test_alignment_and_protection() {
        let mut table = StyleTable::new();
        let mut format = Format::new();
        format
            .set_align(HorizontalAlignment::Center)
            .set_text_wrap(true)
            .set_rotation(-45)
            .set_unlocked();
        table.intern(&format);

        let xml = styles_xml(&table);
        assert!(xml.contains(
            "applyAlignment=\"1\" applyProtection=\"1\"><alignment horizontal=\"center\" textRotation=\"135\" wrapText=\"1\"/><protection locked=\"0\"/></xf>"
        ));
    }

    #[test]
    fn test_unwritable_font_size_falls_back_to_default() {
        let mut table = StyleTable::new();
        let mut format = Format::new();
        format.set_bold(true);
        format.font.size = f64::NAN;
        table.intern(&format);

        let xml = styles_xml(&table);
        assert!(!xml.contains("NaN"));
        assert!(xml.contains("<font><b/><sz val=\"11\"/>"));
    }
}
