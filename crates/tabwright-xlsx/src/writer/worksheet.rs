//! Worksheet part (xl/worksheets/sheetN.xml)

use std::collections::BTreeMap;
use std::fmt::Write;

use tabwright_core::{CellAddress, CellData, CellValue, Worksheet};

use crate::xml::{escape_text, format_number, RELATIONSHIPS_NS, SPREADSHEETML_NS, XML_DECLARATION};

/// Rows share a `spans` hint per block of this many rows
const ROW_BLOCK: u32 = 16;

pub(crate) fn worksheet_xml(sheet: &Worksheet, selected: bool) -> String {
    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(
        xml,
        "<worksheet xmlns=\"{}\" xmlns:r=\"{}\">",
        SPREADSHEETML_NS, RELATIONSHIPS_NS
    );

    let dimension = sheet
        .dimension()
        .map(|range| range.to_a1_string())
        .unwrap_or_else(|| "A1".to_string());
    let _ = write!(xml, "<dimension ref=\"{}\"/>", dimension);

    if selected {
        xml.push_str("<sheetViews><sheetView tabSelected=\"1\" workbookViewId=\"0\"/></sheetViews>");
    } else {
        xml.push_str("<sheetViews><sheetView workbookViewId=\"0\"/></sheetViews>");
    }
    xml.push_str("<sheetFormatPr defaultRowHeight=\"15\"/>");

    write_cols(&mut xml, sheet);
    write_sheet_data(&mut xml, sheet);

    xml.push_str(
        "<pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" header=\"0.3\" footer=\"0.3\"/>",
    );
    xml.push_str("</worksheet>\n");
    xml
}

fn write_cols(xml: &mut String, sheet: &Worksheet) {
    let widths = sheet.custom_column_widths();
    if widths.is_empty() {
        return;
    }

    xml.push_str("<cols>");
    for (&col, &width) in widths {
        let n = u32::from(col) + 1;
        let _ = write!(
            xml,
            "<col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
            n,
            n,
            format_number(width)
        );
    }
    xml.push_str("</cols>");
}

/// Column span (1-based, inclusive) of each 16-row block that has cells
fn block_spans(sheet: &Worksheet) -> BTreeMap<u32, (u32, u32)> {
    let mut spans: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for (row, cells) in sheet.cells().rows() {
        let (Some(&first), Some(&last)) = (cells.keys().next(), cells.keys().next_back()) else {
            continue;
        };
        let (first, last) = (u32::from(first) + 1, u32::from(last) + 1);
        spans
            .entry(row / ROW_BLOCK)
            .and_modify(|(min, max)| {
                *min = (*min).min(first);
                *max = (*max).max(last);
            })
            .or_insert((first, last));
    }
    spans
}

fn write_sheet_data(xml: &mut String, sheet: &Worksheet) {
    let heights = sheet.custom_row_heights();
    let mut rows: BTreeMap<u32, Option<&BTreeMap<u16, CellData>>> =
        heights.keys().map(|&row| (row, None)).collect();
    for (row, cells) in sheet.cells().rows() {
        rows.insert(row, Some(cells));
    }

    if rows.is_empty() {
        xml.push_str("<sheetData/>");
        return;
    }

    let spans = block_spans(sheet);

    xml.push_str("<sheetData>");
    for (row, cells) in rows {
        let _ = write!(xml, "<row r=\"{}\"", row + 1);
        if let Some((min, max)) = spans.get(&(row / ROW_BLOCK)) {
            let _ = write!(xml, " spans=\"{}:{}\"", min, max);
        }
        if let Some(height) = heights.get(&row) {
            let _ = write!(xml, " ht=\"{}\" customHeight=\"1\"", format_number(*height));
        }

        match cells.filter(|cells| !cells.is_empty()) {
            None => xml.push_str("/>"),
            Some(cells) => {
                xml.push('>');
                for (&col, data) in cells {
                    write_cell(xml, row, col, data);
                }
                xml.push_str("</row>");
            }
        }
    }
    xml.push_str("</sheetData>");
}

fn write_cell(xml: &mut String, row: u32, col: u16, data: &CellData) {
    let reference = CellAddress::new(row, col).to_a1_string();
    let _ = write!(xml, "<c r=\"{}\"", reference);
    if data.style_index != 0 {
        let _ = write!(xml, " s=\"{}\"", data.style_index);
    }

    match &data.value {
        CellValue::Blank => xml.push_str("/>"),
        CellValue::Number(n) => {
            let _ = write!(xml, "><v>{}</v></c>", format_number(*n));
        }
        CellValue::Boolean(b) => {
            let _ = write!(xml, " t=\"b\"><v>{}</v></c>", u8::from(*b));
        }
        CellValue::String(index) => {
            let _ = write!(xml, " t=\"s\"><v>{}</v></c>", index);
        }
        CellValue::Formula { text, result } => {
            let _ = write!(
                xml,
                "><f>{}</f><v>{}</v></c>",
                escape_text(text),
                format_number(result.unwrap_or(0.0))
            );
        }
        CellValue::ArrayFormula {
            text,
            range,
            result,
        } => {
            let _ = write!(
                xml,
                "><f t=\"array\" ref=\"{}\">{}</f><v>{}</v></c>",
                range.to_a1_string(),
                escape_text(text),
                format_number(result.unwrap_or(0.0))
            );
        }
        CellValue::ArrayMember { .. } => xml.push_str("><v>0</v></c>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabwright_core::{CellRange, Workbook};

    fn sheet_data(xml: &str) -> &str {
        let start = xml.find("<sheetData").unwrap();
        let end = xml.find("<pageMargins").unwrap();
        &xml[start..end]
    }

    #[test]
    fn test_empty_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet(None).unwrap();
        let xml = worksheet_xml(workbook.worksheet(0).unwrap(), true);

        assert!(xml.contains("<dimension ref=\"A1\"/>"));
        assert!(xml.contains("<sheetView tabSelected=\"1\" workbookViewId=\"0\"/>"));
        assert!(xml.contains("<sheetData/>"));
        assert!(!xml.contains("<cols>"));
        assert!(xml.ends_with("</worksheet>\n"));
    }

    #[test]
    fn test_cell_kinds() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet(None).unwrap();
        let mut bold = workbook.add_format();
        bold.set_bold(true);

        let mut sheet = workbook.worksheet_mut(0).unwrap();
        sheet.write_number(0, 0, 1.5, None).unwrap();
        sheet.write_string(0, 1, "text", None).unwrap();
        sheet.write_boolean(0, 2, true, None).unwrap();
        sheet.write_blank(0, 3, Some(&bold)).unwrap();
        sheet.write_formula(0, 4, "=A1*2", None).unwrap();
        sheet
            .write_formula_with_result(0, 5, "A1<3", 1.0, None)
            .unwrap();

        let xml = worksheet_xml(workbook.worksheet(0).unwrap(), false);
        assert!(xml.contains("<sheetView workbookViewId=\"0\"/>"));
        assert_eq!(
            sheet_data(&xml),
            "<sheetData><row r=\"1\" spans=\"1:6\">\
             <c r=\"A1\"><v>1.5</v></c>\
             <c r=\"B1\" t=\"s\"><v>0</v></c>\
             <c r=\"C1\" t=\"b\"><v>1</v></c>\
             <c r=\"D1\" s=\"1\"/>\
             <c r=\"E1\"><f>A1*2</f><v>0</v></c>\
             <c r=\"F1\"><f>A1&lt;3</f><v>1</v></c>\
             </row></sheetData>"
        );
    }

    #[test]
    fn test_array_formula_cells() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet(None).unwrap();
        let mut bold = workbook.add_format();
        bold.set_bold(true);

        let mut sheet = workbook.worksheet_mut(0).unwrap();
        sheet
            .write_array_formula(
                CellRange::parse("A1:A2").unwrap(),
                "{=SUM(B1:C1*B2:C2)}",
                Some(&bold),
            )
            .unwrap();

        let xml = worksheet_xml(workbook.worksheet(0).unwrap(), true);
        assert_eq!(
            sheet_data(&xml),
            "<sheetData>\
             <row r=\"1\" spans=\"1:1\"><c r=\"A1\" s=\"1\"><f t=\"array\" ref=\"A1:A2\">SUM(B1:C1*B2:C2)</f><v>0</v></c></row>\
             <row r=\"2\" spans=\"1:1\"><c r=\"A2\" s=\"1\"><v>0</v></c></row>\
             </sheetData>"
        );
    }

    #[test]
    fn test_spans_are_per_block() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet(None).unwrap();
        let mut sheet = workbook.worksheet_mut(0).unwrap();
        sheet.write_number(0, 1, 1.0, None).unwrap();
        sheet.write_number(15, 4, 1.0, None).unwrap();
        sheet.write_number(16, 0, 1.0, None).unwrap();

        let xml = worksheet_xml(workbook.worksheet(0).unwrap(), true);
        assert!(xml.contains("<dimension ref=\"A1:E17\"/>"));
        assert!(xml.contains("<row r=\"1\" spans=\"2:5\">"));
        assert!(xml.contains("<row r=\"16\" spans=\"2:5\">"));
        assert!(xml.contains("<row r=\"17\" spans=\"1:1\">"));
    }

    #[test]
    fn test_row_heights_and_column_widths() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet(None).unwrap();
        let mut sheet = workbook.worksheet_mut(0).unwrap();
        sheet.set_column_width(2, 20.5).unwrap();
        sheet.set_row_height(0, 30.0).unwrap();
        sheet.set_row_height(4, 12.0).unwrap();
        sheet.write_number(0, 0, 7.0, None).unwrap();

        let xml = worksheet_xml(workbook.worksheet(0).unwrap(), true);
        assert!(xml.contains(
            "<cols><col min=\"3\" max=\"3\" width=\"20.5\" customWidth=\"1\"/></cols>"
        ));
        assert!(xml.contains(
            "<row r=\"1\" spans=\"1:1\" ht=\"30\" customHeight=\"1\"><c r=\"A1\"><v>7</v></c></row>"
        ));
        assert!(xml.contains("<row r=\"5\" spans=\"1:1\" ht=\"12\" customHeight=\"1\"/>"));
    }
}
