//! Archive-level tests: write a workbook, reopen the zip and inspect parts

use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use quick_xml::events::Event;
use quick_xml::Reader;
use tabwright_core::{CellRange, Workbook};
use tabwright_xlsx::XlsxWriter;

fn read_parts(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = String::new();
            file.read_to_string(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

fn part<'a>(parts: &'a [(String, String)], name: &str) -> &'a str {
    parts
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, content)| content.as_str())
        .unwrap_or_else(|| panic!("missing part {}", name))
}

/// Tag names of all start and empty elements, in document order
fn element_names(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut names = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => {
                names.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap())
            }
            Event::Eof => break,
            _ => {}
        }
    }
    names
}

fn array_formula_workbook() -> Workbook {
    let mut workbook = Workbook::new();
    workbook.add_worksheet(None).unwrap();
    let mut bold = workbook.add_format();
    bold.set_bold(true);

    let mut sheet = workbook.worksheet_mut(0).unwrap();
    for row in 0..3 {
        for col in 1..3 {
            sheet.write_number(row, col, 0.0, None).unwrap();
        }
    }
    sheet
        .write_array_formula(
            CellRange::parse("A1:A3").unwrap(),
            "{=SUM(B1:C1*B2:C2)}",
            Some(&bold),
        )
        .unwrap();
    workbook.finalize().unwrap();
    workbook
}

#[test]
fn test_array_formula_archive() {
    let bytes = XlsxWriter::to_bytes(&array_formula_workbook()).unwrap();
    let parts = read_parts(&bytes);

    let names: Vec<_> = parts.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );

    let workbook_xml = part(&parts, "xl/workbook.xml");
    assert_eq!(
        element_names(workbook_xml)
            .iter()
            .filter(|n| *n == "sheet")
            .count(),
        1
    );

    let styles = part(&parts, "xl/styles.xml");
    assert!(styles.contains("<cellXfs count=\"2\">"));
    assert!(styles.contains("<font><b/>"));

    let sheet = part(&parts, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("<dimension ref=\"A1:C3\"/>"));
    assert!(sheet.contains(
        "<c r=\"A1\" s=\"1\"><f t=\"array\" ref=\"A1:A3\">SUM(B1:C1*B2:C2)</f><v>0</v></c>"
    ));
    assert!(sheet.contains("<c r=\"A2\" s=\"1\"><v>0</v></c>"));
    assert!(sheet.contains("<c r=\"A3\" s=\"1\"><v>0</v></c>"));
    assert!(sheet.contains("<c r=\"C3\"><v>0</v></c>"));
}

#[test]
fn test_every_part_is_well_formed() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet(Some("R&D <2024>")).unwrap();
    workbook.add_worksheet(None).unwrap();
    let mut money = workbook.add_format();
    money.set_num_format("\"$\"#,##0.00").set_italic(true);

    let mut sheet = workbook.worksheet_mut(0).unwrap();
    sheet.write_string(0, 0, "a & b", None).unwrap();
    sheet.write_string(1, 0, "  indented", None).unwrap();
    sheet.write_string(2, 0, "bell\u{7}", None).unwrap();
    sheet.write_number(0, 1, 1234.5, Some(&money)).unwrap();
    sheet.write_formula(1, 1, "=IF(B1>1,\"big\",\"small\")", None).unwrap();
    sheet.write_boolean(2, 1, false, None).unwrap();
    workbook.finalize().unwrap();

    let parts = read_parts(&XlsxWriter::to_bytes(&workbook).unwrap());
    for (name, content) in &parts {
        assert!(
            content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"),
            "{} has no declaration",
            name
        );
        assert!(!element_names(content).is_empty(), "{} is empty", name);
    }

    let strings = part(&parts, "xl/sharedStrings.xml");
    assert!(strings.contains("count=\"3\" uniqueCount=\"3\""));
    assert!(strings.contains("<t xml:space=\"preserve\">  indented</t>"));
    assert!(strings.contains("<t>bell_x0007_</t>"));

    let sheet = part(&parts, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("<f>IF(B1&gt;1,\"big\",\"small\")</f>"));
    assert!(sheet.contains("<c r=\"B3\" t=\"b\"><v>0</v></c>"));
}

#[test]
fn test_serialization_is_deterministic() {
    let first = XlsxWriter::to_bytes(&array_formula_workbook()).unwrap();
    let second = XlsxWriter::to_bytes(&array_formula_workbook()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_write_file_replaces_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    std::fs::write(&path, b"stale").unwrap();

    XlsxWriter::write_file(&array_formula_workbook(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}
