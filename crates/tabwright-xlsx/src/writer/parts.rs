//! Package-level parts: manifest, relationships, workbook, document
//! properties and shared strings

use std::fmt::Write;

use tabwright_core::{CellValue, DocProperties, StringTable, Workbook};

use crate::xml::{
    escape_attr, escape_cell_text, escape_text, needs_space_preserve, RELATIONSHIPS_NS,
    SPREADSHEETML_NS, XML_DECLARATION,
};

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const DOC_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const CT_SPREADSHEETML: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml";

fn relationship(xml: &mut String, id: usize, kind: &str, target: &str) {
    let _ = write!(
        xml,
        "<Relationship Id=\"rId{}\" Type=\"{}\" Target=\"{}\"/>",
        id, kind, target
    );
}

pub(crate) fn content_types_xml(sheet_count: usize, has_strings: bool) -> String {
    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(xml, "<Types xmlns=\"{}\">", CONTENT_TYPES_NS);
    xml.push_str(
        "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    );
    xml.push_str("<Default Extension=\"xml\" ContentType=\"application/xml\"/>");

    let mut overrides = vec![
        (
            "/docProps/app.xml".to_string(),
            "application/vnd.openxmlformats-officedocument.extended-properties+xml".to_string(),
        ),
        (
            "/docProps/core.xml".to_string(),
            "application/vnd.openxmlformats-package.core-properties+xml".to_string(),
        ),
        (
            "/xl/styles.xml".to_string(),
            format!("{}.styles+xml", CT_SPREADSHEETML),
        ),
        (
            "/xl/workbook.xml".to_string(),
            format!("{}.sheet.main+xml", CT_SPREADSHEETML),
        ),
    ];
    for n in 1..=sheet_count {
        overrides.push((
            format!("/xl/worksheets/sheet{}.xml", n),
            format!("{}.worksheet+xml", CT_SPREADSHEETML),
        ));
    }
    if has_strings {
        overrides.push((
            "/xl/sharedStrings.xml".to_string(),
            format!("{}.sharedStrings+xml", CT_SPREADSHEETML),
        ));
    }

    for (part, content_type) in overrides {
        let _ = write!(
            xml,
            "<Override PartName=\"{}\" ContentType=\"{}\"/>",
            part, content_type
        );
    }
    xml.push_str("</Types>\n");
    xml
}

pub(crate) fn root_rels_xml() -> String {
    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(xml, "<Relationships xmlns=\"{}\">", PACKAGE_RELS_NS);
    relationship(
        &mut xml,
        1,
        &format!("{}/officeDocument", DOC_REL),
        "xl/workbook.xml",
    );
    relationship(
        &mut xml,
        2,
        &format!("{}/metadata/core-properties", PKG_REL),
        "docProps/core.xml",
    );
    relationship(
        &mut xml,
        3,
        &format!("{}/extended-properties", DOC_REL),
        "docProps/app.xml",
    );
    xml.push_str("</Relationships>\n");
    xml
}

/// Sheets take rId1..N, followed by styles and then shared strings
pub(crate) fn workbook_rels_xml(sheet_count: usize, has_strings: bool) -> String {
    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(xml, "<Relationships xmlns=\"{}\">", PACKAGE_RELS_NS);
    for n in 1..=sheet_count {
        relationship(
            &mut xml,
            n,
            &format!("{}/worksheet", DOC_REL),
            &format!("worksheets/sheet{}.xml", n),
        );
    }
    relationship(
        &mut xml,
        sheet_count + 1,
        &format!("{}/styles", DOC_REL),
        "styles.xml",
    );
    if has_strings {
        relationship(
            &mut xml,
            sheet_count + 2,
            &format!("{}/sharedStrings", DOC_REL),
            "sharedStrings.xml",
        );
    }
    xml.push_str("</Relationships>\n");
    xml
}

pub(crate) fn workbook_xml(workbook: &Workbook) -> String {
    let settings = workbook.settings();

    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(
        xml,
        "<workbook xmlns=\"{}\" xmlns:r=\"{}\">",
        SPREADSHEETML_NS, RELATIONSHIPS_NS
    );
    xml.push_str(
        "<fileVersion appName=\"xl\" lastEdited=\"4\" lowestEdited=\"4\" rupBuild=\"4505\"/>",
    );
    if settings.date_1904 {
        xml.push_str("<workbookPr date1904=\"1\"/>");
    } else {
        xml.push_str("<workbookPr/>");
    }

    xml.push_str(
        "<bookViews><workbookView xWindow=\"240\" yWindow=\"15\" windowWidth=\"16095\" windowHeight=\"9660\"",
    );
    if settings.active_sheet > 0 {
        let _ = write!(xml, " activeTab=\"{}\"", settings.active_sheet);
    }
    xml.push_str("/></bookViews>");

    xml.push_str("<sheets>");
    for (i, sheet) in workbook.worksheets().enumerate() {
        let _ = write!(
            xml,
            "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
            escape_attr(sheet.name()),
            i + 1,
            i + 1
        );
    }
    xml.push_str("</sheets>");

    if settings.full_calc_on_load {
        xml.push_str("<calcPr calcId=\"124519\" fullCalcOnLoad=\"1\"/>");
    } else {
        xml.push_str("<calcPr calcId=\"124519\"/>");
    }
    xml.push_str("</workbook>\n");
    xml
}

/// Number of string cells across all sheets, repeats included
pub(crate) fn string_cell_count(workbook: &Workbook) -> usize {
    workbook
        .worksheets()
        .flat_map(|sheet| sheet.iter_cells())
        .filter(|(_, _, data)| matches!(data.value, CellValue::String(_)))
        .count()
}

pub(crate) fn shared_strings_xml(strings: &StringTable, total: usize) -> String {
    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(
        xml,
        "<sst xmlns=\"{}\" count=\"{}\" uniqueCount=\"{}\">",
        SPREADSHEETML_NS,
        total,
        strings.len()
    );
    for text in strings.iter() {
        if needs_space_preserve(text) {
            let _ = write!(
                xml,
                "<si><t xml:space=\"preserve\">{}</t></si>",
                escape_cell_text(text)
            );
        } else {
            let _ = write!(xml, "<si><t>{}</t></si>", escape_cell_text(text));
        }
    }
    xml.push_str("</sst>\n");
    xml
}

pub(crate) fn app_xml(workbook: &Workbook) -> String {
    let props = workbook.properties();
    let sheet_count = workbook.sheet_count();

    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        "<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
         xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">",
    );
    xml.push_str("<Application>Microsoft Excel</Application>");
    xml.push_str("<DocSecurity>0</DocSecurity>");
    xml.push_str("<ScaleCrop>false</ScaleCrop>");

    let _ = write!(
        xml,
        "<HeadingPairs><vt:vector size=\"2\" baseType=\"variant\">\
         <vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>\
         <vt:variant><vt:i4>{}</vt:i4></vt:variant>\
         </vt:vector></HeadingPairs>",
        sheet_count
    );

    let _ = write!(
        xml,
        "<TitlesOfParts><vt:vector size=\"{}\" baseType=\"lpstr\">",
        sheet_count
    );
    for sheet in workbook.worksheets() {
        let _ = write!(xml, "<vt:lpstr>{}</vt:lpstr>", escape_text(sheet.name()));
    }
    xml.push_str("</vt:vector></TitlesOfParts>");

    if let Some(manager) = &props.manager {
        let _ = write!(xml, "<Manager>{}</Manager>", escape_text(manager));
    }
    let _ = write!(
        xml,
        "<Company>{}</Company>",
        escape_text(props.company.as_deref().unwrap_or(""))
    );
    xml.push_str("<LinksUpToDate>false</LinksUpToDate>");
    xml.push_str("<SharedDoc>false</SharedDoc>");
    xml.push_str("<HyperlinksChanged>false</HyperlinksChanged>");
    xml.push_str("<AppVersion>12.0000</AppVersion>");
    xml.push_str("</Properties>\n");
    xml
}

/// Core properties; only fields that are set are written
pub(crate) fn core_xml(props: &DocProperties) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        "<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
    );

    let mut element = |tag: &str, value: &Option<String>| {
        if let Some(value) = value {
            let _ = write!(xml, "<{0}>{1}</{0}>", tag, escape_text(value));
        }
    };
    element("dc:title", &props.title);
    element("dc:subject", &props.subject);
    element("dc:creator", &props.author);
    element("cp:keywords", &props.keywords);
    element("dc:description", &props.comments);
    element("cp:lastModifiedBy", &props.author);
    element("cp:category", &props.category);

    if let Some(created) = props.created_w3cdtf() {
        let _ = write!(
            xml,
            "<dcterms:created xsi:type=\"dcterms:W3CDTF\">{0}</dcterms:created>\
             <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{0}</dcterms:modified>",
            created
        );
    }

    xml.push_str("</cp:coreProperties>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_workbook_rels_order() {
        let xml = workbook_rels_xml(2, true);
        let ids: Vec<_> = xml.match_indices("Id=\"rId").map(|(i, _)| &xml[i..i + 9]).collect();
        assert_eq!(ids, ["Id=\"rId1\"", "Id=\"rId2\"", "Id=\"rId3\"", "Id=\"rId4\""]);
        assert!(xml.contains("Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\""));
        assert!(xml.contains("Target=\"sharedStrings.xml\""));

        assert!(!workbook_rels_xml(1, false).contains("sharedStrings"));
    }

    #[test]
    fn test_content_types_lists_every_part() {
        let xml = content_types_xml(2, false);
        assert!(xml.contains("PartName=\"/xl/worksheets/sheet1.xml\""));
        assert!(xml.contains("PartName=\"/xl/worksheets/sheet2.xml\""));
        assert!(xml.contains("PartName=\"/docProps/core.xml\""));
        assert!(!xml.contains("sharedStrings"));
        assert!(content_types_xml(1, true).contains(
            "<Override PartName=\"/xl/sharedStrings.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml\"/>"
        ));
    }

    #[test]
    fn test_workbook_xml_settings() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet(Some("Q&A")).unwrap();
        workbook.add_worksheet(None).unwrap();
        workbook.set_active_sheet(1).unwrap();
        workbook.set_date_1904(true).unwrap();
        workbook.set_full_calc_on_load(false).unwrap();

        let xml = workbook_xml(&workbook);
        assert!(xml.contains("<workbookPr date1904=\"1\"/>"));
        assert!(xml.contains("windowHeight=\"9660\" activeTab=\"1\"/>"));
        assert!(xml.contains(
            "<sheets><sheet name=\"Q&amp;A\" sheetId=\"1\" r:id=\"rId1\"/><sheet name=\"Sheet2\" sheetId=\"2\" r:id=\"rId2\"/></sheets>"
        ));
        assert!(xml.contains("<calcPr calcId=\"124519\"/>"));
    }

    #[test]
    fn test_shared_strings() {
        let mut strings = StringTable::new();
        strings.intern("plain");
        strings.intern(" padded");
        strings.intern("a<b");

        let xml = shared_strings_xml(&strings, 5);
        assert!(xml.contains("count=\"5\" uniqueCount=\"3\">"));
        assert!(xml.contains(
            "<si><t>plain</t></si><si><t xml:space=\"preserve\"> padded</t></si><si><t>a&lt;b</t></si>"
        ));
    }

    #[test]
    fn test_core_properties() {
        assert_eq!(
            core_xml(&DocProperties::new()).matches("<dc:").count(),
            0
        );

        let created = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let props = DocProperties::new()
            .with_title("Report")
            .with_author("Ops")
            .with_created(created);
        let xml = core_xml(&props);
        assert!(xml.contains("<dc:title>Report</dc:title>"));
        assert!(xml.contains("<dc:creator>Ops</dc:creator>"));
        assert!(xml.contains("<cp:lastModifiedBy>Ops</cp:lastModifiedBy>"));
        assert!(xml.contains(
            "<dcterms:created xsi:type=\"dcterms:W3CDTF\">2024-01-02T03:04:05Z</dcterms:created>"
        ));
        assert!(xml.contains("<dcterms:modified xsi:type=\"dcterms:W3CDTF\">2024-01-02T03:04:05Z"));
    }

    #[test]
    fn test_app_properties() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet(Some("Data")).unwrap();
        workbook
            .set_properties(DocProperties::new().with_company("Acme"))
            .unwrap();

        let xml = app_xml(&workbook);
        assert!(xml.contains("<vt:i4>1</vt:i4>"));
        assert!(xml.contains("<vt:vector size=\"1\" baseType=\"lpstr\"><vt:lpstr>Data</vt:lpstr></vt:vector>"));
        assert!(xml.contains("<Company>Acme</Company>"));
        assert!(!xml.contains("<Manager>"));
    }
}
