//! XLSX writer

mod parts;
mod worksheet;

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use log::{debug, trace};
use tabwright_core::Workbook;
use tempfile::NamedTempFile;

use crate::error::{XlsxError, XlsxResult};
use crate::package::Package;
use crate::styles::XlsxStyleTable;

/// XLSX file writer
///
/// The writer only reads the workbook. It expects a finalized workbook so
/// nothing can change while parts are being produced.
pub struct XlsxWriter;

impl XlsxWriter {
    /// Build every part of the package in archive order
    pub fn build_package(workbook: &Workbook) -> XlsxResult<Package> {
        if !workbook.is_closed() {
            return Err(XlsxError::NotFinalized);
        }

        let sheet_count = workbook.sheet_count();
        let has_strings = !workbook.strings().is_empty();
        let mut package = Package::new();

        package.add(
            "[Content_Types].xml",
            parts::content_types_xml(sheet_count, has_strings),
        )?;
        package.add("_rels/.rels", parts::root_rels_xml())?;
        package.add("docProps/app.xml", parts::app_xml(workbook))?;
        package.add("docProps/core.xml", parts::core_xml(workbook.properties()))?;
        package.add("xl/workbook.xml", parts::workbook_xml(workbook))?;
        package.add(
            "xl/_rels/workbook.xml.rels",
            parts::workbook_rels_xml(sheet_count, has_strings),
        )?;

        let style_table = XlsxStyleTable::build(workbook.styles());
        package.add("xl/styles.xml", style_table.to_styles_xml())?;
        debug!("emitted styles part ({} cell formats)", workbook.styles().len());

        if has_strings {
            let total = parts::string_cell_count(workbook);
            package.add(
                "xl/sharedStrings.xml",
                parts::shared_strings_xml(workbook.strings(), total),
            )?;
            debug!(
                "emitted shared strings part ({} unique of {})",
                workbook.strings().len(),
                total
            );
        }

        let active = workbook.active_sheet();
        for (i, sheet) in workbook.worksheets().enumerate() {
            package.add(
                format!("xl/worksheets/sheet{}.xml", i + 1),
                worksheet::worksheet_xml(sheet, i == active),
            )?;
            debug!(
                "emitted worksheet '{}' ({} cells)",
                sheet.name(),
                sheet.cell_count()
            );
        }

        Ok(package)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<W> {
        Self::build_package(workbook)?.write_to(writer)
    }

    /// Serialize a workbook into memory
    pub fn to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let cursor = Self::write(workbook, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Write a workbook to a file path
    ///
    /// The archive is built in memory, written to a temporary file next to
    /// `path` and renamed over it. On any failure the destination is left as
    /// it was.
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        let bytes = Self::to_bytes(workbook)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        trace!("wrote {} bytes to {}", bytes.len(), temp.path().display());

        temp.persist(path).map_err(|e| XlsxError::Persist {
            path: path.display().to_string(),
            source: e.error,
        })?;
        trace!("published {}", path.display());
        Ok(())
    }
}
