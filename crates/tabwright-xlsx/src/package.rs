//! In-memory OPC package and its zip encoding

use std::io::{Seek, Write};

use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{XlsxError, XlsxResult};

/// A named part of the package (e.g. `xl/workbook.xml`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub data: Vec<u8>,
}

/// Ordered collection of package parts
///
/// Parts are stored in the order they are added, which is also the order of
/// the entries in the archive.
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part; part names must be unique
    pub fn add<N: Into<String>, D: Into<Vec<u8>>>(&mut self, name: N, data: D) -> XlsxResult<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(XlsxError::DuplicatePart(name));
        }
        self.parts.push(Part {
            name,
            data: data.into(),
        });
        Ok(())
    }

    /// Look up a part by name
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Iterate over parts in archive order
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Write the package as a zip archive
    ///
    /// Every entry is deflated and stamped 1980-01-01 00:00:00, so the same
    /// parts always produce the same bytes.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> XlsxResult<W> {
        let mut zip = ZipWriter::new(writer);
        let mut total = 0usize;
        for part in &self.parts {
            zip.start_file(part.name.as_str(), entry_options())?;
            zip.write_all(&part.data)?;
            total += part.data.len();
        }

        debug!(
            "packaged {} parts ({} bytes uncompressed)",
            self.parts.len(),
            total
        );
        Ok(zip.finish()?)
    }

    /// Write the package into a byte buffer
    pub fn to_bytes(&self) -> XlsxResult<Vec<u8>> {
        let cursor = self.write_to(std::io::Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_duplicate_part_rejected() {
        let mut package = Package::new();
        package.add("a.xml", "<a/>").unwrap();
        assert!(matches!(
            package.add("a.xml", "<b/>"),
            Err(XlsxError::DuplicatePart(name)) if name == "a.xml"
        ));
        assert_eq!(package.len(), 1);
    }

    #[test]
    fn test_archive_preserves_order_and_content() {
        let mut package = Package::new();
        package.add("[Content_Types].xml", "<Types/>").unwrap();
        package.add("xl/workbook.xml", "<workbook/>").unwrap();

        let bytes = package.to_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();

        let names: Vec<_> = archive.file_names().map(str::to_string).collect();
        assert_eq!(names.len(), 2);

        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "[Content_Types].xml");
        assert_eq!(first.compression(), CompressionMethod::Deflated);
        drop(first);

        let mut content = String::new();
        archive
            .by_name("xl/workbook.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<workbook/>");
    }

    #[test]
    fn test_output_is_deterministic() {
        let mut package = Package::new();
        package.add("x.xml", "<x>payload</x>").unwrap();

        assert_eq!(package.to_bytes().unwrap(), package.to_bytes().unwrap());
    }
}
