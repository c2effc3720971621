//! Workbook type - the main document structure

use log::debug;

use crate::cell::StringTable;
use crate::error::{Error, Result};
use crate::properties::DocProperties;
use crate::style::{Format, StyleTable};
use crate::worksheet::{Worksheet, WorksheetMut};
use crate::MAX_SHEET_NAME_LEN;

/// Characters a sheet name cannot contain
const INVALID_SHEET_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// A workbook (spreadsheet document)
///
/// A workbook owns its worksheets in tab order, plus the style and string
/// tables every worksheet writes into. Building ends with
/// [`finalize`](Self::finalize); after that the workbook is read-only and any
/// mutating call fails with [`Error::AlreadyClosed`].
#[derive(Debug, Clone)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    styles: StyleTable,
    strings: StringTable,
    settings: WorkbookSettings,
    properties: DocProperties,
    closed: bool,
}

impl Workbook {
    /// Create a new workbook with no worksheets
    pub fn new() -> Self {
        Self {
            worksheets: Vec::new(),
            styles: StyleTable::new(),
            strings: StringTable::new(),
            settings: WorkbookSettings::default(),
            properties: DocProperties::default(),
            closed: false,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a write handle for a worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<WorksheetMut<'_>> {
        let closed = self.closed;
        let sheet = self.worksheets.get_mut(index)?;
        Some(WorksheetMut::new(
            sheet,
            &mut self.styles,
            &mut self.strings,
            closed,
        ))
    }

    /// Get a worksheet by name (case-insensitive)
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheet_index(name).and_then(|i| self.worksheet(i))
    }

    /// Get a write handle for a worksheet by name (case-insensitive)
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<WorksheetMut<'_>> {
        let index = self.sheet_index(name)?;
        self.worksheet_mut(index)
    }

    /// Get the index of a worksheet by name (case-insensitive)
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.worksheets
            .iter()
            .position(|ws| ws.name().to_lowercase() == name)
    }

    /// Iterate over all worksheets in tab order
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a worksheet, named "SheetN" when no name is given
    ///
    /// Returns the index of the new worksheet.
    pub fn add_worksheet(&mut self, name: Option<&str>) -> Result<usize> {
        self.ensure_open()?;

        let name = match name {
            Some(name) => {
                self.validate_sheet_name(name)?;
                name.to_string()
            }
            None => self.generate_sheet_name(),
        };

        let index = self.worksheets.len();
        debug!("adding worksheet {} '{}'", index, name);
        self.worksheets.push(Worksheet::new(name));
        Ok(index)
    }

    /// Create a format to pass to cell writes
    ///
    /// The format is recorded in the workbook's style table the first time a
    /// cell is written with it; until then it costs nothing.
    pub fn add_format(&self) -> Format {
        Format::new()
    }

    /// The deduplicated formats written so far, in index order
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// The shared strings written so far, in index order
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Get workbook settings
    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    /// Get document properties
    pub fn properties(&self) -> &DocProperties {
        &self.properties
    }

    /// Replace the document properties
    pub fn set_properties(&mut self, properties: DocProperties) -> Result<()> {
        self.ensure_open()?;
        self.properties = properties;
        Ok(())
    }

    /// Get the active sheet index
    pub fn active_sheet(&self) -> usize {
        self.settings.active_sheet
    }

    /// Set the sheet shown when the file is opened
    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        self.ensure_open()?;
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.settings.active_sheet = index;
        Ok(())
    }

    /// Use the 1904 date system
    pub fn set_date_1904(&mut self, date_1904: bool) -> Result<()> {
        self.ensure_open()?;
        self.settings.date_1904 = date_1904;
        Ok(())
    }

    /// Ask readers to recalculate every formula on load
    pub fn set_full_calc_on_load(&mut self, full_calc: bool) -> Result<()> {
        self.ensure_open()?;
        self.settings.full_calc_on_load = full_calc;
        Ok(())
    }

    /// Check if the workbook has been finalized
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Freeze the workbook for serialization
    ///
    /// A workbook without worksheets gets a single empty "Sheet1".
    pub fn finalize(&mut self) -> Result<()> {
        self.ensure_open()?;

        if self.worksheets.is_empty() {
            self.add_worksheet(None)?;
        }
        self.closed = true;

        debug!(
            "finalized workbook: {} sheet(s), {} format(s), {} shared string(s)",
            self.worksheets.len(),
            self.styles.len(),
            self.strings.len()
        );
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::AlreadyClosed);
        }
        Ok(())
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "'{}' is longer than {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "'{}' contains '{}'",
                name, c
            )));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(Error::InvalidSheetName(format!(
                "'{}' starts or ends with an apostrophe",
                name
            )));
        }

        if self.sheet_index(name).is_some() {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }

    /// First free "SheetN", counting from the next tab position
    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.sheet_index(&name).is_none() {
                return name;
            }
            n += 1;
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Workbook-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookSettings {
    /// Date system: false = 1900 (Windows), true = 1904 (Mac)
    pub date_1904: bool,
    /// Recalculate all formulas when the file is opened
    pub full_calc_on_load: bool,
    /// Sheet selected and shown on open
    pub active_sheet: usize,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            date_1904: false,
            full_calc_on_load: true,
            active_sheet: 0,
        }
    }
}
