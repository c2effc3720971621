//! Worksheet type and its write handle

use std::collections::BTreeMap;
use std::ops::Deref;

use log::trace;

use crate::cell::{CellAddress, CellData, CellGrid, CellRange, CellValue, StringTable};
use crate::error::{Error, Result};
use crate::formula::{normalize_array_formula, normalize_formula};
use crate::style::{Format, StyleTable};
use crate::{MAX_COLS, MAX_ROWS, MAX_STRING_LEN};

/// A worksheet (single sheet in a workbook)
///
/// Reading is done directly on `Worksheet`; writing goes through a
/// [`WorksheetMut`] handle from
/// [`Workbook::worksheet_mut`](crate::Workbook::worksheet_mut), which also
/// reaches the workbook's shared style and string tables.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellGrid,
    /// Array formula regions keyed by their anchor cell
    array_formulas: BTreeMap<CellAddress, CellRange>,
}

impl Worksheet {
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellGrid::new(),
            array_formulas: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get a cell's value, [`CellValue::Blank`] if it was never written
    pub fn value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Get a cell's style index, 0 if it was never written
    pub fn style_index_at(&self, row: u32, col: u16) -> u32 {
        self.cells.get(row, col).map(|c| c.style_index).unwrap_or(0)
    }

    /// Bounding box of every written cell, `None` if the sheet is empty
    pub fn dimension(&self) -> Option<CellRange> {
        self.cells.dimension()
    }

    /// The underlying cell grid
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    /// Get the number of written cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if nothing was written
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all cells in row order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    /// Array formula regions in anchor order
    pub fn array_formulas(&self) -> impl Iterator<Item = &CellRange> {
        self.array_formulas.values()
    }

    /// Array formula region covering a cell, if any
    pub fn array_formula_at(&self, row: u32, col: u16) -> Option<CellRange> {
        match &self.cells.get(row, col)?.value {
            CellValue::ArrayFormula { range, .. } => Some(*range),
            CellValue::ArrayMember { anchor } => self.array_formulas.get(anchor).copied(),
            _ => None,
        }
    }

    // === Row/Column Properties ===

    pub fn row_height(&self, row: u32) -> f64 {
        self.cells.row_height(row)
    }

    pub fn column_width(&self, col: u16) -> f64 {
        self.cells.column_width(col)
    }

    /// Get all custom row heights (row index → height in points).
    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        self.cells.custom_row_heights()
    }

    /// Get all custom column widths (column index → width in characters).
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        self.cells.custom_column_widths()
    }
}

/// Write access to one worksheet of a workbook
///
/// Holds the worksheet together with the workbook's style and string tables,
/// so formats and text are interned as cells are written. Every write checks
/// its arguments before touching anything: a call that returns an error leaves
/// the worksheet and both tables as they were.
///
/// Read methods of [`Worksheet`] are available through `Deref`.
#[derive(Debug)]
pub struct WorksheetMut<'a> {
    sheet: &'a mut Worksheet,
    styles: &'a mut StyleTable,
    strings: &'a mut StringTable,
    closed: bool,
}

impl<'a> WorksheetMut<'a> {
    pub(crate) fn new(
        sheet: &'a mut Worksheet,
        styles: &'a mut StyleTable,
        strings: &'a mut StringTable,
        closed: bool,
    ) -> Self {
        Self {
            sheet,
            styles,
            strings,
            closed,
        }
    }

    /// Write a number
    pub fn write_number(
        &mut self,
        row: u32,
        col: u16,
        number: f64,
        format: Option<&Format>,
    ) -> Result<()> {
        self.check_plain_write(row, col)?;
        check_finite(number)?;
        self.store(row, col, CellValue::Number(number), format);
        Ok(())
    }

    /// Write a string via the shared string table
    pub fn write_string(
        &mut self,
        row: u32,
        col: u16,
        text: &str,
        format: Option<&Format>,
    ) -> Result<()> {
        self.check_plain_write(row, col)?;
        let len = text.chars().count();
        if len > MAX_STRING_LEN {
            return Err(Error::StringTooLong(len));
        }

        let index = self.strings.intern(text);
        self.store(row, col, CellValue::String(index), format);
        Ok(())
    }

    /// Write a boolean
    pub fn write_boolean(
        &mut self,
        row: u32,
        col: u16,
        value: bool,
        format: Option<&Format>,
    ) -> Result<()> {
        self.check_plain_write(row, col)?;
        self.store(row, col, CellValue::Boolean(value), format);
        Ok(())
    }

    /// Write a blank cell carrying a format
    ///
    /// Without a format there is nothing to record and the call does nothing.
    pub fn write_blank(&mut self, row: u32, col: u16, format: Option<&Format>) -> Result<()> {
        self.check_plain_write(row, col)?;
        if format.is_some() {
            self.store(row, col, CellValue::Blank, format);
        }
        Ok(())
    }

    /// Write a formula; one leading `=` is dropped
    pub fn write_formula(
        &mut self,
        row: u32,
        col: u16,
        formula: &str,
        format: Option<&Format>,
    ) -> Result<()> {
        self.write_formula_inner(row, col, formula, None, format)
    }

    /// Write a formula with the result readers should show before recalculating
    pub fn write_formula_with_result(
        &mut self,
        row: u32,
        col: u16,
        formula: &str,
        result: f64,
        format: Option<&Format>,
    ) -> Result<()> {
        self.write_formula_inner(row, col, formula, Some(result), format)
    }

    fn write_formula_inner(
        &mut self,
        row: u32,
        col: u16,
        formula: &str,
        result: Option<f64>,
        format: Option<&Format>,
    ) -> Result<()> {
        self.check_plain_write(row, col)?;
        let text = normalize_formula(formula)?;
        if let Some(result) = result {
            check_finite(result)?;
        }

        self.store(row, col, CellValue::Formula { text, result }, format);
        Ok(())
    }

    /// Write an array formula over `range`
    ///
    /// The formula may be given as `{=SUM(A1:B1*A2:B2)}` or without braces.
    /// The top-left cell holds the formula; every other cell of the range
    /// becomes a member of it. Writing the exact range of an existing array
    /// formula replaces it; any other overlap fails.
    pub fn write_array_formula(
        &mut self,
        range: CellRange,
        formula: &str,
        format: Option<&Format>,
    ) -> Result<()> {
        self.write_array_formula_inner(range, formula, None, format)
    }

    /// Write an array formula with the anchor cell's cached result
    pub fn write_array_formula_with_result(
        &mut self,
        range: CellRange,
        formula: &str,
        result: f64,
        format: Option<&Format>,
    ) -> Result<()> {
        self.write_array_formula_inner(range, formula, Some(result), format)
    }

    fn write_array_formula_inner(
        &mut self,
        range: CellRange,
        formula: &str,
        result: Option<f64>,
        format: Option<&Format>,
    ) -> Result<()> {
        self.ensure_open()?;
        let range = range.relative();
        check_bounds(range.start.row, range.start.col)?;
        check_bounds(range.end.row, range.end.col)?;
        let text = normalize_array_formula(formula)?;
        if let Some(result) = result {
            check_finite(result)?;
        }

        if let Some(existing) = self
            .sheet
            .array_formulas
            .values()
            .find(|existing| existing.overlaps(&range) && **existing != range)
        {
            return Err(Error::OverlappingArrayFormula {
                range: range.to_a1_string(),
                existing: existing.to_a1_string(),
            });
        }

        let style_index = self.intern_format(format);
        let anchor = range.anchor();
        for addr in range.cells() {
            let value = if addr == anchor {
                CellValue::ArrayFormula {
                    text: text.clone(),
                    range,
                    result,
                }
            } else {
                CellValue::ArrayMember { anchor }
            };
            self.sheet
                .cells
                .set(addr.row, addr.col, CellData::with_style(value, style_index));
        }
        self.sheet.array_formulas.insert(anchor, range);

        trace!(
            "array formula {} on '{}' ({} cells)",
            range,
            self.sheet.name,
            range.cell_count()
        );
        Ok(())
    }

    /// Set a column's width in characters
    pub fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        self.ensure_open()?;
        check_bounds(0, col)?;
        check_size(width)?;
        self.sheet.cells.set_column_width(col, width);
        Ok(())
    }

    /// Set a row's height in points
    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.ensure_open()?;
        check_bounds(row, 0)?;
        check_size(height)?;
        self.sheet.cells.set_row_height(row, height);
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::AlreadyClosed);
        }
        Ok(())
    }

    /// Checks shared by every single-cell write
    ///
    /// A single-cell array formula may be overwritten; its region goes away
    /// when the new value is stored.
    fn check_plain_write(&self, row: u32, col: u16) -> Result<()> {
        self.ensure_open()?;
        check_bounds(row, col)?;

        if let Some(range) = self.sheet.array_formula_at(row, col) {
            if !range.is_single_cell() {
                return Err(Error::PartOfArrayFormula {
                    cell: CellAddress::new(row, col).to_a1_string(),
                    range: range.to_a1_string(),
                });
            }
        }
        Ok(())
    }

    fn intern_format(&mut self, format: Option<&Format>) -> u32 {
        format.map(|f| self.styles.intern(f)).unwrap_or(0)
    }

    fn store(&mut self, row: u32, col: u16, value: CellValue, format: Option<&Format>) {
        let style_index = self.intern_format(format);
        let addr = CellAddress::new(row, col);
        self.sheet.array_formulas.remove(&addr);
        self.sheet
            .cells
            .set(row, col, CellData::with_style(value, style_index));
    }
}

impl Deref for WorksheetMut<'_> {
    type Target = Worksheet;

    fn deref(&self) -> &Worksheet {
        self.sheet
    }
}

fn check_bounds(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(Error::OutOfBounds {
            row,
            col,
            max_row: MAX_ROWS - 1,
            max_col: MAX_COLS - 1,
        });
    }
    Ok(())
}

fn check_finite(number: f64) -> Result<()> {
    if !number.is_finite() {
        return Err(Error::UnsupportedValue(format!(
            "{} cannot be stored in a cell",
            number
        )));
    }
    Ok(())
}

fn check_size(size: f64) -> Result<()> {
    if !size.is_finite() || size < 0.0 {
        return Err(Error::UnsupportedValue(format!(
            "invalid row height or column width {}",
            size
        )));
    }
    Ok(())
}
