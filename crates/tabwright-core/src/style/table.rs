//! Style table for deduplication

use super::Format;
use ahash::AHashMap;

/// Table of the distinct formats used by a workbook
///
/// Cells reference formats by index. Index 0 is always the default format;
/// every other format gets the next index the first time it is interned.
/// The table only grows, and its index order is the order the formats are
/// written out in.
#[derive(Debug, Clone)]
pub struct StyleTable {
    /// All unique formats (index 0 is default)
    formats: Vec<Format>,
    /// Lookup by full structural equality
    index_map: AHashMap<Format, u32>,
}

impl StyleTable {
    /// Create a new table with the default format at index 0
    pub fn new() -> Self {
        let mut table = Self {
            formats: Vec::with_capacity(16),
            index_map: AHashMap::with_capacity(16),
        };

        let default = Format::default();
        table.formats.push(default.clone());
        table.index_map.insert(default, 0);

        table
    }

    /// Get the index of a format, adding it if it is new
    pub fn intern(&mut self, format: &Format) -> u32 {
        if let Some(&idx) = self.index_map.get(format) {
            return idx;
        }

        let idx = self.formats.len() as u32;
        self.index_map.insert(format.clone(), idx);
        self.formats.push(format.clone());
        idx
    }

    /// Look up a format's index without inserting
    pub fn find(&self, format: &Format) -> Option<u32> {
        self.index_map.get(format).copied()
    }

    /// Get a format by index
    pub fn get(&self, index: u32) -> Option<&Format> {
        self.formats.get(index as usize)
    }

    /// Get the number of formats, including the default
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Check if only the default format is present
    pub fn is_empty(&self) -> bool {
        self.formats.len() <= 1
    }

    /// Iterate over all formats in index order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Format)> {
        self.formats.iter().enumerate().map(|(i, f)| (i as u32, f))
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_default_format() {
        let table = StyleTable::new();
        assert_eq!(table.len(), 1);
        assert!(table.is_empty());
        assert_eq!(table.get(0), Some(&Format::default()));
        assert_eq!(table.find(&Format::default()), Some(0));
    }

    #[test]
    fn test_deduplication() {
        let mut table = StyleTable::new();

        let mut bold = Format::new();
        bold.set_bold(true);
        let mut same_bold = Format::new();
        same_bold.set_bold(true);
        let mut italic = Format::new();
        italic.set_italic(true);

        let idx1 = table.intern(&bold);
        let idx2 = table.intern(&same_bold);
        let idx3 = table.intern(&italic);

        assert_eq!(idx1, 1);
        assert_eq!(idx1, idx2);
        assert_eq!(idx3, 2);
        assert_eq!(table.len(), 3);
        assert_eq!(table.intern(&Format::new()), 0);
    }

    #[test]
    fn test_iteration_in_index_order() {
        let mut table = StyleTable::new();

        let mut red = Format::new();
        red.set_font_color(Color::RED);
        let mut big = Format::new();
        big.set_font_size(20.0);

        table.intern(&red);
        table.intern(&big);
        table.intern(&red);

        let order: Vec<_> = table.iter().map(|(i, f)| (i, f.clone())).collect();
        assert_eq!(order, vec![(0, Format::default()), (1, red), (2, big)]);
    }

    #[test]
    fn test_odd_font_sizes_intern_consistently() {
        let mut table = StyleTable::new();

        let mut nan = Format::new();
        nan.font.size = f64::NAN;
        let first = table.intern(&nan);
        assert_eq!(table.intern(&nan), first);
        assert_eq!(table.find(&nan.clone()), Some(first));
        assert_eq!(table.len(), 2);

        let mut zero = Format::new();
        zero.set_font_size(0.0);
        let mut negative_zero = Format::new();
        negative_zero.set_font_size(-0.0).set_font_size(f64::INFINITY);
        assert_eq!(zero, negative_zero);
        assert_eq!(table.intern(&zero), 0);
        assert_eq!(table.intern(&negative_zero), 0);

        let mut signed = Format::new();
        signed.font.size = -0.0;
        let mut unsigned = Format::new();
        unsigned.font.size = 0.0;
        assert_ne!(signed, unsigned);
        assert_ne!(table.intern(&signed), table.intern(&unsigned));
        assert_eq!(table.intern(&signed), table.intern(&signed.clone()));
    }
}
