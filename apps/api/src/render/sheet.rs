//! In-memory sheet model produced by the cell writer and materialised by `render::xlsx`.
//!
//! Keeping this separate from the xlsx writer lets layout behaviour be asserted directly
//! (address, merge, style) without decoding a workbook.

use std::collections::BTreeMap;

use tracing::warn;

use crate::layout::spec::{CellRange, CellRef, CellStyle};
use crate::render::image::EmbeddedImage;
use crate::render::rich_text::RichText;

/// Most characters a single xlsx cell can hold.
pub const MAX_CELL_CHARS: usize = 32_767;

/// A row height or column width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Points for rows, characters for columns.
    Units(f64),
    /// Exact pixels; used where a track must match an embedded image.
    Pixels(u16),
}
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Rich(RichText),
}

impl CellValue {
    pub fn plain_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Rich(rich) => rich.plain_text(),
        }
    }

    fn char_count(&self) -> usize {
        match self {
            CellValue::Text(text) => text.chars().count(),
            CellValue::Rich(rich) => rich.runs().iter().map(|r| r.text.chars().count()).sum(),
        }
    }

    /// Cuts the value to `MAX_CELL_CHARS`. An oversized rich value loses its runs.
    fn truncated(self) -> Self {
        CellValue::Text(self.plain_text().chars().take(MAX_CELL_CHARS).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

#[derive(Debug, Clone)]
pub struct PlacedImage {
    pub anchor: CellRef,
    pub image: EmbeddedImage,
}

#[derive(Debug, Clone)]
pub struct SheetModel {
    pub name: String,
    cells: BTreeMap<CellRef, Cell>,
    merges: Vec<CellRange>,
    row_heights: BTreeMap<u32, Extent>,
    column_widths: BTreeMap<u16, Extent>,
    image: Option<PlacedImage>,
}

impl SheetModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            merges: Vec::new(),
            row_heights: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            image: None,
        }
    }

    /// Writes `value` to the first cell of `range`, merging the range when it spans more
    /// than one cell. A later write to the same address replaces the earlier one.
    /// Values longer than one cell can hold are truncated with a warning.
    pub fn write(&mut self, range: CellRange, value: CellValue, style: CellStyle) {
        let len = value.char_count();
        let value = if len > MAX_CELL_CHARS {
            warn!(
                "{} {}: {len} characters exceed the cell limit, truncating to {MAX_CELL_CHARS}",
                self.name, range.first
            );
            value.truncated()
        } else {
            value
        };
        if !range.is_single() {
            self.merges.retain(|m| *m != range);
            self.merges.push(range);
        }
        self.cells.insert(range.first, Cell { value, style });
    }

    pub fn write_text(&mut self, range: CellRange, text: impl Into<String>, style: CellStyle) {
        self.write(range, CellValue::Text(text.into()), style);
    }

    pub fn set_row_height(&mut self, row: u32, points: f64) {
        self.row_heights.insert(row, Extent::Units(points));
    }

    pub fn set_column_width(&mut self, col: u16, chars: f64) {
        self.column_widths.insert(col, Extent::Units(chars));
    }

    pub fn set_row_height_pixels(&mut self, row: u32, pixels: u16) {
        self.row_heights.insert(row, Extent::Pixels(pixels));
    }

    pub fn set_column_width_pixels(&mut self, col: u16, pixels: u16) {
        self.column_widths.insert(col, Extent::Pixels(pixels));
    }

    pub fn place_image(&mut self, anchor: CellRef, image: EmbeddedImage) {
        self.image = Some(PlacedImage { anchor, image });
    }

    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        self.cells.get(&at)
    }

    /// Plain text at `at`; rich cells are flattened.
    pub fn text(&self, at: CellRef) -> Option<String> {
        self.cells.get(&at).map(|c| c.value.plain_text())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    pub fn is_merged(&self, range: CellRange) -> bool {
        self.merges.contains(&range)
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, Extent)> + '_ {
        self.row_heights.iter().map(|(r, h)| (*r, *h))
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, Extent)> + '_ {
        self.column_widths.iter().map(|(c, w)| (*c, *w))
    }

    pub fn row_height(&self, row: u32) -> Option<Extent> {
        self.row_heights.get(&row).copied()
    }

    pub fn column_width(&self, col: u16) -> Option<Extent> {
        self.column_widths.get(&col).copied()
    }

    pub fn image(&self) -> Option<&PlacedImage> {
        self.image.as_ref()
    }
}
