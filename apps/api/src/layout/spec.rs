//! Layout types: pure data describing where every field of a sheet lands.
//!
//! Addresses are written in A1 notation and parsed by `const fn`s, so a typo in a layout
//! table is a compile error rather than a runtime one. Structural mistakes (overlaps,
//! dangling repeat columns) are caught by `layout::check::self_check` at startup.

use std::fmt;

use serde::Serialize;

use crate::layout::captions::{Label, Locale};
use crate::skills::SkillCategory;

// ────────────────────────────────────────────────────────────────────────────
// Addresses
// ────────────────────────────────────────────────────────────────────────────

/// Zero-based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    pub fn offset(self, rows: u32, cols: u16) -> Self {
        Self::new(self.row + rows, self.col + cols)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = u32::from(self.col) + 1;
        while n > 0 {
            let rem = ((n - 1) % 26) as u8;
            letters.push((b'A' + rem) as char);
            n = (n - 1) / 26;
        }
        let col: String = letters.iter().rev().collect();
        write!(f, "{}{}", col, self.row + 1)
    }
}

/// Inclusive rectangle. A single-cell range means "no merge".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellRange {
    pub first: CellRef,
    pub last: CellRef,
}

impl CellRange {
    pub const fn single(cell: CellRef) -> Self {
        Self {
            first: cell,
            last: cell,
        }
    }

    pub fn is_single(&self) -> bool {
        self.first == self.last
    }

    pub fn is_well_formed(&self) -> bool {
        self.first.row <= self.last.row && self.first.col <= self.last.col
    }

    pub fn rows(&self) -> u32 {
        self.last.row - self.first.row + 1
    }

    pub fn cols(&self) -> u16 {
        self.last.col - self.first.col + 1
    }

    pub fn intersects(&self, other: &CellRange) -> bool {
        self.first.row <= other.last.row
            && other.first.row <= self.last.row
            && self.first.col <= other.last.col
            && other.first.col <= self.last.col
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}:{}", self.first, self.last)
        }
    }
}

const fn parse_ref(b: &[u8], mut i: usize) -> (CellRef, usize) {
    let start = i;
    let mut col: u32 = 0;
    while i < b.len() && b[i].is_ascii_uppercase() {
        col = col * 26 + (b[i] - b'A' + 1) as u32;
        i += 1;
    }
    if i == start {
        panic!("A1 address must start with a column letter");
    }
    let digits = i;
    let mut row: u32 = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        row = row * 10 + (b[i] - b'0') as u32;
        i += 1;
    }
    if i == digits || row == 0 {
        panic!("A1 address must end with a 1-based row number");
    }
    (CellRef::new(row - 1, (col - 1) as u16), i)
}

/// `"B3"` → a cell, `"B3:F4"` → a range.
pub const fn region(addr: &str) -> CellRange {
    let b = addr.as_bytes();
    let (first, end) = parse_ref(b, 0);
    if end == b.len() {
        return CellRange::single(first);
    }
    if b[end] != b':' {
        panic!("expected ':' between range corners");
    }
    let (last, end) = parse_ref(b, end + 1);
    if end != b.len() {
        panic!("trailing characters after A1 range");
    }
    CellRange { first, last }
}

pub const fn a1(addr: &str) -> CellRef {
    region(addr).first
}

/// Zero-based column index of the letters in `b[start..end]` (`"C"` → 2).
const fn col_span(b: &[u8], start: usize, end: usize) -> u16 {
    let mut i = start;
    let mut n: u32 = 0;
    while i < end {
        if !b[i].is_ascii_uppercase() {
            panic!("column must be upper-case letters");
        }
        n = n * 26 + (b[i] - b'A' + 1) as u32;
        i += 1;
    }
    if n == 0 {
        panic!("empty column");
    }
    (n - 1) as u16
}

/// Zero-based column bounds: `"C"` → (2, 2), `"C:H"` → (2, 7).
pub const fn col_range(cols: &str) -> (u16, u16) {
    let b = cols.as_bytes();
    let mut colon = 0;
    while colon < b.len() && b[colon] != b':' {
        colon += 1;
    }
    if colon == b.len() {
        let c = col_span(b, 0, b.len());
        return (c, c);
    }
    let first = col_span(b, 0, colon);
    let last = col_span(b, colon + 1, b.len());
    if last < first {
        panic!("column range runs backwards");
    }
    (first, last)
}

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VAlign {
    Top,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Border {
    None,
    Thin,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellStyle {
    pub font_size: f64,
    pub bold: bool,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// RGB fill, `None` for no fill.
    pub fill: Option<u32>,
    pub border: Border,
    pub wrap: bool,
}

impl CellStyle {
    pub const fn with_align(mut self, h_align: HAlign) -> Self {
        self.h_align = h_align;
        self
    }
}

pub const TITLE: CellStyle = CellStyle {
    font_size: 18.0,
    bold: true,
    h_align: HAlign::Center,
    v_align: VAlign::Center,
    fill: None,
    border: Border::None,
    wrap: false,
};

pub const AS_OF: CellStyle = CellStyle {
    font_size: 9.0,
    bold: false,
    h_align: HAlign::Right,
    v_align: VAlign::Center,
    fill: None,
    border: Border::None,
    wrap: false,
};

pub const CAPTION: CellStyle = CellStyle {
    font_size: 9.0,
    bold: false,
    h_align: HAlign::Center,
    v_align: VAlign::Center,
    fill: None,
    border: Border::Thin,
    wrap: true,
};

pub const VALUE: CellStyle = CellStyle {
    font_size: 11.0,
    bold: false,
    h_align: HAlign::Left,
    v_align: VAlign::Center,
    fill: None,
    border: Border::Thin,
    wrap: true,
};

pub const VALUE_CENTER: CellStyle = VALUE.with_align(HAlign::Center);

pub const TEXT_BLOCK: CellStyle = CellStyle {
    font_size: 10.0,
    bold: false,
    h_align: HAlign::Left,
    v_align: VAlign::Top,
    fill: None,
    border: Border::Thin,
    wrap: true,
};

pub const TABLE_HEADER: CellStyle = CellStyle {
    font_size: 10.0,
    bold: true,
    h_align: HAlign::Center,
    v_align: VAlign::Center,
    fill: Some(0xD9E1F2),
    border: Border::Thin,
    wrap: false,
};

pub const BAND_HEADER: CellStyle = CellStyle {
    font_size: 10.0,
    bold: true,
    h_align: HAlign::Center,
    v_align: VAlign::Center,
    fill: Some(0xBDD7EE),
    border: Border::Medium,
    wrap: false,
};

pub const NOTE: CellStyle = CellStyle {
    font_size: 9.0,
    bold: false,
    h_align: HAlign::Left,
    v_align: VAlign::Center,
    fill: None,
    border: Border::None,
    wrap: true,
};

// ────────────────────────────────────────────────────────────────────────────
// Sheets and entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SheetKind {
    Resume,
    WorkHistory,
    SkillMatrix,
}

impl SheetKind {
    pub fn sheet_name(self, locale: Locale) -> &'static str {
        let label = match self {
            SheetKind::Resume => Label::new("履歴書", "Resume"),
            SheetKind::WorkHistory => Label::new("職務経歴書", "Work History"),
            SheetKind::SkillMatrix => Label::new("スキルシート", "Skill Sheet"),
        };
        label.get(locale)
    }
}

/// Profile values a fixed cell can show. Resolution lives in the cell writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProfileField {
    AsOfDate,
    FullName,
    KanaName,
    /// Rich text: full name, then nationality in small type.
    NameWithNationality,
    BirthDateWithAge,
    Gender,
    CurrentAddressKana,
    /// Rich text: postal code in small type, then the street address.
    CurrentAddress,
    CurrentPhone,
    CurrentEmail,
    ContactAddressKana,
    ContactAddress,
    ContactPhone,
    ContactEmail,
    CertificationName,
    CertificationDate,
    NextTestLevel,
    NextTestDate,
    CertificateStatus,
    SelfIntroduction,
    WhyThisCountry,
    WhyInterested,
    PersonalPreferences,
    SpouseStatus,
    SpouseDependency,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    Caption(Label),
    Field(ProfileField),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    pub source: Source,
    pub range: CellRange,
    pub style: CellStyle,
}

pub const fn caption(addr: &str, label: Label, style: CellStyle) -> LayoutEntry {
    LayoutEntry {
        source: Source::Caption(label),
        range: region(addr),
        style,
    }
}

pub const fn field(addr: &str, field: ProfileField, style: CellStyle) -> LayoutEntry {
    LayoutEntry {
        source: Source::Field(field),
        range: region(addr),
        style,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Repeating blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Collection {
    /// Education rows, then work-experience rows, with section captions and an end marker.
    EducationAndWork,
    Qualifications,
    WorkHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnPart {
    Year,
    Month,
    Description,
    Name,
    Period,
    Technologies,
    Software,
    Role,
}

impl Collection {
    /// The parts an element of this collection actually has.
    pub fn parts(self) -> &'static [ColumnPart] {
        match self {
            Collection::EducationAndWork => &[ColumnPart::Year, ColumnPart::Month, ColumnPart::Description],
            Collection::Qualifications => &[ColumnPart::Year, ColumnPart::Month, ColumnPart::Name],
            Collection::WorkHistory => &[
                ColumnPart::Period,
                ColumnPart::Description,
                ColumnPart::Technologies,
                ColumnPart::Software,
                ColumnPart::Role,
            ],
        }
    }

    /// Column that carries section captions and the end marker.
    pub fn text_part(self) -> ColumnPart {
        match self {
            Collection::Qualifications => ColumnPart::Name,
            Collection::EducationAndWork | Collection::WorkHistory => ColumnPart::Description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatColumn {
    pub part: ColumnPart,
    pub first_col: u16,
    pub last_col: u16,
    pub style: CellStyle,
}

/// A repeat column spanning whole sheet columns, `"A"` or `"C:H"`.
pub const fn column(part: ColumnPart, cols: &str, style: CellStyle) -> RepeatColumn {
    let (first_col, last_col) = col_range(cols);
    RepeatColumn {
        part,
        first_col,
        last_col,
        style,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatBlock {
    pub collection: Collection,
    /// Zero-based first row.
    pub anchor_row: u32,
    /// Rows reserved below the anchor; output beyond this is dropped.
    pub capacity: u32,
    /// Row height in points; `None` keeps the sheet default.
    pub row_height: Option<f64>,
    pub columns: &'static [RepeatColumn],
}

impl RepeatBlock {
    pub fn region(&self) -> CellRange {
        let first_col = self.columns.iter().map(|c| c.first_col).min().unwrap_or(0);
        let last_col = self.columns.iter().map(|c| c.last_col).max().unwrap_or(0);
        CellRange {
            first: CellRef::new(self.anchor_row, first_col),
            last: CellRef::new(self.anchor_row + self.capacity.saturating_sub(1), last_col),
        }
    }

    pub fn column_for(&self, part: ColumnPart) -> Option<&RepeatColumn> {
        self.columns.iter().find(|c| c.part == part)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill bands and photo slot
// ────────────────────────────────────────────────────────────────────────────

/// One category band on the skill sheet: a header merged over the label and grade
/// columns, then one row per catalog skill in that category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillBand {
    pub category: SkillCategory,
    pub title: Label,
    /// Label column; the grade goes in the column to its right.
    pub header: CellRef,
}

impl SkillBand {
    pub fn header_range(&self) -> CellRange {
        CellRange {
            first: self.header,
            last: self.header.offset(0, 1),
        }
    }

    pub fn region(&self, skill_count: u32) -> CellRange {
        CellRange {
            first: self.header,
            last: self.header.offset(skill_count, 1),
        }
    }
}

pub const fn band(category: SkillCategory, title: Label, header: &str) -> SkillBand {
    SkillBand {
        category,
        title,
        header: a1(header),
    }
}

/// Target size of an embedded image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Envelope {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSlot {
    pub range: CellRange,
    pub envelope: Envelope,
    pub placeholder: Label,
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutSpec {
    pub kind: SheetKind,
    /// Column widths in character units.
    pub column_widths: &'static [(u16, f64)],
    /// Explicit row heights in points for fixed rows.
    pub row_heights: &'static [(u32, f64)],
    pub entries: &'static [LayoutEntry],
    pub repeats: &'static [RepeatBlock],
    pub skill_bands: &'static [SkillBand],
    pub photo: Option<PhotoSlot>,
}
