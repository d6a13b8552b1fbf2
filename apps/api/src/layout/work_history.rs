//! Work-history sheet (職務経歴書): one tall row per detailed work-history entry.

use crate::layout::captions::Label;
use crate::layout::spec::{
    caption, column, field, Collection, ColumnPart, LayoutEntry, LayoutSpec, ProfileField as F,
    RepeatBlock, RepeatColumn, SheetKind, AS_OF, CAPTION, TABLE_HEADER, TEXT_BLOCK, TITLE, VALUE,
};

const ENTRIES: &[LayoutEntry] = &[
    caption("A1:F1", Label::new("職 務 経 歴 書", "WORK HISTORY"), TITLE),
    field("E2:F2", F::AsOfDate, AS_OF),
    caption("A3", Label::new("氏名", "Name"), CAPTION),
    field("B3:D3", F::FullName, VALUE),
    caption("A5", Label::new("期間", "Period"), TABLE_HEADER),
    caption("B5:C5", Label::new("業務内容", "Description"), TABLE_HEADER),
    caption("D5", Label::new("使用技術", "Technologies"), TABLE_HEADER),
    caption("E5", Label::new("使用ソフト", "Software"), TABLE_HEADER),
    caption("F5", Label::new("役割", "Role"), TABLE_HEADER),
];

const COLUMNS: &[RepeatColumn] = &[
    column(ColumnPart::Period, "A", TEXT_BLOCK),
    column(ColumnPart::Description, "B:C", TEXT_BLOCK),
    column(ColumnPart::Technologies, "D", TEXT_BLOCK),
    column(ColumnPart::Software, "E", TEXT_BLOCK),
    column(ColumnPart::Role, "F", TEXT_BLOCK),
];

const REPEATS: &[RepeatBlock] = &[RepeatBlock {
    collection: Collection::WorkHistory,
    anchor_row: 5,
    capacity: 20,
    row_height: Some(60.0),
    columns: COLUMNS,
}];

pub static WORK_HISTORY: LayoutSpec = LayoutSpec {
    kind: SheetKind::WorkHistory,
    column_widths: &[(0, 16.0), (1, 24.0), (2, 24.0), (3, 18.0), (4, 18.0), (5, 14.0)],
    row_heights: &[(0, 32.0), (4, 20.0)],
    entries: ENTRIES,
    repeats: REPEATS,
    skill_bands: &[],
    photo: None,
};
