//! Skill sheet (スキルシート). Three column bands; each category is a header row followed
//! by one row per catalog skill, label on the left and grade on the right.

use crate::layout::captions::Label;
use crate::layout::spec::{
    band, caption, field, CellStyle, LayoutEntry, LayoutSpec, ProfileField as F, SheetKind,
    SkillBand, AS_OF, CAPTION, NOTE, TITLE, VALUE, VALUE_CENTER,
};
use crate::skills::SkillCategory::*;

/// Style of a skill's label cell.
pub const SKILL_LABEL: CellStyle = VALUE;
/// Style of a skill's grade cell.
pub const SKILL_GRADE: CellStyle = VALUE_CENTER;

const ENTRIES: &[LayoutEntry] = &[
    caption("A1:H1", Label::new("スキルシート", "SKILL SHEET"), TITLE),
    caption("A2", Label::new("氏名", "Name"), CAPTION),
    field("B2:D2", F::FullName, VALUE),
    field("F2:H2", F::AsOfDate, AS_OF),
    caption(
        "A3:H3",
        Label::new(
            "評価: A=指導できる B=一人でできる C=指導があればできる D=経験あり E=知識のみ",
            "Grades: A=can teach B=independent C=with guidance D=some experience E=knowledge only",
        ),
        NOTE,
    ),
];

const BANDS: &[SkillBand] = &[
    // Band 1: columns A/B
    band(Os, Label::new("OS", "OS"), "A5"),
    band(Infrastructure, Label::new("サーバー・インフラ", "Server / infrastructure"), "A13"),
    band(Database, Label::new("データベース", "Database"), "A22"),
    band(Role, Label::new("担当工程", "Role / phase"), "A31"),
    // Band 2: columns D/E
    band(Language, Label::new("プログラミング言語", "Programming language"), "D5"),
    band(Framework, Label::new("フレームワーク", "Framework"), "D21"),
    band(Process, Label::new("開発手法", "Process"), "D31"),
    // Band 3: columns G/H
    band(OfficeTool, Label::new("オフィスソフト", "Office"), "G5"),
    band(DesignTool, Label::new("デザインツール", "Design tool"), "G11"),
    band(DevTool, Label::new("開発ツール", "Dev tool"), "G17"),
    band(Cloud, Label::new("クラウド", "Cloud"), "G24"),
    band(Other, Label::new("その他", "Other"), "G29"),
    band(PcUsage, Label::new("PC使用歴", "PC usage"), "G34"),
];

pub static SKILL_MATRIX: LayoutSpec = LayoutSpec {
    kind: SheetKind::SkillMatrix,
    column_widths: &[
        (0, 24.0),
        (1, 8.0),
        (2, 3.0),
        (3, 24.0),
        (4, 8.0),
        (5, 3.0),
        (6, 24.0),
        (7, 8.0),
    ],
    row_heights: &[(0, 32.0), (2, 28.0)],
    entries: ENTRIES,
    repeats: &[],
    skill_bands: BANDS,
    photo: None,
};
