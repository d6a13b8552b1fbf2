//! Resume sheet (履歴書). Columns A–H; photo in the top-right block.

use crate::layout::captions::{Label, PHOTO_PLACEHOLDER};
use crate::layout::spec::{
    caption, column, field, region, CellStyle, Collection, ColumnPart, Envelope, HAlign,
    LayoutEntry, LayoutSpec, PhotoSlot, ProfileField as F, RepeatBlock, RepeatColumn, SheetKind,
    AS_OF, CAPTION, TABLE_HEADER, TEXT_BLOCK, TITLE, VALUE, VALUE_CENTER,
};

const NAME: CellStyle = CellStyle {
    font_size: 16.0,
    ..VALUE
};

const SECTION: CellStyle = TABLE_HEADER.with_align(HAlign::Left);

const ENTRIES: &[LayoutEntry] = &[
    caption("A1:F1", Label::new("履 歴 書", "RESUME"), TITLE),
    field("G1:H1", F::AsOfDate, AS_OF),
    // Identity
    caption("A2", Label::new("ふりがな", "Kana"), CAPTION),
    field("B2:F2", F::KanaName, VALUE),
    caption("A3:A4", Label::new("氏名", "Name"), CAPTION),
    field("B3:F4", F::NameWithNationality, NAME),
    caption("A5", Label::new("生年月日", "Date of birth"), CAPTION),
    field("B5:D5", F::BirthDateWithAge, VALUE),
    caption("E5", Label::new("性別", "Gender"), CAPTION),
    field("F5", F::Gender, VALUE_CENTER),
    // Current address
    caption("A6", Label::new("ふりがな", "Kana"), CAPTION),
    field("B6:F6", F::CurrentAddressKana, VALUE),
    caption("A7:A8", Label::new("現住所", "Address"), CAPTION),
    field("B7:F8", F::CurrentAddress, VALUE),
    caption("A9", Label::new("電話", "Phone"), CAPTION),
    field("B9:C9", F::CurrentPhone, VALUE),
    caption("D9", Label::new("E-mail", "E-mail"), CAPTION),
    field("E9:H9", F::CurrentEmail, VALUE),
    // Contact address
    caption("A10", Label::new("ふりがな", "Kana"), CAPTION),
    field("B10:H10", F::ContactAddressKana, VALUE),
    caption("A11:A12", Label::new("連絡先", "Contact"), CAPTION),
    field("B11:H12", F::ContactAddress, VALUE),
    caption("A13", Label::new("電話", "Phone"), CAPTION),
    field("B13:C13", F::ContactPhone, VALUE),
    caption("D13", Label::new("E-mail", "E-mail"), CAPTION),
    field("E13:H13", F::ContactEmail, VALUE),
    // Education / work header
    caption("A15", Label::new("年", "Year"), TABLE_HEADER),
    caption("B15", Label::new("月", "Month"), TABLE_HEADER),
    caption("C15:H15", Label::new("学歴・職歴", "Education / Work History"), TABLE_HEADER),
    // Qualifications header
    caption("A35", Label::new("年", "Year"), TABLE_HEADER),
    caption("B35", Label::new("月", "Month"), TABLE_HEADER),
    caption("C35:H35", Label::new("免許・資格", "Licenses / Qualifications"), TABLE_HEADER),
    // Japanese certification and test planning
    caption("A41:B41", Label::new("日本語資格", "Japanese certification"), CAPTION),
    field("C41:E41", F::CertificationName, VALUE),
    caption("F41", Label::new("取得日", "Acquired"), CAPTION),
    field("G41:H41", F::CertificationDate, VALUE_CENTER),
    caption("A42:B42", Label::new("次回受験", "Next test"), CAPTION),
    field("C42:E42", F::NextTestLevel, VALUE),
    caption("F42", Label::new("受験日", "Test date"), CAPTION),
    field("G42:H42", F::NextTestDate, VALUE_CENTER),
    caption("A43:B43", Label::new("合格証明書", "Certificate status"), CAPTION),
    field("C43:H43", F::CertificateStatus, VALUE),
    // Narratives
    caption("A45:H45", Label::new("自己紹介", "Self-introduction"), SECTION),
    field("A46:H50", F::SelfIntroduction, TEXT_BLOCK),
    caption("A51:H51", Label::new("日本を選んだ理由", "Why this country"), SECTION),
    field("A52:H56", F::WhyThisCountry, TEXT_BLOCK),
    caption("A57:H57", Label::new("志望動機", "Why interested"), SECTION),
    field("A58:H62", F::WhyInterested, TEXT_BLOCK),
    caption("A63:H63", Label::new("本人希望記入欄", "Personal preferences"), SECTION),
    field("A64:H67", F::PersonalPreferences, TEXT_BLOCK),
    // Family
    caption("A68:B68", Label::new("配偶者", "Spouse"), CAPTION),
    field("C68:D68", F::SpouseStatus, VALUE_CENTER),
    caption("E68:F68", Label::new("配偶者の扶養義務", "Spouse dependency"), CAPTION),
    field("G68:H68", F::SpouseDependency, VALUE_CENTER),
];

const HISTORY_COLUMNS: &[RepeatColumn] = &[
    column(ColumnPart::Year, "A", VALUE_CENTER),
    column(ColumnPart::Month, "B", VALUE_CENTER),
    column(ColumnPart::Description, "C:H", VALUE),
];

const QUALIFICATION_COLUMNS: &[RepeatColumn] = &[
    column(ColumnPart::Year, "A", VALUE_CENTER),
    column(ColumnPart::Month, "B", VALUE_CENTER),
    column(ColumnPart::Name, "C:H", VALUE),
];

const REPEATS: &[RepeatBlock] = &[
    RepeatBlock {
        collection: Collection::EducationAndWork,
        anchor_row: 15,
        capacity: 18,
        row_height: Some(18.0),
        columns: HISTORY_COLUMNS,
    },
    RepeatBlock {
        collection: Collection::Qualifications,
        anchor_row: 35,
        capacity: 4,
        row_height: Some(18.0),
        columns: QUALIFICATION_COLUMNS,
    },
];

const COLUMN_WIDTHS: &[(u16, f64)] = &[
    (0, 10.0),
    (1, 6.0),
    (2, 12.0),
    (3, 10.0),
    (4, 10.0),
    (5, 12.0),
    (6, 12.0),
    (7, 12.0),
];

const ROW_HEIGHTS: &[(u32, f64)] = &[
    (0, 32.0),
    (2, 20.0),
    (3, 20.0),
    (6, 16.0),
    (7, 16.0),
    (10, 16.0),
    (11, 16.0),
];

pub static RESUME: LayoutSpec = LayoutSpec {
    kind: SheetKind::Resume,
    column_widths: COLUMN_WIDTHS,
    row_heights: ROW_HEIGHTS,
    entries: ENTRIES,
    repeats: REPEATS,
    skill_bands: &[],
    photo: Some(PhotoSlot {
        range: region("G2:H7"),
        envelope: Envelope {
            width: 170.0,
            height: 226.0,
        },
        placeholder: PHOTO_PLACEHOLDER,
    }),
};
