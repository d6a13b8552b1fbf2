// Layout tables: one LayoutSpec per sheet, consumed by render::writer.
// Tables are process-wide and immutable; `self_check` validates them once at startup.

pub mod captions;
pub mod check;
pub mod resume;
pub mod skill_matrix;
pub mod spec;
pub mod work_history;

pub use captions::Locale;
pub use check::LayoutError;
pub use resume::RESUME;
pub use skill_matrix::SKILL_MATRIX;
pub use spec::LayoutSpec;
pub use work_history::WORK_HISTORY;

use crate::skills::SKILL_CATALOG;

/// Every sheet, in workbook order.
pub static ALL_SHEETS: [&LayoutSpec; 3] = [&RESUME, &WORK_HISTORY, &SKILL_MATRIX];

/// Validates all LayoutSpecs against the SkillCatalog. Called from `main` before serving.
pub fn self_check() -> Result<(), LayoutError> {
    check::validate(&ALL_SHEETS, SKILL_CATALOG)
}
