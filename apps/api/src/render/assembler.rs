//! The pure `ApplicantProfile → DocumentBundle` function.

use crate::layout::ALL_SHEETS;
use crate::profile::{check_render_preconditions, ApplicantProfile};
use crate::render::sheet::SheetModel;
use crate::render::writer::write_sheet;
use crate::render::xlsx::write_workbook;
use crate::render::{RenderContext, RenderError};

/// One applicant's three-sheet workbook.
#[derive(Debug, Clone)]
pub struct DocumentBundle {
    pub applicant_id: String,
    pub bytes: Vec<u8>,
}

/// Builds the sheet models in workbook order. Does not check preconditions.
pub fn build_sheets(profile: &ApplicantProfile, ctx: &RenderContext) -> Vec<SheetModel> {
    ALL_SHEETS
        .iter()
        .map(|spec| write_sheet(spec, profile, ctx))
        .collect()
}

/// Refuses to run (returning every unmet precondition) unless the name is present and
/// every narrative field is inside its length window.
pub fn assemble_workbook(
    profile: &ApplicantProfile,
    ctx: &RenderContext,
) -> Result<DocumentBundle, RenderError> {
    check_render_preconditions(profile)?;

    let sheets = build_sheets(profile, ctx);
    let bytes = write_workbook(&sheets)?;

    Ok(DocumentBundle {
        applicant_id: profile.applicant_id.clone(),
        bytes,
    })
}
