//! Applies one LayoutSpec to one ApplicantProfile.

use tracing::warn;

use crate::layout::captions::{
    format_as_of, format_birth_date, format_years, gender_label, EDUCATION_SECTION, END_OF_LIST,
    SAME_AS_ABOVE, WORK_SECTION,
};
use crate::layout::skill_matrix::{SKILL_GRADE, SKILL_LABEL};
use crate::layout::spec::{
    CellRange, CellRef, Collection, ColumnPart, HAlign, LayoutSpec, PhotoSlot, ProfileField,
    RepeatBlock, SkillBand, Source, BAND_HEADER, CAPTION,
};
use crate::profile::model::{Address, ApplicantProfile, HistoryEntry};
use crate::render::image;
use crate::render::rich_text::{name_with_nationality, postal_address};
use crate::render::sheet::{CellValue, SheetModel};
use crate::render::RenderContext;
use crate::skills::{skills_in, SkillKind};

pub fn write_sheet(spec: &LayoutSpec, profile: &ApplicantProfile, ctx: &RenderContext) -> SheetModel {
    let mut sheet = SheetModel::new(spec.kind.sheet_name(ctx.locale));

    for &(col, width) in spec.column_widths {
        sheet.set_column_width(col, width);
    }
    for &(row, height) in spec.row_heights {
        sheet.set_row_height(row, height);
    }

    for entry in spec.entries {
        let value = match entry.source {
            Source::Caption(label) => CellValue::Text(label.get(ctx.locale).to_string()),
            Source::Field(field) => resolve_field(field, profile, ctx),
        };
        sheet.write(entry.range, value, entry.style);
    }

    for block in spec.repeats {
        write_repeat(&mut sheet, block, profile, ctx);
    }

    for band in spec.skill_bands {
        write_skill_band(&mut sheet, band, profile, ctx);
    }

    if let Some(slot) = &spec.photo {
        write_photo(&mut sheet, slot, profile, ctx);
    }

    sheet
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed fields
// ────────────────────────────────────────────────────────────────────────────

pub fn resolve_field(field: ProfileField, p: &ApplicantProfile, ctx: &RenderContext) -> CellValue {
    use ProfileField::*;

    let locale = ctx.locale;
    let text = |s: &str| CellValue::Text(s.to_string());
    let contact = |value: CellValue| {
        if p.contact_same_as_current {
            text(SAME_AS_ABOVE.get(locale))
        } else {
            value
        }
    };

    match field {
        AsOfDate => CellValue::Text(format_as_of(ctx.as_of, locale)),
        FullName => CellValue::Text(p.full_name.display()),
        KanaName => CellValue::Text(p.kana_name.display()),
        NameWithNationality => CellValue::Rich(name_with_nationality(
            &p.full_name.display(),
            &p.nationality,
        )),
        BirthDateWithAge => CellValue::Text(
            p.birth_date
                .map(|birth| format_birth_date(birth, ctx.as_of, locale))
                .unwrap_or_default(),
        ),
        Gender => text(gender_label(p.gender, locale)),
        CurrentAddressKana => text(&p.current_address.street_kana),
        CurrentAddress => address_value(&p.current_address),
        CurrentPhone => text(&p.current_address.phone),
        CurrentEmail => text(&p.current_address.email),
        ContactAddressKana => contact(text(&p.contact_address.street_kana)),
        ContactAddress => contact(address_value(&p.contact_address)),
        ContactPhone => contact(text(&p.contact_address.phone)),
        ContactEmail => contact(text(&p.contact_address.email)),
        CertificationName => text(&p.japanese_certification.name),
        CertificationDate => text(&p.japanese_certification.acquired_on),
        NextTestLevel => text(&p.next_test.level),
        NextTestDate => text(&p.next_test.date),
        CertificateStatus => text(&p.language_certificate_status),
        SelfIntroduction => text(&p.narrative.self_introduction),
        WhyThisCountry => text(&p.narrative.why_this_country),
        WhyInterested => text(&p.narrative.why_interested),
        PersonalPreferences => text(&p.narrative.personal_preferences),
        SpouseStatus => text(&p.spouse_status),
        SpouseDependency => text(&p.spouse_dependency),
    }
}

fn address_value(address: &Address) -> CellValue {
    let rich = postal_address(&address.postal_code, &address.street);
    match rich.runs() {
        [single] => CellValue::Text(single.text.clone()),
        _ => CellValue::Rich(rich),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Repeating blocks
// ────────────────────────────────────────────────────────────────────────────

/// One output row of a repeat block.
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Values(Vec<(ColumnPart, String)>),
    /// Literal written to the block's text column.
    Caption(&'static str, HAlign),
}

fn collect_lines(collection: Collection, p: &ApplicantProfile, ctx: &RenderContext) -> Vec<Line> {
    let locale = ctx.locale;
    match collection {
        Collection::EducationAndWork => {
            let history_line = |e: &HistoryEntry| {
                Line::Values(vec![
                    (ColumnPart::Year, e.year.clone()),
                    (ColumnPart::Month, e.month.clone()),
                    (ColumnPart::Description, e.description.clone()),
                ])
            };
            let education: Vec<Line> = p
                .education
                .iter()
                .filter(|e| e.is_complete())
                .map(history_line)
                .collect();
            let work: Vec<Line> = p
                .work_experience
                .iter()
                .filter(|e| e.is_complete())
                .map(history_line)
                .collect();

            let mut lines = Vec::new();
            if !education.is_empty() {
                lines.push(Line::Caption(EDUCATION_SECTION.get(locale), HAlign::Center));
                lines.extend(education);
            }
            if !work.is_empty() {
                lines.push(Line::Caption(WORK_SECTION.get(locale), HAlign::Center));
                lines.extend(work);
            }
            if !lines.is_empty() {
                lines.push(Line::Caption(END_OF_LIST.get(locale), HAlign::Right));
            }
            lines
        }
        Collection::Qualifications => p
            .qualifications
            .iter()
            .filter(|q| q.is_complete())
            .map(|q| {
                Line::Values(vec![
                    (ColumnPart::Year, q.year.clone()),
                    (ColumnPart::Month, q.month.clone()),
                    (ColumnPart::Name, q.name.clone()),
                ])
            })
            .collect(),
        Collection::WorkHistory => p
            .detailed_work_history
            .iter()
            .filter(|w| w.is_complete())
            .map(|w| {
                Line::Values(vec![
                    (ColumnPart::Period, w.period.clone()),
                    (ColumnPart::Description, w.description.clone()),
                    (ColumnPart::Technologies, w.technologies_used.clone()),
                    (ColumnPart::Software, w.software_used.clone()),
                    (ColumnPart::Role, w.role.clone()),
                ])
            })
            .collect(),
    }
}

fn write_repeat(sheet: &mut SheetModel, block: &RepeatBlock, p: &ApplicantProfile, ctx: &RenderContext) {
    let mut lines = collect_lines(block.collection, p, ctx);
    let capacity = block.capacity as usize;
    if lines.len() > capacity {
        warn!(
            "Applicant {}: {:?} needs {} rows but the sheet has {}, dropping the rest",
            p.applicant_id,
            block.collection,
            lines.len(),
            capacity
        );
        lines.truncate(capacity);
    }

    // Every reserved row is drawn so the table keeps its grid when it's short.
    for offset in 0..block.capacity {
        let row = block.anchor_row + offset;
        if let Some(height) = block.row_height {
            sheet.set_row_height(row, height);
        }
        for column in block.columns {
            sheet.write_text(column_range(row, column.first_col, column.last_col), "", column.style);
        }
    }

    for (offset, line) in lines.into_iter().enumerate() {
        let row = block.anchor_row + offset as u32;
        match line {
            Line::Values(values) => {
                for (part, value) in values {
                    if let Some(column) = block.column_for(part) {
                        sheet.write_text(
                            column_range(row, column.first_col, column.last_col),
                            value,
                            column.style,
                        );
                    }
                }
            }
            Line::Caption(text, align) => {
                if let Some(column) = block.column_for(block.collection.text_part()) {
                    sheet.write_text(
                        column_range(row, column.first_col, column.last_col),
                        text,
                        column.style.with_align(align),
                    );
                }
            }
        }
    }
}

fn column_range(row: u32, first_col: u16, last_col: u16) -> CellRange {
    CellRange {
        first: CellRef::new(row, first_col),
        last: CellRef::new(row, last_col),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skill bands
// ────────────────────────────────────────────────────────────────────────────

fn write_skill_band(sheet: &mut SheetModel, band: &SkillBand, p: &ApplicantProfile, ctx: &RenderContext) {
    sheet.write_text(band.header_range(), band.title.get(ctx.locale), BAND_HEADER);

    for (i, skill) in skills_in(band.category).enumerate() {
        let label_cell = band.header.offset(i as u32 + 1, 0);
        let value_cell = label_cell.offset(0, 1);
        let value = match skill.kind {
            SkillKind::Graded => p.skills.grade(skill.id).as_str().to_string(),
            SkillKind::Years => format_years(p.skills.pc_usage_years, ctx.locale),
        };
        sheet.write_text(CellRange::single(label_cell), skill.label, SKILL_LABEL);
        sheet.write_text(CellRange::single(value_cell), value, SKILL_GRADE);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Photo
// ────────────────────────────────────────────────────────────────────────────

fn write_photo(sheet: &mut SheetModel, slot: &PhotoSlot, p: &ApplicantProfile, ctx: &RenderContext) {
    let embedded = match &p.photo {
        None => None,
        Some(photo) => match image::embed(photo.as_bytes(), slot) {
            Ok(embedded) => Some(embedded),
            Err(e) => {
                warn!(
                    "Applicant {}: {e}; rendering the photo placeholder instead",
                    p.applicant_id
                );
                None
            }
        },
    };

    match embedded {
        Some(embedded) => {
            for &(row, height) in &embedded.row_heights {
                sheet.set_row_height_pixels(row, height);
            }
            for &(col, width) in &embedded.column_widths {
                sheet.set_column_width_pixels(col, width);
            }
            sheet.place_image(slot.range.first, embedded);
        }
        None => sheet.write_text(slot.range, slot.placeholder.get(ctx.locale), CAPTION),
    }
}
