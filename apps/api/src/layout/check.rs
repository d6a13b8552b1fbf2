//! Startup self-check over the LayoutSpecs and the SkillCatalog.
//!
//! Anything reported here is a programming error in the static tables, so `main` refuses
//! to start instead of failing individual requests later.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::layout::spec::{CellRange, Collection, ColumnPart, LayoutSpec, SheetKind};
use crate::skills::{SkillCategory, SkillDef};

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("{sheet:?}: range {range} is not well-formed")]
    MalformedRange { sheet: SheetKind, range: String },

    #[error("{sheet:?}: {first} overlaps {second}")]
    Overlap {
        sheet: SheetKind,
        first: String,
        second: String,
    },

    #[error("{sheet:?}: repeat block for {collection:?} has a {part:?} column its elements don't have")]
    DanglingRepeatColumn {
        sheet: SheetKind,
        collection: Collection,
        part: ColumnPart,
    },

    #[error("{sheet:?}: repeat block for {collection:?} has no rows or no columns")]
    EmptyRepeat {
        sheet: SheetKind,
        collection: Collection,
    },

    #[error("skill id '{0}' appears more than once in the catalog")]
    DuplicateSkill(String),

    #[error("skill category {0:?} has no band on any sheet")]
    MissingBand(SkillCategory),

    #[error("skill category {0:?} has more than one band")]
    DuplicateBand(SkillCategory),
}

/// A named rectangle that must not share cells with any other on the same sheet.
struct Region {
    name: String,
    range: CellRange,
}

/// Validates `sheets` against `catalog`. The first problem found is returned.
pub fn validate(sheets: &[&LayoutSpec], catalog: &[SkillDef]) -> Result<(), LayoutError> {
    let mut ids = HashSet::new();
    for skill in catalog {
        if !ids.insert(skill.id) {
            return Err(LayoutError::DuplicateSkill(skill.id.to_string()));
        }
    }

    let mut skills_per_category: HashMap<SkillCategory, u32> = HashMap::new();
    for skill in catalog {
        *skills_per_category.entry(skill.category).or_default() += 1;
    }

    let mut banded = HashSet::new();
    for sheet in sheets {
        for band in sheet.skill_bands {
            if !banded.insert(band.category) {
                return Err(LayoutError::DuplicateBand(band.category));
            }
        }
        check_sheet(sheet, &skills_per_category)?;
    }

    for category in SkillCategory::ALL {
        if skills_per_category.contains_key(&category) && !banded.contains(&category) {
            return Err(LayoutError::MissingBand(category));
        }
    }
    Ok(())
}

fn check_sheet(
    sheet: &LayoutSpec,
    skills_per_category: &HashMap<SkillCategory, u32>,
) -> Result<(), LayoutError> {
    let mut regions = Vec::new();

    for entry in sheet.entries {
        regions.push(Region {
            name: format!("entry {}", entry.range),
            range: entry.range,
        });
    }

    if let Some(photo) = &sheet.photo {
        regions.push(Region {
            name: format!("photo {}", photo.range),
            range: photo.range,
        });
    }

    for block in sheet.repeats {
        if block.capacity == 0 || block.columns.is_empty() {
            return Err(LayoutError::EmptyRepeat {
                sheet: sheet.kind,
                collection: block.collection,
            });
        }
        let parts = block.collection.parts();
        for column in block.columns {
            if !parts.contains(&column.part) || column.first_col > column.last_col {
                return Err(LayoutError::DanglingRepeatColumn {
                    sheet: sheet.kind,
                    collection: block.collection,
                    part: column.part,
                });
            }
        }
        if block.column_for(block.collection.text_part()).is_none() {
            return Err(LayoutError::DanglingRepeatColumn {
                sheet: sheet.kind,
                collection: block.collection,
                part: block.collection.text_part(),
            });
        }
        regions.push(Region {
            name: format!("{:?} rows {}", block.collection, block.region()),
            range: block.region(),
        });
    }

    for band in sheet.skill_bands {
        let count = skills_per_category.get(&band.category).copied().unwrap_or(0);
        regions.push(Region {
            name: format!("{:?} band {}", band.category, band.region(count)),
            range: band.region(count),
        });
    }

    for region in &regions {
        if !region.range.is_well_formed() {
            return Err(LayoutError::MalformedRange {
                sheet: sheet.kind,
                range: region.name.clone(),
            });
        }
    }

    for (i, a) in regions.iter().enumerate() {
        if let Some(b) = regions[i + 1..].iter().find(|b| a.range.intersects(&b.range)) {
            return Err(LayoutError::Overlap {
                sheet: sheet.kind,
                first: a.name.clone(),
                second: b.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::captions::Label;
    use crate::layout::spec::{
        band, caption, column, CellRef, LayoutEntry, RepeatBlock, RepeatColumn, SkillBand,
        CAPTION, VALUE,
    };
    use crate::layout::{ALL_SHEETS, SKILL_MATRIX};
    use crate::skills::{SkillKind, SKILL_CATALOG};

    fn sheet(entries: &'static [LayoutEntry]) -> LayoutSpec {
        LayoutSpec {
            kind: SheetKind::Resume,
            column_widths: &[],
            row_heights: &[],
            entries,
            repeats: &[],
            skill_bands: &[],
            photo: None,
        }
    }

    #[test]
    fn test_shipped_layouts_pass() {
        assert_eq!(validate(&ALL_SHEETS, SKILL_CATALOG), Ok(()));
    }

    #[test]
    fn test_overlapping_merges_are_rejected() {
        static ENTRIES: [LayoutEntry; 2] = [
            caption("A1:C2", Label::new("a", "a"), CAPTION),
            caption("C2:D3", Label::new("b", "b"), CAPTION),
        ];
        let bad = sheet(&ENTRIES);
        let err = validate(&[&bad], &[]).unwrap_err();
        assert!(matches!(err, LayoutError::Overlap { .. }), "{err}");
    }

    #[test]
    fn test_malformed_range_is_rejected() {
        static ENTRIES: [LayoutEntry; 1] =
            [caption("C3:A1", Label::new("a", "a"), CAPTION)];
        let bad = sheet(&ENTRIES);
        assert!(matches!(
            validate(&[&bad], &[]),
            Err(LayoutError::MalformedRange { .. })
        ));
    }

    #[test]
    fn test_dangling_repeat_column_is_rejected() {
        static COLUMNS: [RepeatColumn; 2] = [
            column(ColumnPart::Year, "A", VALUE),
            column(ColumnPart::Role, "B:D", VALUE),
        ];
        static REPEATS: [RepeatBlock; 1] = [RepeatBlock {
            collection: Collection::Qualifications,
            anchor_row: 2,
            capacity: 4,
            row_height: None,
            columns: &COLUMNS,
        }];
        let mut bad = sheet(&[]);
        bad.repeats = &REPEATS;
        assert_eq!(
            validate(&[&bad], &[]),
            Err(LayoutError::DanglingRepeatColumn {
                sheet: SheetKind::Resume,
                collection: Collection::Qualifications,
                part: ColumnPart::Role,
            })
        );
    }

    #[test]
    fn test_band_overflow_is_rejected() {
        // Os has six skills; a Cloud header four rows below would be overwritten.
        static BANDS: [SkillBand; 2] = [
            band(SkillCategory::Os, Label::new("OS", "OS"), "A1"),
            band(SkillCategory::Cloud, Label::new("Cloud", "Cloud"), "A5"),
        ];
        static CATALOG: [SkillDef; 7] = {
            const fn os(id: &'static str) -> SkillDef {
                SkillDef {
                    id,
                    label: id,
                    category: SkillCategory::Os,
                    kind: SkillKind::Graded,
                    baseline: false,
                }
            }
            [
                os("a"),
                os("b"),
                os("c"),
                os("d"),
                os("e"),
                os("f"),
                SkillDef {
                    id: "aws",
                    label: "AWS",
                    category: SkillCategory::Cloud,
                    kind: SkillKind::Graded,
                    baseline: false,
                },
            ]
        };
        let mut bad = sheet(&[]);
        bad.skill_bands = &BANDS;
        assert!(matches!(
            validate(&[&bad], &CATALOG),
            Err(LayoutError::Overlap { .. })
        ));
    }

    #[test]
    fn test_duplicate_skill_id_is_rejected() {
        let mut catalog = SKILL_CATALOG.to_vec();
        catalog.push(SKILL_CATALOG[0]);
        assert_eq!(
            validate(&ALL_SHEETS, &catalog),
            Err(LayoutError::DuplicateSkill("windows".to_string()))
        );
    }

    #[test]
    fn test_missing_band_is_rejected() {
        let bands = SKILL_MATRIX.skill_bands;
        let mut matrix = SKILL_MATRIX;
        matrix.skill_bands = &bands[..bands.len() - 1];
        assert_eq!(
            validate(&[&matrix], SKILL_CATALOG),
            Err(LayoutError::MissingBand(SkillCategory::PcUsage))
        );
    }

    #[test]
    fn test_band_header_range_covers_grade_column() {
        let b = SKILL_MATRIX.skill_bands[0];
        assert_eq!(b.header_range().last, CellRef::new(4, 1));
    }
}
