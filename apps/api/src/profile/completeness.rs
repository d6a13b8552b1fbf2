//! Completion scoring: equal-weight "field present" predicates over an ApplicantProfile.
//!
//! `Requirement::ALL` is the only definition of what a complete profile is. The render
//! gate (`check_render_preconditions`) is a subset of the same predicates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::model::{ApplicantProfile, Gender};
use crate::skills::baseline_skills;

/// Inclusive character window for the scored narrative fields.
pub const NARRATIVE_MIN_CHARS: usize = 300;
pub const NARRATIVE_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Requirement {
    FullName,
    KanaName,
    BirthDate,
    Gender,
    Nationality,
    CurrentPostalCode,
    CurrentAddress,
    CurrentAddressKana,
    CurrentPhone,
    CurrentEmail,
    ContactPostalCode,
    ContactAddress,
    ContactAddressKana,
    ContactPhone,
    ContactEmail,
    SelfIntroduction,
    Education,
    WorkExperience,
    Qualifications,
    WorkHistory,
    BaselineSkill,
    CertificationName,
    WhyThisCountry,
    WhyInterested,
    SpouseStatus,
    SpouseDependency,
    /// Render gate only: at least one name part. Not scored.
    Name,
}

impl Requirement {
    pub const ALL: [Requirement; 26] = [
        Requirement::FullName,
        Requirement::KanaName,
        Requirement::BirthDate,
        Requirement::Gender,
        Requirement::Nationality,
        Requirement::CurrentPostalCode,
        Requirement::CurrentAddress,
        Requirement::CurrentAddressKana,
        Requirement::CurrentPhone,
        Requirement::CurrentEmail,
        Requirement::ContactPostalCode,
        Requirement::ContactAddress,
        Requirement::ContactAddressKana,
        Requirement::ContactPhone,
        Requirement::ContactEmail,
        Requirement::SelfIntroduction,
        Requirement::Education,
        Requirement::WorkExperience,
        Requirement::Qualifications,
        Requirement::WorkHistory,
        Requirement::BaselineSkill,
        Requirement::CertificationName,
        Requirement::WhyThisCountry,
        Requirement::WhyInterested,
        Requirement::SpouseStatus,
        Requirement::SpouseDependency,
    ];

    pub fn is_satisfied(self, p: &ApplicantProfile) -> bool {
        let contact = |value: &str| p.contact_same_as_current || present(value);
        match self {
            Requirement::FullName => p.full_name.is_complete(),
            Requirement::KanaName => p.kana_name.is_complete(),
            Requirement::BirthDate => p.birth_date.is_some(),
            Requirement::Gender => p.gender != Gender::Unspecified,
            Requirement::Nationality => present(&p.nationality),
            Requirement::CurrentPostalCode => present(&p.current_address.postal_code),
            Requirement::CurrentAddress => present(&p.current_address.street),
            Requirement::CurrentAddressKana => present(&p.current_address.street_kana),
            Requirement::CurrentPhone => present(&p.current_address.phone),
            Requirement::CurrentEmail => present(&p.current_address.email),
            Requirement::ContactPostalCode => contact(&p.contact_address.postal_code),
            Requirement::ContactAddress => contact(&p.contact_address.street),
            Requirement::ContactAddressKana => contact(&p.contact_address.street_kana),
            Requirement::ContactPhone => contact(&p.contact_address.phone),
            Requirement::ContactEmail => contact(&p.contact_address.email),
            Requirement::SelfIntroduction => within_window(&p.narrative.self_introduction),
            Requirement::Education => {
                p.no_education || p.education.iter().any(|e| e.is_complete())
            }
            Requirement::WorkExperience => {
                p.no_work_experience || p.work_experience.iter().any(|e| e.is_complete())
            }
            Requirement::Qualifications => {
                p.no_qualifications || p.qualifications.iter().any(|q| q.is_complete())
            }
            Requirement::WorkHistory => {
                p.no_work_history || p.detailed_work_history.iter().any(|w| w.is_complete())
            }
            Requirement::BaselineSkill => {
                baseline_skills().any(|skill| p.skills.grade(skill.id).is_set())
            }
            Requirement::CertificationName => present(&p.japanese_certification.name),
            Requirement::WhyThisCountry => within_window(&p.narrative.why_this_country),
            Requirement::WhyInterested => within_window(&p.narrative.why_interested),
            Requirement::SpouseStatus => present(&p.spouse_status),
            Requirement::SpouseDependency => present(&p.spouse_dependency),
            Requirement::Name => !p.full_name.is_empty(),
        }
    }

    /// Human-readable explanation used when the requirement is unmet.
    pub fn unmet_message(self, p: &ApplicantProfile) -> String {
        let window = |field: &str, text: &str| {
            format!(
                "{field} must be between {NARRATIVE_MIN_CHARS} and {NARRATIVE_MAX_CHARS} characters (currently {})",
                char_len(text)
            )
        };
        match self {
            Requirement::FullName => "last and first name are required".to_string(),
            Requirement::Name => "a name is required".to_string(),
            Requirement::SelfIntroduction => {
                window("selfIntroduction", &p.narrative.self_introduction)
            }
            Requirement::WhyThisCountry => window("whyThisCountry", &p.narrative.why_this_country),
            Requirement::WhyInterested => window("whyInterested", &p.narrative.why_interested),
            Requirement::Education => "add an education entry or mark it not applicable".to_string(),
            Requirement::WorkExperience => {
                "add a work experience entry or mark it not applicable".to_string()
            }
            Requirement::Qualifications => {
                "add a qualification or mark it not applicable".to_string()
            }
            Requirement::WorkHistory => {
                "add a work history entry or mark it not applicable".to_string()
            }
            Requirement::BaselineSkill => {
                "grade at least one of Word, Excel or PowerPoint".to_string()
            }
            other => format!("{} is required", other.id()),
        }
    }

    pub fn id(self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }
}

/// Preconditions the workbook assembler refuses to run without.
pub const RENDER_PRECONDITIONS: [Requirement; 4] = [
    Requirement::Name,
    Requirement::SelfIntroduction,
    Requirement::WhyThisCountry,
    Requirement::WhyInterested,
];

#[derive(Debug, Clone, Serialize)]
pub struct PredicateResult {
    pub requirement: Requirement,
    pub satisfied: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionScore {
    /// 0–100.
    pub percentage: u8,
    pub satisfied_predicates: BTreeSet<Requirement>,
    pub detail: Vec<PredicateResult>,
}

pub fn compute_completion(profile: &ApplicantProfile) -> CompletionScore {
    let detail: Vec<PredicateResult> = Requirement::ALL
        .iter()
        .map(|&requirement| PredicateResult {
            requirement,
            satisfied: requirement.is_satisfied(profile),
        })
        .collect();

    let satisfied_predicates: BTreeSet<Requirement> = detail
        .iter()
        .filter(|d| d.satisfied)
        .map(|d| d.requirement)
        .collect();

    let total = Requirement::ALL.len() as f64;
    let percentage = (100.0 * satisfied_predicates.len() as f64 / total).round() as u8;

    CompletionScore {
        percentage,
        satisfied_predicates,
        detail,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnmetRequirement {
    pub requirement: Requirement,
    pub message: String,
}

/// A rejected render: every unmet precondition, not just the first.
#[derive(Debug, Clone, Error, Serialize)]
#[error("profile is not ready to render: {}", summarize(.unmet))]
pub struct ValidationFailure {
    pub unmet: Vec<UnmetRequirement>,
}

fn summarize(unmet: &[UnmetRequirement]) -> String {
    unmet
        .iter()
        .map(|u| u.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn check_render_preconditions(profile: &ApplicantProfile) -> Result<(), ValidationFailure> {
    let unmet: Vec<UnmetRequirement> = RENDER_PRECONDITIONS
        .iter()
        .filter(|r| !r.is_satisfied(profile))
        .map(|&requirement| UnmetRequirement {
            requirement,
            message: requirement.unmet_message(profile),
        })
        .collect();

    if unmet.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { unmet })
    }
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn within_window(text: &str) -> bool {
    (NARRATIVE_MIN_CHARS..=NARRATIVE_MAX_CHARS).contains(&char_len(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::fixtures::complete_profile;
    use crate::profile::model::{Address, HistoryEntry, PersonName};
    use crate::skills::Grade;
    use proptest::prelude::*;

    fn unmet(score: &CompletionScore) -> Vec<Requirement> {
        score
            .detail
            .iter()
            .filter(|d| !d.satisfied)
            .map(|d| d.requirement)
            .collect()
    }

    #[test]
    fn test_complete_profile_scores_100() {
        let score = compute_completion(&complete_profile());
        assert_eq!(score.percentage, 100, "unmet: {:?}", unmet(&score));
        assert_eq!(score.satisfied_predicates.len(), Requirement::ALL.len());
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let score = compute_completion(&ApplicantProfile::default());
        assert_eq!(score.percentage, 0);
        assert_eq!(unmet(&score).len(), Requirement::ALL.len());
    }

    #[test]
    fn test_score_rounds_to_nearest() {
        let mut profile = complete_profile();
        profile.spouse_status.clear();
        // 25 / 26 = 96.15…
        assert_eq!(compute_completion(&profile).percentage, 96);
    }

    #[test]
    fn test_narrative_window_boundaries() {
        let mut profile = complete_profile();
        for (len, ok) in [(299, false), (300, true), (500, true), (501, false)] {
            profile.narrative.self_introduction = "あ".repeat(len);
            assert_eq!(
                Requirement::SelfIntroduction.is_satisfied(&profile),
                ok,
                "length {len}"
            );
            assert_eq!(check_render_preconditions(&profile).is_ok(), ok, "length {len}");
        }
    }

    #[test]
    fn test_window_counts_characters_not_bytes() {
        // 300 multi-byte characters are ~900 bytes.
        assert!(within_window(&"日".repeat(300)));
        assert!(!within_window(&"日".repeat(501)));
    }

    #[test]
    fn test_contact_same_as_current_exempts_contact_block() {
        let mut profile = complete_profile();
        profile.contact_address = Address::default();
        profile.contact_same_as_current = true;
        let score = compute_completion(&profile);
        assert!(unmet(&score).into_iter().all(|r| !matches!(
            r,
            Requirement::ContactPostalCode
                | Requirement::ContactAddress
                | Requirement::ContactAddressKana
                | Requirement::ContactPhone
                | Requirement::ContactEmail
        )));
        assert_eq!(score.percentage, 100);

        profile.contact_same_as_current = false;
        assert_eq!(unmet(&compute_completion(&profile)).len(), 5);
    }

    #[test]
    fn test_no_entries_flags_exempt_collections() {
        let mut profile = complete_profile();
        profile.education.clear();
        profile.work_experience.clear();
        profile.qualifications.clear();
        profile.detailed_work_history.clear();
        assert_eq!(unmet(&compute_completion(&profile)).len(), 4);

        profile.no_education = true;
        profile.no_work_experience = true;
        profile.no_qualifications = true;
        profile.no_work_history = true;
        assert_eq!(compute_completion(&profile).percentage, 100);
    }

    #[test]
    fn test_incomplete_history_entry_does_not_satisfy() {
        let mut profile = complete_profile();
        profile.education = vec![HistoryEntry::new("", "4", "Enrolled")];
        assert!(!Requirement::Education.is_satisfied(&profile));
    }

    #[test]
    fn test_any_baseline_grade_satisfies() {
        let mut profile = ApplicantProfile::default();
        profile.skills.grades.insert("python".to_string(), Grade::A);
        assert!(!Requirement::BaselineSkill.is_satisfied(&profile));
        profile.skills.grades.insert("powerpoint".to_string(), Grade::E);
        assert!(Requirement::BaselineSkill.is_satisfied(&profile));
    }

    #[test]
    fn test_render_preconditions_lists_every_failure() {
        let mut profile = complete_profile();
        profile.full_name = PersonName::default();
        profile.narrative.why_interested = "short".to_string();
        let failure = check_render_preconditions(&profile).unwrap_err();
        let unmet: Vec<_> = failure.unmet.iter().map(|u| u.requirement).collect();
        assert_eq!(unmet, vec![Requirement::Name, Requirement::WhyInterested]);
        assert!(failure.unmet[1].message.contains("currently 5"));
        assert!(failure.to_string().contains("a name is required"));
    }

    #[test]
    fn test_single_part_name_renders_but_scores_incomplete() {
        let mut profile = complete_profile();
        profile.full_name = PersonName::new("Suharto", "");
        assert!(check_render_preconditions(&profile).is_ok());
        assert!(!Requirement::FullName.is_satisfied(&profile));
        assert!(!compute_completion(&profile)
            .satisfied_predicates
            .contains(&Requirement::FullName));

        profile.full_name = PersonName::new("", "Binh");
        assert!(check_render_preconditions(&profile).is_ok());
    }

    #[test]
    fn test_name_gate_is_not_scored() {
        assert!(!Requirement::ALL.contains(&Requirement::Name));
        assert_eq!(Requirement::Name.id(), "name");
    }

    #[test]
    fn test_requirement_ids_are_camel_case() {
        assert_eq!(Requirement::SelfIntroduction.id(), "selfIntroduction");
        assert_eq!(Requirement::ContactEmail.id(), "contactEmail");
    }

    /// Makes a single requirement satisfied without touching any other field.
    fn satisfy(profile: &mut ApplicantProfile, requirement: Requirement) {
        let narrative = "x".repeat(NARRATIVE_MIN_CHARS);
        match requirement {
            Requirement::FullName => profile.full_name = PersonName::new("Le", "Binh"),
            Requirement::KanaName => profile.kana_name = PersonName::new("レ", "ビン"),
            Requirement::BirthDate => profile.birth_date = chrono::NaiveDate::from_ymd_opt(2000, 1, 1),
            Requirement::Gender => profile.gender = Gender::Male,
            Requirement::Nationality => profile.nationality = "Vietnam".to_string(),
            Requirement::CurrentPostalCode => profile.current_address.postal_code = "1".into(),
            Requirement::CurrentAddress => profile.current_address.street = "1".into(),
            Requirement::CurrentAddressKana => profile.current_address.street_kana = "1".into(),
            Requirement::CurrentPhone => profile.current_address.phone = "1".into(),
            Requirement::CurrentEmail => profile.current_address.email = "1".into(),
            Requirement::ContactPostalCode => profile.contact_address.postal_code = "1".into(),
            Requirement::ContactAddress => profile.contact_address.street = "1".into(),
            Requirement::ContactAddressKana => profile.contact_address.street_kana = "1".into(),
            Requirement::ContactPhone => profile.contact_address.phone = "1".into(),
            Requirement::ContactEmail => profile.contact_address.email = "1".into(),
            Requirement::SelfIntroduction => profile.narrative.self_introduction = narrative,
            Requirement::Education => profile.education.push(HistoryEntry::new("2010", "4", "A")),
            Requirement::WorkExperience => {
                profile.work_experience.push(HistoryEntry::new("2015", "4", "B"))
            }
            Requirement::Qualifications => profile.no_qualifications = true,
            Requirement::WorkHistory => profile.no_work_history = true,
            Requirement::BaselineSkill => {
                profile.skills.grades.insert("excel".to_string(), Grade::C);
            }
            Requirement::CertificationName => profile.japanese_certification.name = "N3".into(),
            Requirement::WhyThisCountry => profile.narrative.why_this_country = narrative,
            Requirement::WhyInterested => profile.narrative.why_interested = narrative,
            Requirement::SpouseStatus => profile.spouse_status = "none".into(),
            Requirement::SpouseDependency => profile.spouse_dependency = "none".into(),
            Requirement::Name => profile.full_name.last = "Le".into(),
        }
    }

    proptest! {
        #[test]
        fn prop_adding_a_missing_field_never_lowers_score(
            mask in 0u32..(1 << 26),
            extra in 0usize..26,
            same_as_current in any::<bool>(),
        ) {
            let mut base = ApplicantProfile {
                contact_same_as_current: same_as_current,
                ..Default::default()
            };
            for (i, requirement) in Requirement::ALL.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    satisfy(&mut base, *requirement);
                }
            }
            let before = compute_completion(&base);

            let mut richer = base.clone();
            satisfy(&mut richer, Requirement::ALL[extra]);
            let after = compute_completion(&richer);

            prop_assert!(after.percentage >= before.percentage);
            prop_assert!(after.satisfied_predicates.is_superset(&before.satisfied_predicates));
        }
    }
}
