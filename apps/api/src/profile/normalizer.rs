//! Merges the stored profile document with the registration record.
//!
//! Rule per field: primary wins if non-empty, otherwise fallback, otherwise the type's
//! empty default. Never fails: two absent sources give `ApplicantProfile::default()`.

use serde_json::Value;
use tracing::warn;

use crate::profile::model::{
    ApplicantProfile, Gender, RegistrationRecord, MAX_HISTORY_ENTRIES, MAX_QUALIFICATIONS,
};

/// Parses a stored profile document. JSON `null`s anywhere in the tree are treated as
/// absent so they fall back to defaults instead of failing deserialization.
pub fn parse_profile_document(document: Value) -> Result<ApplicantProfile, serde_json::Error> {
    serde_json::from_value(strip_nulls(document))
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

/// Builds the complete profile for `applicant_id` from up to two sources.
pub fn normalize_profile(
    applicant_id: &str,
    primary: Option<ApplicantProfile>,
    fallback: Option<&RegistrationRecord>,
) -> ApplicantProfile {
    let mut profile = primary.unwrap_or_default();
    if profile.applicant_id.trim().is_empty() {
        profile.applicant_id = applicant_id.to_string();
    }

    if let Some(reg) = fallback {
        fill(&mut profile.full_name.last, &reg.last_name);
        fill(&mut profile.full_name.first, &reg.first_name);
        fill(&mut profile.kana_name.last, &reg.last_name_kana);
        fill(&mut profile.kana_name.first, &reg.first_name_kana);
        fill(&mut profile.nationality, &reg.nationality);
        fill(&mut profile.current_address.postal_code, &reg.postal_code);
        fill(&mut profile.current_address.street, &reg.address);
        fill(&mut profile.current_address.phone, &reg.phone);
        fill(&mut profile.current_address.email, &reg.email);
        if profile.birth_date.is_none() {
            profile.birth_date = reg.birth_date;
        }
        if profile.gender == Gender::Unspecified {
            profile.gender = reg.gender.as_deref().map(parse_gender).unwrap_or_default();
        }
    }

    enforce_collection_rules(&mut profile);
    profile
}

fn fill(target: &mut String, fallback: &Option<String>) {
    if target.trim().is_empty() {
        if let Some(value) = fallback.as_deref().filter(|v| !v.trim().is_empty()) {
            *target = value.to_string();
        }
    }
}

/// Registration forms store gender as free text in either language.
fn parse_gender(raw: &str) -> Gender {
    match raw.trim().to_lowercase().as_str() {
        "male" | "m" | "男" | "男性" => Gender::Male,
        "female" | "f" | "女" | "女性" => Gender::Female,
        "other" | "その他" => Gender::Other,
        _ => Gender::Unspecified,
    }
}

/// "No entries" flags empty their collection; stored data over the caps is truncated.
fn enforce_collection_rules(profile: &mut ApplicantProfile) {
    if profile.no_education {
        profile.education.clear();
    }
    if profile.no_work_experience {
        profile.work_experience.clear();
    }
    if profile.no_qualifications {
        profile.qualifications.clear();
    }
    if profile.no_work_history {
        profile.detailed_work_history.clear();
    }

    if profile.history_len() > MAX_HISTORY_ENTRIES {
        warn!(
            "Applicant {}: {} education/work entries exceed the cap of {}, truncating work experience",
            profile.applicant_id,
            profile.history_len(),
            MAX_HISTORY_ENTRIES
        );
        profile.education.truncate(MAX_HISTORY_ENTRIES);
        let room = MAX_HISTORY_ENTRIES - profile.education.len();
        profile.work_experience.truncate(room);
    }
    if profile.qualifications.len() > MAX_QUALIFICATIONS {
        warn!(
            "Applicant {}: {} qualifications exceed the cap of {}, truncating",
            profile.applicant_id,
            profile.qualifications.len(),
            MAX_QUALIFICATIONS
        );
        profile.qualifications.truncate(MAX_QUALIFICATIONS);
    }
}
