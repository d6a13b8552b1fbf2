//! The immutable applicant snapshot every document is rendered from.
//!
//! All fields deserialize with defaults so a partial JSON document still yields a complete
//! value; absence is always an explicit empty (`""`, `[]`, `Grade::None`, `None` date).

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use thiserror::Error;

use crate::skills::Grade;

/// Combined cap on `education` + `work_experience` (one resume column band).
pub const MAX_HISTORY_ENTRIES: usize = 15;
pub const MAX_QUALIFICATIONS: usize = 4;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("education and work experience are limited to {} entries combined", MAX_HISTORY_ENTRIES)]
    HistoryCapExceeded,

    #[error("qualifications are limited to {} entries", MAX_QUALIFICATIONS)]
    QualificationCapExceeded,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicantProfile {
    pub applicant_id: String,
    pub full_name: PersonName,
    /// Phonetic reading of `full_name`.
    pub kana_name: PersonName,
    #[serde(deserialize_with = "lenient_date")]
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    pub nationality: String,

    pub current_address: Address,
    pub contact_address: Address,
    pub contact_same_as_current: bool,

    pub education: Vec<HistoryEntry>,
    pub no_education: bool,
    pub work_experience: Vec<HistoryEntry>,
    pub no_work_experience: bool,
    pub qualifications: Vec<Qualification>,
    pub no_qualifications: bool,
    pub detailed_work_history: Vec<WorkHistoryEntry>,
    pub no_work_history: bool,

    pub skills: Skills,
    pub narrative: Narrative,
    pub spouse_status: String,
    pub spouse_dependency: String,

    pub japanese_certification: Certification,
    pub next_test: PlannedTest,
    pub language_certificate_status: String,

    /// Storage key of the photo object; resolved into `photo` by the profile store.
    pub photo_key: String,
    pub photo: Option<Photo>,
}

impl ApplicantProfile {
    pub fn history_len(&self) -> usize {
        self.education.len() + self.work_experience.len()
    }

    pub fn push_education(&mut self, entry: HistoryEntry) -> Result<(), ProfileError> {
        if self.history_len() >= MAX_HISTORY_ENTRIES {
            return Err(ProfileError::HistoryCapExceeded);
        }
        self.no_education = false;
        self.education.push(entry);
        Ok(())
    }

    pub fn push_work_experience(&mut self, entry: HistoryEntry) -> Result<(), ProfileError> {
        if self.history_len() >= MAX_HISTORY_ENTRIES {
            return Err(ProfileError::HistoryCapExceeded);
        }
        self.no_work_experience = false;
        self.work_experience.push(entry);
        Ok(())
    }

    pub fn push_qualification(&mut self, entry: Qualification) -> Result<(), ProfileError> {
        if self.qualifications.len() >= MAX_QUALIFICATIONS {
            return Err(ProfileError::QualificationCapExceeded);
        }
        self.no_qualifications = false;
        self.qualifications.push(entry);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonName {
    pub last: String,
    pub first: String,
}

impl PersonName {
    pub fn new(last: impl Into<String>, first: impl Into<String>) -> Self {
        Self {
            last: last.into(),
            first: first.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.last.trim().is_empty() && !self.first.trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.last.trim().is_empty() && self.first.trim().is_empty()
    }

    /// "Last First", skipping a blank part.
    pub fn display(&self) -> String {
        [self.last.trim(), self.first.trim()]
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    #[serde(alias = "")]
    Unspecified,
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub postal_code: String,
    pub street: String,
    pub street_kana: String,
    pub phone: String,
    pub email: String,
}

/// One line of the resume's education / work band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub year: String,
    /// Month, or a free-form duration ("4–9").
    pub month: String,
    pub description: String,
}

impl HistoryEntry {
    pub fn new(year: &str, month: &str, description: &str) -> Self {
        Self {
            year: year.to_string(),
            month: month.to_string(),
            description: description.to_string(),
        }
    }

    /// Only entries with both a year and content are rendered or counted.
    pub fn is_complete(&self) -> bool {
        !self.year.trim().is_empty() && !self.description.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Qualification {
    pub year: String,
    pub month: String,
    pub name: String,
}

impl Qualification {
    pub fn new(year: &str, month: &str, name: &str) -> Self {
        Self {
            year: year.to_string(),
            month: month.to_string(),
            name: name.to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.year.trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// Long-form entry for the work-history sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkHistoryEntry {
    pub period: String,
    pub description: String,
    pub technologies_used: String,
    pub software_used: String,
    pub role: String,
}

impl WorkHistoryEntry {
    pub fn is_complete(&self) -> bool {
        !self.period.trim().is_empty() && !self.description.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skills {
    /// Catalog skill id → grade. Unknown ids are kept but never rendered.
    pub grades: BTreeMap<String, Grade>,
    pub pc_usage_years: u32,
}

impl Skills {
    pub fn grade(&self, skill_id: &str) -> Grade {
        self.grades.get(skill_id).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Narrative {
    pub self_introduction: String,
    pub why_this_country: String,
    pub why_interested: String,
    pub personal_preferences: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub acquired_on: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannedTest {
    pub level: String,
    pub date: String,
}

/// Raw photo bytes. Travels as base64 in JSON (a `data:` URL prefix is accepted).
#[derive(Clone, PartialEq)]
pub struct Photo(pub Vec<u8>);

impl Photo {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Photo({} bytes)", self.0.len())
    }
}

impl Serialize for Photo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for Photo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let payload = match raw.split_once(";base64,") {
            Some((_, data)) => data,
            None => raw.as_str(),
        };
        STANDARD
            .decode(payload.trim())
            .map(Photo)
            .map_err(serde::de::Error::custom)
    }
}

/// Basic registration fields, the fallback source when the profile document is partial
/// or missing. Every column is nullable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name_kana: Option<String>,
    pub first_name_kana: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub postal_code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Accepts `"YYYY-MM-DD"`, `""` or `null`.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            // Tolerate full timestamps ("2000-04-01T00:00:00Z") by keeping the date part.
            let date_part = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}
