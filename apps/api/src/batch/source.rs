//! The per-identifier profile-fetch capability and the two-source resolution built on it.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::profile::{normalize_profile, ApplicantProfile, RegistrationRecord};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("applicant {0} has neither a profile document nor a registration record")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("stored profile is malformed: {0}")]
    Malformed(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait
// ────────────────────────────────────────────────────────────────────────────

/// Read access to stored applicant data. `Ok(None)` means "no such record", which is not
/// an error: the other source may still have something.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// The applicant's profile document, with `photo` resolved when it names one.
    async fn fetch_profile(&self, applicant_id: &str) -> Result<Option<ApplicantProfile>, FetchError>;

    /// Basic registration fields used to fill gaps in the profile document.
    async fn fetch_registration(
        &self,
        applicant_id: &str,
    ) -> Result<Option<RegistrationRecord>, FetchError>;
}

/// Fetches both sources and normalises them into one profile.
///
/// A failed primary fetch falls back to the registration record (and vice versa). Only
/// when neither source yields anything does the applicant count as unresolvable; the
/// first error seen is returned in that case.
pub async fn resolve_profile(
    source: &dyn ProfileSource,
    applicant_id: &str,
) -> Result<ApplicantProfile, FetchError> {
    let mut first_error = None;

    let primary = match source.fetch_profile(applicant_id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Applicant {applicant_id}: profile document unavailable ({e}), falling back to registration fields");
            first_error = Some(e);
            None
        }
    };

    let fallback = match source.fetch_registration(applicant_id).await {
        Ok(record) => record,
        Err(e) => {
            warn!("Applicant {applicant_id}: registration record unavailable ({e})");
            first_error.get_or_insert(e);
            None
        }
    };

    if primary.is_none() && fallback.is_none() {
        return Err(first_error.unwrap_or_else(|| FetchError::NotFound(applicant_id.to_string())));
    }

    Ok(normalize_profile(applicant_id, primary, fallback.as_ref()))
}

#[cfg(test)]
pub mod memory {
    //! In-memory `ProfileSource` for tests.

    use std::collections::{HashMap, HashSet};

    use super::*;

    #[derive(Default)]
    pub struct MemorySource {
        pub profiles: HashMap<String, ApplicantProfile>,
        pub registrations: HashMap<String, RegistrationRecord>,
        /// Identifiers whose profile fetch fails with a storage error.
        pub failing_profiles: HashSet<String>,
        /// Identifiers whose registration fetch fails with a storage error.
        pub failing_registrations: HashSet<String>,
    }

    impl MemorySource {
        pub fn with_profiles(profiles: impl IntoIterator<Item = ApplicantProfile>) -> Self {
            Self {
                profiles: profiles
                    .into_iter()
                    .map(|p| (p.applicant_id.clone(), p))
                    .collect(),
                ..Default::default()
            }
        }

        /// Makes both fetches fail for `id`.
        pub fn fail(mut self, id: &str) -> Self {
            self.failing_profiles.insert(id.to_string());
            self.failing_registrations.insert(id.to_string());
            self
        }
    }

    #[async_trait]
    impl ProfileSource for MemorySource {
        async fn fetch_profile(&self, id: &str) -> Result<Option<ApplicantProfile>, FetchError> {
            if self.failing_profiles.contains(id) {
                return Err(FetchError::Storage(format!("connection reset while reading {id}")));
            }
            Ok(self.profiles.get(id).cloned())
        }

        async fn fetch_registration(&self, id: &str) -> Result<Option<RegistrationRecord>, FetchError> {
            if self.failing_registrations.contains(id) {
                return Err(FetchError::Storage(format!("connection reset while reading {id}")));
            }
            Ok(self.registrations.get(id).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemorySource;
    use super::*;
    use crate::profile::fixtures::complete_profile;

    #[tokio::test]
    async fn test_primary_failure_falls_back_to_registration() {
        let mut source = MemorySource::default();
        source.failing_profiles.insert("a-7".to_string());
        source.registrations.insert(
            "a-7".to_string(),
            RegistrationRecord {
                last_name: Some("Silva".to_string()),
                first_name: Some("Ana".to_string()),
                ..Default::default()
            },
        );

        let profile = resolve_profile(&source, "a-7").await.unwrap();
        assert_eq!(profile.applicant_id, "a-7");
        assert_eq!(profile.full_name.display(), "Silva Ana");
    }

    #[tokio::test]
    async fn test_both_sources_failing_is_an_error() {
        let source = MemorySource::default().fail("a-3");
        let err = resolve_profile(&source, "a-3").await.unwrap_err();
        assert!(matches!(err, FetchError::Storage(_)));
    }

    #[tokio::test]
    async fn test_unknown_applicant_is_not_found() {
        let source = MemorySource::default();
        assert!(matches!(
            resolve_profile(&source, "nobody").await,
            Err(FetchError::NotFound(id)) if id == "nobody"
        ));
    }

    #[tokio::test]
    async fn test_registration_failure_keeps_primary() {
        let mut source = MemorySource::with_profiles([complete_profile()]);
        source.failing_registrations.insert("app-001".to_string());
        let profile = resolve_profile(&source, "app-001").await.unwrap();
        assert_eq!(profile.full_name.display(), "Nguyen Van An");
    }
}
