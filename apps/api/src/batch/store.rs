//! The production `ProfileSource`, backed by Postgres and S3.
//!
//! Profile documents live as jsonb in `applicant_profiles`, registration fields in
//! `applicant_registrations`, and photos as objects in S3 under the document's `photoKey`.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::batch::source::{FetchError, ProfileSource};
use crate::profile::{parse_profile_document, ApplicantProfile, Photo, RegistrationRecord};

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
    s3: S3Client,
    bucket: String,
}

impl PgProfileStore {
    pub fn new(db: PgPool, s3: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            db,
            s3,
            bucket: bucket.into(),
        }
    }

    async fn fetch_photo(&self, key: &str) -> Result<Photo, FetchError> {
        let object = self
            .s3
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| FetchError::Storage(format!("S3 get_object failed for {key}: {e}")))?;

        let bytes: Bytes = object
            .body
            .collect()
            .await
            .map_err(|e| FetchError::Storage(format!("S3 body read failed for {key}: {e}")))?
            .into_bytes();

        Ok(Photo(bytes.to_vec()))
    }
}

#[async_trait]
impl ProfileSource for PgProfileStore {
    async fn fetch_profile(&self, applicant_id: &str) -> Result<Option<ApplicantProfile>, FetchError> {
        let document: Option<(Value,)> =
            sqlx::query_as("SELECT document FROM applicant_profiles WHERE applicant_id = $1")
                .bind(applicant_id)
                .fetch_optional(&self.db)
                .await?;

        let Some((document,)) = document else {
            debug!("Applicant {applicant_id}: no stored profile document");
            return Ok(None);
        };

        let mut profile = parse_profile_document(document)
            .map_err(|e| FetchError::Malformed(format!("applicant {applicant_id}: {e}")))?;

        // A missing photo degrades to the placeholder; it never fails the fetch.
        let key = profile.photo_key.trim().to_string();
        if profile.photo.is_none() && !key.is_empty() {
            match self.fetch_photo(&key).await {
                Ok(photo) => profile.photo = Some(photo),
                Err(e) => warn!("Applicant {applicant_id}: photo unavailable ({e})"),
            }
        }

        Ok(Some(profile))
    }

    async fn fetch_registration(
        &self,
        applicant_id: &str,
    ) -> Result<Option<RegistrationRecord>, FetchError> {
        let record = sqlx::query_as::<_, RegistrationRecord>(
            r#"
            SELECT last_name, first_name, last_name_kana, first_name_kana, birth_date,
                   gender, nationality, postal_code, address, phone, email
            FROM applicant_registrations
            WHERE applicant_id = $1
            "#,
        )
        .bind(applicant_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }
}
