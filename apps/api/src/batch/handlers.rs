use axum::{
    extract::{Query, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::batch::archive::build_archive;
use crate::batch::orchestrator::{BatchItem, BatchOrchestrator, BatchState, CancelFlag, RecordFailure};
use crate::errors::AppError;
use crate::render::handlers::{resolve_locale, LocaleQuery};
use crate::render::RenderContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub applicants: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivePayload {
    pub file_name: String,
    /// Files inside the zip, in order.
    pub entries: Vec<String>,
    /// Names more than one applicant resolved to; the later workbook was kept.
    pub overwritten: Vec<String>,
    pub content_base64: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub batch_id: Uuid,
    pub state: BatchState,
    pub summary: String,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RecordFailure>,
    pub archive: ArchivePayload,
}

/// POST /api/v1/documents/batch
pub async fn handle_render_batch(
    State(state): State<AppState>,
    Query(params): Query<LocaleQuery>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    if req.applicants.len() > state.batch_max_records {
        return Err(AppError::BadRequest(format!(
            "A batch may contain at most {} applicants ({} given)",
            state.batch_max_records,
            req.applicants.len()
        )));
    }

    let locale = resolve_locale(&state, params.locale.as_deref())?;
    let mut orchestrator = BatchOrchestrator::new(state.profiles.clone(), RenderContext::today(locale));
    let report = orchestrator
        .run(req.applicants, &CancelFlag::default(), |_| {})
        .await;

    let batch_id = report.batch_id;
    let batch_state = report.state;
    let summary = report.summary();
    let (succeeded, failed) = (report.succeeded(), report.failed());
    let failures = report.failures();

    let entries = report.into_archive_entries();
    let archive = tokio::task::spawn_blocking(move || build_archive(&entries))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Archive task failed: {e}")))??;

    let file_name = format!("resumes_{batch_id}.zip");
    info!(
        "Batch {batch_id}: {summary} ({} bytes archived as {file_name})",
        archive.bytes.len()
    );

    Ok(Json(BatchResponse {
        batch_id,
        state: batch_state,
        summary,
        succeeded,
        failed,
        failures,
        archive: ArchivePayload {
            file_name,
            entries: archive.file_names,
            overwritten: archive.overwritten,
            content_base64: STANDARD.encode(&archive.bytes),
        },
    }))
}
