use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::batch::archive::{resolve_name, sanitize_file_stem, FILE_SUFFIX};
use crate::batch::resolve_profile;
use crate::errors::AppError;
use crate::layout::Locale;
use crate::profile::{
    compute_completion, normalize_profile, parse_profile_document, ApplicantProfile,
    CompletionScore,
};
use crate::render::{assemble_workbook, DocumentBundle, RenderContext};
use crate::state::AppState;

/// Bytes left unescaped in `filename*`: ASCII alphanumerics and `- . _ ~`.
const ATTR_CHAR_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// `?locale=` if given, otherwise the configured default.
pub fn resolve_locale(state: &AppState, requested: Option<&str>) -> Result<Locale, AppError> {
    match requested {
        Some(raw) => raw.parse::<Locale>().map_err(AppError::BadRequest),
        None => Ok(state.locale),
    }
}

/// POST /api/v1/documents/render
pub async fn handle_render_document(
    State(state): State<AppState>,
    Query(params): Query<LocaleQuery>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let locale = resolve_locale(&state, params.locale.as_deref())?;
    let profile = profile_from_body(body)?;
    let bundle = render(profile.clone(), RenderContext::today(locale)).await?;
    Ok(workbook_response(&profile, bundle))
}

/// POST /api/v1/documents/completion
pub async fn handle_completion(Json(body): Json<Value>) -> Result<Json<CompletionScore>, AppError> {
    let profile = profile_from_body(body)?;
    Ok(Json(compute_completion(&profile)))
}

/// GET /api/v1/applicants/:id/document
pub async fn handle_applicant_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LocaleQuery>,
) -> Result<Response, AppError> {
    let locale = resolve_locale(&state, params.locale.as_deref())?;
    let profile = resolve_profile(state.profiles.as_ref(), &id).await?;
    let bundle = render(profile.clone(), RenderContext::today(locale)).await?;
    Ok(workbook_response(&profile, bundle))
}

fn profile_from_body(body: Value) -> Result<ApplicantProfile, AppError> {
    let parsed = parse_profile_document(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid applicant profile: {e}")))?;
    let id = parsed.applicant_id.clone();
    Ok(normalize_profile(&id, Some(parsed), None))
}

async fn render(profile: ApplicantProfile, ctx: RenderContext) -> Result<DocumentBundle, AppError> {
    let bundle = tokio::task::spawn_blocking(move || assemble_workbook(&profile, &ctx))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Render task failed: {e}")))??;
    info!(
        "Rendered workbook for applicant {} ({} bytes)",
        bundle.applicant_id,
        bundle.bytes.len()
    );
    Ok(bundle)
}

fn workbook_response(profile: &ApplicantProfile, bundle: DocumentBundle) -> Response {
    let name = resolve_name(
        &profile.applicant_id,
        Some(profile.full_name.display().as_str()),
        Some(profile.kana_name.display().as_str()),
    );
    let file_name = format!("{}{}", sanitize_file_stem(&name), FILE_SUFFIX);

    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
        ],
        bundle.bytes,
    )
        .into_response()
}

/// `attachment` with an ASCII `filename` and the exact name as RFC 5987 `filename*`.
pub fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .map(|c| if c == '"' || c == '\\' { '_' } else { c })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        utf8_percent_encode(file_name, ATTR_CHAR_SET)
    )
}
