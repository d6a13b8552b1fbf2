pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::batch::handlers as batch;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Single-applicant documents
        .route(
            "/api/v1/documents/render",
            post(render::handle_render_document),
        )
        .route(
            "/api/v1/documents/completion",
            post(render::handle_completion),
        )
        .route(
            "/api/v1/applicants/:id/document",
            get(render::handle_applicant_document),
        )
        // Batch
        .route("/api/v1/documents/batch", post(batch::handle_render_batch))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use zip::ZipArchive;

    use crate::batch::source::memory::MemorySource;
    use crate::layout::Locale;
    use crate::profile::fixtures::{complete_profile, text_of_len};

    fn app(source: MemorySource, batch_max_records: usize) -> Router {
        build_router(AppState {
            profiles: Arc::new(source),
            locale: Locale::En,
            batch_max_records,
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(MemorySource::default(), 10)
            .oneshot(get_request("/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "recruit-docs-api");
    }

    #[tokio::test]
    async fn test_render_returns_xlsx_attachment() {
        let profile = serde_json::to_value(complete_profile()).unwrap();
        let response = app(MemorySource::default(), 10)
            .oneshot(post_json("/api/v1/documents/render", &profile))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::CONTENT_TYPE],
            render::XLSX_CONTENT_TYPE
        );
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains("filename=\"Nguyen Van An_resume_workhistory_skills.xlsx\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_render_rejects_incomplete_profile_with_every_failure() {
        let mut profile = complete_profile();
        profile.full_name.first.clear();
        profile.full_name.last.clear();
        profile.narrative.why_interested = text_of_len("x", 600);

        let response = app(MemorySource::default(), 10)
            .oneshot(post_json(
                "/api/v1/documents/render",
                &serde_json::to_value(profile).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_locale_is_bad_request() {
        let profile = serde_json::to_value(complete_profile()).unwrap();
        let response = app(MemorySource::default(), 10)
            .oneshot(post_json("/api/v1/documents/render?locale=fr", &profile))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_completion_reports_each_predicate() {
        let response = app(MemorySource::default(), 10)
            .oneshot(post_json("/api/v1/documents/completion", &json!({ "fullName": { "last": "Silva" } })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["percentage"].as_u64().unwrap() < 100);
        assert!(!body["detail"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stored_applicant_document() {
        let source = MemorySource::with_profiles([complete_profile()]);
        let response = app(source, 10)
            .oneshot(get_request("/api/v1/applicants/app-001/document?locale=ja"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_applicant_is_not_found() {
        let response = app(MemorySource::default(), 10)
            .oneshot(get_request("/api/v1/applicants/nobody/document"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_batch_archives_successes_and_lists_failures() {
        let mut second = complete_profile();
        second.applicant_id = "app-002".to_string();
        second.full_name.first = "Thi Binh".to_string();
        let source = MemorySource::with_profiles([complete_profile(), second]);

        let request = json!({
            "applicants": [
                { "identifier": "app-001", "displayNameHint": "An" },
                { "identifier": "missing" },
                { "identifier": "app-002" }
            ]
        });
        let response = app(source, 10)
            .oneshot(post_json("/api/v1/documents/batch", &request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["state"], "PartiallyCompleted");
        assert_eq!(body["summary"], "2 succeeded, 1 failed");
        assert_eq!(body["failures"][0]["identifier"], "missing");
        let batch_id = body["batchId"].as_str().unwrap();
        assert_eq!(body["archive"]["fileName"], format!("resumes_{batch_id}.zip"));
        assert_eq!(body["succeeded"], 2);
        assert_eq!(body["failed"], 1);

        let zip_bytes = STANDARD
            .decode(body["archive"]["contentBase64"].as_str().unwrap())
            .unwrap();
        let zip = ZipArchive::new(Cursor::new(zip_bytes)).unwrap();
        assert_eq!(zip.len(), 2);
    }

    #[tokio::test]
    async fn test_oversized_batch_is_rejected() {
        let request = json!({
            "applicants": [
                { "identifier": "a" },
                { "identifier": "b" },
                { "identifier": "c" }
            ]
        });
        let response = app(MemorySource::default(), 2)
            .oneshot(post_json("/api/v1/documents/batch", &request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
