pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::editors::handlers as editors;
use crate::models::{EducationEntry, Experience, ProjectEntry};
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/session", get(session::handle_get_session))
        .route(
            "/api/v1/session/sector",
            post(session::handle_select_sector).delete(session::handle_change_sector),
        )
        .route("/api/v1/preview", get(session::handle_preview))
        .route("/api/v1/export", post(session::handle_export))
        // Document edits
        .route("/api/v1/resume", get(editors::handle_get_resume))
        .route(
            "/api/v1/resume/identity",
            patch(editors::handle_update_identity),
        )
        .route("/api/v1/resume/summary", put(editors::handle_set_summary))
        .route("/api/v1/resume/skills", put(editors::handle_set_skills))
        .route(
            "/api/v1/resume/skills/:index",
            delete(editors::handle_remove_skill),
        )
        .route(
            "/api/v1/resume/work",
            post(editors::handle_add_entry::<Experience>),
        )
        .route(
            "/api/v1/resume/work/:id",
            patch(editors::handle_update_entry::<Experience>)
                .delete(editors::handle_remove_entry::<Experience>),
        )
        .route(
            "/api/v1/resume/education",
            post(editors::handle_add_entry::<EducationEntry>),
        )
        .route(
            "/api/v1/resume/education/:id",
            patch(editors::handle_update_entry::<EducationEntry>)
                .delete(editors::handle_remove_entry::<EducationEntry>),
        )
        .route(
            "/api/v1/resume/projects",
            post(editors::handle_add_entry::<ProjectEntry>),
        )
        .route(
            "/api/v1/resume/projects/:id",
            patch(editors::handle_update_entry::<ProjectEntry>)
                .delete(editors::handle_remove_entry::<ProjectEntry>),
        )
        // Suggestions
        .route(
            "/api/v1/suggestions/summary/hint",
            put(editors::handle_set_summary_hint),
        )
        .route(
            "/api/v1/suggestions/skills",
            post(editors::handle_suggest_skills),
        )
        .route(
            "/api/v1/suggestions/summary",
            post(editors::handle_suggest_summary),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::export::{default_page_setup, HtmlFileExporter};
    use crate::session::{SessionController, SharedSession};
    use crate::store::{MemoryStorage, RecordStore};
    use crate::suggestions::{LlmSuggester, SuggestionError, Suggester};

    struct CannedSuggester;

    #[async_trait]
    impl Suggester for CannedSuggester {
        async fn suggest_skills(&self, _role: &str) -> Result<Vec<String>, SuggestionError> {
            Ok(vec!["Sauces".to_string(), "Plating".to_string()])
        }

        async fn suggest_summary(&self, _hints: &str) -> Result<String, SuggestionError> {
            Ok("Seasoned chef.".to_string())
        }
    }

    fn app_with(suggester: Arc<dyn Suggester>, export_dir: &std::path::Path) -> Router {
        let session = SessionController::open(RecordStore::open(MemoryStorage::new()));
        build_router(AppState {
            session: SharedSession::new(session),
            suggester,
            exporter: Arc::new(HtmlFileExporter::new(export_dir, default_page_setup())),
        })
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_of(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(CannedSuggester), dir.path());

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["service"], "resume-builder");
    }

    #[tokio::test]
    async fn test_edits_before_sector_choice_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(CannedSuggester), dir.path());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/resume/summary",
            Some(json!({ "summary": "too early" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json_of(&body)["error"]["code"], "SECTOR_NOT_SELECTED");
    }

    #[tokio::test]
    async fn test_editing_flow_renders_preview() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(CannedSuggester), dir.path());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/session/sector",
            Some(json!({ "sector": "IT" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["theme"], "plain");

        send(
            &app,
            Method::PATCH,
            "/api/v1/resume/identity",
            Some(json!({ "fullName": "Jane Doe" })),
        )
        .await;

        let (status, body) = send(&app, Method::POST, "/api/v1/resume/work", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json_of(&body)["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/v1/resume/work/{id}"),
            Some(json!({
                "company": "Acme",
                "position": "Engineer",
                "startMonth": "2021-01",
                "isCurrent": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = json_of(&body);
        assert_eq!(body["document"]["workHistory"][0]["company"], "Acme");
        let html = body["preview"]["html"].as_str().unwrap();
        assert!(html.contains("Jan 2021 - Present"));

        let (status, body) = send(&app, Method::GET, "/api/v1/preview", None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Jane Doe"));
        assert!(!html.contains("resume__section--education"));
    }

    #[tokio::test]
    async fn test_skills_text_and_suggestions() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(CannedSuggester), dir.path());
        send(
            &app,
            Method::POST,
            "/api/v1/session/sector",
            Some(json!({ "sector": "Other" })),
        )
        .await;

        let (status, body) = send(&app, Method::POST, "/api/v1/suggestions/skills", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_of(&body)["error"]["message"], "Please enter a job role first");

        send(
            &app,
            Method::PATCH,
            "/api/v1/resume/identity",
            Some(json!({ "targetRole": "Chef" })),
        )
        .await;
        send(
            &app,
            Method::PUT,
            "/api/v1/resume/skills",
            Some(json!({ "text": "plating, Knives, " })),
        )
        .await;

        let (status, body) = send(&app, Method::POST, "/api/v1/suggestions/skills", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_of(&body)["document"]["skills"],
            json!(["plating", "Knives", "Sauces"])
        );

        let (status, body) = send(&app, Method::DELETE, "/api/v1/resume/skills/0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["document"]["skills"], json!(["Knives", "Sauces"]));
    }

    #[tokio::test]
    async fn test_summary_suggestion_uses_hint() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(CannedSuggester), dir.path());
        send(
            &app,
            Method::POST,
            "/api/v1/session/sector",
            Some(json!({ "sector": "Other" })),
        )
        .await;

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/suggestions/summary/hint",
            Some(json!({ "hint": "twenty years in kitchens" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::POST, "/api/v1/suggestions/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["document"]["summary"], "Seasoned chef.");

        let (_, body) = send(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(json_of(&body)["summary"]["hint"], "");
    }

    #[tokio::test]
    async fn test_unconfigured_suggester_is_upstream_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(LlmSuggester::new(None)), dir.path());
        send(
            &app,
            Method::POST,
            "/api/v1/session/sector",
            Some(json!({ "sector": "IT" })),
        )
        .await;
        send(
            &app,
            Method::PATCH,
            "/api/v1/resume/identity",
            Some(json!({ "targetRole": "Engineer" })),
        )
        .await;

        let (status, body) = send(&app, Method::POST, "/api/v1/suggestions/skills", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            json_of(&body)["error"]["message"],
            "Failed to generate skills. Please try again."
        );

        let (_, body) = send(&app, Method::GET, "/api/v1/session", None).await;
        let status = json_of(&body);
        assert_eq!(status["skills"]["inFlight"], false);
        assert_eq!(status["state"], "active");
    }

    #[tokio::test]
    async fn test_export_and_change_sector() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(CannedSuggester), dir.path());
        send(
            &app,
            Method::POST,
            "/api/v1/session/sector",
            Some(json!({ "sector": "IT" })),
        )
        .await;

        let (status, body) = send(&app, Method::POST, "/api/v1/export", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["file_name"], "Resume.html");
        assert!(dir.path().join("Resume.html").exists());

        let (status, _) = send(&app, Method::DELETE, "/api/v1/session/sector", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, Method::GET, "/api/v1/session", None).await;
        assert_eq!(json_of(&body)["state"], "sector_unselected");
        let (status, _) = send(&app, Method::GET, "/api/v1/preview", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
