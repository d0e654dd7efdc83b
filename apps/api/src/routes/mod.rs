pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers as cover_letters;
use crate::resume::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(resumes::handle_generate_resume))
        .route("/api/v1/resumes/:id", get(resumes::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/regenerate",
            post(resumes::handle_regenerate_resume),
        )
        .route(
            "/api/v1/resumes/:id/apply-recommendations",
            post(resumes::handle_apply_recommendations),
        )
        .route(
            "/api/v1/resumes/:id/document",
            get(resumes::handle_resume_document),
        )
        // Cover letter API
        .route(
            "/api/v1/cover-letters",
            post(cover_letters::handle_generate_cover_letter),
        )
        .route(
            "/api/v1/cover-letters/:id",
            get(cover_letters::handle_get_cover_letter),
        )
        .route(
            "/api/v1/cover-letters/:id/evaluate",
            post(cover_letters::handle_evaluate_cover_letter),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::capability::PromptId;
    use crate::cover_letter::{CoverLetterPipeline, CoverLetterService};
    use crate::resume::{ResumePipeline, ResumeService};
    use crate::storage::memory::MemoryStore;
    use crate::testing::{
        cover_letter_output, evaluation_output, research_output, resume_output,
        validation_output, ScriptedCapability, JD_TEXT,
    };

    fn app(company: Option<&str>) -> Router {
        let primary = Arc::new(
            ScriptedCapability::new("primary").respond(PromptId::ResumeGenerator, resume_output()),
        );
        let secondary = Arc::new(
            ScriptedCapability::new("secondary")
                .respond(PromptId::HrValidator, validation_output())
                .respond(PromptId::CoverLetterEvaluator, evaluation_output(77.0)),
        );
        let research = Arc::new(
            ScriptedCapability::new("research")
                .respond(PromptId::CompanyResearch, research_output(company))
                .respond(PromptId::CoverLetterGenerator, cover_letter_output()),
        );
        let store = Arc::new(MemoryStore::new());

        build_router(AppState {
            resumes: Arc::new(ResumeService::new(
                ResumePipeline::new(primary, secondary.clone()),
                store.clone(),
            )),
            cover_letters: Arc::new(CoverLetterService::new(
                CoverLetterPipeline::new(research, secondary),
                store,
            )),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_resume(app: &Router, user_id: Uuid) -> Value {
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/resumes",
            Some(json!({
                "user_id": user_id,
                "resume_texts": ["Ada Lovelace, Senior Engineer"],
                "jd_text": JD_TEXT
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(Some("Acme")), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_and_fetch_resume() {
        let app = app(Some("Acme"));
        let user_id = Uuid::new_v4();
        let created = create_resume(&app, user_id).await;

        assert_eq!(created["content"]["sections"].as_array().unwrap().len(), 2);
        assert_eq!(created["validation"]["overallScore"], 7.2);

        let id = created["resume_id"].as_str().unwrap();
        let (status, fetched) = send(
            &app,
            "GET",
            &format!("/api/v1/resumes/{id}?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["content"], created["content"]);
        assert_eq!(fetched["validation"], created["validation"]);
    }

    #[tokio::test]
    async fn test_blank_jd_is_bad_request() {
        let (status, body) = send(
            &app(Some("Acme")),
            "POST",
            "/api/v1/resumes",
            Some(json!({"user_id": Uuid::new_v4(), "resume_texts": ["text"], "jd_text": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_resume_of_other_user_is_not_found() {
        let app = app(Some("Acme"));
        let created = create_resume(&app, Uuid::new_v4()).await;
        let id = created["resume_id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/v1/resumes/{id}?user_id={}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_document_view_splits_bold_runs() {
        let app = app(Some("Acme"));
        let user_id = Uuid::new_v4();
        let created = create_resume(&app, user_id).await;
        let id = created["resume_id"].as_str().unwrap();

        let (status, view) = send(
            &app,
            "GET",
            &format!("/api/v1/resumes/{id}/document?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["file_stem"], "Ada Lovelace");
        let first_bullet = &view["sections"][0]["entries"][0]["bullets"][0];
        assert_eq!(first_bullet[1], json!({"text": "40%", "bold": true}));
    }

    #[tokio::test]
    async fn test_apply_recommendations_and_bad_index() {
        let app = app(Some("Acme"));
        let user_id = Uuid::new_v4();
        let created = create_resume(&app, user_id).await;
        let id = created["resume_id"].as_str().unwrap();
        let recs = created["validation"]["recommendations"].clone();

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/resumes/{id}/apply-recommendations"),
            Some(json!({"user_id": user_id, "recommendations": recs})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let mut stale = recs.clone();
        stale[0]["entryIndex"] = json!(9);
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/resumes/{id}/apply-recommendations"),
            Some(json!({"user_id": user_id, "recommendations": stale})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
    }

    #[tokio::test]
    async fn test_regenerate_resume() {
        let app = app(Some("Acme"));
        let user_id = Uuid::new_v4();
        let created = create_resume(&app, user_id).await;
        let id = created["resume_id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/resumes/{id}/regenerate"),
            Some(json!({"user_id": user_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_id"], created["resume_id"]);
    }

    #[tokio::test]
    async fn test_cover_letter_generate_evaluate_fetch() {
        let app = app(Some("Acme"));
        let user_id = Uuid::new_v4();

        let (status, created) = send(
            &app,
            "POST",
            "/api/v1/cover-letters",
            Some(json!({
                "user_id": user_id,
                "resume_text": "Ada Lovelace resume",
                "master_cover_letter_text": "Dear team, ...",
                "jd_text": JD_TEXT
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["company_research"]["companyName"], "Acme");
        assert!(created["evaluation"].is_null());
        let id = created["cover_letter_id"].as_str().unwrap();

        let (status, evaluated) = send(
            &app,
            "POST",
            &format!("/api/v1/cover-letters/{id}/evaluate"),
            Some(json!({"user_id": user_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(evaluated["evaluation"]["matchPercentage"], 77.0);

        let (status, fetched) = send(
            &app,
            "GET",
            &format!("/api/v1/cover-letters/{id}?user_id={user_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["evaluation"]["matchPercentage"], 77.0);
        assert_eq!(fetched["content"]["signOff"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_unidentified_company_is_service_unavailable() {
        let (status, body) = send(
            &app(None),
            "POST",
            "/api/v1/cover-letters",
            Some(json!({
                "user_id": Uuid::new_v4(),
                "resume_text": "resume",
                "master_cover_letter_text": "letter",
                "jd_text": JD_TEXT
            })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "AI_SERVICE_UNAVAILABLE");
    }
}
