//! HTTP surface for the tutor.
//!
//! ```text
//! POST /ask      route, prompt and answer a question
//! GET  /health   liveness and configured model
//! ```
//!
//! CORS is fully permissive: any origin, method and header.

mod api;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{Result, TutorError};
use crate::tutor::Tutor;

/// Router state injected into every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub tutor: Arc<Tutor>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ask", post(api::ask))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `bind_addr` and serve until Ctrl-C
pub async fn serve(bind_addr: &str, state: AppState) -> Result<()> {
    let router = build_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| TutorError::Server(format!("bind failed on {}: {}", bind_addr, e)))?;

    info!(%bind_addr, "tutor server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TutorError::Server(format!("server error: {}", e)))?;

    info!("tutor server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::testing::{StubClient, StubReply};
    use crate::completion::{Dispatcher, EMPTY_COMPLETION_FALLBACK};
    use crate::config::UnknownSubjectPolicy;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const MODEL: &str = "gpt-4o-mini";

    fn app(stub: Arc<StubClient>) -> Router {
        let tutor = Tutor::new(Dispatcher::new(stub, MODEL), UnknownSubjectPolicy::Reject);
        build_router(AppState {
            tutor: Arc::new(tutor),
        })
    }

    async fn post_ask(app: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ask_math_elementary() {
        let stub = StubClient::text("2 + 2 = 4. Let's count together!");
        let (status, body) = post_ask(
            app(stub.clone()),
            json!({"question": "What is 2+2?", "subject": "math", "grade": "elementary"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subject"], "math");
        assert_eq!(body["model_used"], MODEL);
        assert!(!body["answer"].as_str().unwrap().is_empty());
        assert!(body.get("quiz").is_none());

        let sent = &stub.requests()[0];
        assert_eq!(sent.messages[1].content, "What is 2+2?");
        assert!(sent.messages[0].content.contains("curious 2nd grader"));
    }

    #[tokio::test]
    async fn test_ask_quiz_biology_sends_quiz_format() {
        let stub = StubClient::text("Q: What do plants make?\nA) Sugar\nB) Salt\nC) Sand\nD) Steel\nCorrect: A\nExplanation: Glucose.");
        let (status, body) = post_ask(
            app(stub.clone()),
            json!({"question": "Quiz me on: Photosynthesis", "subject": "biology"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subject"], "biology");
        assert_eq!(body["quiz"][0]["correct"], "A");

        let system = &stub.requests()[0].messages[0].content;
        for marker in ["Q:", "A)", "Correct:", "Explanation:", "exactly 3 questions"] {
            assert!(system.contains(marker), "missing {:?}", marker);
        }
        assert!(system.contains("cellular processes"));
    }

    #[tokio::test]
    async fn test_ask_defaults_to_general_studies() {
        let stub = StubClient::text("The Roman Empire...");
        let (status, body) = post_ask(app(stub.clone()), json!({"question": "Why did Rome fall?"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subject"], "general");
        let system = &stub.requests()[0].messages[0].content;
        assert!(system.contains("General Studies tutor"));
        assert!(system.contains("High School student"));
        assert!(system.contains("User Location: Unknown."));
    }

    #[tokio::test]
    async fn test_unknown_subject_is_bad_request() {
        let stub = StubClient::text("unused");
        let (status, body) = post_ask(app(stub.clone()), json!({"question": "hi", "subject": "foo"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "routing");
        assert_eq!(body["detail"], "No tutor found for subject: foo");
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_completion_failure_is_server_error() {
        let stub = StubClient::new(StubReply::Fail("connection reset".to_string()));
        let (status, body) = post_ask(app(stub), json!({"question": "hi", "subject": "english"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["kind"], "completion");
        assert_eq!(body["detail"], "AI Error: connection reset");
    }

    #[tokio::test]
    async fn test_empty_completion_is_recovered() {
        let stub = StubClient::new(StubReply::Missing);
        let (status, body) = post_ask(app(stub), json!({"question": "hi", "subject": "science"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], EMPTY_COMPLETION_FALLBACK);
    }

    #[tokio::test]
    async fn test_missing_question_is_rejected() {
        let stub = StubClient::text("unused");
        let (status, body) = post_ask(app(stub), json!({"subject": "math"})).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "invalid_request");
        assert!(body["detail"].as_str().unwrap().contains("question"));
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/ask")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app(StubClient::text("unused")).oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(StubClient::text("unused")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok", "model": MODEL}));
    }
}
