use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{warn, Instrument};
use uuid::Uuid;

use super::AppState;
use crate::error::TutorError;
use crate::tutor::TutorRequest;

/// Error body. `detail` is the human-readable message; `kind` is one of
/// `invalid_request`, `routing`, `completion` or `internal`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
    kind: &'static str,
}

fn error_response(status: StatusCode, detail: String, kind: &'static str) -> Response {
    (status, Json(ErrorBody { detail, kind })).into_response()
}

impl IntoResponse for TutorError {
    fn into_response(self) -> Response {
        let status = match &self {
            TutorError::UnknownSubject(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.to_string(), self.kind())
    }
}

/// POST /ask
pub(super) async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<TutorRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(rejection.status(), rejection.body_text(), "invalid_request");
        }
    };

    let span = tracing::info_span!(
        "ask",
        request_id = %Uuid::new_v4(),
        subject = %request.subject,
    );

    async move {
        match state.tutor.answer(&request).await {
            Ok(response) => (StatusCode::OK, Json(response)).into_response(),
            Err(e) => {
                warn!(error = %e, "ask failed");
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

/// GET /health
pub(super) async fn health(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "model": state.tutor.model() })),
    )
        .into_response()
}
