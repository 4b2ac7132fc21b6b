use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use shelftally_core::DomainError;
use shelftally_report::run_pipeline;

use crate::app::{dto, errors};
use crate::app::session::SharedSession;

pub fn router() -> Router {
    Router::new().route("/", post(analyze))
}

/// Run one reconciliation pass over a batch of raw frame outputs.
///
/// The session lock is held for the whole pass, so concurrent analyze calls
/// serialize rather than interleave ledger mutations.
pub async fn analyze(
    Extension(session): Extension<SharedSession>,
    Json(body): Json<dto::AnalyzeRequest>,
) -> axum::response::Response {
    if body.frames.is_empty() {
        return errors::domain_error_to_response(DomainError::validation(
            "at least one frame output is required",
        ));
    }

    let Ok(mut session) = session.lock() else {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "lock_poisoned", "session lock poisoned");
    };

    let session = &mut *session;
    let report = run_pipeline(&body.frames, &mut session.ledger, &mut session.audit_log);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "code": 200,
            "message": report,
        })),
    )
        .into_response()
}
