use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use shelftally_core::{DomainError, ItemId};
use shelftally_ledger::{AuditEvent, AuditEventKind};

use crate::app::{dto, errors};
use crate::app::session::SharedSession;

pub fn router() -> Router {
    Router::new().route("/", get(list_events).post(create_event))
}

pub async fn list_events(Extension(session): Extension<SharedSession>) -> axum::response::Response {
    let Ok(session) = session.lock() else {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "lock_poisoned", "session lock poisoned");
    };
    let events: Vec<AuditEvent> = session.audit_log.iter().cloned().collect();
    (StatusCode::OK, Json(events)).into_response()
}

pub async fn create_event(
    Extension(session): Extension<SharedSession>,
    Json(body): Json<dto::CreateEventRequest>,
) -> axum::response::Response {
    let (Some(kind_label), Some(description)) = (body.kind, body.description) else {
        return errors::domain_error_to_response(DomainError::validation(
            "Missing required fields: type, description",
        ));
    };

    let Some(kind) = AuditEventKind::parse_label(&kind_label) else {
        return errors::domain_error_to_response(DomainError::validation(
            "type must be one of: Initial Stock, Manual Update, \
             AI Detection: Item Removed, AI Detection: Item Update",
        ));
    };

    let Ok(mut session) = session.lock() else {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "lock_poisoned", "session lock poisoned");
    };
    let session = &mut *session;

    let timestamp = body.timestamp.unwrap_or_else(Utc::now);
    let event_id = match body.item_id {
        Some(item_id) => {
            match session.audit_log.append_for_item(
                &session.ledger,
                kind,
                description,
                ItemId::new(item_id),
                timestamp,
            ) {
                Ok(id) => id,
                Err(e) => return errors::domain_error_to_response(e),
            }
        }
        None => session
            .audit_log
            .append(AuditEvent::new(kind, description, None, timestamp)),
    };

    match session.audit_log.get(&event_id) {
        Some(event) => (StatusCode::CREATED, Json(event.clone())).into_response(),
        None => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "append_failed",
            "event not found after append",
        ),
    }
}
