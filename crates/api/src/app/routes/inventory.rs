use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use shelftally_core::{DomainError, ItemId};
use shelftally_ledger::{AuditEventKind, InventoryItem};

use crate::app::{dto, errors};
use crate::app::session::SharedSession;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).put(update_item))
}

pub async fn list_items(Extension(session): Extension<SharedSession>) -> axum::response::Response {
    let Ok(session) = session.lock() else {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "lock_poisoned", "session lock poisoned");
    };
    let items: Vec<InventoryItem> = session.ledger.iter().cloned().collect();
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_item(
    Extension(session): Extension<SharedSession>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(session) = session.lock() else {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "lock_poisoned", "session lock poisoned");
    };
    match session.ledger.get(&ItemId::new(id)) {
        Some(item) => (StatusCode::OK, Json(item.clone())).into_response(),
        None => errors::domain_error_to_response(DomainError::not_found()),
    }
}

pub async fn create_item(
    Extension(session): Extension<SharedSession>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    let (Some(name), Some(quantity)) = (body.name, body.quantity) else {
        return errors::domain_error_to_response(DomainError::validation(
            "Missing required fields: name, quantity",
        ));
    };

    let Ok(mut session) = session.lock() else {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "lock_poisoned", "session lock poisoned");
    };
    let session = &mut *session;

    let id = session.ledger.next_item_id();
    let sku = body
        .sku
        .unwrap_or_else(|| format!("SKU-{}", id.as_str().to_uppercase()));
    let location = body.location.unwrap_or_else(|| "Unassigned".to_string());

    let mut item = InventoryItem::new(id.clone(), name, quantity)
        .with_sku(sku)
        .with_location(location);
    item.price = body.price;

    let description = format!(
        "Initial stock of {} unit(s) of '{}'.",
        item.quantity, item.name
    );
    session.ledger.insert(item.clone());
    if let Err(e) = session.audit_log.append_for_item(
        &session.ledger,
        AuditEventKind::InitialStock,
        description,
        id,
        Utc::now(),
    ) {
        return errors::domain_error_to_response(e);
    }

    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn update_item(
    Extension(session): Extension<SharedSession>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateItemRequest>,
) -> axum::response::Response {
    let Ok(mut session) = session.lock() else {
        return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "lock_poisoned", "session lock poisoned");
    };
    let session = &mut *session;

    let id = ItemId::new(id);
    let (updated, old_quantity) = {
        let Some(item) = session.ledger.get_mut(&id) else {
            return errors::domain_error_to_response(DomainError::not_found());
        };
        let old_quantity = item.quantity;
        if let Some(name) = body.name {
            item.name = name;
        }
        if let Some(quantity) = body.quantity {
            item.quantity = quantity;
        }
        if let Some(sku) = body.sku {
            item.sku = sku;
        }
        if let Some(location) = body.location {
            item.location = location;
        }
        if let Some(price) = body.price {
            item.price = Some(price);
        }
        (item.clone(), old_quantity)
    };

    // Manual quantity changes get their own audit trail entry.
    if updated.quantity != old_quantity {
        let description = format!(
            "Manual update of '{}' (quantity: {} → {}).",
            updated.name, old_quantity, updated.quantity
        );
        if let Err(e) = session.audit_log.append_for_item(
            &session.ledger,
            AuditEventKind::ManualUpdate,
            description,
            id,
            Utc::now(),
        ) {
            return errors::domain_error_to_response(e);
        }
    }

    (StatusCode::OK, Json(updated)).into_response()
}
