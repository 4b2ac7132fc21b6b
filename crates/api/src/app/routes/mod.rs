use axum::Router;

pub mod analyze;
pub mod events;
pub mod inventory;
pub mod system;

/// Router for all session-backed endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/api/inventory", inventory::router())
        .nest("/api/events", events::router())
        .nest("/api/analyze", analyze::router())
}
