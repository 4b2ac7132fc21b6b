//! HTTP API application wiring (Axum router + session state).
//!
//! Layout:
//! - `session.rs`: the process-owned ledger + audit log behind one mutex
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use axum::{routing::get, Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod session;

pub use session::{SharedSession, Session};

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(session: SharedSession) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router().layer(Extension(session)))
}
