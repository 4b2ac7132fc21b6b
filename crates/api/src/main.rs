use shelftally_api::app::{self, Session};

#[tokio::main]
async fn main() {
    shelftally_observability::init();

    let session = match (
        std::env::var("SHELFTALLY_INVENTORY_PATH"),
        std::env::var("SHELFTALLY_EVENTS_PATH"),
    ) {
        (Ok(inventory_path), Ok(events_path)) => {
            let (ledger, audit_log) = shelftally_ledger::snapshot::load(&inventory_path, &events_path)
                .expect("failed to load snapshot files");
            tracing::info!(%inventory_path, %events_path, "loaded session from snapshot");
            Session::new(ledger, audit_log)
        }
        _ => {
            tracing::warn!("SHELFTALLY_INVENTORY_PATH/SHELFTALLY_EVENTS_PATH not set; using built-in sample inventory");
            Session::sample()
        }
    };

    let app = app::build_app(session.shared());

    let addr = std::env::var("SHELFTALLY_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
