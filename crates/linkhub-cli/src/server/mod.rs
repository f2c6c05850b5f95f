//! HTTP server
//!
//! Routes:
//! - `GET  /`             listing with `q` and `category` filters
//! - `GET  /r/:id`        redirect to a link
//! - `GET  /admin`        all links and the data file location
//! - `POST /admin/add`    add a link (form, requires `pass`)
//! - `POST /admin/delete` delete a link (form, requires `pass`)
//! - `GET  /api/links`    the full collection as JSON

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use linkhub_core::{Config, Store};

mod error;
mod routes;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

/// Build the router over a store
pub fn router(store: Arc<Store>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/", get(routes::index))
        .route("/r/:id", get(routes::redirect_link))
        .route("/admin", get(routes::admin_index))
        .route("/admin/add", post(routes::admin_add))
        .route("/admin/delete", post(routes::admin_delete))
        .route("/api/links", get(routes::api_links))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C
pub async fn serve(config: Config) -> Result<()> {
    let bind = config.bind.clone();
    if config.uses_default_password() {
        warn!("Admin password is the default; set LINKHUB_ADMIN_PASSWORD");
    }

    let store = Arc::new(Store::open_with_config(config));
    info!("Data file: {:?}", store.data_file());
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("LinkHub listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("LinkHub stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
