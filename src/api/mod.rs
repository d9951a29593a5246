//! HTTP API for the catalog, selection evaluation and contact notifications.
//!
//! - `GET /catalog` returns categories and appliances
//! - `POST /evaluate` returns the full evaluation of a requested selection
//! - `POST /send-contact-notification` emails a contact request

mod handlers;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::HeaderName;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::NotifyConfig;
use crate::engine::SizingPolicy;
use crate::notify::Mailer;
use crate::rules::RuleSet;

/// Application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; handlers only read it.
pub struct AppState {
    pub catalog: Catalog,
    pub rules: RuleSet,
    pub policy: SizingPolicy,
    /// Sender, recipients and subject tag for notifications.
    pub notify: NotifyConfig,
    pub mailer: Arc<dyn Mailer>,
}

/// Builds the router with all routes, permissive CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/evaluate", post(handlers::post_evaluate))
        .route(
            "/send-contact-notification",
            post(handlers::send_contact_notification),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds to `addr` and serves until the process is stopped.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
