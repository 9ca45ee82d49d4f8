//! Feedback submission service.
//!
//! A single-resource form workflow over SQLite: GET renders the form with
//! an anti-forgery token, POST validates and persists one record then
//! redirects, and operators get a gated listing of submissions.
//!
//! ## Modules
//!
//! - [`config`] – environment-based configuration
//! - [`csrf`] – session-bound anti-forgery tokens
//! - [`validate`] – pure field validation
//! - [`render`] – pure HTML rendering
//! - [`handlers`] – axum request handlers
//! - [`error`] – request-level error responses
//! - [`state`] – shared application state

use axum::{routing::get, Router};
use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{signal, SignalKind},
    },
};
use tracing::info;

pub mod config;
pub mod csrf;
pub mod error;
pub mod handlers;
pub mod render;
pub mod state;
pub mod validate;

pub use config::ServerConfig;
pub use state::AppState;

use handlers::{admin_list, admin_stats, feedback_form, feedback_submit, feedback_thanks};

/// Builds the application router: one public path for both methods, the
/// static thanks page, and the operator routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/feedback/", get(feedback_form).post(feedback_submit))
        .route("/feedback/thanks/", get(feedback_thanks))
        .route("/admin/feedback/", get(admin_list))
        .route("/admin/feedback/stats", get(admin_stats))
        .with_state(state)
}

/// Initializes state, binds the listener and serves until shutdown.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    info!("Initializing state...");
    let port = config.port;
    let state = AppState::new(config).await?;

    let app = build_router(state);

    let address = format!("0.0.0.0:{}", port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
