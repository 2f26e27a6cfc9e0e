//! HTTP transport for the notes service.
//!
//! ## Routes
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/health` | `200 {status, timestamp}` |
//! | POST | `/notes` | `201` + note |
//! | GET | `/notes?tag=` | `200` + notes |
//! | GET | `/notes/search?tag=` | `200` + notes, `tag` required |
//! | GET | `/notes/{id}` | `200` + note |
//! | PATCH | `/notes/{id}` | `200` + note |
//! | DELETE | `/notes/{id}` | `204` |
//!
//! `/notes/search` is a static route and always takes precedence over the
//! `/notes/{id}` capture. A trailing slash is accepted on every route.
//! Anything unmatched gets a JSON 404.

mod error;
mod handlers;
mod middleware;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{info, warn};

use crate::config::ServerSettings;
use crate::error::Result;
use crate::service::NoteService;
use crate::storage::NoteStorage;

pub use error::ApiError;
pub use handlers::AppState;

/// Builds the complete application: routes plus body limit, panic
/// catching and request logging.
pub fn router(service: Arc<NoteService>, settings: &ServerSettings) -> Router {
    with_middleware(routes(service), settings)
}

/// Routes only, with the JSON 404 fallback. Every route also answers with a
/// trailing slash (`/notes/` lists notes).
pub fn routes(service: Arc<NoteService>) -> Router {
    let health = get(handlers::health);
    let notes = get(handlers::list_notes).post(handlers::create_note);
    let search = get(handlers::search_notes);
    let note = get(handlers::get_note)
        .patch(handlers::update_note)
        .delete(handlers::delete_note);

    Router::new()
        .route("/health", health.clone())
        .route("/health/", health)
        .route("/notes", notes.clone())
        .route("/notes/", notes)
        .route("/notes/search", search.clone())
        .route("/notes/search/", search)
        .route("/notes/{id}", note.clone())
        .route("/notes/{id}/", note)
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::route_not_found)
        .with_state(service)
}

/// Wraps `router` in the layers every route shares. Layers apply to the
/// routes and fallbacks registered before this call.
pub fn with_middleware(router: Router, settings: &ServerSettings) -> Router {
    router
        .layer(DefaultBodyLimit::max(settings.body_limit))
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::from_fn(middleware::log_requests))
}

/// Binds the configured address and serves until SIGINT or SIGTERM.
pub async fn run_server(settings: ServerSettings) -> Result<()> {
    let service = Arc::new(NoteService::new(NoteStorage::new()));
    let app = router(service, &settings);

    let listener = tokio::net::TcpListener::bind(settings.bind_address()).await?;
    let addr = listener.local_addr()?;
    info!("Notes API listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
