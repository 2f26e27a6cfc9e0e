use std::any::Any;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

use super::error::ApiError;

/// Logs method, path, status and latency of every request. Server errors
/// log at ERROR, client errors at WARN, everything else at INFO.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    if response.status().is_server_error() {
        error!(%method, %path, status, elapsed_ms, "request failed");
    } else if response.status().is_client_error() {
        warn!(%method, %path, status, elapsed_ms, "request rejected");
    } else {
        info!(%method, %path, status, elapsed_ms, "request completed");
    }

    response
}

/// Turns a handler panic into the generic 500 body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
