use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Level;

/// Log method, path, status, and latency once the response is ready.
///
/// Server errors log at `error`, client errors at `warn`, everything else
/// at `info`. Bodies and headers are never logged.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;
    let level = level_for(response.status());
    if level == Level::ERROR {
        tracing::error!(
            %method, %path, status, latency_ms, request_id = %request_id,
            "HTTP request failed"
        );
    } else if level == Level::WARN {
        tracing::warn!(
            %method, %path, status, latency_ms, request_id = %request_id,
            "HTTP request rejected"
        );
    } else {
        tracing::info!(
            %method, %path, status, latency_ms, request_id = %request_id,
            "HTTP request completed"
        );
    }

    response
}

/// Log level for a response status.
pub fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_follows_status_class() {
        assert_eq!(level_for(StatusCode::OK), Level::INFO);
        assert_eq!(level_for(StatusCode::NO_CONTENT), Level::INFO);
        assert_eq!(level_for(StatusCode::NOT_FOUND), Level::WARN);
        assert_eq!(level_for(StatusCode::CONFLICT), Level::WARN);
        assert_eq!(level_for(StatusCode::INTERNAL_SERVER_ERROR), Level::ERROR);
        assert_eq!(level_for(StatusCode::SERVICE_UNAVAILABLE), Level::ERROR);
    }
}
