use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware that logs every HTTP request with its duration and status
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    if status >= 500 {
        tracing::error!(%method, %path, status, duration_ms, "request failed");
    } else if status >= 400 {
        tracing::warn!(%method, %path, status, duration_ms, "request rejected");
    } else {
        tracing::info!(%method, %path, status, duration_ms, "request served");
    }

    response
}
