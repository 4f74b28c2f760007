use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs every API request as a structured event with method, path, status,
/// and latency. Bodies are not logged: they carry student answers.
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let started = std::time::Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    tracing::info!(
        method = %method,
        path = %uri,
        status = status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "api_request"
    );

    response
}
