use std::future::Future;

use axum::extract::State;
use axum::http::StatusCode;

/// Dependency probe used by `GET /readyz`.
pub trait ReadinessCheck: Send + Sync {
    fn is_ready(&self) -> impl Future<Output = bool> + Send;
}

/// Liveness probe for `GET /healthz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`: 200 when the service's dependencies answer,
/// 503 otherwise.
pub async fn readyz<S>(State(state): State<S>) -> StatusCode
where
    S: ReadinessCheck,
{
    if state.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
