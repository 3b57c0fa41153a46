use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{instrument, warn};

use crate::errors::DevblogWebErrorId;

/// Logs the kind and status of every failed gateway response.
#[instrument(skip(req, next), fields(method = %req.method(), path = %req.uri().path()))]
pub async fn log_gateway_errors(req: Request, next: Next) -> Response {
    let res = next.run(req).await;

    if let Some(id) = res.extensions().get::<DevblogWebErrorId>() {
        warn!(error_id = %id, status = %res.status(), "request failed");
    }

    res
}
