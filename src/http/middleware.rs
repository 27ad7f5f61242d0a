//! Request-pipeline hook.
//!
//! # Responsibilities
//! - Resolve the request id (propagated header or fresh UUID)
//! - Ask the selector for a recording or disabled log
//! - Inject the log into request extensions for downstream stages
//! - Measure "request processing" around the rest of the pipeline
//! - Finalize the log once the response is produced
//!
//! # Design Decisions
//! - Explicit middleware composition: each pipeline stage wraps its work in
//!   a measure call, instead of intercepting handler definitions at runtime
//! - Handlers extract [`AnalyticsLog`] (extension lookup or extractor) and
//!   wrap their own stages, e.g. "view rendering"

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::log::AnalyticsLog;
use crate::sampling::LogSelector;

/// Header carrying the request id across services.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Span name wrapped around the downstream pipeline.
pub const REQUEST_SPAN: &str = "request processing";

/// Analytics hook for an axum pipeline.
///
/// Install with `axum::middleware::from_fn_with_state`:
///
/// ```ignore
/// let app = Router::new()
///     .route("/", get(handler))
///     .layer(middleware::from_fn_with_state(selector, analytics_middleware));
/// ```
pub async fn analytics_middleware(
    State(selector): State<Arc<LogSelector>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4);

    let log = selector.select_for(request_id);
    request.extensions_mut().insert(log.clone());

    let response = log.measure_async(REQUEST_SPAN, next.run(request)).await;

    log.finalize();
    response
}

/// Extractor support, so handlers can take `log: AnalyticsLog` directly.
///
/// Falls back to the disabled log when the middleware is not installed, so
/// instrumented handlers keep working unconditionally.
impl<S> FromRequestParts<S> for AnalyticsLog
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AnalyticsLog>()
            .cloned()
            .unwrap_or_default())
    }
}
