pub mod alerts;
pub mod deployments;
pub mod github;
pub mod sse;
pub mod vercel;

use crate::state::AppState;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::time::SystemTime;

pub(crate) type ApiError = (StatusCode, Json<Value>);

pub(crate) fn api_error(status: StatusCode, message: impl ToString) -> ApiError {
    (status, Json(json!({ "error": message.to_string() })))
}

pub(crate) fn check_rate_limit(state: &AppState, key: &str) -> Result<(), ApiError> {
    let decision = state.limiter.check(key);
    if decision.success {
        return Ok(());
    }

    let retry_after_secs = decision
        .reset_at
        .duration_since(SystemTime::now())
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Err((
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({
            "error": "Rate limit exceeded",
            "remaining": decision.remaining,
            "retry_after_secs": retry_after_secs,
        })),
    ))
}
