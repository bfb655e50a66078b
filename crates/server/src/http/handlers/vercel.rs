use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use domain::payloads::{normalize_vercel, VercelPayload};
use domain::PipelineError;
use serde_json::{json, Value};

use super::{api_error, check_rate_limit, ApiError};
use crate::pipeline::{record_and_notify, RecordOutcome};
use crate::signature::verify_vercel_signature;
use crate::state::AppState;

pub async fn vercel_hook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    check_rate_limit(&state, "hooks:vercel")?;

    // 签名校验先于任何解析
    let sig = headers
        .get("x-vercel-signature")
        .and_then(|v| v.to_str().ok());
    verify_vercel_signature(
        &body,
        sig,
        state.security.vercel_webhook_secret.as_deref(),
        state.security.permissive_webhooks,
    )
    .map_err(|e| api_error(StatusCode::UNAUTHORIZED, e))?;

    let payload: VercelPayload = serde_json::from_slice(&body)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, PipelineError::Parse(e.to_string())))?;

    let Some(event) = normalize_vercel(payload) else {
        return Ok(Json(json!({ "status": "ignored" })));
    };

    match record_and_notify(&state, &event).await {
        Ok(RecordOutcome::Recorded(_)) => Ok(Json(json!({ "status": "processed" }))),
        Ok(RecordOutcome::ProjectNotFound) => Ok(Json(json!({ "status": "ignored" }))),
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}
