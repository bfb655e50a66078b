use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use domain::payloads::{normalize_github, GithubActionPayload};
use domain::PipelineError;
use serde_json::{json, Value};

use super::{api_error, check_rate_limit, ApiError};
use crate::pipeline::{record_and_notify, RecordOutcome};
use crate::signature::verify_github_signature;
use crate::state::AppState;

pub async fn github_hook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    check_rate_limit(&state, "hooks:github")?;

    verify_github_signature(&body, state.security.github_webhook_secret.as_deref())
        .map_err(|e| api_error(StatusCode::UNAUTHORIZED, e))?;

    let payload: GithubActionPayload = serde_json::from_slice(&body)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, PipelineError::Parse(e.to_string())))?;
    let event = normalize_github(payload);

    match record_and_notify(&state, &event).await {
        Ok(RecordOutcome::Recorded(_)) => Ok(Json(json!({ "status": "recorded" }))),
        Ok(RecordOutcome::ProjectNotFound) => Ok(Json(json!({ "status": "project_not_found" }))),
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}
