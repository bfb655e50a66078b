use axum::{extract::State, http::StatusCode, Json};
use domain::AlertDetails;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{api_error, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DispatchRequest {
    pub project_id: i64,
    pub event_type: String,
    pub details: AlertDetails,
}

/// 内部触发入口：部署状态变化后同步跑一遍 匹配 → 派发，
/// 响应恒为 200，单通道失败只体现在 results 里。
pub async fn dispatch_alerts(
    State(state): State<AppState>,
    Json(req): Json<DispatchRequest>,
) -> Result<Json<Value>, ApiError> {
    let results = state
        .dispatcher
        .run(&state.db, req.project_id, &req.event_type, &req.details)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    if results.is_empty() {
        return Ok(Json(json!({ "message": "No matching alert rules" })));
    }
    Ok(Json(json!({ "results": results })))
}
