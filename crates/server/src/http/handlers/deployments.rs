use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::{PipelineError, ProjectLookup};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{api_error, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_deployments(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let project = match state
        .db
        .resolve_project(&name)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?
    {
        ProjectLookup::One(p) => p,
        ProjectLookup::None => return Err(api_error(StatusCode::NOT_FOUND, "Project not found")),
        ProjectLookup::Many(n) => {
            return Err(api_error(
                StatusCode::CONFLICT,
                PipelineError::AmbiguousProject(name, n),
            ))
        }
    };

    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);

    let deployments = state
        .db
        .list_deployments(project.id, limit, offset)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    let total = state
        .db
        .count_deployments(project.id)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    Ok(Json(json!({
        "project": project.name,
        "total": total,
        "deployments": deployments,
    })))
}
