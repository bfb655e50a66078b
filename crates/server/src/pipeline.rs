use crate::state::AppState;
use domain::{
    AlertCommand, AlertDetails, Deployment, DeploymentEvent, PipelineError, PipelineEvent,
    ProjectLookup,
};
use tracing::{info, warn};

pub enum RecordOutcome {
    Recorded(Deployment),
    ProjectNotFound,
}

/// 解析 → 落库 → 广播 → 触发告警。
/// 未知/歧义项目是稳态条件而非错误：丢弃事件，不写任何行。
/// 告警派发与记录完全解耦，Worker 不可用也不影响本次响应。
pub async fn record_and_notify(
    state: &AppState,
    event: &DeploymentEvent,
) -> anyhow::Result<RecordOutcome> {
    let project = match state.db.resolve_project(&event.project_identifier).await? {
        ProjectLookup::One(p) => p,
        ProjectLookup::None => {
            info!(
                "Ignoring event for unknown project '{}'",
                event.project_identifier
            );
            return Ok(RecordOutcome::ProjectNotFound);
        }
        ProjectLookup::Many(n) => {
            warn!(
                "{}",
                PipelineError::AmbiguousProject(event.project_identifier.clone(), n)
            );
            return Ok(RecordOutcome::ProjectNotFound);
        }
    };

    let deployment = state.db.insert_deployment(project.id, event).await?;
    info!(
        "Recorded deployment {} for project '{}' ({})",
        deployment.id, project.name, deployment.status
    );

    // SSE 订阅方可能一个都没有，发送失败直接忽略
    let _ = state.tx_events.send(PipelineEvent::DeploymentRecorded {
        project_name: project.name.clone(),
        deployment: deployment.clone(),
    });

    let cmd = AlertCommand {
        project_id: project.id,
        event_type: deployment.status.clone(),
        details: AlertDetails {
            commit_message: deployment.commit_message.clone(),
            commit_hash: deployment.commit_hash.clone(),
            status: deployment.status.clone(),
            author: None,
        },
    };
    if state.sender.send(cmd).await.is_err() {
        warn!("Alert worker channel closed, skipping dispatch");
    }

    Ok(RecordOutcome::Recorded(deployment))
}
