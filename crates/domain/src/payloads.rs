use crate::models::{DeploymentEvent, DeploymentStatus};
use serde::Deserialize;

pub const DEFAULT_PROJECT_NAME: &str = "Deploytics";
const DEFAULT_COMMIT_MESSAGE: &str = "Manual deploy";
const DEFAULT_COMMIT_HASH: &str = "unknown";
const DEFAULT_BRANCH: &str = "main";
const PRODUCTION_ENV: &str = "production";

/// GitHub Action 回调体。所有字段可缺省，缺省值见 normalize_github。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubActionPayload {
    pub commit_message: Option<String>,
    pub commit_hash: Option<String>,
    pub branch: Option<String>,
    pub status: Option<String>,
    pub project_name: Option<String>,
}

pub fn normalize_github(p: GithubActionPayload) -> DeploymentEvent {
    let status = p
        .status
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DeploymentStatus::Success);

    DeploymentEvent {
        project_identifier: p
            .project_name
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        status,
        commit_message: p
            .commit_message
            .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
        commit_hash: p
            .commit_hash
            .unwrap_or_else(|| DEFAULT_COMMIT_HASH.to_string()),
        branch: p.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        // GitHub Action 路径固定视为 production 部署
        environment: PRODUCTION_ENV.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VercelPayload {
    #[serde(rename = "type")]
    pub event: String,
    #[serde(default)]
    pub payload: VercelBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VercelBody {
    #[serde(default)]
    pub deployment: VercelDeployment,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VercelDeployment {
    pub name: Option<String>,
    pub target: Option<String>,
    #[serde(default)]
    pub meta: VercelMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VercelMeta {
    pub commit_message: Option<String>,
    pub commit_sha: Option<String>,
    pub github_commit_ref: Option<String>,
}

/// 只处理三种 type，其余一律返回 None（调用方回复 "ignored"）。
pub fn normalize_vercel(p: VercelPayload) -> Option<DeploymentEvent> {
    let status = match p.event.as_str() {
        "deployment.created" => DeploymentStatus::Building,
        "deployment.succeeded" => DeploymentStatus::Success,
        "deployment.error" => DeploymentStatus::Failed,
        _ => return None,
    };

    let d = p.payload.deployment;
    Some(DeploymentEvent {
        project_identifier: d.name.unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        status,
        commit_message: d
            .meta
            .commit_message
            .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
        commit_hash: d
            .meta
            .commit_sha
            .unwrap_or_else(|| DEFAULT_COMMIT_HASH.to_string()),
        branch: d
            .meta
            .github_commit_ref
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        environment: d.target.unwrap_or_else(|| PRODUCTION_ENV.to_string()),
    })
}
