use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertDetails {
    pub commit_message: String,
    pub commit_hash: String,
    pub status: String,
    pub author: Option<String>,
}

/// 部署状态变化后触发告警派发的内部指令。
#[derive(Debug, Clone)]
pub struct AlertCommand {
    pub project_id: i64,
    pub event_type: String,
    pub details: AlertDetails,
}
