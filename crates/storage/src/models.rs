use chrono::NaiveDateTime;
use domain::{AlertRule, Deployment, Project};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlProject {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub tier: String,
}

impl From<SqlProject> for Project {
    fn from(sql: SqlProject) -> Self {
        Project {
            id: sql.id,
            name: sql.name,
            status: sql.status,
            tier: sql.tier,
        }
    }
}

#[derive(FromRow)]
pub struct SqlDeployment {
    pub id: i64,
    pub project_id: i64,
    pub status: String,
    pub commit_message: String,
    pub commit_hash: String,
    pub branch: String,
    pub environment: String,
    pub created_at: NaiveDateTime,
}

impl From<SqlDeployment> for Deployment {
    fn from(sql: SqlDeployment) -> Self {
        Deployment {
            id: sql.id,
            project_id: sql.project_id,
            status: sql.status,
            commit_message: sql.commit_message,
            commit_hash: sql.commit_hash,
            branch: sql.branch,
            environment: sql.environment,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlAlertRule {
    pub id: i64,
    pub project_id: i64,
    pub enabled: bool,
    // JSON 数组文本
    pub events: String,
    pub channel_type: String,
    pub webhook_url: Option<String>,
    pub email_address: Option<String>,
}

impl SqlAlertRule {
    /// events 或 channel_type 列损坏时返回 None，由调用方记日志跳过。
    pub fn into_rule(self) -> Option<AlertRule> {
        let channel_type = self.channel_type.parse().ok()?;
        let events: Vec<String> = serde_json::from_str(&self.events).ok()?;
        Some(AlertRule {
            id: self.id,
            project_id: self.project_id,
            enabled: self.enabled,
            events,
            channel_type,
            webhook_url: self.webhook_url,
            email_address: self.email_address,
        })
    }
}
