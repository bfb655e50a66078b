use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Queued,
    Building,
    Success,
    Failed,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Queued => "queued",
            DeploymentStatus::Building => "building",
            DeploymentStatus::Success => "success",
            DeploymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(DeploymentStatus::Queued),
            "building" => Ok(DeploymentStatus::Building),
            "success" => Ok(DeploymentStatus::Success),
            "failed" => Ok(DeploymentStatus::Failed),
            other => Err(format!("Unknown deployment status: {}", other)),
        }
    }
}

/// 规范化后的部署事件。只在内存中流转，不直接入库。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentEvent {
    pub project_identifier: String,
    pub status: DeploymentStatus,
    pub commit_message: String,
    pub commit_hash: String,
    pub branch: String,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub tier: String,
}

/// 名称解析结果：必须显式区分 0 / 1 / 多行，绝不隐式取第一行。
#[derive(Debug, Clone)]
pub enum ProjectLookup {
    None,
    One(Project),
    Many(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: i64,
    pub project_id: i64,
    pub status: String,
    pub commit_message: String,
    pub commit_hash: String,
    pub branch: String,
    pub environment: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Slack,
    Email,
}

impl ChannelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::Slack => "slack",
            ChannelType::Email => "email",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChannelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slack" => Ok(ChannelType::Slack),
            "email" => Ok(ChannelType::Email),
            other => Err(format!("Unknown channel type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: i64,
    pub project_id: i64,
    pub enabled: bool,
    pub events: Vec<String>,
    pub channel_type: ChannelType,
    pub webhook_url: Option<String>,
    pub email_address: Option<String>,
}

impl AlertRule {
    pub fn matches(&self, event_type: &str) -> bool {
        self.enabled && self.events.iter().any(|e| e == event_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Sent,
    Failed,
    Misconfigured,
}

/// 单条规则的派发结果，汇总后作为响应体返回，不落库。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    pub channel: ChannelType,
    pub status: DispatchStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for s in ["queued", "building", "success", "failed"] {
            let parsed: DeploymentStatus = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!("canceled".parse::<DeploymentStatus>().is_err());
    }

    #[test]
    fn rule_matches_only_enabled_and_subscribed() {
        let rule = AlertRule {
            id: 1,
            project_id: 7,
            enabled: true,
            events: vec!["failed".into(), "success".into()],
            channel_type: ChannelType::Slack,
            webhook_url: Some("https://hooks.slack.com/services/T/B/x".into()),
            email_address: None,
        };
        assert!(rule.matches("failed"));
        assert!(!rule.matches("building"));

        let disabled = AlertRule {
            enabled: false,
            ..rule
        };
        assert!(!disabled.matches("failed"));
    }
}
