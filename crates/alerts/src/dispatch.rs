use crate::channels::{EmailSender, SlackSender};
use crate::message::format_notification;
use crate::traits::ChannelSender;
use domain::{AlertDetails, AlertRule, ChannelType, DispatchResult, DispatchStatus};
use std::sync::Arc;
use std::time::Duration;
use storage::Db;
use tracing::{error, warn};

#[derive(Clone)]
pub struct Dispatcher {
    slack: Arc<SlackSender>,
    email: Arc<EmailSender>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            slack: Arc::new(SlackSender::new(reqwest::Client::new())),
            email: Arc::new(EmailSender),
            timeout,
        }
    }

    /// 匹配规则并派发。返回每条规则的结果；没有匹配规则时返回空列表。
    pub async fn run(
        &self,
        db: &Db,
        project_id: i64,
        event_type: &str,
        details: &AlertDetails,
    ) -> anyhow::Result<Vec<DispatchResult>> {
        let rules = db.matching_alert_rules(project_id, event_type).await?;
        if rules.is_empty() {
            return Ok(Vec::new());
        }

        let identifier = match db.get_project(project_id).await? {
            Some(p) => p.name,
            None => project_id.to_string(),
        };
        let text = format_notification(&identifier, details);

        Ok(self.dispatch_rules(&rules, &text).await)
    }

    /// 单次调用内各通道并发发送；聚合等全部完成。
    /// 单条规则失败只体现在它自己的结果里，不打断其余规则。
    pub async fn dispatch_rules(&self, rules: &[AlertRule], text: &str) -> Vec<DispatchResult> {
        let sends = rules.iter().map(|rule| self.dispatch_one(rule, text));
        futures::future::join_all(sends).await
    }

    async fn dispatch_one(&self, rule: &AlertRule, text: &str) -> DispatchResult {
        let channel = rule.channel_type;

        if channel == ChannelType::Slack && rule.webhook_url.is_none() {
            warn!("Alert rule {} has no webhook_url configured", rule.id);
            return DispatchResult {
                channel,
                status: DispatchStatus::Misconfigured,
            };
        }

        let sender: &dyn ChannelSender = match channel {
            ChannelType::Slack => self.slack.as_ref(),
            ChannelType::Email => self.email.as_ref(),
        };

        let status = match tokio::time::timeout(self.timeout, sender.send(rule, text)).await {
            Ok(Ok(())) => DispatchStatus::Sent,
            Ok(Err(e)) => {
                error!("Alert delivery failed for rule {}: {:?}", rule.id, e);
                DispatchStatus::Failed
            }
            Err(_) => {
                error!(
                    "Alert delivery timed out after {:?} for rule {}",
                    self.timeout, rule.id
                );
                DispatchStatus::Failed
            }
        };

        DispatchResult { channel, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: i64, channel_type: ChannelType, webhook_url: Option<&str>) -> AlertRule {
        AlertRule {
            id,
            project_id: 1,
            enabled: true,
            events: vec!["failed".into()],
            channel_type,
            webhook_url: webhook_url.map(String::from),
            email_address: None,
        }
    }

    #[tokio::test]
    async fn misconfigured_slack_does_not_abort_remaining_rules() {
        let dispatcher = Dispatcher::new(Duration::from_secs(1));
        let rules = vec![
            rule(1, ChannelType::Slack, None),
            rule(2, ChannelType::Email, None),
        ];

        let results = dispatcher.dispatch_rules(&rules, "FAILED storefront").await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].channel, ChannelType::Slack);
        assert_eq!(results[0].status, DispatchStatus::Misconfigured);
        assert_eq!(results[1].channel, ChannelType::Email);
        assert_eq!(results[1].status, DispatchStatus::Sent);
    }

    #[tokio::test]
    async fn email_stub_always_reports_sent() {
        let dispatcher = Dispatcher::new(Duration::from_secs(1));
        let rules = vec![rule(5, ChannelType::Email, None)];

        let results = dispatcher.dispatch_rules(&rules, "SUCCESS storefront").await;
        assert_eq!(results[0].status, DispatchStatus::Sent);
    }
}
