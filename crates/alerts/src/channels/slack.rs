use crate::traits::ChannelSender;
use anyhow::Result;
use async_trait::async_trait;
use domain::{AlertRule, PipelineError};

pub struct SlackSender {
    client: reqwest::Client,
}

impl SlackSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChannelSender for SlackSender {
    async fn send(&self, rule: &AlertRule, text: &str) -> Result<()> {
        // webhook_url 缺失在 Dispatcher 层已拦截为 misconfigured
        let url = rule
            .webhook_url
            .as_deref()
            .ok_or(PipelineError::Delivery("Slack webhook_url missing".into()))?;

        let resp = self
            .client
            .post(url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(
                PipelineError::Delivery(format!("Slack webhook returned {}", resp.status()))
                    .into(),
            );
        }
        Ok(())
    }
}
