use anyhow::Result;
use async_trait::async_trait;
use domain::AlertRule;

#[async_trait]
pub trait ChannelSender: Send + Sync {
    async fn send(&self, rule: &AlertRule, text: &str) -> Result<()>;
}
