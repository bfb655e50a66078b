use crate::traits::ChannelSender;
use anyhow::Result;
use async_trait::async_trait;
use domain::AlertRule;
use tracing::info;

/// 邮件通道目前是占位实现：恒报成功，只记日志。
/// TODO: 接入事务邮件服务商后改为真实投递，失败返回 Delivery 错误。
pub struct EmailSender;

#[async_trait]
impl ChannelSender for EmailSender {
    async fn send(&self, rule: &AlertRule, text: &str) -> Result<()> {
        info!(
            "Email alert (stub) to {}: {}",
            rule.email_address.as_deref().unwrap_or("<unset>"),
            text
        );
        Ok(())
    }
}
