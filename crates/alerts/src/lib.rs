mod channels;
mod dispatch;
mod message;
mod traits;

pub use dispatch::Dispatcher;
pub use message::format_notification;
pub use traits::ChannelSender;

use domain::AlertCommand;
use storage::Db;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// 告警派发 Worker：消费部署记录之后发出的 AlertCommand。
/// 派发失败只记日志，绝不反向影响已落库的部署。
pub async fn start(
    dispatcher: Dispatcher,
    db: Db,
    mut rx: mpsc::Receiver<AlertCommand>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()> {
    info!("Alert dispatch worker started");
    loop {
        tokio::select! {
            cmd_opt = rx.recv() => {
                let cmd = match cmd_opt {
                    Some(c) => c,
                    None => break,
                };
                match dispatcher.run(&db, cmd.project_id, &cmd.event_type, &cmd.details).await {
                    Ok(results) => {
                        info!(
                            "Dispatched {} alert(s) for project {} event '{}'",
                            results.len(),
                            cmd.project_id,
                            cmd.event_type
                        );
                    }
                    Err(e) => error!("Alert dispatch failed: {:?}", e),
                }
            },
            _ = cancel_token.cancelled() => break,
        }
    }
    info!("Alert dispatch worker stopped");
    Ok(())
}
