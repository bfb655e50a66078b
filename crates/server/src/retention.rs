use std::time::Duration;
use storage::Db;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// 保留期清理任务：周期删除超龄部署记录，报告删除条数。
pub async fn run_sweeper(
    db: Db,
    max_age_days: i64,
    interval: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match db
                    .purge_deployments_older_than(chrono::Duration::days(max_age_days))
                    .await
                {
                    Ok(0) => {}
                    Ok(n) => info!("Retention sweep deleted {} deployment(s)", n),
                    Err(e) => error!("Retention sweep failed: {:?}", e),
                }
            },
            _ = cancel_token.cancelled() => break,
        }
    }
}
