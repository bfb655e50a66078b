use crate::config::SecuritySettings;
use crate::ratelimit::RateLimiter;
use alerts::Dispatcher;
use axum::extract::FromRef;
use domain::{AlertCommand, PipelineEvent};
use storage::Db;
use tokio::sync::{broadcast, mpsc};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub dispatcher: Dispatcher,
    pub sender: mpsc::Sender<AlertCommand>,
    pub tx_events: broadcast::Sender<PipelineEvent>,
    pub limiter: RateLimiter,
    pub security: SecuritySettings,
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
