mod config;
mod http;
mod pipeline;
mod ratelimit;
mod retention;
mod signature;
mod state;

use anyhow::Context;
use dotenvy::dotenv;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::info;

use alerts::Dispatcher;
use config::Settings;
use http::router::build_router;
use ratelimit::RateLimiter;
use state::AppState;
use storage::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new().context("Failed to load configuration")?;

    let db = Db::new(&settings.database.url).await?;

    let (tx_cmd, rx_cmd) = mpsc::channel(100);
    let (tx_events, _rx_events) = broadcast::channel(100);

    let dispatcher = Dispatcher::new(Duration::from_secs(settings.alerts.dispatch_timeout_secs));
    let cancel_token = CancellationToken::new();

    // --- 任务：告警派发 Worker ---
    let worker_db = db.clone();
    let worker_dispatcher = dispatcher.clone();
    let worker_cancel = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = alerts::start(worker_dispatcher, worker_db, rx_cmd, worker_cancel).await {
            tracing::error!("Alert worker crashed: {:?}", e);
        }
    });

    // --- 任务：保留期清理 ---
    let sweeper_db = db.clone();
    let sweeper_cancel = cancel_token.clone();
    let retention_cfg = settings.retention.clone();
    tokio::spawn(async move {
        retention::run_sweeper(
            sweeper_db,
            retention_cfg.max_age_days,
            Duration::from_secs(retention_cfg.sweep_interval_secs),
            sweeper_cancel,
        )
        .await;
    });

    let limiter = RateLimiter::new(
        Duration::from_secs(settings.limits.window_secs),
        settings.limits.max_requests,
    );

    let state = AppState {
        db,
        dispatcher,
        sender: tx_cmd,
        tx_events,
        limiter,
        security: settings.security.clone(),
    };

    let app = build_router(state, &settings.server.cors_origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel_token.cancel();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
