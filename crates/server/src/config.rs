use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub security: SecuritySettings,
    pub alerts: AlertSettings,
    pub limits: RateLimitSettings,
    pub retention: RetentionSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Clone)]
pub struct SecuritySettings {
    // 未配置 secret 时的行为由 permissive_webhooks 决定：
    // 宽松模式放行（初始接入期），严格模式一律 401
    pub vercel_webhook_secret: Option<String>,
    pub github_webhook_secret: Option<String>,
    pub permissive_webhooks: bool,
}

#[derive(Deserialize, Clone)]
pub struct AlertSettings {
    pub dispatch_timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct RateLimitSettings {
    pub window_secs: u64,
    pub max_requests: u32,
}

#[derive(Deserialize, Clone)]
pub struct RetentionSettings {
    pub max_age_days: i64,
    pub sweep_interval_secs: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("database.url", "sqlite://data/deploytics.db")?
            .set_default("security.permissive_webhooks", true)?
            .set_default("alerts.dispatch_timeout_secs", 5)?
            .set_default("limits.window_secs", 60)?
            .set_default("limits.max_requests", 60)?
            .set_default("retention.max_age_days", 30)?
            .set_default("retention.sweep_interval_secs", 3600)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("DEPLOYTICS_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("DEPLOYTICS_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
