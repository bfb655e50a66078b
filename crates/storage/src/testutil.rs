use crate::Db;

pub async fn mem_db() -> Db {
    Db::new("sqlite::memory:").await.expect("in-memory db")
}

pub async fn seed_project(db: &Db, name: &str) -> i64 {
    sqlx::query("INSERT INTO projects (name) VALUES (?)")
        .bind(name)
        .execute(&db.pool)
        .await
        .expect("insert project")
        .last_insert_rowid()
}

pub async fn seed_rule(
    db: &Db,
    project_id: i64,
    enabled: bool,
    events: &str,
    channel_type: &str,
    webhook_url: Option<&str>,
) -> i64 {
    sqlx::query(
        r#"
        INSERT INTO alert_rules (project_id, enabled, events, channel_type, webhook_url)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(project_id)
    .bind(enabled)
    .bind(events)
    .bind(channel_type)
    .bind(webhook_url)
    .execute(&db.pool)
    .await
    .expect("insert alert rule")
    .last_insert_rowid()
}
