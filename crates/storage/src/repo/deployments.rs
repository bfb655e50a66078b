use crate::{models::SqlDeployment, Db};
use chrono::Utc;
use domain::{Deployment, DeploymentEvent};

impl Db {
    /// 纯插入，不去重：上游是 at-least-once 投递，重复投递产生重复行。
    pub async fn insert_deployment(
        &self,
        project_id: i64,
        event: &DeploymentEvent,
    ) -> anyhow::Result<Deployment> {
        let now = Utc::now().naive_utc();
        let status = event.status.to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO deployments (
                project_id, status, commit_message, commit_hash,
                branch, environment, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(project_id)
        .bind(&status)
        .bind(&event.commit_message)
        .bind(&event.commit_hash)
        .bind(&event.branch)
        .bind(&event.environment)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Deployment {
            id: result.last_insert_rowid(),
            project_id,
            status,
            commit_message: event.commit_message.clone(),
            commit_hash: event.commit_hash.clone(),
            branch: event.branch.clone(),
            environment: event.environment.clone(),
            created_at: now,
        })
    }

    pub async fn list_deployments(
        &self,
        project_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Deployment>> {
        let rows = sqlx::query_as::<_, SqlDeployment>(
            r#"
            SELECT id, project_id, status, commit_message, commit_hash,
                   branch, environment, created_at
            FROM deployments
            WHERE project_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(project_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn count_deployments(&self, project_id: i64) -> anyhow::Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM deployments WHERE project_id = ?")
                .bind(project_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// 保留期清理，返回删除的行数。
    pub async fn purge_deployments_older_than(
        &self,
        max_age: chrono::Duration,
    ) -> anyhow::Result<u64> {
        let threshold = Utc::now().naive_utc() - max_age;

        let result = sqlx::query("DELETE FROM deployments WHERE created_at < ?")
            .bind(threshold)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::{mem_db, seed_project};
    use chrono::{Duration, Utc};
    use domain::{DeploymentEvent, DeploymentStatus};

    fn sample_event() -> DeploymentEvent {
        DeploymentEvent {
            project_identifier: "storefront".into(),
            status: DeploymentStatus::Success,
            commit_message: "feat: checkout flow".into(),
            commit_hash: "abcdef1234567".into(),
            branch: "main".into(),
            environment: "production".into(),
        }
    }

    #[tokio::test]
    async fn insert_then_list_round_trips() {
        let db = mem_db().await;
        let project_id = seed_project(&db, "storefront").await;

        let recorded = db
            .insert_deployment(project_id, &sample_event())
            .await
            .unwrap();
        assert_eq!(recorded.status, "success");

        let listed = db.list_deployments(project_id, 10, 0).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, recorded.id);
        assert_eq!(listed[0].commit_hash, "abcdef1234567");
    }

    #[tokio::test]
    async fn duplicate_deliveries_produce_duplicate_rows() {
        let db = mem_db().await;
        let project_id = seed_project(&db, "storefront").await;

        db.insert_deployment(project_id, &sample_event())
            .await
            .unwrap();
        db.insert_deployment(project_id, &sample_event())
            .await
            .unwrap();

        assert_eq!(db.count_deployments(project_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn purge_deletes_only_expired_rows() {
        let db = mem_db().await;
        let project_id = seed_project(&db, "storefront").await;

        db.insert_deployment(project_id, &sample_event())
            .await
            .unwrap();

        // 手工放一条 40 天前的旧记录
        let old = Utc::now().naive_utc() - Duration::days(40);
        sqlx::query(
            r#"
            INSERT INTO deployments (project_id, status, commit_message, commit_hash,
                                     branch, environment, created_at)
            VALUES (?, 'failed', 'old deploy', 'deadbeef', 'main', 'production', ?)
            "#,
        )
        .bind(project_id)
        .bind(old)
        .execute(&db.pool)
        .await
        .unwrap();

        let deleted = db
            .purge_deployments_older_than(Duration::days(30))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(db.count_deployments(project_id).await.unwrap(), 1);
    }
}
