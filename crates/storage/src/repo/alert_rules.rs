use crate::{models::SqlAlertRule, Db};
use domain::AlertRule;
use tracing::warn;

impl Db {
    /// 选中 project 下启用且订阅了该事件类型的规则。
    /// 按 id 升序返回，保证单次调用内派发顺序确定。
    pub async fn matching_alert_rules(
        &self,
        project_id: i64,
        event_type: &str,
    ) -> anyhow::Result<Vec<AlertRule>> {
        let rows = sqlx::query_as::<_, SqlAlertRule>(
            r#"
            SELECT id, project_id, enabled, events, channel_type,
                   webhook_url, email_address
            FROM alert_rules
            WHERE project_id = ? AND enabled = TRUE
            ORDER BY id
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        let mut rules = Vec::new();
        for row in rows {
            let rule_id = row.id;
            match row.into_rule() {
                Some(rule) if rule.matches(event_type) => rules.push(rule),
                Some(_) => {}
                None => warn!("Skipping malformed alert rule id={}", rule_id),
            }
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::{mem_db, seed_project, seed_rule};
    use domain::ChannelType;

    #[tokio::test]
    async fn disabled_rules_are_never_matched() {
        let db = mem_db().await;
        let project_id = seed_project(&db, "storefront").await;
        seed_rule(
            &db,
            project_id,
            false,
            r#"["failed"]"#,
            "slack",
            Some("https://hooks.slack.com/services/T/B/x"),
        )
        .await;

        let rules = db.matching_alert_rules(project_id, "failed").await.unwrap();
        assert!(rules.is_empty());
    }

    #[tokio::test]
    async fn rules_without_the_event_type_are_excluded() {
        let db = mem_db().await;
        let project_id = seed_project(&db, "storefront").await;
        seed_rule(
            &db,
            project_id,
            true,
            r#"["success"]"#,
            "slack",
            Some("https://hooks.slack.com/services/T/B/x"),
        )
        .await;

        let rules = db.matching_alert_rules(project_id, "failed").await.unwrap();
        assert!(rules.is_empty());
    }

    #[tokio::test]
    async fn matching_rules_come_back_in_id_order() {
        let db = mem_db().await;
        let project_id = seed_project(&db, "storefront").await;
        let other_project = seed_project(&db, "billing").await;

        let first = seed_rule(
            &db,
            project_id,
            true,
            r#"["failed","success"]"#,
            "slack",
            Some("https://hooks.slack.com/services/T/B/x"),
        )
        .await;
        let second = seed_rule(&db, project_id, true, r#"["failed"]"#, "email", None).await;
        // 其他项目的规则不得串扰
        seed_rule(&db, other_project, true, r#"["failed"]"#, "email", None).await;

        let rules = db.matching_alert_rules(project_id, "failed").await.unwrap();
        assert_eq!(
            rules.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![first, second]
        );
        assert_eq!(rules[0].channel_type, ChannelType::Slack);
        assert_eq!(rules[1].channel_type, ChannelType::Email);
    }

    #[tokio::test]
    async fn malformed_rule_rows_are_skipped() {
        let db = mem_db().await;
        let project_id = seed_project(&db, "storefront").await;
        seed_rule(&db, project_id, true, "not json", "slack", None).await;
        seed_rule(&db, project_id, true, r#"["failed"]"#, "pager", None).await;
        let ok = seed_rule(&db, project_id, true, r#"["failed"]"#, "email", None).await;

        let rules = db.matching_alert_rules(project_id, "failed").await.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, ok);
    }
}
