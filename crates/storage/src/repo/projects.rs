use crate::{models::SqlProject, Db};
use domain::{Project, ProjectLookup};

impl Db {
    /// 名称解析统一为大小写不敏感；0 / 1 / 多行三种结果都显式返回。
    pub async fn resolve_project(&self, name: &str) -> anyhow::Result<ProjectLookup> {
        let mut rows = sqlx::query_as::<_, SqlProject>(
            r#"
            SELECT id, name, status, tier
            FROM projects
            WHERE name = ? COLLATE NOCASE
            ORDER BY id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        match rows.len() {
            0 => Ok(ProjectLookup::None),
            1 => Ok(ProjectLookup::One(rows.remove(0).into())),
            n => Ok(ProjectLookup::Many(n as i64)),
        }
    }

    pub async fn get_project(&self, id: i64) -> anyhow::Result<Option<Project>> {
        let row = sqlx::query_as::<_, SqlProject>(
            "SELECT id, name, status, tier FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::{mem_db, seed_project};
    use domain::ProjectLookup;

    #[tokio::test]
    async fn resolve_is_case_insensitive() {
        let db = mem_db().await;
        let id = seed_project(&db, "Storefront").await;

        match db.resolve_project("storefront").await.unwrap() {
            ProjectLookup::One(p) => {
                assert_eq!(p.id, id);
                assert_eq!(p.name, "Storefront");
            }
            other => panic!("expected exactly one match, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolve_unknown_name_is_none() {
        let db = mem_db().await;
        seed_project(&db, "storefront").await;

        assert!(matches!(
            db.resolve_project("billing").await.unwrap(),
            ProjectLookup::None
        ));
    }

    #[tokio::test]
    async fn resolve_duplicate_names_is_many() {
        let db = mem_db().await;
        seed_project(&db, "storefront").await;
        seed_project(&db, "StoreFront").await;

        assert!(matches!(
            db.resolve_project("storefront").await.unwrap(),
            ProjectLookup::Many(2)
        ));
    }

    #[tokio::test]
    async fn get_project_by_id() {
        let db = mem_db().await;
        let id = seed_project(&db, "storefront").await;

        let p = db.get_project(id).await.unwrap().unwrap();
        assert_eq!(p.name, "storefront");
        assert!(db.get_project(id + 100).await.unwrap().is_none());
    }
}
