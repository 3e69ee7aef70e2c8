use chrono::Utc;
use sqlx::{Pool, Sqlite};
use tracing::debug;

use crate::db::models::{NewOpening, OpeningRow};

const OPENING_COLUMNS: &str =
    "id, role, company, location, remote, link, salary, created_at, updated_at";

/// Repository for Opening database operations
///
/// Owns a handle to the connection pool it is constructed with.
pub struct OpeningRepository {
    pool: Pool<Sqlite>,
}

impl OpeningRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Insert a new opening and return the full record, id included
    pub async fn create(&self, opening: &NewOpening) -> Result<OpeningRow, sqlx::Error> {
        debug!(
            "Creating opening: role={}, company={}",
            opening.role, opening.company
        );

        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO openings
                (role, company, location, remote, link, salary, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {OPENING_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, OpeningRow>(&query)
            .bind(&opening.role)
            .bind(&opening.company)
            .bind(&opening.location)
            .bind(opening.remote)
            .bind(&opening.link)
            .bind(opening.salary)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        debug!("Opening created with id={}", row.id);
        Ok(row)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<OpeningRow>, sqlx::Error> {
        debug!("Fetching opening id={}", id);

        let query = format!("SELECT {OPENING_COLUMNS} FROM openings WHERE id = ?");
        sqlx::query_as::<_, OpeningRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self) -> Result<Vec<OpeningRow>, sqlx::Error> {
        let query = format!("SELECT {OPENING_COLUMNS} FROM openings ORDER BY id");
        let rows = sqlx::query_as::<_, OpeningRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        debug!("Listed {} openings", rows.len());
        Ok(rows)
    }

    /// Overwrite every mutable field of the opening with the given id
    ///
    /// Returns `None` when no row carries that id.
    pub async fn update(
        &self,
        id: i64,
        opening: &NewOpening,
    ) -> Result<Option<OpeningRow>, sqlx::Error> {
        debug!("Updating opening id={}", id);

        let query = format!(
            r#"
            UPDATE openings
            SET role = ?, company = ?, location = ?, remote = ?, link = ?, salary = ?,
                updated_at = ?
            WHERE id = ?
            RETURNING {OPENING_COLUMNS}
            "#
        );

        sqlx::query_as::<_, OpeningRow>(&query)
            .bind(&opening.role)
            .bind(&opening.company)
            .bind(&opening.location)
            .bind(opening.remote)
            .bind(&opening.link)
            .bind(opening.salary)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Hard-delete the opening with the given id
    ///
    /// Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        debug!("Deleting opening id={}", id);

        let result = sqlx::query("DELETE FROM openings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::db::migrations::run_migrations;

    async fn repository() -> OpeningRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        run_migrations(&pool).await.expect("migrations");
        OpeningRepository::new(pool)
    }

    fn engineer() -> NewOpening {
        NewOpening {
            role: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            remote: true,
            link: Some("https://acme.example/jobs/1".to_string()),
            salary: Some(120_000),
        }
    }

    #[actix_web::test]
    async fn create_assigns_increasing_ids() {
        let repo = repository().await;

        let first = repo.create(&engineer()).await.unwrap();
        let second = repo.create(&engineer()).await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first.role, "Engineer");
        assert_eq!(first.salary, Some(120_000));
        assert_eq!(first.created_at, first.updated_at);
    }

    #[actix_web::test]
    async fn find_by_id_returns_what_was_stored() {
        let repo = repository().await;
        let created = repo.create(&engineer()).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));

        assert_eq!(repo.find_by_id(9_999).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn list_is_empty_then_ordered_by_id() {
        let repo = repository().await;
        assert!(repo.list().await.unwrap().is_empty());

        let a = repo.create(&engineer()).await.unwrap();
        let b = repo.create(&engineer()).await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[actix_web::test]
    async fn update_replaces_all_mutable_fields() {
        let repo = repository().await;
        let created = repo.create(&engineer()).await.unwrap();

        let replacement = NewOpening {
            role: "Designer".to_string(),
            company: "Globex".to_string(),
            location: "Berlin".to_string(),
            remote: false,
            link: None,
            salary: None,
        };
        let updated = repo
            .update(created.id, &replacement)
            .await
            .unwrap()
            .expect("row exists");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.role, "Designer");
        assert!(!updated.remote);
        assert_eq!(updated.link, None);
        assert_eq!(updated.salary, None);
        assert_eq!(updated.created_at, created.created_at);

        assert!(repo.update(9_999, &replacement).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn delete_removes_the_row_once() {
        let repo = repository().await;
        let created = repo.create(&engineer()).await.unwrap();

        assert_eq!(repo.delete(created.id).await.unwrap(), 1);
        assert_eq!(repo.delete(created.id).await.unwrap(), 0);
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}
