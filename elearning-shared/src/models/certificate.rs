/// Certificate model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE certificates (
///     id         TEXT PRIMARY KEY NOT NULL,
///     user_id    TEXT NOT NULL REFERENCES users(id),
///     course_id  TEXT NOT NULL REFERENCES courses(id),
///     issued_at  TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;

use super::new_id;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Certificate {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    /// Records a certificate issued now for `user_id` on `course_id`
    pub async fn issue<'e, E>(executor: E, user_id: &str, course_id: &str) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let certificate = sqlx::query_as::<_, Certificate>(
            r#"
            INSERT INTO certificates (id, user_id, course_id, issued_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, course_id, issued_at
            "#,
        )
        .bind(new_id())
        .bind(user_id)
        .bind(course_id)
        .bind(Utc::now())
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        Ok(certificate)
    }

    pub async fn list_by_user<'e, E>(executor: E, user_id: &str) -> Result<Vec<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let certificates = sqlx::query_as::<_, Certificate>(
            r#"
            SELECT id, user_id, course_id, issued_at
            FROM certificates
            WHERE user_id = ?
            ORDER BY issued_at
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(certificates)
    }
}
