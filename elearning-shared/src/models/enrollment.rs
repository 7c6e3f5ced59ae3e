/// Enrollment model
///
/// Links a user to a course. No endpoint creates enrollments; the table and
/// these operations exist for the data layer only.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE enrollments (
///     id           TEXT PRIMARY KEY NOT NULL,
///     user_id      TEXT NOT NULL REFERENCES users(id),
///     course_id    TEXT NOT NULL REFERENCES courses(id),
///     enrolled_at  TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;

use super::new_id;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnrollment {
    pub user_id: String,
    pub course_id: String,
}

impl Enrollment {
    pub async fn create<'e, E>(executor: E, data: CreateEnrollment) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (id, user_id, course_id, enrolled_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, course_id, enrolled_at
            "#,
        )
        .bind(new_id())
        .bind(data.user_id)
        .bind(data.course_id)
        .bind(Utc::now())
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        Ok(enrollment)
    }

    pub async fn list_by_user<'e, E>(executor: E, user_id: &str) -> Result<Vec<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, enrolled_at
            FROM enrollments
            WHERE user_id = ?
            ORDER BY enrolled_at
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(enrollments)
    }
}
