/// Course module model
///
/// `module_order` is caller-supplied display order. It is stored as given and
/// never re-sorted or checked for gaps and duplicates.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE modules (
///     id            TEXT PRIMARY KEY NOT NULL,
///     course_id     TEXT NOT NULL REFERENCES courses(id),
///     title         TEXT NOT NULL,
///     module_order  INTEGER NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;

use super::new_id;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Module {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub module_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateModule {
    pub course_id: String,
    pub title: String,
    pub module_order: i32,
}

impl Module {
    pub async fn create<'e, E>(executor: E, data: CreateModule) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let module = sqlx::query_as::<_, Module>(
            r#"
            INSERT INTO modules (id, course_id, title, module_order)
            VALUES (?, ?, ?, ?)
            RETURNING id, course_id, title, module_order
            "#,
        )
        .bind(new_id())
        .bind(data.course_id)
        .bind(data.title)
        .bind(data.module_order)
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        Ok(module)
    }

    /// Lists a course's modules in insertion order
    pub async fn list_by_course<'e, E>(executor: E, course_id: &str) -> Result<Vec<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let modules = sqlx::query_as::<_, Module>(
            r#"
            SELECT id, course_id, title, module_order
            FROM modules
            WHERE course_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(course_id)
        .fetch_all(executor)
        .await?;

        Ok(modules)
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM modules")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
