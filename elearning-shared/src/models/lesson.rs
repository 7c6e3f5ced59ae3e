/// Lesson model
///
/// Lessons live inside a module. `lesson_type` is free text ("video",
/// "article", "coding", ...) and `lesson_order` is stored as given.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE lessons (
///     id            TEXT PRIMARY KEY NOT NULL,
///     module_id     TEXT NOT NULL REFERENCES modules(id),
///     title         TEXT NOT NULL,
///     lesson_type   TEXT NOT NULL,
///     content       TEXT,
///     lesson_order  INTEGER NOT NULL,
///     created_at    TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;

use super::new_id;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lesson {
    pub id: String,
    pub module_id: String,
    pub title: String,
    pub lesson_type: String,
    pub content: Option<String>,
    pub lesson_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLesson {
    pub module_id: String,
    pub title: String,
    pub lesson_type: String,
    pub content: Option<String>,
    pub lesson_order: i32,
}

impl Lesson {
    pub async fn create<'e, E>(executor: E, data: CreateLesson) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"
            INSERT INTO lessons (id, module_id, title, lesson_type, content, lesson_order,
                                 created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, module_id, title, lesson_type, content, lesson_order, created_at
            "#,
        )
        .bind(new_id())
        .bind(data.module_id)
        .bind(data.title)
        .bind(data.lesson_type)
        .bind(data.content)
        .bind(data.lesson_order)
        .bind(Utc::now())
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        Ok(lesson)
    }

    /// Lists every lesson of a course, across its modules, in insertion order
    pub async fn list_by_course<'e, E>(executor: E, course_id: &str) -> Result<Vec<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT l.id, l.module_id, l.title, l.lesson_type, l.content, l.lesson_order,
                   l.created_at
            FROM lessons l
            JOIN modules m ON m.id = l.module_id
            WHERE m.course_id = ?
            ORDER BY l.rowid
            "#,
        )
        .bind(course_id)
        .fetch_all(executor)
        .await?;

        Ok(lessons)
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lessons")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
