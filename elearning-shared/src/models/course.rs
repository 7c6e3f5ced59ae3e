/// Course model and database operations
///
/// A course belongs to one instructor and is published as soon as it is
/// created. Courses are never updated or deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE courses (
///     id            TEXT PRIMARY KEY NOT NULL,
///     instructor_id TEXT NOT NULL REFERENCES users(id),
///     title         TEXT NOT NULL,
///     description   TEXT,
///     price         REAL,
///     level         TEXT,
///     is_published  BOOLEAN NOT NULL DEFAULT 1,
///     created_at    TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;

use super::new_id;

/// Full course row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: String,

    /// Owning instructor (`users.id`)
    pub instructor_id: String,

    pub title: String,
    pub description: Option<String>,

    /// Price as supplied by the caller; `None` when omitted
    pub price: Option<f64>,

    /// Free-form level label (e.g. "beginner")
    pub level: Option<String>,

    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Public listing projection of a course
///
/// Only these four fields are exposed by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub price: Option<f64>,
    pub level: Option<String>,
}

/// Input for creating a new course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    pub instructor_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub level: Option<String>,
    pub is_published: bool,
}

impl Course {
    /// Inserts a new course
    ///
    /// # Errors
    ///
    /// Returns an error if `instructor_id` does not reference an existing
    /// user (foreign key) or the database is unreachable.
    pub async fn create<'e, E>(executor: E, data: CreateCourse) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (id, instructor_id, title, description, price, level,
                                 is_published, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, instructor_id, title, description, price, level,
                      is_published, created_at
            "#,
        )
        .bind(new_id())
        .bind(data.instructor_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.price)
        .bind(data.level)
        .bind(data.is_published)
        .bind(Utc::now())
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        Ok(course)
    }

    /// Finds a course by ID
    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, instructor_id, title, description, price, level,
                   is_published, created_at
            FROM courses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(course)
    }

    /// Lists every course as a summary, in storage order
    ///
    /// No filtering and no pagination.
    pub async fn list_summaries<'e, E>(executor: E) -> Result<Vec<CourseSummary>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let courses = sqlx::query_as::<_, CourseSummary>(
            r#"
            SELECT id, title, price, level
            FROM courses
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(courses)
    }

    /// Counts total number of courses
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM courses")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
