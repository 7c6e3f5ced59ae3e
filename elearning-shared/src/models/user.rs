/// User model and database operations
///
/// Users are either students or instructors. Instructors are created
/// implicitly by course creation and never looked up or reused.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id          TEXT PRIMARY KEY NOT NULL,
///     full_name   TEXT NOT NULL,
///     email       TEXT NOT NULL UNIQUE,
///     role        TEXT NOT NULL DEFAULT 'student',
///     created_at  TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use elearning_shared::models::user::{CreateUser, User, UserRole};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     full_name: "Grace Hopper".to_string(),
///     email: "grace@example.com".to_string(),
///     role: UserRole::Student,
/// }).await?;
///
/// let found = User::find_by_email(&pool, "grace@example.com").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;

use super::new_id;

/// Role of a user account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Default role for accounts that take courses
    #[default]
    Student,

    /// Owner of one or more courses
    Instructor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Instructor => "instructor",
        }
    }
}

/// User model representing a student or instructor account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4 string)
    pub id: String,

    /// Display name
    pub full_name: String,

    /// Email address, unique across all users
    pub email: String,

    pub role: UserRole,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
}

impl User {
    /// Inserts a new user with a fresh id and `created_at = now`
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database is unreachable.
    ///
    /// The `RETURNING` row is read with `fetch_all` so the statement runs to
    /// completion and the write is committed before this returns. Every
    /// model insert follows the same pattern.
    pub async fn create<'e, E>(executor: E, data: CreateUser) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, full_name, email, role, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, full_name, email, role, created_at
            "#,
        )
        .bind(new_id())
        .bind(data.full_name)
        .bind(data.email)
        .bind(data.role)
        .bind(Utc::now())
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, role, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by exact email address
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, role, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Counts total number of users
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_student() {
        assert_eq!(UserRole::default(), UserRole::Student);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Instructor).unwrap(),
            "\"instructor\""
        );
        assert_eq!(UserRole::Instructor.as_str(), "instructor");
        assert_eq!(UserRole::Student.as_str(), "student");
    }

    // Database-backed tests are in tests/model_tests.rs
}
