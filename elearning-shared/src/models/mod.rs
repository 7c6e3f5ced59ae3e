/// Database models for the e-learning catalog
///
/// Each model owns the SQL for its table. Write operations are generic over
/// [`sqlx::sqlite::SqliteExecutor`], so the same call works against the pool,
/// a single pooled connection, or an open transaction.
///
/// # Models
///
/// - `user`: students and instructors
/// - `course`: courses owned by an instructor
/// - `module`: ordered sections of a course
/// - `lesson`: ordered items inside a module
/// - `enrollment`, `payment`, `certificate`: defined tables with no HTTP path
///
/// # Example
///
/// ```no_run
/// use elearning_shared::models::user::{CreateUser, User, UserRole};
/// use elearning_shared::db::{self, pool::DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = db::connect(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     full_name: "Ada Lovelace".to_string(),
///     email: "ada@example.com".to_string(),
///     role: UserRole::Instructor,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod certificate;
pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod module;
pub mod payment;
pub mod user;

use uuid::Uuid;

/// Generates a new row identifier (UUID v4, hyphenated, 36 chars)
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
