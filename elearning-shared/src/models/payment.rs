/// Payment model
///
/// Records what a user paid for a course. There is no gateway integration:
/// `payment_status` and `payment_provider` are opaque strings stored as given.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE payments (
///     id                TEXT PRIMARY KEY NOT NULL,
///     user_id           TEXT NOT NULL REFERENCES users(id),
///     course_id         TEXT NOT NULL REFERENCES courses(id),
///     amount            REAL,
///     payment_status    TEXT,
///     payment_provider  TEXT,
///     created_at        TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteExecutor;

use super::new_id;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub amount: Option<f64>,
    pub payment_status: Option<String>,
    pub payment_provider: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayment {
    pub user_id: String,
    pub course_id: String,
    pub amount: Option<f64>,
    pub payment_status: Option<String>,
    pub payment_provider: Option<String>,
}

impl Payment {
    pub async fn create<'e, E>(executor: E, data: CreatePayment) -> Result<Self, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, user_id, course_id, amount, payment_status,
                                  payment_provider, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, course_id, amount, payment_status, payment_provider,
                      created_at
            "#,
        )
        .bind(new_id())
        .bind(data.user_id)
        .bind(data.course_id)
        .bind(data.amount)
        .bind(data.payment_status)
        .bind(data.payment_provider)
        .bind(Utc::now())
        .fetch_all(executor)
        .await?
        .pop()
        .ok_or(sqlx::Error::RowNotFound)?;

        Ok(payment)
    }

    pub async fn list_by_course<'e, E>(executor: E, course_id: &str) -> Result<Vec<Self>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, user_id, course_id, amount, payment_status, payment_provider,
                   created_at
            FROM payments
            WHERE course_id = ?
            ORDER BY created_at
            "#,
        )
        .bind(course_id)
        .fetch_all(executor)
        .await?;

        Ok(payments)
    }
}
