//! Repository for the `users` table.

use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password, name, phone, date_of_birth, role, \
                       created_at, updated_at, deleted_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new account, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password, name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(password_hash)
            .bind(name)
            .bind(role)
            .fetch_one(executor)
            .await
    }

    /// Find an account that has not been soft-deleted.
    pub async fn find_active_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an account by email (case-insensitive), skipping soft-deleted ones.
    pub async fn find_active_by_email<'e, E: PgExecutor<'e>>(
        executor: E,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// Returns `true` if the row was updated.
    pub async fn update_profile<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        name: &str,
        phone: &str,
        date_of_birth: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users
             SET name = $2, phone = $3, date_of_birth = $4, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(date_of_birth)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn update_password<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(password_hash)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft delete: the row stays for the foreign keys that point at it.
    pub async fn soft_delete<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
