//! Repository for the `codes` table (password-reset verification codes).

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;

use crate::models::code::VerificationCode;

const COLUMNS: &str = "id, user_email, code, token, attempts, created_at, expires_at";

pub struct CodeRepo;

impl CodeRepo {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        user_email: &str,
        code: i32,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO codes (user_email, code, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VerificationCode>(&query)
            .bind(user_email)
            .bind(code)
            .bind(expires_at)
            .fetch_one(executor)
            .await
    }

    /// Spends one attempt on the live code for `email` and returns it.
    ///
    /// The live code is the newest unexpired, not yet exchanged row with fewer
    /// than `max_attempts` tries. `None` when there is no such row.
    pub async fn claim_attempt<'e, E: PgExecutor<'e>>(
        executor: E,
        user_email: &str,
        max_attempts: i32,
    ) -> Result<Option<VerificationCode>, sqlx::Error> {
        let query = format!(
            "UPDATE codes SET attempts = attempts + 1
             WHERE attempts < $2
               AND id = (
                 SELECT id FROM codes
                 WHERE LOWER(user_email) = LOWER($1)
                   AND token IS NULL
                   AND expires_at > NOW()
                   AND attempts < $2
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
                 FOR UPDATE
               )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VerificationCode>(&query)
            .bind(user_email)
            .bind(max_attempts)
            .fetch_optional(executor)
            .await
    }

    pub async fn attach_token<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        token: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE codes SET token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Find the unexpired code row a reset token was issued against.
    pub async fn find_by_token<'e, E: PgExecutor<'e>>(
        executor: E,
        token: &str,
    ) -> Result<Option<VerificationCode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM codes WHERE token = $1 AND expires_at > NOW()");
        sqlx::query_as::<_, VerificationCode>(&query)
            .bind(token)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete_for_email<'e, E: PgExecutor<'e>>(
        executor: E,
        user_email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM codes WHERE LOWER(user_email) = LOWER($1)")
            .bind(user_email)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn cleanup_expired<'e, E: PgExecutor<'e>>(executor: E) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM codes WHERE expires_at <= NOW()")
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
