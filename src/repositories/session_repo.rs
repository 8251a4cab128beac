//! Repository for the `sessions` table.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::session::AuthContext;

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        id: Uuid,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(user_id)
            .bind(expires_at)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Resolve a live session to the identity behind it.
    ///
    /// Expired sessions and sessions of soft-deleted users resolve to `None`.
    pub async fn resolve<'e, E: PgExecutor<'e>>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<AuthContext>, sqlx::Error> {
        sqlx::query_as::<_, AuthContext>(
            "SELECT s.id AS session_id, u.id AS user_id, u.role
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.id = $1
               AND s.expires_at > NOW()
               AND u.deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Returns `true` if a session was removed.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_all_for_user<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete sessions past their expiry. Returns the count of deleted rows.
    pub async fn cleanup_expired<'e, E: PgExecutor<'e>>(executor: E) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
