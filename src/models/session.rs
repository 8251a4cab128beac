// src/models/session.rs

use sqlx::FromRow;
use uuid::Uuid;

use super::user::ROLE_ADMIN;

/// Request-scoped identity resolved from a live session.
///
/// Inserted into request extensions by the session middleware and read by the
/// `AuthUser` / `RequireAdmin` extractors.
#[derive(Debug, Clone, FromRow)]
pub struct AuthContext {
    pub session_id: Uuid,
    pub user_id: i64,
    pub role: String,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
