// src/models/message.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The `{"message": ...}` envelope used by every endpoint that does not return an entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
