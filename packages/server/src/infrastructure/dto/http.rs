//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// Project store state ("ready" or "unavailable")
    pub store: String,
}

/// Presence of one active room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPresenceDto {
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// Number of connections currently joined
    pub connections: usize,
}
