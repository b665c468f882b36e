//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, RoomPresenceDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let store = match state.project_store.ping().await {
        Ok(()) => "ready",
        Err(e) => {
            tracing::warn!("Project store health check failed: {}", e);
            "unavailable"
        }
    };

    Json(HealthDto {
        status: "ok".to_string(),
        store: store.to_string(),
    })
}

/// Get list of rooms that currently have at least one connection
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomPresenceDto>> {
    let rooms = state.get_active_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(Into::into).collect())
}
