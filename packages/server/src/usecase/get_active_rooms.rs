//! UseCase: 在室中のルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomPresence, RoomRegistry};

/// 在室中のルーム一覧取得のユースケース
pub struct GetActiveRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetActiveRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Vec<RoomPresence> {
        self.registry.active_rooms().await
    }
}
