//! InMemory Room Registry 実装
//!
//! ルーム → 在室接続の索引と、接続 → 在室ルームの逆引き索引を 1 つの Mutex で保護します。
//! 両方の索引は常に同じロックの中で更新されるため、食い違うことはありません。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ProjectId, RoomPresence, RoomRegistry};

#[derive(Default)]
struct RegistryState {
    /// ルームごとの在室接続（空になったルームは削除する）
    rooms: HashMap<ProjectId, HashSet<ConnectionId>>,
    /// 接続ごとの在室ルーム
    memberships: HashMap<ConnectionId, HashSet<ProjectId>>,
}

/// インメモリ Room Registry 実装
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, connection_id: ConnectionId, project_id: ProjectId) -> bool {
        let mut state = self.state.lock().await;

        let newly_joined = state
            .rooms
            .entry(project_id.clone())
            .or_default()
            .insert(connection_id);
        state
            .memberships
            .entry(connection_id)
            .or_default()
            .insert(project_id);

        newly_joined
    }

    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<ProjectId> {
        let mut state = self.state.lock().await;

        let Some(project_ids) = state.memberships.remove(connection_id) else {
            return Vec::new();
        };

        for project_id in &project_ids {
            let now_empty = match state.rooms.get_mut(project_id) {
                Some(members) => {
                    members.remove(connection_id);
                    members.is_empty()
                }
                None => false,
            };
            if now_empty {
                state.rooms.remove(project_id);
            }
        }

        let mut left: Vec<ProjectId> = project_ids.into_iter().collect();
        left.sort();
        left
    }

    async fn members_of(&self, project_id: &ProjectId) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(project_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<ProjectId> {
        let state = self.state.lock().await;
        let mut rooms: Vec<ProjectId> = state
            .memberships
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default();
        rooms.sort();
        rooms
    }

    async fn active_rooms(&self) -> Vec<RoomPresence> {
        let state = self.state.lock().await;
        let mut rooms: Vec<RoomPresence> = state
            .rooms
            .iter()
            .map(|(project_id, members)| RoomPresence {
                project_id: project_id.clone(),
                connections: members.len(),
            })
            .collect();

        // Sort by project_id for consistent ordering
        rooms.sort_by(|a, b| a.project_id.cmp(&b.project_id));
        rooms
    }
}
