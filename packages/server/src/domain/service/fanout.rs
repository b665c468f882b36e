//! ルームへのブロードキャスト
//!
//! 呼び出し時点のルーム在室者のスナップショットに対して、接続ごとに
//! fire-and-forget で配信します。配信中に入室した接続には届きません。

use std::sync::Arc;

use crate::domain::{EnrichedMessage, MessagePusher, OutboundEvent, ProjectId, RoomRegistry};

/// ブロードキャストのドメインサービス
pub struct BroadcastFanout {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastFanout {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// ルームの在室者全員にメッセージを配信し、届けられた接続数を返す
    pub async fn deliver(&self, project_id: &ProjectId, message: EnrichedMessage) -> usize {
        let targets = self.registry.members_of(project_id).await;
        let target_count = targets.len();

        let delivered = self
            .message_pusher
            .broadcast(targets, OutboundEvent::ChatMessage(message))
            .await;

        tracing::debug!(
            "Delivered chat message to {}/{} connections in room '{}'",
            delivered,
            target_count,
            project_id
        );

        delivered
    }
}
