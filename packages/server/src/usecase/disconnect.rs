//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がどのルームにも残らないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ルームに在室していた接続の切断
//! - エッジケース：一度も入室していない接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, ProjectId, RoomRegistry};

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// RoomRegistry（ルーム在室状況の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 切断理由に関わらず接続ごとに一度だけ呼ばれる。退室したルームを返す。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<ProjectId> {
        // 1. 全てのルームから退室
        let left = self.registry.leave_all(connection_id).await;

        // 2. MessagePusher から接続を登録解除
        self.message_pusher
            .unregister_connection(connection_id)
            .await;

        left
    }
}
