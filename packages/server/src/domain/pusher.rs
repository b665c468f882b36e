//! MessagePusher trait 定義
//!
//! 接続ごとの送信チャンネルを管理し、接続へイベントを届けるためのインターフェース。
//! 外部イベント名への変換（主イベント名と互換イベント名）は UI 層の責務で、
//! ここでは正規化された 1 種類のイベントだけを扱います。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, EnrichedMessage, MessagePushError};

/// 接続へイベントを送るチャンネル
pub type PusherChannel = mpsc::UnboundedSender<OutboundEvent>;

/// リクエストに対する応答（成功または失敗のどちらか 1 つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AckReply {
    /// 成功。メッセージ送信の場合はブロードキャストと同じペイロードを持つ
    Success(Option<EnrichedMessage>),
    /// 失敗。呼び出し側が判別できる安定した理由文字列
    Failure(String),
}

/// 接続へ送るイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// ルームへのチャットメッセージ配信
    ChatMessage(EnrichedMessage),
    /// 要求元の接続だけに返す応答
    Ack {
        request_id: Option<u64>,
        reply: AckReply,
    },
}

/// Message Pusher trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信し、届けられた接続数を返す
    ///
    /// 一部の接続への送信失敗は許容し、残りへの送信を続ける。
    async fn broadcast(&self, targets: Vec<ConnectionId>, event: OutboundEvent) -> usize;
}
