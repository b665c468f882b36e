//! エンティティ

use super::value_object::{ConnectionId, MessageContent, MessageId, ProjectId, Timestamp, UserId};

/// 永続化済みのチャットメッセージ
///
/// ID と作成時刻はストアが払い出す。保存後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub project_id: ProjectId,
    pub sender: UserId,
    pub content: MessageContent,
    pub created_at: Timestamp,
}

/// 表示用の送信者情報（認証情報は含まない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserSummary {
    pub fn new(id: UserId, username: Option<String>, email: Option<String>) -> Self {
        Self {
            id,
            username,
            email,
        }
    }

    /// 表示情報が得られなかったユーザー（ID のみ）
    pub fn id_only(id: UserId) -> Self {
        Self {
            id,
            username: None,
            email: None,
        }
    }
}

/// メンバーシップ確認で得られるプロジェクトの参照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: ProjectId,
    pub title: String,
}

/// 送信者情報を付与したメッセージ（ブロードキャストと ack の共通ペイロード）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedMessage {
    pub message: ChatMessage,
    pub sender: UserSummary,
}

/// 1 つの接続のセッション
///
/// Identity はハンドシェイク時に一度だけ決まり、接続中は変わらない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub identity: Option<UserId>,
}

impl Session {
    pub fn new(connection_id: ConnectionId, identity: Option<UserId>) -> Self {
        Self {
            connection_id,
            identity,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// ルームの在室状況（プレゼンス）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPresence {
    pub project_id: ProjectId,
    pub connections: usize,
}
