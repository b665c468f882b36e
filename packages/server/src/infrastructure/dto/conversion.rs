//! Conversion logic between DTOs and domain entities.

use campus_chat_shared::time::timestamp_to_rfc3339;

use crate::domain::{AckReply, EnrichedMessage, RoomPresence, UserSummary};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<UserSummary> for dto::SenderDto {
    fn from(model: UserSummary) -> Self {
        Self {
            id: model.id.into_string(),
            username: model.username,
            email: model.email,
        }
    }
}

impl From<EnrichedMessage> for dto::ChatMessagePayload {
    fn from(model: EnrichedMessage) -> Self {
        let message = model.message;
        Self {
            id: message.id.into_string(),
            content: message.content.into_string(),
            sender: model.sender.into(),
            project_id: message.project_id.into_string(),
            created_at: timestamp_to_rfc3339(message.created_at.value()),
        }
    }
}

impl From<AckReply> for dto::AckPayload {
    fn from(reply: AckReply) -> Self {
        match reply {
            AckReply::Success(message) => Self {
                ok: true,
                msg: None,
                data: message.map(Into::into),
            },
            AckReply::Failure(reason) => Self {
                ok: false,
                msg: Some(reason),
                data: None,
            },
        }
    }
}

impl From<RoomPresence> for http::RoomPresenceDto {
    fn from(model: RoomPresence) -> Self {
        Self {
            project_id: model.project_id.into_string(),
            connections: model.connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChatMessage, MessageContent, MessageId, ProjectId, Timestamp, UserId,
    };
    use serde_json::json;

    fn create_test_message(sender: UserSummary) -> EnrichedMessage {
        EnrichedMessage {
            message: ChatMessage {
                id: MessageId::new("65a0c0ffee0000000000abcd".to_string()),
                project_id: ProjectId::try_from("64b7f0c2a1d3e4f5a6b7c8d9").unwrap(),
                sender: sender.id.clone(),
                content: MessageContent::try_from("hello").unwrap(),
                created_at: Timestamp::new(1672531200123),
            },
            sender,
        }
    }

    #[test]
    fn test_enriched_message_to_payload() {
        // テスト項目: 送信者情報付きメッセージがブロードキャストのペイロードに変換される
        // given (前提条件):
        let sender = UserSummary::new(
            UserId::try_from("alice-id").unwrap(),
            Some("alice".to_string()),
            Some("alice@example.com".to_string()),
        );
        let message = create_test_message(sender);

        // when (操作):
        let payload: dto::ChatMessagePayload = message.into();

        // then (期待する結果):
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "_id": "65a0c0ffee0000000000abcd",
                "content": "hello",
                "sender": {"_id": "alice-id", "username": "alice", "email": "alice@example.com"},
                "projectId": "64b7f0c2a1d3e4f5a6b7c8d9",
                "createdAt": "2023-01-01T00:00:00.123Z"
            })
        );
    }

    #[test]
    fn test_unknown_sender_has_only_id() {
        // テスト項目: 表示情報のない送信者は _id だけを持つ
        // given (前提条件):
        let sender = UserSummary::id_only(UserId::try_from("ghost").unwrap());

        // when (操作):
        let payload: dto::ChatMessagePayload = create_test_message(sender).into();

        // then (期待する結果):
        assert_eq!(
            serde_json::to_value(&payload.sender).unwrap(),
            json!({"_id": "ghost"})
        );
    }

    #[test]
    fn test_ack_reply_to_payload() {
        // テスト項目: 成功と失敗の応答がそれぞれの ack 形式に変換される
        // given (前提条件):
        let success = AckReply::Success(None);
        let failure = AckReply::Failure("Message is required".to_string());

        // when (操作):
        let success: dto::AckPayload = success.into();
        let failure: dto::AckPayload = failure.into();

        // then (期待する結果):
        assert_eq!(serde_json::to_value(&success).unwrap(), json!({"ok": true}));
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({"ok": false, "msg": "Message is required"})
        );
    }

    #[test]
    fn test_room_presence_to_dto() {
        // テスト項目: ルームの在室状況が DTO に変換される
        let presence = RoomPresence {
            project_id: ProjectId::try_from("64b7f0c2a1d3e4f5a6b7c8d9").unwrap(),
            connections: 3,
        };

        let dto: http::RoomPresenceDto = presence.into();

        assert_eq!(dto.project_id, "64b7f0c2a1d3e4f5a6b7c8d9");
        assert_eq!(dto.connections, 3);
    }
}
