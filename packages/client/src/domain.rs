//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use campus_chat_server::infrastructure::dto::websocket::{
    AckPayload, ChatMessagePayload, EVENT_ACK, EVENT_CHAT_NEW, EVENT_CHAT_SEND,
    EVENT_JOIN_PROJECT, EVENT_RECEIVE_MESSAGE_LEGACY, RequestEnvelope, SendMessageData,
    ServerFrame,
};
use serde_json::Value;

use crate::error::ClientError;

/// Request id used for the room join sent right after connecting
pub const JOIN_REQUEST_ID: u64 = 1;

/// A frame received from the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// `chat:new` broadcast
    ChatMessage(ChatMessagePayload),
    /// `receive_message` broadcast (duplicate of `chat:new`)
    LegacyChatMessage,
    /// Reply to one of our requests
    Ack { id: Option<u64>, payload: AckPayload },
    /// Anything this client does not understand
    Unknown(String),
}

/// Classify a text frame received from the gateway
pub fn classify_frame(text: &str) -> ServerEvent {
    let Ok(frame) = serde_json::from_str::<ServerFrame<Value>>(text) else {
        return ServerEvent::Unknown(text.to_string());
    };

    match frame.event.as_str() {
        EVENT_CHAT_NEW => serde_json::from_value::<ChatMessagePayload>(frame.data)
            .map(ServerEvent::ChatMessage)
            .unwrap_or_else(|_| ServerEvent::Unknown(text.to_string())),
        EVENT_RECEIVE_MESSAGE_LEGACY => ServerEvent::LegacyChatMessage,
        EVENT_ACK => serde_json::from_value::<AckPayload>(frame.data)
            .map(|payload| ServerEvent::Ack {
                id: frame.id,
                payload,
            })
            .unwrap_or_else(|_| ServerEvent::Unknown(text.to_string())),
        _ => ServerEvent::Unknown(text.to_string()),
    }
}

/// Build the `joinProject` request frame
pub fn join_request(project_id: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&RequestEnvelope {
        event: EVENT_JOIN_PROJECT.to_string(),
        id: Some(JOIN_REQUEST_ID),
        data: Value::String(project_id.to_string()),
    })
}

/// Build a `chat:send` request frame
pub fn send_request(id: u64, project_id: &str, content: &str) -> Result<String, serde_json::Error> {
    let data = serde_json::to_value(SendMessageData {
        project_id: project_id.to_string(),
        content: content.to_string(),
    })?;
    serde_json::to_string(&RequestEnvelope {
        event: EVENT_CHAT_SEND.to_string(),
        id: Some(id),
        data,
    })
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if the error requires immediate exit (the token was rejected),
/// `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Unauthorized)
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PROJECT: &str = "64b7f0c2a1d3e4f5a6b7c8d9";

    #[test]
    fn test_classify_chat_message() {
        // テスト項目: chat:new のフレームがチャットメッセージとして解釈される
        // given (前提条件):
        let text = json!({
            "event": "chat:new",
            "data": {
                "_id": "65a0c0ffee0000000000abcd",
                "content": "hello",
                "sender": {"_id": "u1", "username": "alice"},
                "projectId": PROJECT,
                "createdAt": "2023-01-01T00:00:00.000Z"
            }
        })
        .to_string();

        // when (操作):
        let event = classify_frame(&text);

        // then (期待する結果):
        match event {
            ServerEvent::ChatMessage(payload) => {
                assert_eq!(payload.content, "hello");
                assert_eq!(payload.sender.username.as_deref(), Some("alice"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_classify_legacy_duplicate() {
        // テスト項目: receive_message のフレームは重複として区別される
        let text = json!({"event": "receive_message", "data": {}}).to_string();

        assert_eq!(classify_frame(&text), ServerEvent::LegacyChatMessage);
    }

    #[test]
    fn test_classify_ack() {
        // テスト項目: ack のフレームがリクエスト ID と結果に解釈される
        // given (前提条件):
        let text = json!({"event": "ack", "id": 3, "data": {"ok": false, "msg": "Project not found"}})
            .to_string();

        // when (操作):
        let event = classify_frame(&text);

        // then (期待する結果):
        assert_eq!(
            event,
            ServerEvent::Ack {
                id: Some(3),
                payload: AckPayload {
                    ok: false,
                    msg: Some("Project not found".to_string()),
                    data: None,
                },
            }
        );
    }

    #[test]
    fn test_classify_unknown() {
        // テスト項目: 解釈できないフレームは Unknown になる
        assert_eq!(
            classify_frame("plain text"),
            ServerEvent::Unknown("plain text".to_string())
        );
        let other = json!({"event": "typing", "data": {}}).to_string();
        assert_eq!(classify_frame(&other), ServerEvent::Unknown(other.clone()));
    }

    #[test]
    fn test_request_frames() {
        // テスト項目: 入室と送信のリクエストがゲートウェイの形式で組み立てられる
        // given (前提条件):

        // when (操作):
        let join: Value = serde_json::from_str(&join_request(PROJECT).unwrap()).unwrap();
        let send: Value = serde_json::from_str(&send_request(2, PROJECT, "hi").unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(
            join,
            json!({"event": "joinProject", "id": 1, "data": PROJECT})
        );
        assert_eq!(
            send,
            json!({"event": "chat:send", "id": 2, "data": {"projectId": PROJECT, "content": "hi"}})
        );
    }

    #[test]
    fn test_should_exit_immediately_with_unauthorized() {
        // テスト項目: Unauthorized エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::Unauthorized;

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_error() {
        // テスト項目: ConnectionError の場合、即座に終了すべきではないと判定される
        let error = ClientError::ConnectionError("network error".to_string());

        assert!(!should_exit_immediately(&error));
    }

    #[test]
    fn test_should_attempt_reconnect_with_unauthorized() {
        // テスト項目: Unauthorized エラーの場合、再接続すべきではないと判定される
        let error = ClientError::Unauthorized;

        assert!(!should_attempt_reconnect(&error, 0, 5));
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let first = should_attempt_reconnect(&error, 0, 5);
        let last = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(first);
        assert!(last);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        let error = ClientError::ConnectionError("network error".to_string());

        assert!(!should_attempt_reconnect(&error, 5, 5));
    }
}
