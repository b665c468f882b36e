//! Message formatting utilities for client display.

use campus_chat_server::infrastructure::dto::websocket::ChatMessagePayload;
use chrono::{DateTime, Local};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the notice shown once the room is joined
    pub fn format_room_joined(project_id: &str) -> String {
        format!(
            "\n\n============================================================\n\
             Joined project room {}\n\
             ============================================================\n",
            project_id
        )
    }

    /// Format a chat message
    ///
    /// The sender is shown by username, falling back to the user id.
    pub fn format_chat_message(message: &ChatMessagePayload) -> String {
        let from = message
            .sender
            .username
            .as_deref()
            .unwrap_or(&message.sender.id);
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             sent at {}\n\
             ------------------------------------------------------------\n",
            from,
            message.content,
            Self::format_local_time(&message.created_at)
        )
    }

    /// Format a rejected request
    pub fn format_request_failed(reason: &str) -> String {
        format!("\n! Request failed: {}\n", reason)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    /// Convert an RFC 3339 timestamp to local time, keeping the input when it cannot be parsed
    fn format_local_time(created_at: &str) -> String {
        DateTime::parse_from_rfc3339(created_at)
            .map(|time| {
                time.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|_| created_at.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_chat_server::infrastructure::dto::websocket::SenderDto;

    fn create_test_message(username: Option<&str>, created_at: &str) -> ChatMessagePayload {
        ChatMessagePayload {
            id: "65a0c0ffee0000000000abcd".to_string(),
            content: "Hello, world!".to_string(),
            sender: SenderDto {
                id: "650a1f0c2b3d4e5f60718293".to_string(),
                username: username.map(str::to_string),
                email: None,
            },
            project_id: "64b7f0c2a1d3e4f5a6b7c8d9".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_format_chat_message_with_username() {
        // テスト項目: チャットメッセージがユーザー名付きで正しくフォーマットされる
        // given (前提条件):
        let message = create_test_message(Some("alice"), "2023-06-15T12:00:00.000Z");

        // when (操作):
        let result = MessageFormatter::format_chat_message(&message);

        // then (期待する結果):
        assert!(result.contains("@alice:"));
        assert!(result.contains("Hello, world!"));
        assert!(result.contains("sent at 2023-06-1"));
        assert!(result.contains("------------------------------------------------------------"));
    }

    #[test]
    fn test_format_chat_message_without_username() {
        // テスト項目: ユーザー名のない送信者はユーザー ID で表示される
        let message = create_test_message(None, "2023-06-15T12:00:00.000Z");

        let result = MessageFormatter::format_chat_message(&message);

        assert!(result.contains("@650a1f0c2b3d4e5f60718293:"));
    }

    #[test]
    fn test_format_chat_message_with_unparsable_time() {
        // テスト項目: 解釈できない時刻はそのまま表示される
        let message = create_test_message(Some("alice"), "yesterday");

        let result = MessageFormatter::format_chat_message(&message);

        assert!(result.contains("sent at yesterday"));
    }

    #[test]
    fn test_format_room_joined() {
        // テスト項目: 入室通知にプロジェクト ID が含まれる
        let result = MessageFormatter::format_room_joined("64b7f0c2a1d3e4f5a6b7c8d9");

        assert!(result.contains("Joined project room 64b7f0c2a1d3e4f5a6b7c8d9"));
    }

    #[test]
    fn test_format_request_failed() {
        // テスト項目: 失敗した要求の理由が表示される
        let result = MessageFormatter::format_request_failed("Message is required");

        assert!(result.contains("Request failed: Message is required"));
    }

    #[test]
    fn test_format_binary_message() {
        // テスト項目: バイナリメッセージ通知が正しくフォーマットされる
        let result = MessageFormatter::format_binary_message(1024);

        assert!(result.contains("1024 bytes"));
        assert!(result.contains("Received"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 生メッセージが正しくフォーマットされる
        let result = MessageFormatter::format_raw_message("unknown message format");

        assert!(result.contains("unknown message format"));
        assert!(result.contains("Received:"));
    }
}
