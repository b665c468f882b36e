//! 値オブジェクト
//!
//! 生成時にバリデーションを行い、不正な値を持つインスタンスが存在しないことを保証します。

use std::fmt;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// ドキュメント ID の 16 進文字数
pub const OBJECT_ID_LEN: usize = 24;

/// ドキュメント ID 形式（24 桁の 16 進数）かどうかを判定
pub fn is_object_id(value: &str) -> bool {
    value.len() == OBJECT_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// ドキュメント ID 形式の新しい ID を生成
///
/// 先頭 8 桁が秒単位の生成時刻、残り 16 桁がランダム値。
pub fn generate_object_id() -> String {
    let seconds = object_id_seconds(Utc::now().timestamp());
    let random = Uuid::new_v4().simple().to_string();
    format!("{:08x}{}", seconds, &random[..OBJECT_ID_LEN - 8])
}

/// ID 先頭 8 桁に入れる秒数。32 ビットに収まらない時刻は範囲の端に丸める
fn object_id_seconds(timestamp: i64) -> u32 {
    u32::try_from(timestamp.max(0)).unwrap_or(u32::MAX)
}

/// 接続 ID（サーバーが払い出す、接続ごとに一意）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を払い出す
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// プロジェクト ID
///
/// 24 桁の 16 進数のみを受け付け、小文字に正規化して保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if !is_object_id(&value) {
            return Err(ValueObjectError::InvalidProjectId(value));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ProjectId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ユーザー ID（認証済みの Identity）
///
/// 形式は問わない不透明な値として扱い、空文字列のみを拒否する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// メッセージ ID（ストアが払い出す）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// ドキュメント ID 形式の新しいメッセージ ID を生成
    pub fn generate() -> Self {
        Self(generate_object_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// メッセージ本文
///
/// 前後の空白を取り除いた値を保持する。空白のみの本文は作成できない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyMessageContent);
        }
        if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

/// タイムスタンプ（Unix 時刻、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_accepts_object_id() {
        // テスト項目: 24 桁の 16 進数はプロジェクト ID として受け付けられ、小文字に正規化される
        // given (前提条件):
        let raw = "64B7F0C2A1D3E4F5A6B7C8D9".to_string();

        // when (操作):
        let result = ProjectId::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "64b7f0c2a1d3e4f5a6b7c8d9");
    }

    #[test]
    fn test_project_id_rejects_invalid_format() {
        // テスト項目: 長さや文字種が不正なプロジェクト ID は拒否される
        // given (前提条件):
        let candidates = [
            "",
            "64b7f0c2a1d3e4f5a6b7c8d",
            "64b7f0c2a1d3e4f5a6b7c8d9a",
            "zzb7f0c2a1d3e4f5a6b7c8d9",
            "not-a-project",
        ];

        for raw in candidates {
            // when (操作):
            let result = ProjectId::try_from(raw);

            // then (期待する結果):
            assert_eq!(
                result,
                Err(ValueObjectError::InvalidProjectId(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_generate_object_id_is_valid_project_id() {
        // テスト項目: 生成した ID はドキュメント ID 形式を満たし、毎回異なる
        // given (前提条件):

        // when (操作):
        let first = generate_object_id();
        let second = generate_object_id();

        // then (期待する結果):
        assert!(is_object_id(&first));
        assert!(ProjectId::new(first.clone()).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn test_object_id_seconds_saturates() {
        // テスト項目: 32 ビットに収まらない時刻は切り捨てではなく範囲の端に丸められる
        assert_eq!(object_id_seconds(1_700_000_000), 1_700_000_000);
        assert_eq!(object_id_seconds(i64::from(u32::MAX) + 1), u32::MAX);
        assert_eq!(object_id_seconds(-1), 0);
    }

    #[test]
    fn test_message_content_is_trimmed() {
        // テスト項目: メッセージ本文は前後の空白が取り除かれる
        // given (前提条件):
        let raw = "  hello  ".to_string();

        // when (操作):
        let content = MessageContent::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(content.as_str(), "hello");
    }

    #[test]
    fn test_message_content_rejects_blank() {
        // テスト項目: 空白のみの本文は拒否される
        // given (前提条件):
        let candidates = ["", "   ", "\n\t "];

        for raw in candidates {
            // when (操作):
            let result = MessageContent::try_from(raw);

            // then (期待する結果):
            assert_eq!(result, Err(ValueObjectError::EmptyMessageContent));
        }
    }

    #[test]
    fn test_user_id_rejects_empty() {
        // テスト項目: 空のユーザー ID は拒否される
        assert_eq!(UserId::try_from(""), Err(ValueObjectError::EmptyUserId));
        assert_eq!(UserId::try_from("u-1").unwrap().as_str(), "u-1");
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 接続 ID は払い出しごとに異なる
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        assert_ne!(first, second);
    }
}
