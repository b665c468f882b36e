//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("invalid project id: '{0}'")]
    InvalidProjectId(String),

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("message content must not be empty")]
    EmptyMessageContent,
}

/// プロジェクトストアのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// 認証トークン検証のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,

    #[error("token does not carry a user identity")]
    MissingIdentity,

    #[error("failed to issue token: {0}")]
    IssueFailed(String),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("push failed: {0}")]
    PushFailed(String),
}
