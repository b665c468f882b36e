//! UseCase 層のエラー型
//!
//! `ChatError` の表示文字列は ack の `msg` としてクライアントに返る、機械的に判別可能な理由です。
//! ストアの内部エラーなどの詳細は含めません。

use thiserror::Error;

use crate::domain::{AuthError, MembershipError, MessageStoreError};

/// ハンドシェイク時のエラー（接続そのものを拒否する）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(#[from] AuthError),
}

/// リクエストごとのエラー（要求元の接続にだけ ack で返す）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Identity のない接続による操作
    #[error("Unauthorized")]
    Unauthorized,

    /// プロジェクト ID の形式不正
    #[error("Invalid project ID")]
    InvalidProject,

    /// メンバーでない、またはプロジェクトが存在しない（区別しない）
    #[error("Project not found")]
    ProjectNotFound,

    /// 空白のみの本文
    #[error("Message is required")]
    EmptyMessage,

    /// ストアの障害
    #[error("Server error")]
    ServerError,
}

impl From<MembershipError> for ChatError {
    fn from(error: MembershipError) -> Self {
        match error {
            MembershipError::InvalidProject(_) => ChatError::InvalidProject,
            MembershipError::NotMember => ChatError::ProjectNotFound,
            MembershipError::Store(e) => {
                tracing::error!("Membership lookup failed: {}", e);
                ChatError::ServerError
            }
        }
    }
}

impl From<MessageStoreError> for ChatError {
    fn from(error: MessageStoreError) -> Self {
        match error {
            MessageStoreError::EmptyMessage => ChatError::EmptyMessage,
            MessageStoreError::PersistenceFailed(e) => {
                tracing::error!("Failed to persist chat message: {}", e);
                ChatError::ServerError
            }
        }
    }
}
