//! Repository trait 定義
//!
//! プロジェクトとメンバーシップ、チャット履歴を保持する外部ストアへのインターフェース。
//! 単一ドキュメントのアトミックな read-modify-write を提供する信頼できるストアとして扱います。

use async_trait::async_trait;

use super::{ChatMessage, MessageContent, ProjectId, ProjectRef, StoreError, UserId, UserSummary};

/// Project Store trait
///
/// UseCase 層とドメインサービスはこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// プロジェクト ID とメンバーシップの両方で絞り込んでプロジェクトを取得
    ///
    /// 存在しないプロジェクトとメンバーでないプロジェクトはどちらも `Ok(None)` になる。
    async fn find_project_if_member(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<Option<ProjectRef>, StoreError>;

    /// プロジェクトのチャット履歴にメッセージをアトミックに追加
    ///
    /// ID と作成時刻はストアが払い出す。
    async fn append_chat_message(
        &self,
        project_id: &ProjectId,
        sender_id: &UserId,
        content: &MessageContent,
    ) -> Result<ChatMessage, StoreError>;

    /// ユーザーの表示用情報を取得
    async fn find_user_display_info(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserSummary>, StoreError>;

    /// ストアの疎通確認
    async fn ping(&self) -> Result<(), StoreError>;
}
