//! メッセージ保存
//!
//! 本文を検証し、プロジェクトのチャット履歴へアトミックに追記します。

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{ChatMessage, MessageContent, ProjectId, ProjectStore, StoreError, UserId};

/// メッセージ保存のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageStoreError {
    #[error("message content is empty")]
    EmptyMessage,

    #[error("failed to persist message: {0}")]
    PersistenceFailed(StoreError),
}

/// メッセージ保存のドメインサービス
pub struct MessageStore {
    store: Arc<dyn ProjectStore>,
}

impl MessageStore {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// メッセージを保存し、ID と作成時刻が払い出されたレコードを返す
    ///
    /// 本文は前後の空白を取り除いて保存する。空白のみの本文はストアに渡さない。
    pub async fn append(
        &self,
        project_id: &ProjectId,
        sender: &UserId,
        raw_content: &str,
    ) -> Result<ChatMessage, MessageStoreError> {
        let content =
            MessageContent::try_from(raw_content).map_err(|_| MessageStoreError::EmptyMessage)?;

        self.store
            .append_chat_message(project_id, sender, &content)
            .await
            .map_err(MessageStoreError::PersistenceFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::repository::MockProjectStore,
        infrastructure::store::{InMemoryProjectStore, ProjectDocument},
    };
    use campus_chat_shared::time::FixedClock;

    const PROJECT: &str = "64b7f0c2a1d3e4f5a6b7c8d9";

    async fn create_test_store() -> Arc<InMemoryProjectStore> {
        let store = InMemoryProjectStore::with_clock(Arc::new(FixedClock::new(1_700_000_000_000)));
        store
            .insert_project(ProjectDocument::new(
                ProjectId::try_from(PROJECT).unwrap(),
                "Capstone",
                UserId::try_from("alice").unwrap(),
                vec![],
            ))
            .await;
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_append_assigns_id_and_timestamp() {
        // テスト項目: 保存したメッセージに ID と作成時刻が払い出され、本文は trim される
        // given (前提条件):
        let store = create_test_store().await;
        let message_store = MessageStore::new(store.clone());
        let project_id = ProjectId::try_from(PROJECT).unwrap();
        let alice = UserId::try_from("alice").unwrap();

        // when (操作):
        let message = message_store
            .append(&project_id, &alice, "  hello  ")
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.content.as_str(), "hello");
        assert_eq!(message.sender, alice);
        assert_eq!(message.project_id, project_id);
        assert_eq!(message.created_at.value(), 1_700_000_000_000);
        assert_eq!(message.id.as_str().len(), 24);

        let history = store.messages_of(&project_id).await;
        assert_eq!(history, vec![message]);
    }

    #[tokio::test]
    async fn test_append_rejects_blank_content_without_persisting() {
        // テスト項目: 空白のみの本文は EmptyMessage になり、ストアに保存されない
        // given (前提条件):
        let mut store = MockProjectStore::new();
        store.expect_append_chat_message().never();
        let message_store = MessageStore::new(Arc::new(store));
        let project_id = ProjectId::try_from(PROJECT).unwrap();
        let alice = UserId::try_from("alice").unwrap();

        // when (操作):
        let result = message_store.append(&project_id, &alice, "   ").await;

        // then (期待する結果):
        assert_eq!(result, Err(MessageStoreError::EmptyMessage));
    }

    #[tokio::test]
    async fn test_append_reports_vanished_project() {
        // テスト項目: 認可後にプロジェクトが削除されていた場合は PersistenceFailed になる
        // given (前提条件):
        let store = create_test_store().await;
        let project_id = ProjectId::try_from(PROJECT).unwrap();
        store.remove_project(&project_id).await;
        let message_store = MessageStore::new(store);
        let alice = UserId::try_from("alice").unwrap();

        // when (操作):
        let result = message_store.append(&project_id, &alice, "hello").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessageStoreError::PersistenceFailed(
                StoreError::ProjectNotFound(PROJECT.to_string())
            ))
        );
    }
}
