//! UseCase: チャットメッセージ送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - メッセージ送信はゲートウェイの中心的な機能
//! - 認可・検証・永続化のどこかで失敗したメッセージが配信されないことを保証する
//! - 配信が Identity 単位ではなく接続単位であることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：在室者全員への配信、同じユーザーの複数接続への配信
//! - 異常系：匿名接続、非メンバー、入室後のメンバー除外、空白のみの本文、永続化の失敗
//! - エッジケース：表示情報のないユーザー（ID のみの送信者情報）

use std::sync::Arc;

use crate::domain::{
    BroadcastFanout, EnrichedMessage, MembershipAuthorizer, MessageStore, ProjectStore, Session,
    UserId, UserSummary,
};

use super::error::ChatError;

/// チャットメッセージ送信のユースケース
pub struct SendChatMessageUseCase {
    /// MembershipAuthorizer（送信のたびにストアで再確認する）
    authorizer: Arc<MembershipAuthorizer>,
    /// MessageStore（本文の検証と永続化）
    message_store: Arc<MessageStore>,
    /// ProjectStore（送信者の表示情報の取得）
    project_store: Arc<dyn ProjectStore>,
    /// BroadcastFanout（ルームへの配信）
    fanout: Arc<BroadcastFanout>,
}

impl SendChatMessageUseCase {
    pub fn new(
        authorizer: Arc<MembershipAuthorizer>,
        message_store: Arc<MessageStore>,
        project_store: Arc<dyn ProjectStore>,
        fanout: Arc<BroadcastFanout>,
    ) -> Self {
        Self {
            authorizer,
            message_store,
            project_store,
            fanout,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(EnrichedMessage)` - 永続化して配信したメッセージ（ack にも同じペイロードを載せる）
    /// * `Err(ChatError)` - 失敗した場合（永続化も配信もされない）
    pub async fn execute(
        &self,
        session: &Session,
        raw_project_id: &str,
        raw_content: &str,
    ) -> Result<EnrichedMessage, ChatError> {
        // 1. Identity の確認
        let user_id = session.identity.as_ref().ok_or(ChatError::Unauthorized)?;

        // 2. メンバーシップの再確認（入室時の結果は使わない）
        let project_id = self.authorizer.authorize(raw_project_id, user_id).await?;

        // 3. 本文の検証と永続化
        let message = self
            .message_store
            .append(&project_id, user_id, raw_content)
            .await?;

        // 4. 送信者の表示情報を付与
        let sender = self.resolve_sender(user_id).await;
        let enriched = EnrichedMessage { message, sender };

        // 5. ルームの在室者へ配信
        let delivered = self.fanout.deliver(&project_id, enriched.clone()).await;

        tracing::info!(
            "Connection '{}' (user '{}') posted message '{}' to room '{}' ({} recipients)",
            session.connection_id,
            user_id,
            enriched.message.id.as_str(),
            project_id,
            delivered
        );

        Ok(enriched)
    }

    /// 表示情報が得られない場合は ID のみの送信者情報にフォールバック
    async fn resolve_sender(&self, user_id: &UserId) -> UserSummary {
        match self.project_store.find_user_display_info(user_id).await {
            Ok(Some(summary)) => summary,
            Ok(None) => UserSummary::id_only(user_id.clone()),
            Err(e) => {
                tracing::warn!("Failed to look up display info for '{}': {}", user_id, e);
                UserSummary::id_only(user_id.clone())
            }
        }
    }
}
