//! UseCase: プロジェクトルームへの入室
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinProjectRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - メンバーでない接続がルームの配信を受け取れないことを保証する
//! - 入室の冪等性を保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーの入室、同じルームへの再入室
//! - 異常系：匿名接続、不正な形式の ID、非メンバー、存在しないプロジェクト

use std::sync::Arc;

use crate::domain::{MembershipAuthorizer, ProjectId, RoomRegistry, Session};

use super::error::ChatError;

/// プロジェクトルームへの入室のユースケース
pub struct JoinProjectRoomUseCase {
    /// MembershipAuthorizer（メンバーシップ確認）
    authorizer: Arc<MembershipAuthorizer>,
    /// RoomRegistry（ルーム在室状況の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinProjectRoomUseCase {
    pub fn new(authorizer: Arc<MembershipAuthorizer>, registry: Arc<dyn RoomRegistry>) -> Self {
        Self {
            authorizer,
            registry,
        }
    }

    /// 入室を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ProjectId)` - 入室したルーム（すでに在室していた場合も成功）
    /// * `Err(ChatError)` - 認可に失敗した場合（在室状況は変わらない）
    pub async fn execute(
        &self,
        session: &Session,
        raw_project_id: &str,
    ) -> Result<ProjectId, ChatError> {
        let user_id = session.identity.as_ref().ok_or(ChatError::Unauthorized)?;

        let project_id = self.authorizer.authorize(raw_project_id, user_id).await?;

        let newly_joined = self
            .registry
            .join(session.connection_id, project_id.clone())
            .await;
        if newly_joined {
            tracing::info!(
                "Connection '{}' (user '{}') joined room '{}'",
                session.connection_id,
                user_id,
                project_id
            );
        }

        Ok(project_id)
    }
}
