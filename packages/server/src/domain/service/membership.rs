//! メンバーシップ確認
//!
//! プロジェクト ID の形式検証と、ストアへのポイントルックアップによるメンバー判定を行います。
//! 存在しないプロジェクトとメンバーでないプロジェクトは区別しません。

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{ProjectId, ProjectStore, StoreError, UserId};

/// メンバーシップ確認のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    #[error("invalid project id: '{0}'")]
    InvalidProject(String),

    #[error("not a member of the project")]
    NotMember,

    #[error("membership lookup failed: {0}")]
    Store(StoreError),
}

/// メンバーシップ確認のドメインサービス
pub struct MembershipAuthorizer {
    store: Arc<dyn ProjectStore>,
}

impl MembershipAuthorizer {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// ユーザーがプロジェクトのメンバーであることを確認し、検証済みのプロジェクト ID を返す
    ///
    /// 形式が不正なプロジェクト ID はストアに問い合わせずに `InvalidProject` になる。
    pub async fn authorize(
        &self,
        raw_project_id: &str,
        user_id: &UserId,
    ) -> Result<ProjectId, MembershipError> {
        let project_id = ProjectId::try_from(raw_project_id)
            .map_err(|_| MembershipError::InvalidProject(raw_project_id.to_string()))?;

        match self.store.find_project_if_member(&project_id, user_id).await {
            Ok(Some(_)) => Ok(project_id),
            Ok(None) | Err(StoreError::ProjectNotFound(_)) => Err(MembershipError::NotMember),
            Err(e) => Err(MembershipError::Store(e)),
        }
    }

    /// メンバーであれば `true`（形式不正・非メンバー・ストアエラーは全て `false`）
    pub async fn is_member(&self, raw_project_id: &str, user_id: &UserId) -> bool {
        self.authorize(raw_project_id, user_id).await.is_ok()
    }
}
