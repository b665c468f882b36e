//! UseCase: 接続処理（ハンドシェイク）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectUseCase::authenticate() と open_session()
//!
//! ### なぜこのテストが必要か
//! - 認証情報なしの接続は許容し、不正な認証情報の接続は拒否する非対称性を保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークン、トークンなし
//! - 異常系：期限切れ・改ざんされたトークン

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, Session, TokenValidator, UserId,
};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectUseCase {
    /// TokenValidator（認証トークン検証の抽象化）
    token_validator: Arc<dyn TokenValidator>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectUseCase {
    pub fn new(
        token_validator: Arc<dyn TokenValidator>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            token_validator,
            message_pusher,
        }
    }

    /// ハンドシェイクの認証情報を検証
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - 認証情報なし（匿名接続として続行）
    /// * `Ok(Some(UserId))` - 有効な認証情報
    /// * `Err(ConnectError)` - 不正または期限切れの認証情報（接続を拒否）
    pub fn authenticate(&self, credential: Option<&str>) -> Result<Option<UserId>, ConnectError> {
        match credential {
            None => Ok(None),
            Some(token) => Ok(Some(self.token_validator.validate(token)?)),
        }
    }

    /// 接続 ID を払い出し、送信チャンネルを登録してセッションを開始
    pub async fn open_session(&self, identity: Option<UserId>, sender: PusherChannel) -> Session {
        let session = Session::new(ConnectionId::generate(), identity);
        self.message_pusher
            .register_connection(session.connection_id, sender)
            .await;
        session
    }
}
