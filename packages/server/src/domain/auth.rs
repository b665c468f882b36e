//! 認証トークン検証の trait 定義

use super::{AuthError, UserId};

/// Token Validator trait
///
/// 状態を持たない純粋な検証。構造が正しく有効期限内であれば Identity を返す。
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<UserId, AuthError>;
}
