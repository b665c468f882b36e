//! JWT による TokenValidator 実装
//!
//! トークンのクレームは `{ "user": { "id": "<userId>" }, "exp": <unix 秒> }` 形式。
//! 有効期限は常に検証します。

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, TokenValidator, UserId};

/// トークンに埋め込まれたユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsUser {
    pub id: String,
}

/// JWT のクレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: ClaimsUser,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// HS256 JWT の発行と検証
pub struct JwtTokenValidator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenValidator {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// ユーザーのトークンを発行
    pub fn issue(&self, user_id: &UserId, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now().timestamp().max(0) as u64;
        self.issue_with_expiry(user_id, now + ttl.as_secs(), now)
    }

    /// 有効期限（Unix 秒）を指定してトークンを発行
    pub fn issue_with_expiry(
        &self,
        user_id: &UserId,
        exp: u64,
        iat: u64,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            user: ClaimsUser {
                id: user_id.as_str().to_string(),
            },
            exp,
            iat: Some(iat),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::IssueFailed(e.to_string()))
    }
}

impl TokenValidator for JwtTokenValidator {
    fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed(e.to_string()),
            }
        })?;

        UserId::try_from(data.claims.user.id).map_err(|_| AuthError::MissingIdentity)
    }
}
