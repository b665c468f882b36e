//! ハンドシェイク時の認証情報の取り出し
//!
//! 認証情報は以下の順で探し、最初に見つかった空でない値を使います。
//!
//! 1. クエリパラメータ `auth_token`（クライアントが明示的に渡す認証フィールド）
//! 2. `Authorization` ヘッダー
//! 3. `x-auth-token` ヘッダー
//! 4. クエリパラメータ `token`
//!
//! 値が `Bearer ` で始まる場合は接頭辞を取り除きます（大文字小文字は区別しない）。
//! UTF-8 として解釈できないヘッダー値も認証情報として扱い、検証で拒否させます。

use std::{borrow::Cow, collections::HashMap};

use axum::http::{HeaderMap, header::AUTHORIZATION};

pub const AUTH_FIELD_QUERY: &str = "auth_token";
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";
pub const TOKEN_QUERY: &str = "token";

const BEARER_PREFIX: &str = "bearer ";

/// ハンドシェイクのメタデータから認証情報を取り出す
///
/// どこにも認証情報がない場合は `None`（匿名接続）。
pub fn select_credential(query: &HashMap<String, String>, headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
    };
    let param = |name: &str| query.get(name).map(|value| Cow::Borrowed(value.as_str()));

    [
        param(AUTH_FIELD_QUERY),
        header(AUTHORIZATION.as_str()),
        header(AUTH_TOKEN_HEADER),
        param(TOKEN_QUERY),
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.is_empty())
    .map(|value| strip_bearer(&value))
}

/// `Bearer ` 接頭辞を取り除く
fn strip_bearer(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.get(..BEARER_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => {
            trimmed[BEARER_PREFIX.len()..].trim().to_string()
        }
        _ => trimmed.to_string(),
    }
}
