//! JSON フィクスチャによる初期データ
//!
//! ```json
//! {
//!   "users": [{ "_id": "64b7f0c2a1d3e4f5a6b7c001", "username": "alice", "email": "alice@example.com" }],
//!   "projects": [{ "_id": "64b7f0c2a1d3e4f5a6b7c8d9", "title": "Capstone",
//!                  "owner": "64b7f0c2a1d3e4f5a6b7c001", "members": [] }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ValueObjectError;

/// フィクスチャ読み込みのエラー
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid fixture entry: {0}")]
    InvalidEntry(#[from] ValueObjectError),
}

/// ユーザーのフィクスチャ
#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// プロジェクトのフィクスチャ
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFixture {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub owner: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// ストアの初期データ
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreFixture {
    #[serde(default)]
    pub users: Vec<UserFixture>,
    #[serde(default)]
    pub projects: Vec<ProjectFixture>,
}

impl StoreFixture {
    /// JSON 文字列から読み込む
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSON ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
