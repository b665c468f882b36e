//! ProjectStore の実装
//!
//! - `inmemory`: プロジェクトとユーザーをプロセス内に保持する実装
//! - `fixture`: JSON ファイルからの初期データ投入

pub mod fixture;
pub mod inmemory;

pub use fixture::{FixtureError, StoreFixture};
pub use inmemory::{InMemoryProjectStore, ProjectDocument};
