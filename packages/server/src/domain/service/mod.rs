//! ドメインサービス
//!
//! 外部ストアやレジストリの trait を組み合わせて、複数の UseCase から共有されるルールを実装します。

pub mod fanout;
pub mod membership;
pub mod message_store;

pub use fanout::BroadcastFanout;
pub use membership::{MembershipAuthorizer, MembershipError};
pub use message_store::{MessageStore, MessageStoreError};
