//! ドメイン層
//!
//! 値オブジェクト、エンティティ、エラー型、および外部依存へのポート（trait）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod auth;
pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod repository;
pub mod service;
pub mod value_object;

pub use auth::TokenValidator;
pub use entity::{ChatMessage, EnrichedMessage, ProjectRef, RoomPresence, Session, UserSummary};
pub use error::{AuthError, MessagePushError, StoreError, ValueObjectError};
pub use pusher::{AckReply, MessagePusher, OutboundEvent, PusherChannel};
pub use registry::RoomRegistry;
pub use repository::ProjectStore;
pub use service::{
    BroadcastFanout, MembershipAuthorizer, MembershipError, MessageStore, MessageStoreError,
};
pub use value_object::{
    ConnectionId, MessageContent, MessageId, ProjectId, Timestamp, UserId, generate_object_id,
};
