//! RoomRegistry の実装
//!
//! - `inmemory`: プロセス内の HashMap を使った実装（再起動で在室情報は消える）

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
