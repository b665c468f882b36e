//! UseCase 層
//!
//! ゲートウェイのプロトコル状態遷移ごとに 1 つの UseCase を定義します。
//! UI 層はリクエストを UseCase に渡し、結果（成功または `ChatError`）を ack に変換するだけです。

pub mod connect;
pub mod disconnect;
pub mod error;
pub mod get_active_rooms;
pub mod join_project_room;
pub mod send_chat_message;

pub use connect::ConnectUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{ChatError, ConnectError};
pub use get_active_rooms::GetActiveRoomsUseCase;
pub use join_project_room::JoinProjectRoomUseCase;
pub use send_chat_message::SendChatMessageUseCase;
