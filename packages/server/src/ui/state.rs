//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, ProjectStore},
    usecase::{
        ConnectUseCase, DisconnectUseCase, GetActiveRoomsUseCase, JoinProjectRoomUseCase,
        SendChatMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectUseCase（ハンドシェイクとセッション開始のユースケース）
    pub connect_usecase: Arc<ConnectUseCase>,
    /// JoinProjectRoomUseCase（ルーム入室のユースケース）
    pub join_project_room_usecase: Arc<JoinProjectRoomUseCase>,
    /// SendChatMessageUseCase（メッセージ送信のユースケース）
    pub send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    /// DisconnectUseCase（切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// GetActiveRoomsUseCase（在室中ルーム一覧のユースケース）
    pub get_active_rooms_usecase: Arc<GetActiveRoomsUseCase>,
    /// MessagePusher（要求元への ack の送信に使う）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// ProjectStore（ヘルスチェックに使う）
    pub project_store: Arc<dyn ProjectStore>,
}
