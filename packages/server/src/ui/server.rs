//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::{
        BroadcastFanout, MembershipAuthorizer, MessagePusher, MessageStore, ProjectStore,
        RoomRegistry, TokenValidator,
    },
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry},
    usecase::{
        ConnectUseCase, DisconnectUseCase, GetActiveRoomsUseCase, JoinProjectRoomUseCase,
        SendChatMessageUseCase,
    },
};

use super::{
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat gateway server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(project_store, token_validator);
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// Dependencies are wired in order:
    /// 1. RoomRegistry and MessagePusher (in-memory, per process)
    /// 2. Domain services
    /// 3. UseCases
    ///
    /// # Arguments
    ///
    /// * `project_store` - Store holding projects, members and chat history
    /// * `token_validator` - Validator for handshake credentials
    pub fn new(
        project_store: Arc<dyn ProjectStore>,
        token_validator: Arc<dyn TokenValidator>,
    ) -> Self {
        // 1. Create RoomRegistry and MessagePusher
        let registry: Arc<dyn RoomRegistry> = Arc::new(InMemoryRoomRegistry::new());
        let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());

        // 2. Create domain services
        let authorizer = Arc::new(MembershipAuthorizer::new(project_store.clone()));
        let message_store = Arc::new(MessageStore::new(project_store.clone()));
        let fanout = Arc::new(BroadcastFanout::new(
            registry.clone(),
            message_pusher.clone(),
        ));

        // 3. Create UseCases
        let state = AppState {
            connect_usecase: Arc::new(ConnectUseCase::new(
                token_validator,
                message_pusher.clone(),
            )),
            join_project_room_usecase: Arc::new(JoinProjectRoomUseCase::new(
                authorizer.clone(),
                registry.clone(),
            )),
            send_chat_message_usecase: Arc::new(SendChatMessageUseCase::new(
                authorizer,
                message_store,
                project_store.clone(),
                fanout,
            )),
            disconnect_usecase: Arc::new(DisconnectUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            get_active_rooms_usecase: Arc::new(GetActiveRoomsUseCase::new(registry)),
            message_pusher,
            project_store,
        };

        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }

    /// Run the WebSocket chat gateway
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Chat gateway listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
