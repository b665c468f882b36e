//! WebSocket connection handlers.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{AckReply, OutboundEvent, Session, UserId},
    infrastructure::dto::websocket::{
        AckPayload, CHAT_MESSAGE_EVENTS, ChatMessagePayload, ClientRequest, EVENT_ACK,
        RequestEnvelope, ServerFrame,
    },
    ui::state::AppState,
};

use super::handshake::select_credential;

/// Authenticates the handshake and upgrades the connection.
///
/// A connection without any credential proceeds anonymously. A malformed or
/// expired credential is rejected with 401 before the upgrade.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let credential = select_credential(&query, &headers);

    let identity = match state.connect_usecase.authenticate(credential.as_deref()) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Rejected WebSocket handshake: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
}

/// Encodes an outbound event into the text frames sent to the client.
///
/// A chat message is emitted under both the primary and the legacy event name
/// with an identical payload.
fn encode_event(event: OutboundEvent) -> Result<Vec<String>, serde_json::Error> {
    match event {
        OutboundEvent::ChatMessage(message) => {
            let payload: ChatMessagePayload = message.into();
            CHAT_MESSAGE_EVENTS
                .iter()
                .map(|event| {
                    serde_json::to_string(&ServerFrame {
                        event: event.to_string(),
                        id: None,
                        data: &payload,
                    })
                })
                .collect()
        }
        OutboundEvent::Ack { request_id, reply } => {
            let payload: AckPayload = reply.into();
            let frame = serde_json::to_string(&ServerFrame {
                event: EVENT_ACK.to_string(),
                id: request_id,
                data: payload,
            })?;
            Ok(vec![frame])
        }
    }
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for broadcasts and acks addressed to this connection
/// * `sender` - WebSocket sink to send frames to this client
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundEvent>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let frames = match encode_event(event) {
                Ok(frames) => frames,
                Err(e) => {
                    tracing::error!("Failed to encode outbound event: {}", e);
                    continue;
                }
            };
            for frame in frames {
                if sender.send(Message::Text(frame.into())).await.is_err() {
                    return;
                }
            }
        }
    })
}

/// Handles one text frame and returns the ack to send back.
///
/// Frames that are not a valid envelope or name an unknown event produce no ack.
async fn dispatch_request(state: &AppState, session: &Session, text: &str) -> Option<OutboundEvent> {
    let envelope = match serde_json::from_str::<RequestEnvelope>(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(
                "Ignoring malformed frame from '{}': {}",
                session.connection_id,
                e
            );
            return None;
        }
    };

    let Some(request) = ClientRequest::from_envelope(&envelope) else {
        tracing::warn!(
            "Ignoring unknown event '{}' from '{}'",
            envelope.event,
            session.connection_id
        );
        return None;
    };

    let result = match request {
        ClientRequest::JoinProject { project_id } => state
            .join_project_room_usecase
            .execute(session, &project_id)
            .await
            .map(|_| None),
        ClientRequest::SendMessage {
            project_id,
            content,
        } => state
            .send_chat_message_usecase
            .execute(session, &project_id, &content)
            .await
            .map(Some),
    };

    let reply = match result {
        Ok(message) => AckReply::Success(message),
        Err(e) => {
            tracing::warn!(
                "Request '{}' from '{}' failed: {}",
                envelope.event,
                session.connection_id,
                e
            );
            AckReply::Failure(e.to_string())
        }
    };

    Some(OutboundEvent::Ack {
        request_id: envelope.id,
        reply,
    })
}

/// Waits until one of the connection tasks completes, then aborts the other.
///
/// The aborted task is awaited before returning, so no in-flight join can
/// register the connection after the caller runs the disconnect cleanup.
async fn run_until_either_finishes(
    mut recv_task: tokio::task::JoinHandle<()>,
    mut send_task: tokio::task::JoinHandle<()>,
) {
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Option<UserId>) {
    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    let session = state.connect_usecase.open_session(identity, tx).await;
    tracing::info!(
        "Connection '{}' opened (user: {})",
        session.connection_id,
        session
            .identity
            .as_ref()
            .map(UserId::as_str)
            .unwrap_or("anonymous")
    );

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();
    let session_clone = session.clone();

    // Requests from this connection are processed one at a time in arrival order
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let Some(ack) = dispatch_request(&state_clone, &session_clone, text.as_str()).await
                    else {
                        continue;
                    };
                    if let Err(e) = state_clone
                        .message_pusher
                        .push_to(&session_clone.connection_id, ack)
                        .await
                    {
                        tracing::warn!("Failed to send ack: {}", e);
                        break;
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        session_clone.connection_id
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push broadcasts and acks to this connection
    let send_task = pusher_loop(rx, sender);

    run_until_either_finishes(recv_task, send_task).await;

    let left = state
        .disconnect_usecase
        .execute(&session.connection_id)
        .await;
    tracing::info!(
        "Connection '{}' closed, left {} room(s)",
        session.connection_id,
        left.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChatMessage, EnrichedMessage, MessageContent, MessageId, ProjectId, Timestamp,
        UserSummary,
    };
    use serde_json::{Value, json};
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };

    /// Sets the flag when the owning task is dropped
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    fn create_test_message() -> EnrichedMessage {
        let alice = UserId::try_from("alice").unwrap();
        EnrichedMessage {
            message: ChatMessage {
                id: MessageId::new("65a0c0ffee0000000000abcd".to_string()),
                project_id: ProjectId::try_from("64b7f0c2a1d3e4f5a6b7c8d9").unwrap(),
                sender: alice.clone(),
                content: MessageContent::try_from("hello").unwrap(),
                created_at: Timestamp::new(0),
            },
            sender: UserSummary::id_only(alice),
        }
    }

    fn parse(frames: Vec<String>) -> Vec<Value> {
        frames
            .iter()
            .map(|frame| serde_json::from_str(frame).unwrap())
            .collect()
    }

    #[test]
    fn test_chat_message_is_encoded_under_both_names() {
        // テスト項目: チャットメッセージは主イベント名と互換イベント名の 2 フレームになり、ペイロードは同一
        // given (前提条件):
        let event = OutboundEvent::ChatMessage(create_test_message());

        // when (操作):
        let frames = parse(encode_event(event).unwrap());

        // then (期待する結果):
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["event"], "chat:new");
        assert_eq!(frames[1]["event"], "receive_message");
        assert_eq!(frames[0]["data"], frames[1]["data"]);
        assert_eq!(frames[0]["data"]["content"], "hello");
        assert_eq!(frames[0]["data"]["createdAt"], "1970-01-01T00:00:00.000Z");
        assert!(frames[0].get("id").is_none());
    }

    #[test]
    fn test_ack_echoes_request_id() {
        // テスト項目: ack はリクエスト ID をそのまま返し、ID のないリクエストには id を含めない
        // given (前提条件):
        let with_id = OutboundEvent::Ack {
            request_id: Some(7),
            reply: AckReply::Failure("Project not found".to_string()),
        };
        let without_id = OutboundEvent::Ack {
            request_id: None,
            reply: AckReply::Success(None),
        };

        // when (操作):
        let with_id = parse(encode_event(with_id).unwrap());
        let without_id = parse(encode_event(without_id).unwrap());

        // then (期待する結果):
        assert_eq!(
            with_id,
            vec![json!({"event": "ack", "id": 7, "data": {"ok": false, "msg": "Project not found"}})]
        );
        assert_eq!(
            without_id,
            vec![json!({"event": "ack", "data": {"ok": true}})]
        );
    }

    #[test]
    fn test_successful_send_ack_carries_payload() {
        // テスト項目: 送信成功の ack はブロードキャストと同じペイロードを data に持つ
        let message = create_test_message();
        let broadcast = parse(encode_event(OutboundEvent::ChatMessage(message.clone())).unwrap());

        let ack = parse(
            encode_event(OutboundEvent::Ack {
                request_id: Some(1),
                reply: AckReply::Success(Some(message)),
            })
            .unwrap(),
        );

        assert_eq!(ack[0]["data"]["ok"], true);
        assert_eq!(ack[0]["data"]["data"], broadcast[0]["data"]);
    }

    #[tokio::test]
    async fn test_aborted_task_has_stopped_before_cleanup() {
        // テスト項目: 片方のタスクが終了したら、もう片方は停止が完了してから戻る
        // given (前提条件):
        let stopped = Arc::new(AtomicBool::new(false));
        let guard = DropFlag(stopped.clone());
        let recv_task = tokio::spawn(async move {
            let _guard = guard;
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        let send_task = tokio::spawn(async {});

        // when (操作):
        run_until_either_finishes(recv_task, send_task).await;

        // then (期待する結果):
        assert!(stopped.load(Ordering::SeqCst));
    }
}
