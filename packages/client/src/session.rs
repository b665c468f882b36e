//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        self,
        client::IntoClientRequest,
        http::{HeaderValue, StatusCode, header::AUTHORIZATION},
        protocol::Message,
    },
};

use crate::{
    domain::{JOIN_REQUEST_ID, ServerEvent, classify_frame, join_request, send_request},
    error::ClientError,
    formatter::MessageFormatter,
    ui::{PROMPT, redisplay_prompt},
};

/// Run one WebSocket client session: connect, join the room, then chat until the
/// connection drops or the user exits.
pub async fn run_client_session(
    url: &str,
    token: &str,
    project_id: &str,
) -> Result<(), ClientError> {
    let mut request = url
        .into_client_request()
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    let authorization = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    request.headers_mut().insert(AUTHORIZATION, authorization);

    let (ws_stream, _) = match connect_async(request).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response))
            if response.status() == StatusCode::UNAUTHORIZED =>
        {
            return Err(ClientError::Unauthorized);
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to chat gateway!");

    let (mut write, mut read) = ws_stream.split();

    // Join (or re-join after a reconnect) the project room
    let join = join_request(project_id).map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(join.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let project_id_for_read = project_id.to_string();

    // Spawn a task to handle incoming frames
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match classify_frame(text.as_str()) {
                        ServerEvent::ChatMessage(payload) => {
                            MessageFormatter::format_chat_message(&payload)
                        }
                        // Every broadcast arrives under both names; print it once
                        ServerEvent::LegacyChatMessage => continue,
                        ServerEvent::Ack { id, payload } => match (payload.ok, id) {
                            (true, Some(JOIN_REQUEST_ID)) => {
                                MessageFormatter::format_room_joined(&project_id_for_read)
                            }
                            (true, _) => continue,
                            (false, _) => MessageFormatter::format_request_failed(
                                payload.msg.as_deref().unwrap_or("unknown error"),
                            ),
                        },
                        ServerEvent::Unknown(raw) => MessageFormatter::format_raw_message(&raw),
                    };
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to send stdin lines as chat messages
    let project_id = project_id.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;
        let mut next_request_id = JOIN_REQUEST_ID + 1;

        while let Some(line) = input_rx.recv().await {
            let frame = match send_request(next_request_id, &project_id, &line) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };
            next_request_id += 1;

            if let Err(e) = write.send(Message::Text(frame.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}
