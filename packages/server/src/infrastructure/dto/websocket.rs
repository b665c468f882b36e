//! WebSocket message DTOs.
//!
//! Every frame is a JSON text frame shaped as an event envelope:
//!
//! ```text
//! client -> server  {"event": "joinProject", "id": 1, "data": "<projectId>"}
//! client -> server  {"event": "chat:send", "id": 2, "data": {"projectId": "...", "content": "..."}}
//! server -> client  {"event": "ack", "id": 2, "data": {"ok": true, "data": {...}}}
//! server -> client  {"event": "chat:new", "data": {...}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request: join a project room
pub const EVENT_JOIN_PROJECT: &str = "joinProject";
/// Request: send a chat message
pub const EVENT_CHAT_SEND: &str = "chat:send";
/// Request: send a chat message (legacy name)
pub const EVENT_SEND_MESSAGE_LEGACY: &str = "send_message";
/// Broadcast: new chat message
pub const EVENT_CHAT_NEW: &str = "chat:new";
/// Broadcast: new chat message (legacy name)
pub const EVENT_RECEIVE_MESSAGE_LEGACY: &str = "receive_message";
/// Acknowledgment of a request
pub const EVENT_ACK: &str = "ack";

/// Names under which every chat message broadcast is emitted, in order.
pub const CHAT_MESSAGE_EVENTS: [&str; 2] = [EVENT_CHAT_NEW, EVENT_RECEIVE_MESSAGE_LEGACY];

/// Client request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub event: String,
    /// Correlation id echoed back in the ack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub data: Value,
}

/// `joinProject` payload in object form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinProjectData {
    #[serde(rename = "projectId", default)]
    pub project_id: String,
}

/// `chat:send` / `send_message` payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageData {
    #[serde(rename = "projectId", default)]
    pub project_id: String,
    #[serde(default)]
    pub content: String,
}

/// Parsed client request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    JoinProject { project_id: String },
    SendMessage { project_id: String, content: String },
}

impl ClientRequest {
    /// Interpret an envelope; `None` for unknown events.
    ///
    /// Missing or mistyped fields become empty strings so that validation
    /// reports them as the same failures a blank value would produce.
    pub fn from_envelope(envelope: &RequestEnvelope) -> Option<Self> {
        match envelope.event.as_str() {
            EVENT_JOIN_PROJECT => {
                let project_id = match &envelope.data {
                    Value::String(project_id) => project_id.clone(),
                    other => serde_json::from_value::<JoinProjectData>(other.clone())
                        .unwrap_or_default()
                        .project_id,
                };
                Some(Self::JoinProject { project_id })
            }
            EVENT_CHAT_SEND | EVENT_SEND_MESSAGE_LEGACY => {
                let data = serde_json::from_value::<SendMessageData>(envelope.data.clone())
                    .unwrap_or_default();
                Some(Self::SendMessage {
                    project_id: data.project_id,
                    content: data.content,
                })
            }
            _ => None,
        }
    }
}

/// Display-safe sender summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Chat message broadcast payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    pub sender: SenderDto,
    #[serde(rename = "projectId")]
    pub project_id: String,
    /// RFC 3339 (UTC)
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Acknowledgment payload: `{ok: true}` or `{ok: false, msg}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckPayload {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChatMessagePayload>,
}

/// Server -> client frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerFrame<T> {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub data: T,
}
