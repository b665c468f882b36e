//! HTTP / WebSocket handlers.

mod handshake;
mod http;
mod websocket;

pub use http::{get_rooms, health_check};
pub use websocket::websocket_handler;
