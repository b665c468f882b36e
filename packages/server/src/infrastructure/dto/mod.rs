//! Data Transfer Objects (DTOs) for the chat gateway.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket request / event DTOs
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
