//! Realtime project chat gateway.
//!
//! This library authenticates WebSocket connections, admits them into
//! per-project rooms after a membership check against the project store,
//! persists chat messages and fans them out to every connection in the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
