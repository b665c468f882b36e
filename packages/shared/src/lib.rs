//! Shared utilities for the campus chat server and client.

pub mod logger;
pub mod time;
