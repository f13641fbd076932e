//! Data Transfer Objects (DTOs) for the score board server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs
//! - `http`: HTTP API response DTOs
//! - `persistence`: on-disk state file layout

pub mod conversion;
pub mod http;
pub mod number;
pub mod persistence;
pub mod websocket;
