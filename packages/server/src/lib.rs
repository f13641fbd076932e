//! Real-time two-team score board server library.
//!
//! A single authoritative score board is mutated by any connected WebSocket
//! client and every change is broadcast to all connected clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
