//! Request handlers.

mod http;
mod websocket;

pub use http::{index, not_found, preflight, status};
pub use websocket::websocket_handler;
