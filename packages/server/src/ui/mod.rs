//! WebSocket score board server implementation.

mod error;
mod handler;
mod page;
mod server;
mod signal;
pub mod state;

pub use error::ServerError;
pub use server::Server;
pub use signal::shutdown_signal;
