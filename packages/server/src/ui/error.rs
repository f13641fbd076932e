//! Server startup and runtime errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an I/O error
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
