//! Server configuration.

use std::{path::PathBuf, time::Duration};

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;
/// Default heartbeat period
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
/// Default autosave period
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Runtime configuration of the score board server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to (all interfaces by default)
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// JSON file the game state is loaded from and saved to
    pub state_file: PathBuf,
    /// HTML page served at `/`; an embedded page is used when it cannot be read
    pub index_file: PathBuf,
    /// Liveness probe period
    pub heartbeat_interval: Duration,
    /// Periodic persistence period
    pub autosave_interval: Duration,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            state_file: PathBuf::from("game_state.json"),
            index_file: PathBuf::from("index.html"),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
        }
    }
}
