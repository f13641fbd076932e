//! Real-time two-team score board server.
//!
//! Clients connect over WebSocket, mutate the shared score board and receive
//! every change as a broadcast.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin scorecast-server
//! cargo run --bin scorecast-server -- --host 127.0.0.1 --port 8080
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use scorecast_server::{config::ServerConfig, ui::Server};
use scorecast_shared::logger::{install_panic_hook, setup_logger};

#[derive(Parser, Debug)]
#[command(name = "scorecast-server")]
#[command(about = "Real-time two-team score board server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// JSON file the game state is loaded from and saved to
    #[arg(long, default_value = "game_state.json")]
    state_file: PathBuf,

    /// HTML page served at `/`
    #[arg(long, default_value = "index.html")]
    index_file: PathBuf,

    /// Seconds between liveness probes
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    heartbeat_interval_secs: u64,

    /// Seconds between periodic saves
    #[arg(long, default_value = "300", value_parser = clap::value_parser!(u64).range(1..))]
    autosave_interval_secs: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            state_file: args.state_file,
            index_file: args.index_file,
            heartbeat_interval: Duration::from_secs(args.heartbeat_interval_secs),
            autosave_interval: Duration::from_secs(args.autosave_interval_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");
    install_panic_hook();

    let args = Args::parse();
    let config = ServerConfig::from(args);
    tracing::debug!("Starting with {:?}", config);

    let server = Server::build(config).await;
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
