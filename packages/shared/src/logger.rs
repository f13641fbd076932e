//! Logging setup utilities for the Scorecast server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Target used for the structured audit trail of score board mutations.
pub const AUDIT_TARGET: &str = "audit";

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default filter enables the server library, this shared crate, the
/// binary and the audit target at `default_log_level`. The filter can be
/// overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "scorecast-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use scorecast_shared::logger::setup_logger;
///
/// setup_logger("scorecast-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Route panics through `tracing` so they land in the same log stream.
///
/// A panic inside a spawned task only terminates that task; the hook makes
/// sure it is still recorded.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        tracing::error!(%location, "Unhandled panic: {}", payload);
    }));
}

fn default_directives(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "scorecast_server={level},{shared}={level},{bin}={level},{audit}=info,tower_http=info",
        level = default_log_level,
        shared = env!("CARGO_PKG_NAME").replace('-', "_"),
        bin = binary_name.replace('-', "_"),
        audit = AUDIT_TARGET,
    )
}
