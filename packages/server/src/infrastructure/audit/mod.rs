//! 監査ログ（MutationObserver）の実装

pub mod tracing_log;

pub use tracing_log::TracingAuditLog;
