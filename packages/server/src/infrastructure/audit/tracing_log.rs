//! `tracing` に構造化イベントとして監査ログを書き出す MutationObserver
//!
//! ターゲットは `audit` で、`RUST_LOG` で個別に絞り込めます。

use scorecast_shared::logger::AUDIT_TARGET;

use crate::{
    domain::{AuditEntry, MutationObserver},
    infrastructure::dto::websocket::GameStateDto,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditLog;

impl TracingAuditLog {
    pub fn new() -> Self {
        Self
    }
}

impl MutationObserver for TracingAuditLog {
    fn on_mutation(&self, entry: &AuditEntry) {
        let snapshot = GameStateDto::from(&entry.change.after);
        let game_state = serde_json::to_string(&snapshot).unwrap_or_default();
        tracing::info!(
            target: AUDIT_TARGET,
            origin = %entry.origin,
            action = entry.action.as_str(),
            details = %entry.details,
            game_state = %game_state,
            "Score board mutation"
        );
    }
}
