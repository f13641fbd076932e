//! 監査ログのフック
//!
//! 変更操作が成功するたびに `AuditEntry` が `MutationObserver` に渡されます。
//! Observer は Fire-and-forget で、戻り値を持たないため
//! プロトコル処理の制御フローに影響を与えません。

use super::entity::StateChange;

/// 変更操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    UpdateScore,
    UpdateTeamName,
    Reset,
}

impl MutationKind {
    /// ワイヤ上のメッセージ種別と同じ名前
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::UpdateScore => "updateScore",
            MutationKind::UpdateTeamName => "updateTeamName",
            MutationKind::Reset => "reset",
        }
    }
}

/// 監査ログの 1 エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// 操作元クライアントの識別子（リモートアドレス）
    pub origin: String,
    /// 操作の種類
    pub action: MutationKind,
    /// 変更前後の要約
    pub details: String,
    /// 変更前後のスナップショット
    pub change: StateChange,
}

/// 変更操作の後に呼ばれる Observer
pub trait MutationObserver: Send + Sync {
    fn on_mutation(&self, entry: &AuditEntry);
}
