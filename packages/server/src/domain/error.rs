//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// チーム名が空文字列
    #[error("Team name must not be empty")]
    EmptyTeamName,

    /// チーム番号が 1 / 2 以外
    #[error("Team number must be 1 or 2 (got {0})")]
    InvalidTeamNumber(i64),
}

/// 永続化アダプタのエラー
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// ファイル I/O の失敗
    #[error("State file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON のシリアライズ / デシリアライズ失敗
    #[error("State file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// クライアントメッセージの解釈エラー（送信者にのみ `error` イベントで通知する）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientMessageError {
    /// JSON として解釈できない、またはフィールドの型が不正
    #[error("Malformed client message: {0}")]
    Malformed(String),

    /// 未知の `type`
    #[error("Unknown message type: {0}")]
    UnknownType(String),
}
