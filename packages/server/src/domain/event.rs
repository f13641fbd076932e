//! サーバーからクライアントへ送るイベント
//!
//! `ServerEvent` はドメイン上のイベントで、ワイヤ形式（JSON）への変換は
//! Infrastructure 層の DTO が担当します。

use super::{entity::GameState, value_object::TeamId};

/// 接続時の歓迎メッセージ
pub const WELCOME_MESSAGE: &str = "Connected to the real-time score board";

/// 不正なフレームを受け取ったときのエラーメッセージ
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid message format";

/// サーバーが発行するイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// 接続直後の歓迎メッセージ（現在の接続数付き）
    Welcome { message: String, client_count: usize },
    /// 接続直後の全状態
    Init(GameState),
    /// `getState` への応答
    State(GameState),
    /// 変更後の全状態（全員へ配信）
    StateUpdate(GameState),
    /// 接続数の変化
    ClientCount(usize),
    /// 演出トリガー（送信者以外へ配信）
    TriggerEffects {
        team: TeamId,
        points: i64,
        play_sound: bool,
    },
    /// アプリケーションレベルの `ping` への応答
    Pong,
    /// 送信者のみへのエラー通知
    Error(String),
}

impl ServerEvent {
    pub fn welcome(client_count: usize) -> Self {
        ServerEvent::Welcome {
            message: WELCOME_MESSAGE.to_string(),
            client_count,
        }
    }

    pub fn unknown_type(type_name: &str) -> Self {
        ServerEvent::Error(format!("Unknown message type: {}", type_name))
    }

    pub fn invalid_format() -> Self {
        ServerEvent::Error(INVALID_FORMAT_MESSAGE.to_string())
    }
}

/// 接続ごとの書き込みタスクへ渡すフレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushFrame {
    /// シリアライズ済みの JSON テキストフレーム
    Text(String),
    /// トランスポートレベルの生存確認（WebSocket Ping）
    Ping,
    /// クローズフレームを送って書き込みを終了する
    Close { code: u16, reason: String },
}
