//! メッセージ送信（通知）の実装
//!
//! ## 概要
//!
//! このモジュールは `MessagePusher` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `registry`: 接続レジストリ（接続の集合と生存フラグ）
//! - `websocket`: WebSocket を使った Broadcaster 実装

pub mod registry;
pub mod websocket;

pub use registry::{ConnectionRecord, ConnectionRegistry};
pub use websocket::WebSocketMessagePusher;
