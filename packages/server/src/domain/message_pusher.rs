//! MessagePusher trait 定義（Broadcaster）
//!
//! 接続レジストリへの登録・削除と、イベントの送信（単一送信・全体配信・送信者除外配信）
//! を抽象化します。具体的な実装は Infrastructure 層が提供します。
//!
//! ## 暗黙の変更について
//!
//! 送信に失敗した接続はレジストリから削除されます。
//! つまり `send_to` / `broadcast_all` / `broadcast_except` / `probe_all` は
//! 副作用として接続数を減らすことがあります。これが唯一の暗黙の変更です。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    event::{PushFrame, ServerEvent},
    value_object::ConnectionId,
};

/// 接続ごとの書き込みタスクへフレームを送るチャンネル
pub type PusherChannel = mpsc::UnboundedSender<PushFrame>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録（同じ ID の再登録はチャンネルを差し替える）
    async fn register_client(&self, connection_id: ConnectionId, channel: PusherChannel);

    /// 接続を削除。削除した場合は `true`、未登録なら何もせず `false`
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    /// 接続数
    async fn client_count(&self) -> usize;

    /// 生存確認の応答を受け取ったことを記録
    async fn mark_alive(&self, connection_id: &ConnectionId);

    /// 前回のサイクルで応答しなかった接続を削除し、削除した ID を返す
    async fn sweep_dead(&self) -> Vec<ConnectionId>;

    /// 残りの接続を未応答状態に戻して Ping を送る。送信できた数を返す
    async fn probe_all(&self) -> usize;

    /// 単一の接続に送信。失敗した接続はレジストリから削除され、エラーは呼び出し元に返らない
    async fn send_to(&self, connection_id: &ConnectionId, event: &ServerEvent);

    /// 全接続に配信
    async fn broadcast_all(&self, event: &ServerEvent);

    /// `excluded` 以外の全接続に配信
    async fn broadcast_except(&self, event: &ServerEvent, excluded: Option<&ConnectionId>);

    /// 全接続にクローズフレームを送り、レジストリを空にする
    async fn close_all(&self, code: u16, reason: &str);
}
