//! WebSocket を使った MessagePusher 実装（Broadcaster）
//!
//! ## 責務
//!
//! - `ServerEvent` を JSON にシリアライズして接続ごとのチャンネルへ送る
//! - 送信に失敗した接続をレジストリから削除する
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! チャンネルへの送信はブロックしないため、遅いクライアントが配信全体を止めることはありません。
//! 書き込みタスクが終了するとチャンネルが閉じ、次の送信が失敗してレコードが削除されます。

use std::sync::Arc;

use async_trait::async_trait;
use scorecast_shared::time::Clock;

use crate::{
    domain::{ConnectionId, MessagePusher, PushFrame, PusherChannel, ServerEvent, Timestamp},
    infrastructure::dto::websocket::OutboundEventDto,
};

use super::registry::ConnectionRegistry;

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let registry = Arc::new(ConnectionRegistry::new());
/// let pusher = WebSocketMessagePusher::new(registry.clone(), Arc::new(SystemClock));
///
/// pusher.broadcast_all(&ServerEvent::ClientCount(2)).await;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続レジストリ
    registry: Arc<ConnectionRegistry>,
    /// 送信イベントの timestamp に使う時計
    clock: Arc<dyn Clock>,
}

impl WebSocketMessagePusher {
    pub fn new(registry: Arc<ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    fn encode(&self, event: &ServerEvent) -> Option<String> {
        let dto = OutboundEventDto::from_event(event, Timestamp::new(self.clock.now_millis()));
        match serde_json::to_string(&dto) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to serialize outbound event: {}", e);
                None
            }
        }
    }

    /// スナップショットに対して送信し、失敗した接続を削除する
    async fn fan_out(&self, json: String, excluded: Option<&ConnectionId>) -> usize {
        let mut delivered = 0;
        let mut failed = Vec::new();
        self.registry
            .for_each(|connection_id, channel| {
                if Some(connection_id) == excluded {
                    return;
                }
                if push(channel, PushFrame::Text(json.clone())) {
                    delivered += 1;
                } else {
                    failed.push(*connection_id);
                }
            })
            .await;

        self.drop_failed(failed).await;
        delivered
    }

    async fn drop_failed(&self, failed: Vec<ConnectionId>) {
        for connection_id in failed {
            tracing::warn!(
                "Failed to push to connection '{}', removing it from the registry",
                connection_id
            );
            self.registry.remove(&connection_id).await;
        }
    }
}

fn push(channel: &PusherChannel, frame: PushFrame) -> bool {
    channel.send(frame).is_ok()
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, channel: PusherChannel) {
        self.registry.add(connection_id, channel).await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let removed = self.registry.remove(connection_id).await;
        if removed {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
        removed
    }

    async fn client_count(&self) -> usize {
        self.registry.size().await
    }

    async fn mark_alive(&self, connection_id: &ConnectionId) {
        if !self.registry.mark_alive(connection_id).await {
            tracing::debug!(
                "Pong from connection '{}' that is no longer registered",
                connection_id
            );
        }
    }

    async fn sweep_dead(&self) -> Vec<ConnectionId> {
        self.registry.sweep_dead().await
    }

    async fn probe_all(&self) -> usize {
        let mut probed = 0;
        let mut failed = Vec::new();
        for (connection_id, channel) in self.registry.arm_probes().await {
            if push(&channel, PushFrame::Ping) {
                probed += 1;
            } else {
                failed.push(connection_id);
            }
        }
        self.drop_failed(failed).await;
        probed
    }

    async fn send_to(&self, connection_id: &ConnectionId, event: &ServerEvent) {
        let Some(json) = self.encode(event) else {
            return;
        };
        let Some(channel) = self.registry.channel(connection_id).await else {
            tracing::debug!(
                "Connection '{}' not found, dropping outbound event",
                connection_id
            );
            return;
        };
        if push(&channel, PushFrame::Text(json)) {
            tracing::debug!("Pushed event to connection '{}'", connection_id);
        } else {
            self.drop_failed(vec![*connection_id]).await;
        }
    }

    async fn broadcast_all(&self, event: &ServerEvent) {
        if let Some(json) = self.encode(event) {
            let delivered = self.fan_out(json, None).await;
            tracing::debug!("Broadcasted event to {} connection(s)", delivered);
        }
    }

    async fn broadcast_except(&self, event: &ServerEvent, excluded: Option<&ConnectionId>) {
        if let Some(json) = self.encode(event) {
            let delivered = self.fan_out(json, excluded).await;
            tracing::debug!(
                "Broadcasted event to {} connection(s) excluding {:?}",
                delivered,
                excluded.map(|id| id.to_string())
            );
        }
    }

    async fn close_all(&self, code: u16, reason: &str) {
        let members = self.registry.clear().await;
        let count = members.len();
        for (_, channel) in members {
            // 書き込みタスクが既に終了していても問題ない
            let _ = channel.send(PushFrame::Close {
                code,
                reason: reason.to_string(),
            });
        }
        tracing::info!("Closed {} connection(s) with code {}", count, code);
    }
}
