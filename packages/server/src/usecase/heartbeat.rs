//! UseCase: ハートビート（生存確認）
//!
//! 各サイクルで以下を行います。
//!
//! 1. 前回の Ping に応答しなかった接続を削除（チャンネルの破棄でソケットも閉じる）
//! 2. 残りの接続の生存フラグを下ろして Ping を送る（Pong 受信で UI 層がフラグを立てる）
//! 3. 残りの接続に `clientCount` を配信
//!
//! 応答しない接続は、最初に Ping を受けたサイクルの次のサイクルで削除されます。
//! つまり最大でも 2 周期以内に削除されます。

use std::{sync::Arc, time::Duration};

use crate::domain::{ConnectionId, MessagePusher, ServerEvent};

use super::sequencer::BroadcastSequencer;

/// 1 サイクルの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatReport {
    pub reaped: Vec<ConnectionId>,
    pub probed: usize,
    pub remaining: usize,
}

/// ハートビートのユースケース
pub struct HeartbeatUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 配信順序の直列化
    sequencer: Arc<BroadcastSequencer>,
}

impl HeartbeatUseCase {
    /// 新しい HeartbeatUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, sequencer: Arc<BroadcastSequencer>) -> Self {
        Self {
            message_pusher,
            sequencer,
        }
    }

    /// 1 サイクル分の処理を実行
    pub async fn run_cycle(&self) -> HeartbeatReport {
        let _sequence = self.sequencer.acquire().await;
        let reaped = self.message_pusher.sweep_dead().await;
        for connection_id in &reaped {
            tracing::info!(
                "Connection '{}' missed the previous heartbeat, terminating",
                connection_id
            );
        }

        let probed = self.message_pusher.probe_all().await;

        let remaining = self.message_pusher.client_count().await;
        self.message_pusher
            .broadcast_all(&ServerEvent::ClientCount(remaining))
            .await;

        tracing::debug!(
            "Heartbeat: reaped {}, probed {}, remaining {}",
            reaped.len(),
            probed,
            remaining
        );

        HeartbeatReport {
            reaped,
            probed,
            remaining,
        }
    }

    /// Pong を受け取った接続を生存扱いにする
    pub async fn record_pong(&self, connection_id: &ConnectionId) {
        self.message_pusher.mark_alive(connection_id).await;
    }

    /// `period` ごとに `run_cycle` を実行し続ける（呼び出し側が abort するまで）
    pub async fn run(self: Arc<Self>, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // 最初の tick は即座に完了するので読み捨てる
        interval.tick().await;

        loop {
            interval.tick().await;
            self.run_cycle().await;
        }
    }
}
