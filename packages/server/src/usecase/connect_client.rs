//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続時のイベント送信順序（welcome → init → clientCount）
//!
//! ### なぜこのテストが必要か
//! - 新しい接続（再接続を含む）が必ず最新の状態を init で受け取ることを保証
//! - 既存の接続に接続数の変化が通知されることを確認

use std::sync::Arc;

use crate::domain::{ConnectionId, GameStateRepository, MessagePusher, PusherChannel, ServerEvent};

use super::sequencer::BroadcastSequencer;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// StateStore
    repository: Arc<dyn GameStateRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 配信順序の直列化
    sequencer: Arc<BroadcastSequencer>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn GameStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<BroadcastSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// クライアント接続を実行
    ///
    /// 1. レジストリに登録
    /// 2. 本人に `welcome`（現在の接続数）と `init`（全状態）を送信
    /// 3. 新しい接続を含む全員に `clientCount` を配信
    ///
    /// # Returns
    ///
    /// 登録後の接続数
    pub async fn execute(&self, connection_id: ConnectionId, channel: PusherChannel) -> usize {
        // 登録から clientCount の配信までの間に他の配信を割り込ませない
        let _sequence = self.sequencer.acquire().await;

        self.message_pusher
            .register_client(connection_id, channel)
            .await;

        let client_count = self.message_pusher.client_count().await;
        self.message_pusher
            .send_to(&connection_id, &ServerEvent::welcome(client_count))
            .await;

        let snapshot = self.repository.snapshot().await;
        self.message_pusher
            .send_to(&connection_id, &ServerEvent::Init(snapshot))
            .await;

        let client_count = self.message_pusher.client_count().await;
        self.message_pusher
            .broadcast_all(&ServerEvent::ClientCount(client_count))
            .await;

        client_count
    }
}
