//! UseCase: クライアント切断処理
//!
//! 切断・トランスポートエラーのどちらでも呼ばれます。
//! 既にレジストリから削除済み（送信失敗やハートビートで削除された）でも
//! 接続数の配信は行います。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, ServerEvent};

use super::sequencer::BroadcastSequencer;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 配信順序の直列化
    sequencer: Arc<BroadcastSequencer>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, sequencer: Arc<BroadcastSequencer>) -> Self {
        Self {
            message_pusher,
            sequencer,
        }
    }

    /// クライアント切断を実行
    ///
    /// # Returns
    ///
    /// 残りの接続数
    pub async fn execute(&self, connection_id: &ConnectionId) -> usize {
        let _sequence = self.sequencer.acquire().await;
        self.message_pusher.unregister_client(connection_id).await;

        let remaining = self.message_pusher.client_count().await;
        self.message_pusher
            .broadcast_all(&ServerEvent::ClientCount(remaining))
            .await;
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{
        connect, create_test_message_pusher, create_test_sequencer, drain,
    };

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_clients() {
        // テスト項目: 切断すると残りの接続に新しい接続数が配信される
        // given (前提条件):
        let pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(pusher.clone(), create_test_sequencer());
        let (alice, mut alice_rx) = connect(&pusher).await;
        let (_bob, mut bob_rx) = connect(&pusher).await;

        // when (操作):
        let remaining = usecase.execute(&alice).await;

        // then (期待する結果):
        assert_eq!(remaining, 1);
        assert!(drain(&mut alice_rx).is_empty());
        let events = drain(&mut bob_rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["type"], "clientCount");
        assert_eq!(events[0]["count"], 1);
    }

    #[tokio::test]
    async fn test_disconnect_of_already_removed_client() {
        // テスト項目: 既に削除済みの接続の切断でもエラーにならず接続数が配信される
        // given (前提条件):
        let pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(pusher.clone(), create_test_sequencer());
        let (alice, _alice_rx) = connect(&pusher).await;
        let (_bob, mut bob_rx) = connect(&pusher).await;
        pusher.unregister_client(&alice).await;

        // when (操作):
        let remaining = usecase.execute(&alice).await;

        // then (期待する結果):
        assert_eq!(remaining, 1);
        assert_eq!(drain(&mut bob_rx)[0]["count"], 1);
    }

    #[tokio::test]
    async fn test_last_client_disconnect() {
        // テスト項目: 最後の接続が切断すると接続数は 0 になる
        // given (前提条件):
        let pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(pusher.clone(), create_test_sequencer());
        let (alice, _alice_rx) = connect(&pusher).await;

        // when (操作):
        let remaining = usecase.execute(&alice).await;

        // then (期待する結果):
        assert_eq!(remaining, 0);
    }
}
