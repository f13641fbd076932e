//! UseCase: シャットダウン処理
//!
//! 状態を保存（失敗してもログのみ）してから、全接続を正常終了コードで閉じます。
//! 新規接続の受付停止は UI 層の graceful shutdown が担当します。

use std::sync::Arc;

use crate::domain::MessagePusher;

use super::persist_state::PersistStateUseCase;

/// WebSocket の正常終了コード
pub const NORMAL_CLOSURE: u16 = 1000;

/// シャットダウン時のクローズ理由
pub const SHUTDOWN_REASON: &str = "Server shutting down";

/// シャットダウンのユースケース
pub struct ShutdownUseCase {
    persist_state_usecase: Arc<PersistStateUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ShutdownUseCase {
    /// 新しい ShutdownUseCase を作成
    pub fn new(
        persist_state_usecase: Arc<PersistStateUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            persist_state_usecase,
            message_pusher,
        }
    }

    /// シャットダウンを実行
    pub async fn execute(&self) {
        tracing::info!("Shutting down, persisting game state");
        if self.persist_state_usecase.save().await.is_err() {
            tracing::warn!("Continuing shutdown without a persisted state");
        }

        self.message_pusher
            .close_all(NORMAL_CLOSURE, SHUTDOWN_REASON)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockStatePersistence, PersistenceError, PushFrame},
        usecase::test_support::{connect, create_test_message_pusher, create_test_repository},
    };

    #[tokio::test]
    async fn test_shutdown_saves_then_closes_connections() {
        // テスト項目: シャットダウンで状態が保存され、全接続にクローズフレームが送られる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut persistence = MockStatePersistence::new();
        persistence.expect_save().times(1).returning(|_| Ok(()));
        let persist = Arc::new(PersistStateUseCase::new(repository, Arc::new(persistence)));
        let usecase = ShutdownUseCase::new(persist, pusher.clone());
        let (_alice, mut alice_rx) = connect(&pusher).await;

        // when (操作):
        usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            alice_rx.recv().await,
            Some(PushFrame::Close {
                code: NORMAL_CLOSURE,
                reason: SHUTDOWN_REASON.to_string(),
            })
        );
        assert_eq!(pusher.client_count().await, 0);
    }

    #[tokio::test]
    async fn test_shutdown_completes_when_save_fails() {
        // テスト項目: 保存に失敗してもシャットダウン処理は最後まで行われる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut persistence = MockStatePersistence::new();
        persistence
            .expect_save()
            .times(1)
            .returning(|_| Err(PersistenceError::Io(std::io::Error::other("read-only"))));
        let persist = Arc::new(PersistStateUseCase::new(repository, Arc::new(persistence)));
        let usecase = ShutdownUseCase::new(persist, pusher.clone());
        let (_alice, _alice_rx) = connect(&pusher).await;

        // when (操作):
        usecase.execute().await;

        // then (期待する結果):
        assert_eq!(pusher.client_count().await, 0);
    }
}
