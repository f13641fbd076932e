//! UseCase: サーバー状態の取得（`GET /api/status` 用）

use std::sync::Arc;

use crate::domain::{GameState, GameStateRepository, MessagePusher};

/// サーバー状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub game_state: GameState,
    pub connected_clients: usize,
}

/// サーバー状態取得のユースケース
pub struct GetStatusUseCase {
    repository: Arc<dyn GameStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetStatusUseCase {
    pub fn new(
        repository: Arc<dyn GameStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self) -> ServerStatus {
        ServerStatus {
            game_state: self.repository.snapshot().await,
            connected_clients: self.message_pusher.client_count().await,
        }
    }
}
