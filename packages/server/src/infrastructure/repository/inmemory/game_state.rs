//! InMemory GameState Repository 実装（StateStore）
//!
//! ドメイン層が定義する GameStateRepository trait の具体的な実装。
//! `GameState` を `Mutex` で保護し、全ての read-modify-write をロック内で行います。

use std::sync::Arc;

use async_trait::async_trait;
use scorecast_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{GameState, GameStateRepository, StateChange, TeamId, Timestamp};

/// インメモリ GameState Repository 実装
pub struct InMemoryGameStateRepository {
    /// 権威ある状態（プロセス内で唯一）
    state: Arc<Mutex<GameState>>,
    /// lastUpdated に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemoryGameStateRepository {
    /// 新しい InMemoryGameStateRepository を作成
    pub fn new(state: Arc<Mutex<GameState>>, clock: Arc<dyn Clock>) -> Self {
        Self { state, clock }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    async fn mutate<F>(&self, f: F) -> StateChange
    where
        F: FnOnce(&mut GameState, Timestamp) + Send,
    {
        let now = self.now();
        let mut state = self.state.lock().await;
        let before = state.clone();
        f(&mut *state, now);
        StateChange {
            before,
            after: state.clone(),
        }
    }
}

#[async_trait]
impl GameStateRepository for InMemoryGameStateRepository {
    async fn apply_score_delta(&self, team: TeamId, delta: i64) -> StateChange {
        self.mutate(|state, now| {
            state.apply_score_delta(team, delta, now);
        })
        .await
    }

    async fn rename_team(&self, team: TeamId, name: Option<String>) -> StateChange {
        self.mutate(|state, now| state.rename_team(team, name, now))
            .await
    }

    async fn reset(&self) -> StateChange {
        self.mutate(|state, now| state.reset(now)).await
    }

    async fn snapshot(&self) -> GameState {
        self.state.lock().await.clone()
    }

    async fn restore(&self, restored: GameState) {
        let mut state = self.state.lock().await;
        *state = restored;
    }
}
