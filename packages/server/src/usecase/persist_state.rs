//! UseCase: 状態の永続化
//!
//! - 起動時: 保存済みの状態をデフォルト値の上に重ねて復元
//! - 定期的: 現在のスナップショットを保存
//! - 終了時: `ShutdownUseCase` から保存
//!
//! 読み込み・保存の失敗はログに記録するだけで、サーバーの動作は止めません。

use std::{sync::Arc, time::Duration};

use crate::domain::{GameStateRepository, PersistenceError, StatePersistence};

/// 状態永続化のユースケース
pub struct PersistStateUseCase {
    /// StateStore
    repository: Arc<dyn GameStateRepository>,
    /// 永続化アダプタ
    persistence: Arc<dyn StatePersistence>,
}

impl PersistStateUseCase {
    /// 新しい PersistStateUseCase を作成
    pub fn new(
        repository: Arc<dyn GameStateRepository>,
        persistence: Arc<dyn StatePersistence>,
    ) -> Self {
        Self {
            repository,
            persistence,
        }
    }

    /// 保存済みの状態を復元する。復元した場合は `true`
    ///
    /// 読み込みに失敗した場合はデフォルト値のまま `false` を返す。
    pub async fn restore(&self) -> bool {
        match self.persistence.load().await {
            Ok(Some(patch)) => {
                let defaults = self.repository.snapshot().await;
                self.repository.restore(defaults.merged_with(patch)).await;
                tracing::info!("Restored game state from persisted data");
                true
            }
            Ok(None) => {
                tracing::info!("No persisted game state found, starting with defaults");
                false
            }
            Err(e) => {
                tracing::error!("Failed to load persisted game state: {}", e);
                false
            }
        }
    }

    /// 現在のスナップショットを保存する
    pub async fn save(&self) -> Result<(), PersistenceError> {
        let snapshot = self.repository.snapshot().await;
        match self.persistence.save(&snapshot).await {
            Ok(()) => {
                tracing::info!("Game state saved");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to save game state: {}", e);
                Err(e)
            }
        }
    }

    /// `period` ごとに保存し続ける（呼び出し側が abort するまで）
    pub async fn run_autosave(self: Arc<Self>, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval.tick().await;

        loop {
            interval.tick().await;
            // 失敗は save 内でログ済み
            let _ = self.save().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{GameStatePatch, MockStatePersistence, TeamId, TeamName, Timestamp},
        usecase::test_support::create_test_repository,
    };

    #[tokio::test]
    async fn test_restore_merges_persisted_data_over_defaults() {
        // テスト項目: 保存済みのフィールドだけが上書きされ、他はデフォルト値のまま
        // given (前提条件):
        let repository = create_test_repository();
        let mut persistence = MockStatePersistence::new();
        persistence.expect_load().times(1).returning(|| {
            Ok(Some(GameStatePatch {
                team1_score: Some(21),
                team2_name: Some(TeamName::new("Owls".to_string()).unwrap()),
                last_updated: Some(Timestamp::new(99)),
                ..Default::default()
            }))
        });
        let usecase = PersistStateUseCase::new(repository.clone(), Arc::new(persistence));

        // when (操作):
        let restored = usecase.restore().await;

        // then (期待する結果):
        assert!(restored);
        let state = repository.snapshot().await;
        assert_eq!(state.score(TeamId::One), 21);
        assert_eq!(state.score(TeamId::Two), 0);
        assert_eq!(state.name(TeamId::One).as_str(), "Red Team");
        assert_eq!(state.name(TeamId::Two).as_str(), "Owls");
        assert_eq!(state.last_updated(), Timestamp::new(99));
    }

    #[tokio::test]
    async fn test_restore_failure_keeps_defaults() {
        // テスト項目: 読み込みに失敗してもデフォルト値のまま起動できる
        // given (前提条件):
        let repository = create_test_repository();
        let defaults = repository.snapshot().await;
        let mut persistence = MockStatePersistence::new();
        persistence.expect_load().times(1).returning(|| {
            Err(PersistenceError::Io(std::io::Error::other("disk on fire")))
        });
        let usecase = PersistStateUseCase::new(repository.clone(), Arc::new(persistence));

        // when (操作):
        let restored = usecase.restore().await;

        // then (期待する結果):
        assert!(!restored);
        assert_eq!(repository.snapshot().await, defaults);
    }

    #[tokio::test]
    async fn test_save_writes_current_snapshot() {
        // テスト項目: save は現在のスナップショットを永続化アダプタに渡す
        // given (前提条件):
        let repository = create_test_repository();
        repository.apply_score_delta(TeamId::Two, 7).await;
        let mut persistence = MockStatePersistence::new();
        persistence
            .expect_save()
            .withf(|state| state.score(TeamId::Two) == 7)
            .times(1)
            .returning(|_| Ok(()));
        let usecase = PersistStateUseCase::new(repository, Arc::new(persistence));

        // when (操作):
        let result = usecase.save().await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        // テスト項目: 保存の失敗はエラーとして返される（呼び出し側はログのみ）
        // given (前提条件):
        let repository = create_test_repository();
        let mut persistence = MockStatePersistence::new();
        persistence
            .expect_save()
            .times(1)
            .returning(|_| Err(PersistenceError::Io(std::io::Error::other("read-only"))));
        let usecase = PersistStateUseCase::new(repository, Arc::new(persistence));

        // when (操作):
        let result = usecase.save().await;

        // then (期待する結果):
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }
}
