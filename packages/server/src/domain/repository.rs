//! Repository trait 定義
//!
//! - `GameStateRepository`: 権威ある状態を保持する StateStore
//! - `StatePersistence`: 状態の読み込み・保存を行う永続化アダプタ
//!
//! UseCase 層はこれらの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use async_trait::async_trait;

use super::{
    entity::{GameState, GameStatePatch, StateChange},
    error::PersistenceError,
    value_object::TeamId,
};

/// StateStore
///
/// 全ての変更は実装側でロックを取った状態で read-modify-write されます。
/// 戻り値のスナップショットは所有権付きのコピーで、内部の状態とは共有されません。
#[async_trait]
pub trait GameStateRepository: Send + Sync {
    /// スコアに `delta` を加算（0 で下限クリップ）。新しいスコアは `after.score(team)`
    async fn apply_score_delta(&self, team: TeamId, delta: i64) -> StateChange;

    /// チーム名を変更（空・未指定なら "Team N"）
    async fn rename_team(&self, team: TeamId, name: Option<String>) -> StateChange;

    /// 両チームのスコアを 0 に戻す
    async fn reset(&self) -> StateChange;

    /// 現在の状態のスナップショット
    async fn snapshot(&self) -> GameState;

    /// 起動時に読み込んだ状態で置き換える
    async fn restore(&self, state: GameState);
}

/// 永続化アダプタ
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatePersistence: Send + Sync {
    /// 保存済みの状態を読み込む。保存データが無ければ `Ok(None)`
    async fn load(&self) -> Result<Option<GameStatePatch>, PersistenceError>;

    /// 状態を保存する
    async fn save(&self, state: &GameState) -> Result<(), PersistenceError>;
}
