//! エンティティ: スコアボードの状態
//!
//! `GameState` はプロセス内に 1 つだけ存在する権威ある状態です。
//! 変更操作は `crate` 内に閉じており、外部からは StateStore
//! （`GameStateRepository`）経由でしか更新できません。

use super::value_object::{TeamId, TeamName, Timestamp};

/// 起動時のチーム 1 の名前
pub const DEFAULT_TEAM1_NAME: &str = "Red Team";
/// 起動時のチーム 2 の名前
pub const DEFAULT_TEAM2_NAME: &str = "Blue Team";

/// スコアボードの状態
///
/// 不変条件: スコアは常に 0 以上（`u64` + 飽和加算で保証）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    team1_score: u64,
    team2_score: u64,
    team1_name: TeamName,
    team2_name: TeamName,
    last_updated: Timestamp,
}

impl GameState {
    /// デフォルト状態（スコア 0、既定のチーム名）を作成
    pub fn new(now: Timestamp) -> Self {
        Self {
            team1_score: 0,
            team2_score: 0,
            team1_name: TeamName(DEFAULT_TEAM1_NAME.to_string()),
            team2_name: TeamName(DEFAULT_TEAM2_NAME.to_string()),
            last_updated: now,
        }
    }

    pub fn score(&self, team: TeamId) -> u64 {
        match team {
            TeamId::One => self.team1_score,
            TeamId::Two => self.team2_score,
        }
    }

    pub fn name(&self, team: TeamId) -> &TeamName {
        match team {
            TeamId::One => &self.team1_name,
            TeamId::Two => &self.team2_name,
        }
    }

    pub fn last_updated(&self) -> Timestamp {
        self.last_updated
    }

    /// スコアに `delta` を加算する（0 未満は 0 に丸める）。新しいスコアを返す。
    pub(crate) fn apply_score_delta(&mut self, team: TeamId, delta: i64, now: Timestamp) -> u64 {
        let score = self.score_mut(team);
        *score = score.saturating_add_signed(delta);
        let new_score = *score;
        self.last_updated = now;
        new_score
    }

    /// チーム名を変更する。空・未指定なら生成ラベルを使う。
    pub(crate) fn rename_team(&mut self, team: TeamId, name: Option<String>, now: Timestamp) {
        let name = TeamName::or_generated(team, name);
        match team {
            TeamId::One => self.team1_name = name,
            TeamId::Two => self.team2_name = name,
        }
        self.last_updated = now;
    }

    /// 両チームのスコアを 0 に戻す（名前は保持）
    pub(crate) fn reset(&mut self, now: Timestamp) {
        self.team1_score = 0;
        self.team2_score = 0;
        self.last_updated = now;
    }

    /// 永続化データをデフォルト値の上に重ねる（未指定のフィールドは現在値のまま）
    pub fn merged_with(mut self, patch: GameStatePatch) -> Self {
        if let Some(score) = patch.team1_score {
            self.team1_score = score;
        }
        if let Some(score) = patch.team2_score {
            self.team2_score = score;
        }
        if let Some(name) = patch.team1_name {
            self.team1_name = name;
        }
        if let Some(name) = patch.team2_name {
            self.team2_name = name;
        }
        if let Some(ts) = patch.last_updated {
            self.last_updated = ts;
        }
        self
    }

    fn score_mut(&mut self, team: TeamId) -> &mut u64 {
        match team {
            TeamId::One => &mut self.team1_score,
            TeamId::Two => &mut self.team2_score,
        }
    }
}

/// 永続化ファイルから読み込んだ部分的な状態
///
/// ファイルに存在しない（または不正な）フィールドは `None` のままになります。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStatePatch {
    pub team1_score: Option<u64>,
    pub team2_score: Option<u64>,
    pub team1_name: Option<TeamName>,
    pub team2_name: Option<TeamName>,
    pub last_updated: Option<Timestamp>,
}

/// 1 回の変更操作の前後のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    pub before: GameState,
    pub after: GameState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ms: i64) -> Timestamp {
        Timestamp::new(ms)
    }

    #[test]
    fn test_new_state_has_defaults() {
        // テスト項目: 初期状態はスコア 0 と既定のチーム名
        // given (前提条件):
        let now = t(1000);

        // when (操作):
        let state = GameState::new(now);

        // then (期待する結果):
        assert_eq!(state.score(TeamId::One), 0);
        assert_eq!(state.score(TeamId::Two), 0);
        assert_eq!(state.name(TeamId::One).as_str(), DEFAULT_TEAM1_NAME);
        assert_eq!(state.name(TeamId::Two).as_str(), DEFAULT_TEAM2_NAME);
        assert_eq!(state.last_updated(), now);
    }

    #[test]
    fn test_score_never_goes_negative() {
        // テスト項目: どのような加算列でもスコアは 0 未満にならない
        // given (前提条件):
        let mut state = GameState::new(t(0));
        let deltas = [5_i64, -3, -10, 7, i64::MIN, 2, -1, -1, -1];

        // when (操作) / then (期待する結果):
        let mut expected: i128 = 0;
        for (i, delta) in deltas.iter().enumerate() {
            let new_score = state.apply_score_delta(TeamId::One, *delta, t(i as i64));
            expected = (expected + *delta as i128).max(0);
            assert_eq!(new_score as i128, expected);
        }
        assert_eq!(state.score(TeamId::Two), 0);
    }

    #[test]
    fn test_score_delta_updates_last_updated() {
        // テスト項目: スコア更新で lastUpdated が更新される
        // given (前提条件):
        let mut state = GameState::new(t(1000));

        // when (操作):
        state.apply_score_delta(TeamId::Two, 3, t(2000));

        // then (期待する結果):
        assert_eq!(state.score(TeamId::Two), 3);
        assert_eq!(state.last_updated(), t(2000));
    }

    #[test]
    fn test_rename_with_empty_name_uses_generated_label() {
        // テスト項目: 空の名前での変更は "Team N" になる
        // given (前提条件):
        let mut state = GameState::new(t(0));

        // when (操作):
        state.rename_team(TeamId::Two, Some(String::new()), t(1));

        // then (期待する結果):
        assert_eq!(state.name(TeamId::Two).as_str(), "Team 2");
        assert_eq!(state.name(TeamId::One).as_str(), DEFAULT_TEAM1_NAME);
        assert_eq!(state.last_updated(), t(1));
    }

    #[test]
    fn test_reset_is_idempotent_and_keeps_names() {
        // テスト項目: reset を 2 回適用しても 1 回と同じ結果になり、名前は保持される
        // given (前提条件):
        let mut state = GameState::new(t(0));
        state.apply_score_delta(TeamId::One, 4, t(1));
        state.apply_score_delta(TeamId::Two, 9, t(2));
        state.rename_team(TeamId::One, Some("Lions".to_string()), t(3));

        // when (操作):
        state.reset(t(4));
        let once = state.clone();
        state.reset(t(4));

        // then (期待する結果):
        assert_eq!(state, once);
        assert_eq!(state.score(TeamId::One), 0);
        assert_eq!(state.score(TeamId::Two), 0);
        assert_eq!(state.name(TeamId::One).as_str(), "Lions");
    }

    #[test]
    fn test_merged_with_keeps_defaults_for_missing_fields() {
        // テスト項目: 永続化データに無いフィールドはデフォルト値のまま
        // given (前提条件):
        let defaults = GameState::new(t(100));
        let patch = GameStatePatch {
            team1_score: Some(12),
            team2_name: Some(TeamName::new("Owls".to_string()).unwrap()),
            ..Default::default()
        };

        // when (操作):
        let merged = defaults.merged_with(patch);

        // then (期待する結果):
        assert_eq!(merged.score(TeamId::One), 12);
        assert_eq!(merged.score(TeamId::Two), 0);
        assert_eq!(merged.name(TeamId::One).as_str(), DEFAULT_TEAM1_NAME);
        assert_eq!(merged.name(TeamId::Two).as_str(), "Owls");
        assert_eq!(merged.last_updated(), t(100));
    }
}
