//! JSON ファイルを使った StatePersistence 実装
//!
//! 保存は同じディレクトリの一時ファイルに書き込んでから rename するため、
//! 保存中にプロセスが落ちても既存のファイルが壊れることはありません。

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{
    domain::{GameState, GameStatePatch, PersistenceError, StatePersistence},
    infrastructure::dto::persistence::PersistedGameStateDto,
};

/// JSON ファイルを使った StatePersistence 実装
pub struct JsonFileStatePersistence {
    path: PathBuf,
}

impl JsonFileStatePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl StatePersistence for JsonFileStatePersistence {
    async fn load(&self) -> Result<Option<GameStatePatch>, PersistenceError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("State file {} does not exist yet", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let dto = PersistedGameStateDto::from_json(&content)?;
        Ok(Some(dto.into()))
    }

    async fn save(&self, state: &GameState) -> Result<(), PersistenceError> {
        let dto = PersistedGameStateDto::from(state);
        let json = serde_json::to_string_pretty(&dto)?;

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        tracing::debug!("Saved game state to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TeamId, Timestamp};

    fn temp_state_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "scorecast-{}-{}-{}.json",
            name,
            std::process::id(),
            uuid::Uuid::new_v4()
        ))
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_none() {
        // テスト項目: ファイルが存在しない場合は Ok(None) になる
        // given (前提条件):
        let persistence = JsonFileStatePersistence::new(temp_state_file("missing"));

        // when (操作):
        let result = persistence.load().await;

        // then (期待する結果):
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_save_then_load_restores_state() {
        // テスト項目: 保存した状態を読み込むとデフォルト値の上に復元できる
        // given (前提条件):
        let path = temp_state_file("save-load");
        let persistence = JsonFileStatePersistence::new(&path);
        let mut state = GameState::new(Timestamp::new(1672531200000));
        state.apply_score_delta(TeamId::One, 8, Timestamp::new(1672531201000));
        state.rename_team(TeamId::Two, Some("Owls".to_string()), Timestamp::new(1672531202000));

        // when (操作):
        persistence.save(&state).await.unwrap();
        let patch = persistence.load().await.unwrap().unwrap();
        let restored = GameState::new(Timestamp::new(0)).merged_with(patch);

        // then (期待する結果):
        assert_eq!(restored, state);
        assert!(!persistence.temp_path().exists());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_load_keeps_valid_fields_next_to_invalid_ones() {
        // テスト項目: 不正なスコアがあっても、チーム名などの有効なフィールドは復元される
        // given (前提条件):
        let path = temp_state_file("partial");
        std::fs::write(&path, r#"{"team1":-1,"team2Score":2.5,"team1Name":"Lions"}"#).unwrap();
        let persistence = JsonFileStatePersistence::new(&path);

        // when (操作):
        let patch = persistence.load().await.unwrap().unwrap();

        // then (期待する結果):
        assert_eq!(patch.team1_score, None);
        assert_eq!(patch.team2_score, None);
        assert_eq!(
            patch.team1_name.map(|name| name.into_string()),
            Some("Lions".to_string())
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_load_invalid_json_is_an_error() {
        // テスト項目: JSON として壊れたファイルはエラーになる
        // given (前提条件):
        let path = temp_state_file("invalid");
        std::fs::write(&path, "{ not json").unwrap();
        let persistence = JsonFileStatePersistence::new(&path);

        // when (操作):
        let result = persistence.load().await;

        // then (期待する結果):
        assert!(matches!(result, Err(PersistenceError::Json(_))));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_is_an_error() {
        // テスト項目: 書き込み先ディレクトリが無い場合は I/O エラーになる
        // given (前提条件):
        let path = std::env::temp_dir()
            .join(format!("scorecast-no-such-dir-{}", uuid::Uuid::new_v4()))
            .join("game_state.json");
        let persistence = JsonFileStatePersistence::new(path);
        let state = GameState::new(Timestamp::new(0));

        // when (操作):
        let result = persistence.save(&state).await;

        // then (期待する結果):
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }
}
