//! State file DTO.
//!
//! Mirrors the wire `GameStateDto`, but every field is optional so that a
//! partial file merges over the defaults. `team1` / `team2` are accepted as
//! legacy names for the scores.
//!
//! Loading is field by field: a field with an unusable value is dropped on
//! its own and the remaining fields are still restored.

use serde::{Serialize, de::Error as _};
use serde_json::{Map, Value};

use super::number::whole_u64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedGameStateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_score: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_score: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl PersistedGameStateDto {
    /// Parse the state file content.
    ///
    /// Fails only when the content is not JSON or its root is not an object.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let Value::Object(fields) = serde_json::from_str::<Value>(content)? else {
            return Err(serde_json::Error::custom(
                "state file root must be a JSON object",
            ));
        };

        Ok(Self {
            team1_score: score(&fields, "team1Score", "team1"),
            team2_score: score(&fields, "team2Score", "team2"),
            team1_name: string(&fields, "team1Name"),
            team2_name: string(&fields, "team2Name"),
            last_updated: string(&fields, "lastUpdated"),
        })
    }
}

/// The current key wins over the legacy key when both hold a usable score
fn score(fields: &Map<String, Value>, key: &str, legacy_key: &str) -> Option<u64> {
    [key, legacy_key]
        .into_iter()
        .filter_map(|k| fields.get(k))
        .find_map(whole_u64)
}

fn string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_does_not_discard_the_others() {
        // テスト項目: 不正なフィールドだけが捨てられ、他のフィールドは読み込まれる
        // given (前提条件):
        let negative = r#"{"team1":-1,"team1Name":"Lions"}"#;
        let fractional = r#"{"team1Score":2.5,"team2Name":"Owls"}"#;
        let wrong_type = r#"{"team2Score":"3","team1Name":7,"team2Name":"Owls"}"#;

        // when (操作):
        let negative = PersistedGameStateDto::from_json(negative).unwrap();
        let fractional = PersistedGameStateDto::from_json(fractional).unwrap();
        let wrong_type = PersistedGameStateDto::from_json(wrong_type).unwrap();

        // then (期待する結果):
        assert_eq!(negative.team1_score, None);
        assert_eq!(negative.team1_name.as_deref(), Some("Lions"));
        assert_eq!(fractional.team1_score, None);
        assert_eq!(fractional.team2_name.as_deref(), Some("Owls"));
        assert_eq!(wrong_type.team2_score, None);
        assert_eq!(wrong_type.team1_name, None);
        assert_eq!(wrong_type.team2_name.as_deref(), Some("Owls"));
    }

    #[test]
    fn test_current_and_legacy_score_keys_together() {
        // テスト項目: 新旧両方のキーがある場合は新しいキーを優先し、不正なら旧キーを使う
        // given (前提条件):
        let both = r#"{"team1":3,"team1Score":5}"#;
        let current_invalid = r#"{"team2":4,"team2Score":-2}"#;

        // when (操作):
        let both = PersistedGameStateDto::from_json(both).unwrap();
        let current_invalid = PersistedGameStateDto::from_json(current_invalid).unwrap();

        // then (期待する結果):
        assert_eq!(both.team1_score, Some(5));
        assert_eq!(current_invalid.team2_score, Some(4));
    }

    #[test]
    fn test_integral_float_score_is_accepted() {
        // テスト項目: 小数部の無い数値のスコアは整数として読み込まれる
        // given (前提条件):
        let json = r#"{"team1Score":6.0}"#;

        // when (操作):
        let dto = PersistedGameStateDto::from_json(json).unwrap();

        // then (期待する結果):
        assert_eq!(dto.team1_score, Some(6));
    }

    #[test]
    fn test_non_object_root_is_an_error() {
        // テスト項目: ルートがオブジェクトでないファイルはエラーになる
        // given (前提条件):
        let texts = ["[1, 2]", "42", "{ not json"];

        // when (操作) / then (期待する結果):
        for text in texts {
            assert!(PersistedGameStateDto::from_json(text).is_err(), "{}", text);
        }
    }
}
