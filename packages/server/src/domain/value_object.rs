//! 値オブジェクト
//!
//! - `TeamId`: チーム番号（1 または 2 のみ）
//! - `TeamName`: 空でないチーム名
//! - `ConnectionId`: 接続ごとに払い出される識別子
//! - `Timestamp`: Unix ミリ秒

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// チーム番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamId {
    One,
    Two,
}

impl TeamId {
    /// ワイヤ上の番号（1 / 2）
    pub fn number(self) -> u8 {
        match self {
            TeamId::One => 1,
            TeamId::Two => 2,
        }
    }

    /// 名前が未指定のときに使う生成ラベル（"Team 1" / "Team 2"）
    pub fn generated_name(self) -> TeamName {
        TeamName(format!("Team {}", self.number()))
    }
}

impl TryFrom<i64> for TeamId {
    type Error = ValueObjectError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TeamId::One),
            2 => Ok(TeamId::Two),
            other => Err(ValueObjectError::InvalidTeamNumber(other)),
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// チーム名（空文字列は不可）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamName(pub(super) String);

impl TeamName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyTeamName);
        }
        Ok(Self(value))
    }

    /// 名前が空または未指定なら `team` の生成ラベルにフォールバックする
    pub fn or_generated(team: TeamId, value: Option<String>) -> Self {
        value
            .and_then(|v| Self::new(v).ok())
            .unwrap_or_else(|| team.generated_name())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続 ID（接続受付時に UUID v4 で払い出す）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// タイムスタンプ（Unix ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
