//! WebSocket message DTOs.
//!
//! Every frame is a JSON object carrying a `type` tag. Inbound frames are
//! parsed by [`parse_client_message`]; outbound events are serialized from
//! [`OutboundEventDto`].

use serde::{Deserialize, Serialize};

use crate::domain::{ClientCommand, ClientMessageError};

use super::number::deserialize_optional_whole_i64;

/// Inbound `type` tags the server understands
pub const KNOWN_MESSAGE_TYPES: [&str; 5] =
    ["updateScore", "updateTeamName", "reset", "getState", "ping"];

/// Score board state as sent on the wire (`data` field of several events)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateDto {
    pub team1_score: u64,
    pub team2_score: u64,
    pub team1_name: String,
    pub team2_name: String,
    /// RFC 3339 (UTC)
    pub last_updated: String,
}

/// Inbound client message
///
/// `team` is kept as a raw JSON value so that a non-integer team is an
/// ignored target rather than a malformed frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessageDto {
    #[serde(rename_all = "camelCase")]
    UpdateScore {
        #[serde(default)]
        team: serde_json::Value,
        #[serde(default, deserialize_with = "deserialize_optional_whole_i64")]
        points: Option<i64>,
        #[serde(default)]
        trigger_effects: Option<bool>,
        #[serde(default)]
        play_sound: Option<bool>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTeamName {
        #[serde(default)]
        team: serde_json::Value,
        #[serde(default)]
        name: Option<String>,
    },
    Reset {},
    GetState {},
    Ping {},
}

/// Outbound server event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundEventDto {
    #[serde(rename_all = "camelCase")]
    Welcome {
        message: String,
        client_count: usize,
        timestamp: String,
    },
    Init {
        data: GameStateDto,
        timestamp: String,
    },
    State {
        data: GameStateDto,
        timestamp: String,
    },
    StateUpdate {
        data: GameStateDto,
        timestamp: String,
    },
    ClientCount {
        count: usize,
        timestamp: String,
    },
    #[serde(rename_all = "camelCase")]
    TriggerEffects {
        team: u8,
        points: i64,
        play_sound: bool,
        timestamp: String,
    },
    Pong {
        timestamp: String,
    },
    Error {
        message: String,
        timestamp: String,
    },
}

/// Parse an inbound text frame into a domain command.
///
/// A frame is malformed when it is not a JSON object with a string `type`,
/// or when a known `type` carries fields of the wrong JSON type.
pub fn parse_client_message(text: &str) -> Result<ClientCommand, ClientMessageError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ClientMessageError::Malformed(e.to_string()))?;

    let type_name = value
        .as_object()
        .and_then(|object| object.get("type"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| ClientMessageError::Malformed("missing string `type` field".to_string()))?
        .to_string();

    if !KNOWN_MESSAGE_TYPES.contains(&type_name.as_str()) {
        return Err(ClientMessageError::UnknownType(type_name));
    }

    serde_json::from_value::<ClientMessageDto>(value)
        .map(ClientCommand::from)
        .map_err(|e| ClientMessageError::Malformed(e.to_string()))
}
