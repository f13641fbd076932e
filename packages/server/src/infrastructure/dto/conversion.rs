//! Conversion logic between DTOs and domain entities.

use scorecast_shared::time::{rfc3339_to_timestamp, timestamp_to_rfc3339};

use crate::domain::{
    ClientCommand, GameState, GameStatePatch, ServerEvent, TeamId, TeamName, Timestamp,
};
use crate::infrastructure::dto::{
    number::whole_i64, persistence::PersistedGameStateDto, websocket as dto,
};

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientMessageDto> for ClientCommand {
    fn from(message: dto::ClientMessageDto) -> Self {
        match message {
            dto::ClientMessageDto::UpdateScore {
                team,
                points,
                trigger_effects,
                play_sound,
            } => ClientCommand::UpdateScore {
                team: team_from_wire(&team),
                points: points.unwrap_or(0),
                trigger_effects: trigger_effects.unwrap_or(false),
                play_sound: play_sound.unwrap_or(false),
            },
            dto::ClientMessageDto::UpdateTeamName { team, name } => {
                ClientCommand::UpdateTeamName {
                    team: team_from_wire(&team),
                    name,
                }
            }
            dto::ClientMessageDto::Reset {} => ClientCommand::Reset,
            dto::ClientMessageDto::GetState {} => ClientCommand::GetState,
            dto::ClientMessageDto::Ping {} => ClientCommand::Ping,
        }
    }
}

/// Only the numbers 1 and 2 (`1.0` / `2.0` included) name a team.
fn team_from_wire(value: &serde_json::Value) -> Option<TeamId> {
    whole_i64(value).and_then(|n| TeamId::try_from(n).ok())
}

impl From<PersistedGameStateDto> for GameStatePatch {
    fn from(dto: PersistedGameStateDto) -> Self {
        Self {
            team1_score: dto.team1_score,
            team2_score: dto.team2_score,
            team1_name: dto.team1_name.and_then(|n| TeamName::new(n).ok()),
            team2_name: dto.team2_name.and_then(|n| TeamName::new(n).ok()),
            last_updated: dto
                .last_updated
                .as_deref()
                .and_then(rfc3339_to_timestamp)
                .map(Timestamp::new),
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&GameState> for dto::GameStateDto {
    fn from(state: &GameState) -> Self {
        Self {
            team1_score: state.score(TeamId::One),
            team2_score: state.score(TeamId::Two),
            team1_name: state.name(TeamId::One).as_str().to_string(),
            team2_name: state.name(TeamId::Two).as_str().to_string(),
            last_updated: timestamp_to_rfc3339(state.last_updated().value()),
        }
    }
}

impl From<&GameState> for PersistedGameStateDto {
    fn from(state: &GameState) -> Self {
        let wire = dto::GameStateDto::from(state);
        Self {
            team1_score: Some(wire.team1_score),
            team2_score: Some(wire.team2_score),
            team1_name: Some(wire.team1_name),
            team2_name: Some(wire.team2_name),
            last_updated: Some(wire.last_updated),
        }
    }
}

impl dto::OutboundEventDto {
    /// Build the wire event, stamping it with `sent_at`.
    pub fn from_event(event: &ServerEvent, sent_at: Timestamp) -> Self {
        let timestamp = timestamp_to_rfc3339(sent_at.value());
        match event {
            ServerEvent::Welcome {
                message,
                client_count,
            } => Self::Welcome {
                message: message.clone(),
                client_count: *client_count,
                timestamp,
            },
            ServerEvent::Init(state) => Self::Init {
                data: state.into(),
                timestamp,
            },
            ServerEvent::State(state) => Self::State {
                data: state.into(),
                timestamp,
            },
            ServerEvent::StateUpdate(state) => Self::StateUpdate {
                data: state.into(),
                timestamp,
            },
            ServerEvent::ClientCount(count) => Self::ClientCount {
                count: *count,
                timestamp,
            },
            ServerEvent::TriggerEffects {
                team,
                points,
                play_sound,
            } => Self::TriggerEffects {
                team: team.number(),
                points: *points,
                play_sound: *play_sound,
                timestamp,
            },
            ServerEvent::Pong => Self::Pong { timestamp },
            ServerEvent::Error(message) => Self::Error {
                message: message.clone(),
                timestamp,
            },
        }
    }
}
