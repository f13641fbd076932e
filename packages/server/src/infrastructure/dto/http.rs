//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::GameStateDto;

/// Response body of `GET /api/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub status: String,
    pub game_state: GameStateDto,
    pub connected_clients: usize,
    /// RFC 3339 (UTC)
    pub server_start_time: String,
}
