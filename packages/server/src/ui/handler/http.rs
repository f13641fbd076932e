//! HTTP endpoint handlers.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json,
    extract::{
        ConnectInfo, State,
        ws::{WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
};
use scorecast_shared::time::timestamp_to_rfc3339;

use crate::{
    infrastructure::dto::{http::StatusDto, websocket::GameStateDto},
    ui::{page::FALLBACK_INDEX_HTML, state::AppState},
};

use super::websocket;

/// Serves the score board page, or upgrades the request to a WebSocket
pub async fn index(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Response {
    if let Ok(ws) = ws {
        return websocket::upgrade(ws, state, addr);
    }

    match tokio::fs::read_to_string(&state.index_file).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::debug!(
                "Index file {} not readable ({}), serving built-in page",
                state.index_file.display(),
                e
            );
            Html(FALLBACK_INDEX_HTML).into_response()
        }
    }
}

/// Current game state and connection count
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let status = state.get_status_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(StatusDto {
        status: "running".to_string(),
        game_state: GameStateDto::from(&status.game_state),
        connected_clients: status.connected_clients,
        server_start_time: timestamp_to_rfc3339(state.server_start_time.value()),
    })
}

/// Plain `OPTIONS` requests succeed with an empty body on every path
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight().await.into_response();
    }
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
