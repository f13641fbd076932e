//! Server state shared by the handlers.

use std::{path::PathBuf, sync::Arc};

use crate::{
    domain::Timestamp,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetStatusUseCase,
        HandleClientMessageUseCase, HeartbeatUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// HandleClientMessageUseCase（メッセージ処理のユースケース）
    pub handle_message_usecase: Arc<HandleClientMessageUseCase>,
    /// HeartbeatUseCase（Pong の記録に使用）
    pub heartbeat_usecase: Arc<HeartbeatUseCase>,
    /// GetStatusUseCase（`/api/status` 用）
    pub get_status_usecase: Arc<GetStatusUseCase>,
    /// HTML page served at `/`
    pub index_file: PathBuf,
    /// When the server started
    pub server_start_time: Timestamp,
}
