//! Server wiring and execution logic.

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use scorecast_shared::time::{Clock, SystemClock};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    domain::{GameState, Timestamp},
    infrastructure::{
        audit::TracingAuditLog,
        message_pusher::{ConnectionRegistry, WebSocketMessagePusher},
        persistence::JsonFileStatePersistence,
        repository::InMemoryGameStateRepository,
    },
    usecase::{
        BroadcastSequencer, ConnectClientUseCase, DisconnectClientUseCase, GetStatusUseCase,
        HandleClientMessageUseCase, HeartbeatUseCase, PersistStateUseCase, ShutdownUseCase,
    },
};

use super::{
    error::ServerError,
    handler::{index, not_found, preflight, status, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket score board server
///
/// # Example
///
/// ```ignore
/// let server = Server::build(ServerConfig::default()).await;
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    app_state: Arc<AppState>,
    /// HeartbeatUseCase（生存確認の定期実行）
    heartbeat_usecase: Arc<HeartbeatUseCase>,
    /// PersistStateUseCase（定期保存）
    persist_state_usecase: Arc<PersistStateUseCase>,
    /// ShutdownUseCase（終了時の保存とクローズ）
    shutdown_usecase: Arc<ShutdownUseCase>,
}

impl Server {
    /// Wire every layer together and restore the persisted game state
    pub async fn build(config: ServerConfig) -> Self {
        // Initialize dependencies in order:
        // 1. Clock
        // 2. Repository (restored from the state file)
        // 3. MessagePusher
        // 4. UseCases
        // 5. AppState

        // 1. Create Clock
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let server_start_time = Timestamp::new(clock.now_millis());

        // 2. Create Repository (in-memory game state)
        let game_state = Arc::new(Mutex::new(GameState::new(server_start_time)));
        let repository = Arc::new(InMemoryGameStateRepository::new(
            game_state,
            clock.clone(),
        ));
        let persistence = Arc::new(JsonFileStatePersistence::new(config.state_file.clone()));
        let persist_state_usecase =
            Arc::new(PersistStateUseCase::new(repository.clone(), persistence));
        persist_state_usecase.restore().await;

        // 3. Create MessagePusher (WebSocket implementation)
        let registry = Arc::new(ConnectionRegistry::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new(registry, clock));

        // 4. Create UseCases (every use case that pushes events shares one sequencer)
        let sequencer = Arc::new(BroadcastSequencer::new());
        let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            sequencer.clone(),
        ));
        let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
            message_pusher.clone(),
            sequencer.clone(),
        ));
        let handle_message_usecase = Arc::new(HandleClientMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            Arc::new(TracingAuditLog::new()),
            sequencer.clone(),
        ));
        let heartbeat_usecase = Arc::new(HeartbeatUseCase::new(
            message_pusher.clone(),
            sequencer,
        ));
        let get_status_usecase = Arc::new(GetStatusUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        let shutdown_usecase = Arc::new(ShutdownUseCase::new(
            persist_state_usecase.clone(),
            message_pusher,
        ));

        // 5. Create AppState
        let app_state = Arc::new(AppState {
            connect_client_usecase,
            disconnect_client_usecase,
            handle_message_usecase,
            heartbeat_usecase: heartbeat_usecase.clone(),
            get_status_usecase,
            index_file: config.index_file.clone(),
            server_start_time,
        });

        Self {
            config,
            app_state,
            heartbeat_usecase,
            persist_state_usecase,
            shutdown_usecase,
        }
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), ServerError> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// On shutdown the game state is saved and every connection is closed
    /// with code 1000 before the listener stops.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        let app = router(self.app_state);

        let heartbeat_task = tokio::spawn(
            self.heartbeat_usecase
                .clone()
                .run(self.config.heartbeat_interval),
        );
        let autosave_task = tokio::spawn(
            self.persist_state_usecase
                .clone()
                .run_autosave(self.config.autosave_interval),
        );

        tracing::info!("Score board server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let shutdown_usecase = self.shutdown_usecase;
        let result = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown.await;
            shutdown_usecase.execute().await;
        })
        .await;

        heartbeat_task.abort();
        autosave_task.abort();
        result?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Score board page (WebSocket upgrades are accepted here too)
        .route("/", get(index).options(preflight))
        .route("/index.html", get(index).options(preflight))
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler).options(preflight))
        // HTTP エンドポイント
        .route("/api/status", get(status).options(preflight))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
