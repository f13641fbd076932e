//! UseCase 層
//!
//! ドメイン層の trait（`GameStateRepository`, `MessagePusher`, `StatePersistence`,
//! `MutationObserver`）だけに依存してアプリケーションの処理を組み立てます。

mod connect_client;
mod disconnect_client;
mod get_status;
mod handle_message;
mod heartbeat;
mod persist_state;
mod sequencer;
mod shutdown;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use get_status::{GetStatusUseCase, ServerStatus};
pub use handle_message::{ClientContext, HandleClientMessageUseCase, HandleOutcome};
pub use heartbeat::{HeartbeatReport, HeartbeatUseCase};
pub use persist_state::PersistStateUseCase;
pub use sequencer::BroadcastSequencer;
pub use shutdown::{NORMAL_CLOSURE, SHUTDOWN_REASON, ShutdownUseCase};

#[cfg(test)]
pub(crate) mod test_support {
    //! UseCase テスト用のヘルパー

    use std::sync::{Arc, Mutex as StdMutex};

    use scorecast_shared::time::FixedClock;
    use tokio::sync::{Mutex, mpsc};

    use super::BroadcastSequencer;
    use crate::{
        domain::{
            AuditEntry, ConnectionId, GameState, MessagePusher, MutationObserver, PushFrame,
            Timestamp,
        },
        infrastructure::{
            message_pusher::{ConnectionRegistry, WebSocketMessagePusher},
            repository::InMemoryGameStateRepository,
        },
    };

    pub const NOW: i64 = 1672531200000;

    pub fn create_test_repository() -> Arc<InMemoryGameStateRepository> {
        let state = Arc::new(Mutex::new(GameState::new(Timestamp::new(0))));
        Arc::new(InMemoryGameStateRepository::new(
            state,
            Arc::new(FixedClock::new(NOW)),
        ))
    }

    pub fn create_test_sequencer() -> Arc<BroadcastSequencer> {
        Arc::new(BroadcastSequencer::new())
    }

    pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
        Arc::new(WebSocketMessagePusher::new(
            Arc::new(ConnectionRegistry::new()),
            Arc::new(FixedClock::new(NOW)),
        ))
    }

    pub async fn connect(
        pusher: &WebSocketMessagePusher,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<PushFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::generate();
        pusher.register_client(connection_id, tx).await;
        (connection_id, rx)
    }

    /// 受信済みのテキストフレームを全て JSON として取り出す
    pub fn drain(rx: &mut mpsc::UnboundedReceiver<PushFrame>) -> Vec<serde_json::Value> {
        let mut events = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            if let PushFrame::Text(json) = frame {
                events.push(serde_json::from_str(&json).unwrap());
            }
        }
        events
    }

    /// 監査ログを記録するだけの Observer
    #[derive(Default)]
    pub struct RecordingObserver {
        pub entries: StdMutex<Vec<AuditEntry>>,
    }

    impl MutationObserver for RecordingObserver {
        fn on_mutation(&self, entry: &AuditEntry) {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}
