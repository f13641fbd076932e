//! ドメイン層
//!
//! スコアボードのビジネスルール（値オブジェクト、エンティティ、イベント）と、
//! 外側の層が実装するインターフェース（trait）を定義します。
//! このモジュールは axum や WebSocket の具体的な実装には依存しません。

pub mod audit;
pub mod command;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use audit::{AuditEntry, MutationKind, MutationObserver};
pub use command::ClientCommand;
pub use entity::{GameState, GameStatePatch, StateChange};
pub use error::{ClientMessageError, PersistenceError, ValueObjectError};
pub use event::{PushFrame, ServerEvent};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{GameStateRepository, StatePersistence};
#[cfg(test)]
pub use repository::MockStatePersistence;
pub use value_object::{ConnectionId, TeamId, TeamName, Timestamp};
