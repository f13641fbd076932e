//! 配信順序の直列化
//!
//! 状態の変更とその配信、接続時の welcome → init → clientCount、
//! 接続数の配信は全てこのロックを保持したまま行います。
//! 各接続のキューに積まれるイベントの順序は、状態が確定した順序と一致します。

use tokio::sync::{Mutex, MutexGuard};

/// 状態の確定とキューへの送信を 1 本の順序に並べるロック
#[derive(Debug, Default)]
pub struct BroadcastSequencer {
    lock: Mutex<()>,
}

impl BroadcastSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// ガードを保持している間、他の変更・配信は待たされる
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
