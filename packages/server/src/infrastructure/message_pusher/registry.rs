//! 接続レジストリ
//!
//! ## 責務
//!
//! - 接続中のクライアント（`ConnectionRecord`）の集合を排他的に所有する
//! - 追加・削除（冪等）・件数・列挙
//! - ハートビート用の生存フラグの管理
//!
//! ## 列挙について
//!
//! `for_each` はロックを取ってメンバーのスナップショットを作り、ロックを解放してから
//! コールバックを呼びます。コールバック中（あるいは別タスク）で接続が削除されても、
//! 他のメンバーを飛ばしたり二重に訪問したりすることはありません。

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PusherChannel};

/// 1 接続分のレコード
#[derive(Debug)]
pub struct ConnectionRecord {
    /// 書き込みタスクへのチャンネル
    pub channel: PusherChannel,
    /// 前回の Ping に応答したか
    pub alive: bool,
}

/// 接続レジストリ
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    clients: Mutex<HashMap<ConnectionId, ConnectionRecord>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続を追加（新しい接続は生存扱い）
    pub async fn add(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(
            connection_id,
            ConnectionRecord {
                channel,
                alive: true,
            },
        );
    }

    /// 接続を削除。未登録なら何もしない
    pub async fn remove(&self, connection_id: &ConnectionId) -> bool {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id).is_some()
    }

    pub async fn size(&self) -> usize {
        self.clients.lock().await.len()
    }

    pub async fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.clients.lock().await.contains_key(connection_id)
    }

    /// 接続のチャンネルを取得
    pub async fn channel(&self, connection_id: &ConnectionId) -> Option<PusherChannel> {
        let clients = self.clients.lock().await;
        clients.get(connection_id).map(|r| r.channel.clone())
    }

    /// メンバーのスナップショットに対して `f` を 1 回ずつ呼ぶ
    pub async fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&ConnectionId, &PusherChannel),
    {
        for (connection_id, channel) in self.members().await {
            f(&connection_id, &channel);
        }
    }

    /// 生存フラグを立てる。未登録なら `false`
    pub async fn mark_alive(&self, connection_id: &ConnectionId) -> bool {
        let mut clients = self.clients.lock().await;
        match clients.get_mut(connection_id) {
            Some(record) => {
                record.alive = true;
                true
            }
            None => false,
        }
    }

    /// 生存フラグが立っていない接続を削除し、削除した ID を返す
    ///
    /// レコードと一緒にチャンネルも破棄されるため、書き込みタスクは終了し
    /// ソケットが閉じられます。
    pub async fn sweep_dead(&self) -> Vec<ConnectionId> {
        let mut clients = self.clients.lock().await;
        let dead: Vec<ConnectionId> = clients
            .iter()
            .filter(|(_, record)| !record.alive)
            .map(|(id, _)| *id)
            .collect();
        for connection_id in &dead {
            clients.remove(connection_id);
        }
        dead
    }

    /// 全接続の生存フラグを下ろし、Ping 送信用のスナップショットを返す
    pub async fn arm_probes(&self) -> Vec<(ConnectionId, PusherChannel)> {
        let mut clients = self.clients.lock().await;
        clients
            .iter_mut()
            .map(|(id, record)| {
                record.alive = false;
                (*id, record.channel.clone())
            })
            .collect()
    }

    /// 全接続を削除し、削除したメンバーを返す
    pub async fn clear(&self) -> Vec<(ConnectionId, PusherChannel)> {
        let mut clients = self.clients.lock().await;
        clients
            .drain()
            .map(|(id, record)| (id, record.channel))
            .collect()
    }

    async fn members(&self) -> Vec<(ConnectionId, PusherChannel)> {
        let clients = self.clients.lock().await;
        clients
            .iter()
            .map(|(id, record)| (*id, record.channel.clone()))
            .collect()
    }
}
