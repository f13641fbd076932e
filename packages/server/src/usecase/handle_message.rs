//! UseCase: クライアントメッセージ処理（プロトコルハンドラ）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HandleClientMessageUseCase::execute() メソッド
//! - メッセージ種別ごとの状態変更・配信対象・エラー応答
//!
//! ### なぜこのテストが必要か
//! - 変更後の stateUpdate が全員に 1 回ずつ届くこと（配信の完全性）
//! - triggerEffects が送信者に届かないこと（送信者除外）
//! - 不正なメッセージが送信者にだけエラーとして返ること
//!
//! ### どのような状況を想定しているか
//! - 正常系：updateScore / updateTeamName / reset / getState / ping
//! - 異常系：未知の type、JSON として不正なペイロード
//! - エッジケース：チーム番号が不正（黙って無視）、負の大きな加算（0 にクリップ）

use std::sync::Arc;

use crate::domain::{
    AuditEntry, ClientCommand, ClientMessageError, ConnectionId, GameStateRepository,
    MessagePusher, MutationKind, MutationObserver, ServerEvent, StateChange, TeamId,
};

use super::sequencer::BroadcastSequencer;

/// メッセージの送信元
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub connection_id: ConnectionId,
    /// 監査ログ用の識別子（リモートアドレス）
    pub origin: String,
}

/// 1 メッセージの処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// 状態を変更して配信した
    Mutated(MutationKind),
    /// 送信者にだけ応答した（state / pong）
    Replied,
    /// 対象チームが不正なため無視した
    Ignored,
    /// 送信者にエラーを返した
    Rejected,
}

/// クライアントメッセージ処理のユースケース
pub struct HandleClientMessageUseCase {
    /// StateStore
    repository: Arc<dyn GameStateRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 変更後に呼ばれる監査ログのフック
    observer: Arc<dyn MutationObserver>,
    /// 配信順序の直列化（変更の確定と配信を同じ順序にする）
    sequencer: Arc<BroadcastSequencer>,
}

impl HandleClientMessageUseCase {
    /// 新しい HandleClientMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn GameStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        observer: Arc<dyn MutationObserver>,
        sequencer: Arc<BroadcastSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            observer,
            sequencer,
        }
    }

    /// 解釈済みのメッセージを処理する
    ///
    /// 変更とその配信は `BroadcastSequencer` を保持したまま行うため、
    /// 全接続が受け取る最後の `stateUpdate` は常に確定済みの最新状態になる。
    ///
    /// # Arguments
    ///
    /// * `context` - 送信元の接続
    /// * `message` - DTO 層で解釈したメッセージ、または解釈エラー
    pub async fn execute(
        &self,
        context: &ClientContext,
        message: Result<ClientCommand, ClientMessageError>,
    ) -> HandleOutcome {
        let _sequence = self.sequencer.acquire().await;

        let command = match message {
            Ok(command) => command,
            Err(error) => return self.reject(context, error).await,
        };

        match command {
            ClientCommand::UpdateScore {
                team,
                points,
                trigger_effects,
                play_sound,
            } => {
                let Some(team) = team else {
                    return self.ignore(context, MutationKind::UpdateScore);
                };
                self.update_score(context, team, points, trigger_effects, play_sound)
                    .await
            }
            ClientCommand::UpdateTeamName { team, name } => {
                let Some(team) = team else {
                    return self.ignore(context, MutationKind::UpdateTeamName);
                };
                self.update_team_name(context, team, name).await
            }
            ClientCommand::Reset => self.reset(context).await,
            ClientCommand::GetState => {
                let snapshot = self.repository.snapshot().await;
                self.message_pusher
                    .send_to(&context.connection_id, &ServerEvent::State(snapshot))
                    .await;
                HandleOutcome::Replied
            }
            ClientCommand::Ping => {
                self.message_pusher
                    .send_to(&context.connection_id, &ServerEvent::Pong)
                    .await;
                HandleOutcome::Replied
            }
        }
    }

    async fn update_score(
        &self,
        context: &ClientContext,
        team: TeamId,
        points: i64,
        trigger_effects: bool,
        play_sound: bool,
    ) -> HandleOutcome {
        let change = self.repository.apply_score_delta(team, points).await;
        let before = change.before.score(team);
        let after = change.after.score(team);
        tracing::info!(
            "{} team {} score updated: {} -> {}",
            context.origin,
            team,
            before,
            after
        );

        self.broadcast_state(&change).await;

        if trigger_effects {
            self.message_pusher
                .broadcast_except(
                    &ServerEvent::TriggerEffects {
                        team,
                        points,
                        play_sound,
                    },
                    Some(&context.connection_id),
                )
                .await;
        }

        self.record(
            context,
            MutationKind::UpdateScore,
            format!("team {} score {} -> {} ({:+})", team, before, after, points),
            change,
        )
    }

    async fn update_team_name(
        &self,
        context: &ClientContext,
        team: TeamId,
        name: Option<String>,
    ) -> HandleOutcome {
        let change = self.repository.rename_team(team, name).await;
        let details = format!(
            "team {} name \"{}\" -> \"{}\"",
            team,
            change.before.name(team),
            change.after.name(team)
        );
        tracing::info!("{} {}", context.origin, details);

        self.broadcast_state(&change).await;
        self.record(context, MutationKind::UpdateTeamName, details, change)
    }

    async fn reset(&self, context: &ClientContext) -> HandleOutcome {
        let change = self.repository.reset().await;
        let details = format!(
            "scores reset (team 1: {} -> 0, team 2: {} -> 0)",
            change.before.score(TeamId::One),
            change.before.score(TeamId::Two)
        );
        tracing::info!("{} {}", context.origin, details);

        self.broadcast_state(&change).await;
        self.record(context, MutationKind::Reset, details, change)
    }

    async fn broadcast_state(&self, change: &StateChange) {
        self.message_pusher
            .broadcast_all(&ServerEvent::StateUpdate(change.after.clone()))
            .await;
    }

    fn record(
        &self,
        context: &ClientContext,
        action: MutationKind,
        details: String,
        change: StateChange,
    ) -> HandleOutcome {
        self.observer.on_mutation(&AuditEntry {
            origin: context.origin.clone(),
            action,
            details,
            change,
        });
        HandleOutcome::Mutated(action)
    }

    fn ignore(&self, context: &ClientContext, action: MutationKind) -> HandleOutcome {
        tracing::debug!(
            "{} sent {} with an invalid team, ignoring",
            context.origin,
            action.as_str()
        );
        HandleOutcome::Ignored
    }

    async fn reject(&self, context: &ClientContext, error: ClientMessageError) -> HandleOutcome {
        let event = match &error {
            ClientMessageError::UnknownType(type_name) => {
                tracing::info!("Unknown message type from {}: {}", context.origin, type_name);
                ServerEvent::unknown_type(type_name)
            }
            ClientMessageError::Malformed(reason) => {
                tracing::warn!("Failed to parse message from {}: {}", context.origin, reason);
                ServerEvent::invalid_format()
            }
        };
        self.message_pusher
            .send_to(&context.connection_id, &event)
            .await;
        HandleOutcome::Rejected
    }
}
