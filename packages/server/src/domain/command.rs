//! クライアントから届いたメッセージのドメイン表現

use super::value_object::TeamId;

/// クライアントからの操作要求
///
/// `team` が `None` の場合は対象チームが不正（1 / 2 以外、未指定、数値以外）で、
/// 変更操作は黙って無視されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    UpdateScore {
        team: Option<TeamId>,
        points: i64,
        trigger_effects: bool,
        play_sound: bool,
    },
    UpdateTeamName {
        team: Option<TeamId>,
        name: Option<String>,
    },
    Reset,
    GetState,
    Ping,
}
