use serde::{Deserialize, Serialize};

use crate::models::{InviteeView, InviterView};

// -- Single chat --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InviteRequest {
    pub inviter_id: i64,
    pub invitee_id: i64,
    /// Nickname the inviter assigns to the invitee.
    pub invitee_nickname: String,
    pub inviter_disturb: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcceptRequest {
    pub pairing_id: i64,
    pub invitee_id: i64,
    /// Nickname the invitee assigns to the inviter.
    pub inviter_nickname: String,
    pub invitee_disturb: i64,
}

/// Sets the nickname the caller displays for the other participant. The
/// caller echoes its current disturb setting; the store is the source of
/// truth for the value returned.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateNicknameRequest {
    pub pairing_id: i64,
    pub is_inviter: bool,
    pub user_id: i64,
    pub nickname: String,
    pub disturb: i64,
}

/// Sets the caller's own disturb mode, echoing the current nickname.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDisturbRequest {
    pub pairing_id: i64,
    pub is_inviter: bool,
    pub user_id: i64,
    pub disturb: i64,
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub pairing_id: i64,
    pub is_inviter: bool,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteRequest {
    pub pairing_id: i64,
    pub inviter_id: i64,
    pub invitee_id: i64,
}

/// Either participant's view of the pairing, depending on which side the
/// caller is on.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatView {
    Inviter(InviterView),
    Invitee(InviteeView),
}

/// Machine-readable error body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}
