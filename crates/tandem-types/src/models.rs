use serde::Serialize;

/// Lifecycle flag for a single-chat row. Stored as an INTEGER column; the
/// three values are distinct so an unaccepted invite can never be confused
/// with a soft-deleted chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// Row exists but the invitee has not confirmed the pairing yet.
    Unaccepted,
    /// Both sides confirmed; the chat is live.
    Active,
    /// Soft-removed. Terminal: the row keeps its pairing id forever.
    Deleted,
}

impl ChatState {
    pub fn as_i64(self) -> i64 {
        match self {
            ChatState::Unaccepted => 0,
            ChatState::Active => 1,
            ChatState::Deleted => 2,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            0 => Some(ChatState::Unaccepted),
            1 => Some(ChatState::Active),
            2 => Some(ChatState::Deleted),
            _ => None,
        }
    }
}

/// Disturb mode: notifications enabled.
pub const DISTURB_NOTIFY: i64 = 0;
/// Disturb mode: notifications muted.
pub const DISTURB_MUTED: i64 = 1;

/// Payload for creating a new unaccepted pairing. The inviter-side columns
/// are the only ones known at invite time; the invitee fills in the rest on
/// accept.
#[derive(Debug, Clone)]
pub struct NewSingleChat {
    pub pairing_id: i64,
    pub inviter_id: i64,
    pub invitee_id: i64,
    pub invitee_nickname: String,
    pub inviter_disturb: i64,
}

/// The pairing as the inviter sees it: the invitee's identity and the
/// nickname the inviter assigned to them, plus the inviter's own disturb
/// setting. The invitee's disturb setting is private and never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviterView {
    pub pairing_id: i64,
    pub inviter_id: i64,
    pub invitee_id: i64,
    /// Name the inviter assigned to the invitee, not a name the invitee chose.
    pub invitee_nickname: String,
    /// The invitee's system-of-record username, joined in at read time.
    pub invitee_name: String,
    pub inviter_disturb: i64,
}

/// Mirror of [`InviterView`] for the other participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteeView {
    pub pairing_id: i64,
    pub invitee_id: i64,
    pub inviter_id: i64,
    pub inviter_nickname: String,
    pub inviter_name: String,
    pub invitee_disturb: i64,
}
