//! Explicit per-request validation: each request type enumerates its own
//! field checks directly, so the rules are visible at the type and checked
//! by the compiler rather than discovered at runtime.

use tandem_types::api::{
    AcceptRequest, DeleteRequest, DetailQuery, InviteRequest, UpdateDisturbRequest,
    UpdateNicknameRequest,
};
use tandem_types::models::{DISTURB_MUTED, DISTURB_NOTIFY};

pub const MAX_NICKNAME_LEN: usize = 64;

pub trait Validate {
    fn validate(&self) -> Result<(), &'static str>;
}

fn check_user_id(id: i64) -> Result<(), &'static str> {
    if id > 0 { Ok(()) } else { Err("user id must be positive") }
}

fn check_pairing_id(id: i64) -> Result<(), &'static str> {
    if id >= 0 { Ok(()) } else { Err("pairing id must be non-negative") }
}

fn check_nickname(nickname: &str) -> Result<(), &'static str> {
    if nickname.is_empty() {
        return Err("nickname must not be empty");
    }
    if nickname.chars().count() > MAX_NICKNAME_LEN {
        return Err("nickname is too long");
    }
    Ok(())
}

fn check_disturb(disturb: i64) -> Result<(), &'static str> {
    match disturb {
        DISTURB_NOTIFY | DISTURB_MUTED => Ok(()),
        _ => Err("disturb must be 0 or 1"),
    }
}

impl Validate for InviteRequest {
    fn validate(&self) -> Result<(), &'static str> {
        check_user_id(self.inviter_id)?;
        check_user_id(self.invitee_id)?;
        if self.inviter_id == self.invitee_id {
            return Err("inviter and invitee must differ");
        }
        check_nickname(&self.invitee_nickname)?;
        check_disturb(self.inviter_disturb)
    }
}

impl Validate for AcceptRequest {
    fn validate(&self) -> Result<(), &'static str> {
        check_pairing_id(self.pairing_id)?;
        check_user_id(self.invitee_id)?;
        check_nickname(&self.inviter_nickname)?;
        check_disturb(self.invitee_disturb)
    }
}

impl Validate for UpdateNicknameRequest {
    fn validate(&self) -> Result<(), &'static str> {
        check_pairing_id(self.pairing_id)?;
        check_user_id(self.user_id)?;
        check_nickname(&self.nickname)?;
        check_disturb(self.disturb)
    }
}

impl Validate for UpdateDisturbRequest {
    fn validate(&self) -> Result<(), &'static str> {
        check_pairing_id(self.pairing_id)?;
        check_user_id(self.user_id)?;
        check_nickname(&self.nickname)?;
        check_disturb(self.disturb)
    }
}

impl Validate for DetailQuery {
    fn validate(&self) -> Result<(), &'static str> {
        check_pairing_id(self.pairing_id)?;
        check_user_id(self.user_id)
    }
}

impl Validate for DeleteRequest {
    fn validate(&self) -> Result<(), &'static str> {
        check_pairing_id(self.pairing_id)?;
        check_user_id(self.inviter_id)?;
        check_user_id(self.invitee_id)?;
        if self.inviter_id == self.invitee_id {
            return Err("inviter and invitee must differ");
        }
        Ok(())
    }
}
