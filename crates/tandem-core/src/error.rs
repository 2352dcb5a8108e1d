use thiserror::Error;

use crate::store::StoreError;

/// One error kind per single-chat operation, so the presentation adapter can
/// map failures consistently without inspecting storage details. The service
/// never retries; every store failure is wrapped exactly once and returned.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("inviter and invitee must be two distinct existing users")]
    InvalidPair,
    #[error("single chat invite failed")]
    InviteFailed(#[source] StoreError),
    #[error("single chat accept failed")]
    AcceptFailed(#[source] StoreError),
    #[error("single chat update failed")]
    UpdateFailed(#[source] StoreError),
    #[error("single chat detail lookup failed")]
    GetDetailFailed(#[source] StoreError),
    #[error("single chat delete failed")]
    DeleteFailed(#[source] StoreError),
    #[error("storage operation timed out")]
    StorageTimeout,
}

impl ChatError {
    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            ChatError::InvalidPair => "invalid_pair",
            ChatError::InviteFailed(_) => "invite_failed",
            ChatError::AcceptFailed(_) => "accept_failed",
            ChatError::UpdateFailed(_) => "update_failed",
            ChatError::GetDetailFailed(_) => "get_detail_failed",
            ChatError::DeleteFailed(_) => "delete_failed",
            ChatError::StorageTimeout => "storage_timeout",
        }
    }
}
