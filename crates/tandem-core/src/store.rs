use tandem_types::models::{InviteeView, InviterView, NewSingleChat};
use thiserror::Error;

/// Failure modes a store implementation must distinguish. `NotFound` and
/// `Conflict` are expected outcomes the state machine reasons about;
/// `Backend` covers everything the storage engine itself got wrong.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no matching chat row")]
    NotFound,
    #[error("a chat row already exists for this pairing")]
    Conflict,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence contract for single-chat rows, keyed by pairing id plus a
/// participant role.
///
/// Every mutation is atomic: it either takes effect fully or returns an
/// error with no observable partial write. A mutation that matches no row
/// reports `NotFound`; inserting over a live row reports `Conflict`. All
/// coordination for "one live row per pair" lives here, behind the pairing
/// id's uniqueness, because multiple service instances may run at once and
/// only the store has a consistent view.
pub trait SingleChatStore: Send + Sync {
    /// Create a new row in the unaccepted state. Fails with `Conflict` if a
    /// row for this pairing id already exists, deleted or not.
    fn insert_unaccepted(&self, chat: &NewSingleChat) -> Result<(), StoreError>;

    /// The inviter's projection of a non-deleted row. The counterpart's
    /// username is resolved from the user directory at read time.
    fn find_by_inviter(&self, pairing_id: i64, inviter_id: i64) -> Result<InviterView, StoreError>;

    fn find_by_invitee(&self, pairing_id: i64, invitee_id: i64) -> Result<InviteeView, StoreError>;

    /// Mutate only the columns writable from the inviter's viewpoint.
    fn update_by_inviter(
        &self,
        pairing_id: i64,
        inviter_id: i64,
        invitee_nickname: &str,
        inviter_disturb: i64,
    ) -> Result<(), StoreError>;

    fn update_by_invitee(
        &self,
        pairing_id: i64,
        invitee_id: i64,
        inviter_nickname: &str,
        invitee_disturb: i64,
    ) -> Result<(), StoreError>;

    /// Transition unaccepted → active, recording the invitee's side of the
    /// row. Fails with `NotFound` if the row is absent, already active, or
    /// deleted, or if `invitee_id` does not match.
    fn confirm_accept(
        &self,
        pairing_id: i64,
        invitee_id: i64,
        inviter_nickname: &str,
        invitee_disturb: i64,
    ) -> Result<(), StoreError>;

    /// Transition to deleted. Requires an exact match on both participant
    /// ids so an id mix-up cannot remove the wrong pairing.
    fn soft_delete(&self, pairing_id: i64, inviter_id: i64, invitee_id: i64)
    -> Result<(), StoreError>;
}
