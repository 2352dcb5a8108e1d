use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use tandem_types::models::{InviteeView, InviterView, NewSingleChat};

use crate::error::ChatError;
use crate::pairing::derive_pairing_id;
use crate::store::{SingleChatStore, StoreError};

/// Default bound on one logical store operation (mutation plus follow-up
/// read together).
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Orchestrates the single-chat state machine over a [`SingleChatStore`].
///
/// Stateless apart from the store handle; safe to share across request
/// tasks. Store work is blocking I/O, so each logical operation runs on the
/// blocking pool under a single deadline. On timeout the whole operation is
/// reported failed and no partial result is surfaced.
pub struct SingleChatService<S> {
    store: Arc<S>,
    op_timeout: Duration,
}

enum OpError {
    Timeout,
    Store(StoreError),
}

impl OpError {
    fn wrap(self, kind: fn(StoreError) -> ChatError) -> ChatError {
        match self {
            OpError::Timeout => ChatError::StorageTimeout,
            OpError::Store(e) => kind(e),
        }
    }
}

impl<S: SingleChatStore + 'static> SingleChatService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_timeout(store, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_timeout(store: Arc<S>, op_timeout: Duration) -> Self {
        Self { store, op_timeout }
    }

    /// Run one logical store operation on the blocking pool, bounded by the
    /// service timeout. The closure may chain several store calls; they all
    /// share the one deadline.
    async fn run<T, F>(&self, op: F) -> Result<T, OpError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    {
        match tokio::time::timeout(self.op_timeout, tokio::task::spawn_blocking(op)).await {
            Err(_) => {
                error!(timeout_ms = self.op_timeout.as_millis() as u64, "store operation timed out");
                Err(OpError::Timeout)
            }
            Ok(Err(join)) => Err(OpError::Store(StoreError::Backend(anyhow::anyhow!(
                "store task failed to complete: {join}"
            )))),
            Ok(Ok(result)) => result.map_err(OpError::Store),
        }
    }

    /// Create an unaccepted pairing and return the inviter's resulting view.
    ///
    /// The pairing id is derived from the unordered id pair, so a second
    /// invite between the same two users collides with the existing row and
    /// fails cleanly instead of duplicating it. The insert and the follow-up
    /// read share one deadline but are separate statements; a concurrent
    /// delete between them surfaces as the invite failing.
    pub async fn invite(
        &self,
        inviter_id: i64,
        invitee_id: i64,
        invitee_nickname: String,
        inviter_disturb: i64,
    ) -> Result<InviterView, ChatError> {
        if inviter_id <= 0 || invitee_id <= 0 || inviter_id == invitee_id {
            return Err(ChatError::InvalidPair);
        }

        let pairing_id = derive_pairing_id(inviter_id, invitee_id);
        debug!(pairing_id, inviter_id, invitee_id, "inviting single chat");

        let store = Arc::clone(&self.store);
        self.run(move || {
            let chat = NewSingleChat {
                pairing_id,
                inviter_id,
                invitee_id,
                invitee_nickname,
                inviter_disturb,
            };
            store.insert_unaccepted(&chat)?;
            store.find_by_inviter(pairing_id, inviter_id)
        })
        .await
        .map_err(|e| e.wrap(ChatError::InviteFailed))
    }

    /// Confirm a pending invite and return the invitee's resulting view.
    pub async fn accept(
        &self,
        pairing_id: i64,
        invitee_id: i64,
        inviter_nickname: String,
        invitee_disturb: i64,
    ) -> Result<InviteeView, ChatError> {
        let store = Arc::clone(&self.store);
        self.run(move || {
            store.confirm_accept(pairing_id, invitee_id, &inviter_nickname, invitee_disturb)?;
            store.find_by_invitee(pairing_id, invitee_id)
        })
        .await
        .map_err(|e| e.wrap(ChatError::AcceptFailed))
    }

    /// Write the inviter-side columns, then re-read the inviter's view so
    /// the caller gets the store's post-update state, never echoed input.
    pub async fn update_by_inviter(
        &self,
        pairing_id: i64,
        inviter_id: i64,
        invitee_nickname: String,
        inviter_disturb: i64,
    ) -> Result<InviterView, ChatError> {
        let store = Arc::clone(&self.store);
        self.run(move || {
            store.update_by_inviter(pairing_id, inviter_id, &invitee_nickname, inviter_disturb)?;
            store.find_by_inviter(pairing_id, inviter_id)
        })
        .await
        .map_err(|e| e.wrap(ChatError::UpdateFailed))
    }

    pub async fn update_by_invitee(
        &self,
        pairing_id: i64,
        invitee_id: i64,
        inviter_nickname: String,
        invitee_disturb: i64,
    ) -> Result<InviteeView, ChatError> {
        let store = Arc::clone(&self.store);
        self.run(move || {
            store.update_by_invitee(pairing_id, invitee_id, &inviter_nickname, invitee_disturb)?;
            store.find_by_invitee(pairing_id, invitee_id)
        })
        .await
        .map_err(|e| e.wrap(ChatError::UpdateFailed))
    }

    pub async fn detail_for_inviter(
        &self,
        pairing_id: i64,
        inviter_id: i64,
    ) -> Result<InviterView, ChatError> {
        let store = Arc::clone(&self.store);
        self.run(move || store.find_by_inviter(pairing_id, inviter_id))
            .await
            .map_err(|e| e.wrap(ChatError::GetDetailFailed))
    }

    pub async fn detail_for_invitee(
        &self,
        pairing_id: i64,
        invitee_id: i64,
    ) -> Result<InviteeView, ChatError> {
        let store = Arc::clone(&self.store);
        self.run(move || store.find_by_invitee(pairing_id, invitee_id))
            .await
            .map_err(|e| e.wrap(ChatError::GetDetailFailed))
    }

    /// Soft-delete the pairing. Both participant ids must match the row
    /// exactly. Terminal: the pairing id is never reused, so a later invite
    /// between the same two users fails with a conflict.
    pub async fn delete(
        &self,
        pairing_id: i64,
        inviter_id: i64,
        invitee_id: i64,
    ) -> Result<(), ChatError> {
        let store = Arc::clone(&self.store);
        self.run(move || store.soft_delete(pairing_id, inviter_id, invitee_id))
            .await
            .map_err(|e| e.wrap(ChatError::DeleteFailed))
    }
}
