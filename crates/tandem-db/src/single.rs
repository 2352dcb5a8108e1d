use std::sync::Arc;

use rusqlite::{Connection, ErrorCode, params};
use tracing::error;

use tandem_core::store::{SingleChatStore, StoreError};
use tandem_types::models::{ChatState, InviteeView, InviterView, NewSingleChat};

use crate::Database;

/// SQLite-backed single-chat store. Every mutation is a single statement,
/// so SQLite's per-statement atomicity gives the all-or-nothing guarantee;
/// the affected-row count decides between success and `NotFound`.
pub struct SqliteSingleStore {
    db: Arc<Database>,
}

impl SqliteSingleStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl SingleChatStore for SqliteSingleStore {
    fn insert_unaccepted(&self, chat: &NewSingleChat) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO single_chats
                     (pairing_id, inviter_id, invitee_id, invitee_nickname, inviter_disturb, state)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    chat.pairing_id,
                    chat.inviter_id,
                    chat.invitee_id,
                    chat.invitee_nickname,
                    chat.inviter_disturb,
                    ChatState::Unaccepted.as_i64(),
                ],
            );
            match result {
                Ok(_) => Ok(()),
                Err(e) if is_constraint_violation(&e) => Err(StoreError::Conflict),
                Err(e) => {
                    error!(pairing_id = chat.pairing_id, "insert single chat failed: {e}");
                    Err(StoreError::Backend(e.into()))
                }
            }
        })
    }

    fn find_by_inviter(&self, pairing_id: i64, inviter_id: i64) -> Result<InviterView, StoreError> {
        self.db.with_conn(|conn| {
            query_inviter_view(conn, pairing_id, inviter_id)?.ok_or(StoreError::NotFound)
        })
    }

    fn find_by_invitee(&self, pairing_id: i64, invitee_id: i64) -> Result<InviteeView, StoreError> {
        self.db.with_conn(|conn| {
            query_invitee_view(conn, pairing_id, invitee_id)?.ok_or(StoreError::NotFound)
        })
    }

    fn update_by_inviter(
        &self,
        pairing_id: i64,
        inviter_id: i64,
        invitee_nickname: &str,
        inviter_disturb: i64,
    ) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE single_chats
                     SET invitee_nickname = ?1, inviter_disturb = ?2
                     WHERE pairing_id = ?3 AND inviter_id = ?4 AND state <> ?5",
                    params![
                        invitee_nickname,
                        inviter_disturb,
                        pairing_id,
                        inviter_id,
                        ChatState::Deleted.as_i64(),
                    ],
                )
                .map_err(backend)?;
            expect_one_row(changed)
        })
    }

    fn update_by_invitee(
        &self,
        pairing_id: i64,
        invitee_id: i64,
        inviter_nickname: &str,
        invitee_disturb: i64,
    ) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE single_chats
                     SET inviter_nickname = ?1, invitee_disturb = ?2
                     WHERE pairing_id = ?3 AND invitee_id = ?4 AND state <> ?5",
                    params![
                        inviter_nickname,
                        invitee_disturb,
                        pairing_id,
                        invitee_id,
                        ChatState::Deleted.as_i64(),
                    ],
                )
                .map_err(backend)?;
            expect_one_row(changed)
        })
    }

    fn confirm_accept(
        &self,
        pairing_id: i64,
        invitee_id: i64,
        inviter_nickname: &str,
        invitee_disturb: i64,
    ) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE single_chats
                     SET inviter_nickname = ?1, invitee_disturb = ?2, state = ?3
                     WHERE pairing_id = ?4 AND invitee_id = ?5 AND state = ?6",
                    params![
                        inviter_nickname,
                        invitee_disturb,
                        ChatState::Active.as_i64(),
                        pairing_id,
                        invitee_id,
                        ChatState::Unaccepted.as_i64(),
                    ],
                )
                .map_err(backend)?;
            expect_one_row(changed)
        })
    }

    fn soft_delete(
        &self,
        pairing_id: i64,
        inviter_id: i64,
        invitee_id: i64,
    ) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE single_chats
                     SET state = ?1
                     WHERE pairing_id = ?2 AND inviter_id = ?3 AND invitee_id = ?4
                       AND state <> ?1",
                    params![
                        ChatState::Deleted.as_i64(),
                        pairing_id,
                        inviter_id,
                        invitee_id,
                    ],
                )
                .map_err(backend)?;
            expect_one_row(changed)
        })
    }
}

fn query_inviter_view(
    conn: &Connection,
    pairing_id: i64,
    inviter_id: i64,
) -> Result<Option<InviterView>, StoreError> {
    // LEFT JOIN so a pairing whose counterpart vanished from the directory
    // still resolves, with an empty display name.
    conn.query_row(
        "SELECT sc.pairing_id, sc.inviter_id, sc.invitee_id, sc.invitee_nickname,
                COALESCE(u.username, ''), sc.inviter_disturb
         FROM single_chats sc
         LEFT JOIN users u ON sc.invitee_id = u.id
         WHERE sc.pairing_id = ?1 AND sc.inviter_id = ?2 AND sc.state <> ?3",
        params![pairing_id, inviter_id, ChatState::Deleted.as_i64()],
        |row| {
            Ok(InviterView {
                pairing_id: row.get(0)?,
                inviter_id: row.get(1)?,
                invitee_id: row.get(2)?,
                invitee_nickname: row.get(3)?,
                invitee_name: row.get(4)?,
                inviter_disturb: row.get(5)?,
            })
        },
    )
    .optional()
}

fn query_invitee_view(
    conn: &Connection,
    pairing_id: i64,
    invitee_id: i64,
) -> Result<Option<InviteeView>, StoreError> {
    conn.query_row(
        "SELECT sc.pairing_id, sc.invitee_id, sc.inviter_id, sc.inviter_nickname,
                COALESCE(u.username, ''), sc.invitee_disturb
         FROM single_chats sc
         LEFT JOIN users u ON sc.inviter_id = u.id
         WHERE sc.pairing_id = ?1 AND sc.invitee_id = ?2 AND sc.state <> ?3",
        params![pairing_id, invitee_id, ChatState::Deleted.as_i64()],
        |row| {
            Ok(InviteeView {
                pairing_id: row.get(0)?,
                invitee_id: row.get(1)?,
                inviter_id: row.get(2)?,
                inviter_nickname: row.get(3)?,
                inviter_name: row.get(4)?,
                invitee_disturb: row.get(5)?,
            })
        },
    )
    .optional()
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

fn backend(e: rusqlite::Error) -> StoreError {
    error!("single chat statement failed: {e}");
    StoreError::Backend(e.into())
}

fn expect_one_row(changed: usize) -> Result<(), StoreError> {
    if changed == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

/// Extension for queries where zero rows is an expected outcome.
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, StoreError>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, StoreError> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(backend(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteSingleStore {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.create_user(100001, "alice").unwrap();
        db.create_user(100002, "bob").unwrap();
        SqliteSingleStore::new(db)
    }

    fn new_chat(pairing_id: i64) -> NewSingleChat {
        NewSingleChat {
            pairing_id,
            inviter_id: 100001,
            invitee_id: 100002,
            invitee_nickname: "B".into(),
            inviter_disturb: 0,
        }
    }

    #[test]
    fn insert_then_project_both_viewpoints() {
        let store = store();
        store.insert_unaccepted(&new_chat(42)).unwrap();

        let inviter = store.find_by_inviter(42, 100001).unwrap();
        assert_eq!(inviter.invitee_id, 100002);
        assert_eq!(inviter.invitee_nickname, "B");
        assert_eq!(inviter.invitee_name, "bob");
        assert_eq!(inviter.inviter_disturb, 0);

        store.confirm_accept(42, 100002, "A", 1).unwrap();
        let invitee = store.find_by_invitee(42, 100002).unwrap();
        assert_eq!(invitee.inviter_id, 100001);
        assert_eq!(invitee.inviter_nickname, "A");
        assert_eq!(invitee.inviter_name, "alice");
        assert_eq!(invitee.invitee_disturb, 1);
    }

    #[test]
    fn insert_over_existing_row_is_a_conflict() {
        let store = store();
        store.insert_unaccepted(&new_chat(42)).unwrap();
        assert!(matches!(
            store.insert_unaccepted(&new_chat(42)),
            Err(StoreError::Conflict)
        ));

        // Soft delete keeps the row, so the pairing id stays taken.
        store.soft_delete(42, 100001, 100002).unwrap();
        assert!(matches!(
            store.insert_unaccepted(&new_chat(42)),
            Err(StoreError::Conflict)
        ));
    }

    #[test]
    fn finds_match_role_and_liveness() {
        let store = store();
        store.insert_unaccepted(&new_chat(42)).unwrap();

        // Wrong role or wrong pairing id: not found.
        assert!(matches!(
            store.find_by_inviter(42, 100002),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.find_by_invitee(42, 100001),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.find_by_inviter(7, 100001),
            Err(StoreError::NotFound)
        ));

        store.soft_delete(42, 100001, 100002).unwrap();
        assert!(matches!(
            store.find_by_inviter(42, 100001),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.find_by_invitee(42, 100002),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn confirm_accept_requires_unaccepted_state_and_matching_invitee() {
        let store = store();
        store.insert_unaccepted(&new_chat(42)).unwrap();

        assert!(matches!(
            store.confirm_accept(42, 100001, "A", 0),
            Err(StoreError::NotFound)
        ));

        store.confirm_accept(42, 100002, "A", 0).unwrap();
        assert!(matches!(
            store.confirm_accept(42, 100002, "A", 0),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn updates_touch_only_the_callers_columns() {
        let store = store();
        store.insert_unaccepted(&new_chat(42)).unwrap();
        store.confirm_accept(42, 100002, "A", 0).unwrap();

        store.update_by_inviter(42, 100001, "B2", 1).unwrap();
        let invitee = store.find_by_invitee(42, 100002).unwrap();
        // The invitee's side is untouched by an inviter update.
        assert_eq!(invitee.inviter_nickname, "A");
        assert_eq!(invitee.invitee_disturb, 0);

        let inviter = store.find_by_inviter(42, 100001).unwrap();
        assert_eq!(inviter.invitee_nickname, "B2");
        assert_eq!(inviter.inviter_disturb, 1);
    }

    #[test]
    fn soft_delete_requires_exact_participant_ids() {
        let store = store();
        store.insert_unaccepted(&new_chat(42)).unwrap();

        assert!(matches!(
            store.soft_delete(42, 100001, 999),
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.soft_delete(42, 100002, 100001),
            Err(StoreError::NotFound)
        ));

        store.soft_delete(42, 100001, 100002).unwrap();
        assert!(matches!(
            store.soft_delete(42, 100001, 100002),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn missing_directory_entry_yields_empty_name() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.create_user(100001, "alice").unwrap();
        let store = SqliteSingleStore::new(db);

        // Invitee 100002 was never registered in the directory.
        store.insert_unaccepted(&new_chat(42)).unwrap();
        let inviter = store.find_by_inviter(42, 100001).unwrap();
        assert_eq!(inviter.invitee_name, "");
    }
}
