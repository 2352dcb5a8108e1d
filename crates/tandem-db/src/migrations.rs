use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- User directory: the single-chat views JOIN against this to
        -- resolve the counterpart's system-of-record name at read time.
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY,
            username    TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per unordered user pair, keyed by the derived pairing id.
        -- state: 0 = unaccepted, 1 = active, 2 = deleted (soft).
        CREATE TABLE IF NOT EXISTS single_chats (
            pairing_id        INTEGER PRIMARY KEY,
            inviter_id        INTEGER NOT NULL,
            invitee_id        INTEGER NOT NULL,
            inviter_nickname  TEXT NOT NULL DEFAULT '',
            invitee_nickname  TEXT NOT NULL DEFAULT '',
            inviter_disturb   INTEGER NOT NULL DEFAULT 0,
            invitee_disturb   INTEGER NOT NULL DEFAULT 0,
            state             INTEGER NOT NULL DEFAULT 0,
            created_at        TEXT NOT NULL DEFAULT (datetime('now')),
            CHECK (inviter_id <> invitee_id)
        );

        CREATE INDEX IF NOT EXISTS idx_single_chats_inviter
            ON single_chats(inviter_id);
        CREATE INDEX IF NOT EXISTS idx_single_chats_invitee
            ON single_chats(invitee_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
