use crate::Database;
use anyhow::{Result, anyhow};

impl Database {
    // Minimal user directory. Account management proper lives elsewhere;
    // this exists so chat views can resolve counterpart display names.

    pub fn create_user(&self, id: i64, username: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username) VALUES (?1, ?2)",
                (id, username),
            )?;
            Ok(())
        })
    }

    pub fn get_username_by_id(&self, id: i64) -> Result<String> {
        self.with_conn(|conn| {
            conn.query_row("SELECT username FROM users WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .map_err(|_| anyhow!("User not found: {}", id))
        })
    }
}
