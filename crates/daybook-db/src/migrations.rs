use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            username       TEXT PRIMARY KEY,
            password_hash  TEXT NOT NULL,
            created_at     TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS entries (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            username         TEXT NOT NULL REFERENCES users(username),
            entry_date       TEXT NOT NULL,
            mood             TEXT NOT NULL,
            gratitude        TEXT NOT NULL,
            room_for_growth  TEXT NOT NULL,
            thoughts         TEXT NOT NULL,
            ai_feedback      TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_entries_user_date
            ON entries(username, entry_date);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();
        run(&conn).unwrap();
    }
}
