use crate::Database;
use crate::models::{EntryRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

const ENTRY_COLUMNS: &str =
    "id, username, entry_date, mood, gratitude, room_for_growth, thoughts, ai_feedback";

impl Database {
    // -- Users --

    pub fn insert_user(&self, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
                (username, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Entries --

    /// Append a new entry and return its store-assigned id. Duplicate dates
    /// are allowed; an unknown username violates the foreign key.
    pub fn insert_entry(
        &self,
        username: &str,
        entry_date: &str,
        mood: &str,
        gratitude: &str,
        room_for_growth: &str,
        thoughts: &str,
        ai_feedback: Option<&str>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO entries (username, entry_date, mood, gratitude, room_for_growth, thoughts, ai_feedback)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    username,
                    entry_date,
                    mood,
                    gratitude,
                    room_for_growth,
                    thoughts,
                    ai_feedback
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// All entries for a user, most recent day first. Entries within a day
    /// keep insertion order.
    pub fn entries_by_user(&self, username: &str) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            query_entries(
                conn,
                &format!(
                    "SELECT {ENTRY_COLUMNS} FROM entries
                     WHERE username = ?1
                     ORDER BY entry_date DESC, id ASC"
                ),
                [username],
            )
        })
    }

    /// Entries for one user on one exact date, in insertion order.
    pub fn entries_by_user_and_date(&self, username: &str, entry_date: &str) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            query_entries(
                conn,
                &format!(
                    "SELECT {ENTRY_COLUMNS} FROM entries
                     WHERE username = ?1 AND entry_date = ?2
                     ORDER BY id ASC"
                ),
                [username, entry_date],
            )
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT username, password_hash, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                username: row.get(0)?,
                password_hash: row.get(1)?,
                created_at: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_entries<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<EntryRow>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map(params, |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                username: row.get(1)?,
                entry_date: row.get(2)?,
                mood: row.get(3)?,
                gratitude: row.get(4)?,
                room_for_growth: row.get(5)?,
                thoughts: row.get(6)?,
                ai_feedback: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
