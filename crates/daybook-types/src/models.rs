use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted journal entry. Entries are immutable once written;
/// feedback is attached at creation time or never.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub username: String,
    pub entry_date: NaiveDate,
    pub mood: String,
    pub gratitude: String,
    pub room_for_growth: String,
    pub thoughts: String,
    pub ai_feedback: Option<String>,
}

/// A validated entry that has not been stored yet.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub username: String,
    pub entry_date: NaiveDate,
    pub mood: String,
    pub gratitude: String,
    pub room_for_growth: String,
    pub thoughts: String,
}
