/// Row types mapping directly onto SQLite rows. Dates stay in their stored
/// text form here; daybook-core parses them at the domain boundary.

pub struct UserRow {
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

pub struct EntryRow {
    pub id: i64,
    pub username: String,
    pub entry_date: String,
    pub mood: String,
    pub gratitude: String,
    pub room_for_growth: String,
    pub thoughts: String,
    pub ai_feedback: Option<String>,
}
