use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{info, warn};

use daybook_db::Database;
use daybook_db::models::EntryRow;
use daybook_types::{Entry, EntryDraft};

use crate::clock::Clock;
use crate::error::Error;
use crate::export;
use crate::feedback::{FeedbackClient, FeedbackError};

/// Orchestrates one journal submission: validate, stamp the date, fetch
/// best-effort feedback, persist, export.
pub struct EntryService {
    db: Arc<Database>,
    feedback: Arc<dyn FeedbackClient>,
    clock: Arc<dyn Clock>,
    export_dir: PathBuf,
}

/// Outcome of a successful submission. The entry is persisted even when
/// `feedback_error` is set or the export could not be written.
pub struct Submission {
    pub entry: Entry,
    pub feedback_error: Option<FeedbackError>,
    pub export_path: Option<PathBuf>,
}

impl EntryService {
    pub fn new(
        db: Arc<Database>,
        feedback: Arc<dyn FeedbackClient>,
        clock: Arc<dyn Clock>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            db,
            feedback,
            clock,
            export_dir,
        }
    }

    pub fn submit(
        &self,
        username: &str,
        mood: &str,
        gratitude: &str,
        room_for_growth: &str,
        thoughts: &str,
        want_feedback: bool,
    ) -> Result<Submission, Error> {
        let mood = mood.trim();
        let gratitude = gratitude.trim();
        let room_for_growth = room_for_growth.trim();
        let thoughts = thoughts.trim();

        let mut missing = Vec::new();
        if mood.is_empty() {
            missing.push("mood");
        }
        if gratitude.is_empty() {
            missing.push("gratitude");
        }
        if room_for_growth.is_empty() {
            missing.push("room_for_growth");
        }
        if thoughts.is_empty() {
            missing.push("thoughts");
        }
        if !missing.is_empty() {
            return Err(Error::Validation { missing });
        }

        let draft = EntryDraft {
            username: username.to_string(),
            entry_date: self.clock.today(),
            mood: mood.to_string(),
            gratitude: gratitude.to_string(),
            room_for_growth: room_for_growth.to_string(),
            thoughts: thoughts.to_string(),
        };

        // The feedback call happens before any storage work, so no
        // connection is held while waiting on the network.
        let (ai_feedback, feedback_error) = if want_feedback {
            match self.feedback.get_feedback(&export::format_draft(&draft)) {
                Ok(text) => (Some(text), None),
                Err(err) => {
                    warn!("feedback unavailable, saving entry without it: {err}");
                    (None, Some(err))
                }
            }
        } else {
            (None, None)
        };

        let id = self.db.insert_entry(
            &draft.username,
            &draft.entry_date.to_string(),
            &draft.mood,
            &draft.gratitude,
            &draft.room_for_growth,
            &draft.thoughts,
            ai_feedback.as_deref(),
        )?;

        let entry = Entry {
            id,
            username: draft.username,
            entry_date: draft.entry_date,
            mood: draft.mood,
            gratitude: draft.gratitude,
            room_for_growth: draft.room_for_growth,
            thoughts: draft.thoughts,
            ai_feedback,
        };
        info!(id = entry.id, username = %entry.username, "journal entry saved");

        let export_path = match export::write_export(&self.export_dir, &entry, self.clock.today()) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("could not export entry: {err:#}");
                None
            }
        };

        Ok(Submission {
            entry,
            feedback_error,
            export_path,
        })
    }

    /// All entries for a user, most recent day first.
    pub fn entries_for(&self, username: &str) -> Result<Vec<Entry>, Error> {
        let rows = self.db.entries_by_user(username)?;
        rows.into_iter()
            .map(entry_from_row)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(Error::from)
    }

    /// Entries for one user on one exact date, in insertion order.
    pub fn entries_for_date(&self, username: &str, date: NaiveDate) -> Result<Vec<Entry>, Error> {
        let rows = self
            .db
            .entries_by_user_and_date(username, &date.to_string())?;
        rows.into_iter()
            .map(entry_from_row)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(Error::from)
    }
}

fn entry_from_row(row: EntryRow) -> anyhow::Result<Entry> {
    let entry_date = NaiveDate::parse_from_str(&row.entry_date, "%Y-%m-%d")
        .with_context(|| format!("stored entry {} has malformed date {:?}", row.id, row.entry_date))?;

    Ok(Entry {
        id: row.id,
        username: row.username,
        entry_date,
        mood: row.mood,
        gratitude: row.gratitude,
        room_for_growth: row.room_for_growth,
        thoughts: row.thoughts,
        ai_feedback: row.ai_feedback,
    })
}
