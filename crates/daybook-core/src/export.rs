use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use daybook_types::{Entry, EntryDraft};

const SEPARATOR: &str = "----------------------------------------";

fn entry_block(
    entry_date: NaiveDate,
    mood: &str,
    gratitude: &str,
    room_for_growth: &str,
    thoughts: &str,
) -> String {
    format!(
        "Date: {entry_date}\n\
         Mood: {mood}\n\
         \n\
         What went well:\n\
         {gratitude}\n\
         \n\
         What could have gone better:\n\
         {room_for_growth}\n\
         \n\
         Thoughts:\n\
         {thoughts}\n\
         {SEPARATOR}\n"
    )
}

/// Render an unsaved draft. This is the text handed to the feedback
/// service.
pub fn format_draft(draft: &EntryDraft) -> String {
    entry_block(
        draft.entry_date,
        &draft.mood,
        &draft.gratitude,
        &draft.room_for_growth,
        &draft.thoughts,
    )
}

/// Render a stored entry, with its feedback when present. Pure: identical
/// entries always yield byte-identical text.
pub fn format_entry(entry: &Entry) -> String {
    let mut text = entry_block(
        entry.entry_date,
        &entry.mood,
        &entry.gratitude,
        &entry.room_for_growth,
        &entry.thoughts,
    );
    if let Some(feedback) = &entry.ai_feedback {
        text.push_str("\nAI Feedback:\n");
        text.push_str(feedback);
    }
    text
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("journal_{date}.txt")
}

/// Write the entry to `dir/journal_<today>.txt`. One file per calendar
/// day; a second export on the same day overwrites the first.
pub fn write_export(dir: &Path, entry: &Entry, today: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(export_filename(today));
    fs::write(&path, format_entry(entry))
        .with_context(|| format!("could not write export file {}", path.display()))?;
    Ok(path)
}
