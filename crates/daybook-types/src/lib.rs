pub mod models;

pub use models::{Entry, EntryDraft, User};
