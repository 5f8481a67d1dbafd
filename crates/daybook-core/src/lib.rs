//! Journaling core: credential handling, entry submission, plain-text export.
//!
//! Storage lives in daybook-db; the feedback service and the calendar are
//! injected collaborators, so callers (and tests) control both.

pub mod clock;
pub mod credentials;
pub mod error;
pub mod export;
pub mod feedback;
pub mod service;

pub use error::Error;
pub use service::{EntryService, Submission};
