use thiserror::Error;

/// Errors surfaced by the journaling core.
///
/// Validation and authentication failures are recoverable by the caller;
/// storage failures abort the current operation. A degraded feedback call is
/// not an error at this level — see `feedback::FeedbackError`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("username is already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    AuthenticationFailed,

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
