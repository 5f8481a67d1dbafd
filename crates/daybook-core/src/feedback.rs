use thiserror::Error;

/// Collaborator that turns a formatted entry into commentary.
///
/// The core never assumes the service is reachable; any failure here
/// degrades a submission to `ai_feedback = NULL` instead of aborting it.
pub trait FeedbackClient: Send + Sync {
    fn get_feedback(&self, entry_text: &str) -> Result<String, FeedbackError>;
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("no feedback service is configured")]
    NotConfigured,

    #[error("feedback request failed: {0}")]
    Request(String),

    #[error("feedback response was malformed: {0}")]
    Malformed(String),
}

/// Stand-in client for installations without a feedback endpoint.
pub struct DisabledFeedback;

impl FeedbackClient for DisabledFeedback {
    fn get_feedback(&self, _entry_text: &str) -> Result<String, FeedbackError> {
        Err(FeedbackError::NotConfigured)
    }
}
