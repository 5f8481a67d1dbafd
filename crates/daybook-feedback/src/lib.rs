//! HTTP implementation of the core's `FeedbackClient` seam, speaking the
//! OpenAI-compatible chat-completions wire format.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use daybook_core::feedback::{FeedbackClient, FeedbackError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str = "You are a wise life coach who provides feedback based on a user's \
     journaling entry, and gives simple, straightforward and practical advice. Make sure to be \
     relevant to what the user journaled today";

// -- Wire types --

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat-completions endpoint. One bounded
/// attempt per entry; the core treats any failure as "no feedback".
pub struct HttpFeedbackClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpFeedbackClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self, FeedbackError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FeedbackError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key,
            model,
        })
    }
}

impl FeedbackClient for HttpFeedbackClient {
    fn get_feedback(&self, entry_text: &str) -> Result<String, FeedbackError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: entry_text,
                },
            ],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| FeedbackError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedbackError::Request(format!(
                "feedback endpoint returned {status}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| FeedbackError::Malformed(e.to_string()))?;

        extract_feedback(parsed)
    }
}

fn extract_feedback(response: ChatResponse) -> Result<String, FeedbackError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| FeedbackError::Malformed("response contained no choices".into()))?;

    Ok(content.trim().to_string())
}
