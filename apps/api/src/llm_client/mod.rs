/// Gemini client — the single point of entry for all generative calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: gemini-2.5-flash-preview-05-20 (hardcoded — do not make configurable
/// to prevent drift)
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod retry;
pub mod transport;

use crate::llm_client::retry::{advance, AttemptOutcome, RetryPolicy, Transition};
use crate::llm_client::transport::{Reply, ReqwestTransport, Transport, TransportError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generation calls. Intentionally hardcoded to
/// prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash-preview-05-20";

const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Errors surfaced by the dispatcher. Only `Transport` and `RateLimited`
/// warrant another attempt; everything else terminates the chain.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("rate limited (status 429): {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: missing candidates[0].content.parts[0].text")]
    MalformedResponse,

    #[error("retries exhausted after {retries} retries: {cause}")]
    RetriesExhausted { retries: u32, cause: Box<GeminiError> },
}

impl GeminiError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeminiError::Transport(_) | GeminiError::RateLimited { .. }
        )
    }
}

/// JSON envelope for `generateContent`. Field names follow the wire format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

impl GenerateContentRequest {
    fn new(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: vec![
                SafetySetting {
                    category: "HARM_CATEGORY_HARASSMENT",
                    threshold: "BLOCK_MEDIUM_AND_ABOVE",
                },
                SafetySetting {
                    category: "HARM_CATEGORY_HATE_SPEECH",
                    threshold: "BLOCK_MEDIUM_AND_ABOVE",
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// First candidate's first text part — the only field the app consumes.
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// The single Gemini client used by all handlers.
/// Wraps the `generateContent` endpoint with backoff-driven retry.
#[derive(Clone)]
pub struct GeminiClient {
    transport: Arc<dyn Transport>,
    url: String,
    policy: RetryPolicy,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_transport(
            Arc::new(ReqwestTransport::new()),
            api_key,
            RetryPolicy::default(),
        )
    }

    /// Constructor with an injected transport and policy. Tests use this to
    /// script replies without a live endpoint.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        api_key: &str,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            url: format!("{GEMINI_API_BASE}/{MODEL}:generateContent?key={api_key}"),
            policy,
        }
    }

    /// Sends the prompt and returns the generated text.
    /// Retries on 429 and transport failure with exponential backoff; any
    /// other non-2xx status and malformed success bodies are terminal.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::new(prompt);
        let mut attempt = self.policy.first_attempt();

        loop {
            let result = self.call_once(&request).await;
            let outcome = match &result {
                Ok(_) => AttemptOutcome::Succeeded,
                Err(e) if e.is_retryable() => AttemptOutcome::Retryable,
                Err(_) => AttemptOutcome::Terminal,
            };

            match advance(attempt, outcome) {
                Transition::Succeeded => return result,
                Transition::Failed => {
                    return match result {
                        Err(cause) if cause.is_retryable() => Err(GeminiError::RetriesExhausted {
                            retries: self.policy.max_retries,
                            cause: Box::new(cause),
                        }),
                        other => other,
                    };
                }
                Transition::RetryAfter { wait, next } => {
                    if let Err(e) = &result {
                        warn!(
                            "Generation call failed ({e}), retrying after {}ms ({} retries left)",
                            wait.as_millis(),
                            attempt.retries_remaining
                        );
                    }
                    tokio::time::sleep(wait).await;
                    attempt = next;
                }
            }
        }
    }

    async fn call_once(&self, request: &GenerateContentRequest) -> Result<String, GeminiError> {
        let Reply { status, body } = self.transport.send(&self.url, request).await?;

        match status {
            200..=299 => {
                let parsed: GenerateContentResponse =
                    serde_json::from_str(&body).map_err(|_| GeminiError::MalformedResponse)?;
                match parsed.text() {
                    Some(text) => {
                        debug!("Generation call succeeded: {} chars", text.len());
                        Ok(text)
                    }
                    None => Err(GeminiError::MalformedResponse),
                }
            }
            429 => Err(GeminiError::RateLimited { message: body }),
            _ => Err(GeminiError::Api {
                status,
                message: body,
            }),
        }
    }
}
