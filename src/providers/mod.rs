//! Language-model provider abstraction.
//!
//! The assisted extractor only needs one capability from a remote model:
//! take an instruction and a document, return the model's raw text reply.
//! [`LlmProvider`] captures that, with Groq and Gemini implementations
//! selected by [`ProviderKind`].
//!
//! Calls are blocking. Outside a tokio runtime each request runs on a private
//! current-thread runtime; inside one, the caller's runtime drives it.

pub mod gemini;
pub mod groq;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;

use std::fmt;
use std::future::Future;
use std::io;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::RuntimeFlavor;

use crate::config::AssistedConfig;

/// Errors raised by a provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingCredential,

    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,

    #[error("could not start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Remote text-generation capability used by the assisted extractor.
pub trait LlmProvider: Send + Sync {
    /// Short provider name used in logs and extraction method labels.
    fn name(&self) -> &'static str;

    /// Sends `instruction` and `text` to the model using `credential` and
    /// returns the raw reply. One attempt, no retries.
    fn generate(&self, instruction: &str, text: &str, credential: &str)
        -> Result<String, ProviderError>;
}

/// Supported backing services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    Gemini,
}

impl ProviderKind {
    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Environment variable the CLI reads the credential from.
    pub fn credential_env(self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            other => Err(format!("Unknown provider: {other}. Use 'groq' or 'gemini'.")),
        }
    }
}

/// Builds the provider for `kind` from configuration.
pub fn create_provider(kind: ProviderKind, config: &AssistedConfig) -> Box<dyn LlmProvider> {
    let timeout = Duration::from_secs(config.timeout_secs);
    match kind {
        ProviderKind::Groq => Box::new(GroqProvider::new(
            config.groq.base_url.clone(),
            config.groq.model.clone(),
            timeout,
        )),
        ProviderKind::Gemini => Box::new(GeminiProvider::new(
            config.gemini.base_url.clone(),
            config.gemini.model.clone(),
            timeout,
        )),
    }
}

/// Builds an HTTP client with the request timeout applied.
///
/// Every call runs on its own runtime, so idle connections are not pooled.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(0)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
}

/// Runs a future to completion from synchronous code.
///
/// A multi-threaded runtime already running on this thread is reused through
/// `block_in_place`. A current-thread runtime cannot be blocked, so the call
/// moves to a scoped thread with its own runtime.
pub(crate) fn block_on<F, T>(future: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>> + Send,
    T: Send,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(future))
        }
        Ok(_) => std::thread::scope(|scope| {
            scope
                .spawn(move || run_on_fresh_runtime(future))
                .join()
                .unwrap_or_else(|_| {
                    Err(ProviderError::Runtime(io::Error::new(
                        io::ErrorKind::Other,
                        "provider thread panicked",
                    )))
                })
        }),
        Err(_) => run_on_fresh_runtime(future),
    }
}

fn run_on_fresh_runtime<F, T>(future: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

/// Rejects blank credentials before any request is made.
pub(crate) fn require_credential(credential: &str) -> Result<&str, ProviderError> {
    let trimmed = credential.trim();
    if trimmed.is_empty() {
        Err(ProviderError::MissingCredential)
    } else {
        Ok(trimmed)
    }
}

/// Reads an error body, truncated for logs.
pub(crate) async fn error_body(resp: reqwest::Response) -> String {
    let mut body = resp.text().await.unwrap_or_default();
    if body.len() > 500 {
        let mut cut = 500;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}
