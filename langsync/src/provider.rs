//! Translation providers and the fail-soft adapter the engine calls them through.
//!
//! A provider turns `(text, source language, target language)` into translated
//! text and may fail. The engine never sees those failures directly: it calls
//! [`FailSoft::translate`], which reports the error and falls back to the
//! untranslated text so a single bad key cannot abort a file.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Public endpoint used by [`GoogleTranslator`] unless another one is configured.
pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Request timeout used by [`GoogleTranslator::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider responded with status {0}")]
    Status(u16),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("unsupported language pair `{source_lang}` -> `{target_lang}`")]
    Unsupported {
        source_lang: String,
        target_lang: String,
    },

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn other(message: impl Into<String>) -> Self {
        ProviderError::Other(message.into())
    }
}

/// A text translation capability.
pub trait Translator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError>;
}

impl<F> Translator for F
where
    F: Fn(&str, &str, &str) -> Result<String, ProviderError>,
{
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        self(text, source, target)
    }
}

/// Result of a fail-soft translation.
#[derive(Debug)]
pub enum Outcome {
    Translated(String),
    /// The provider failed and `text` is the original source text.
    Fallback { text: String, error: ProviderError },
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Translated(text) | Outcome::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Outcome::Translated(text) | Outcome::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }
}

/// Wraps a [`Translator`] so that failures never propagate.
#[derive(Debug, Clone)]
pub struct FailSoft<T> {
    inner: T,
}

impl<T: Translator> FailSoft<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Translates `text`, falling back to `text` itself when the provider fails.
    ///
    /// Blank strings are returned as-is without calling the provider.
    pub fn translate(&self, text: &str, source: &str, target: &str) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::Translated(text.to_string());
        }
        match self.inner.translate(text, source, target) {
            Ok(translated) => Outcome::Translated(translated),
            Err(error) => {
                tracing::warn!(%source, %target, %error, "translation failed, keeping source text");
                Outcome::Fallback {
                    text: text.to_string(),
                    error,
                }
            }
        }
    }
}

/// Client for Google's public `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_endpoint(DEFAULT_GOOGLE_ENDPOINT, DEFAULT_TIMEOUT)
    }

    /// Builds a client against a custom endpoint speaking the same protocol.
    ///
    /// Must not be called from inside an async runtime thread; build it on a
    /// blocking worker instead.
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("langsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        if target.trim().is_empty() {
            return Err(ProviderError::Unsupported {
                source_lang: source.to_string(),
                target_lang: target.to_string(),
            });
        }

        tracing::debug!(%source, %target, chars = text.len(), "requesting translation");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }
        let body: Value = response.json()?;
        parse_gtx_response(&body)
    }
}

/// Extracts the translated text from a `client=gtx` response body.
///
/// The body is a nested array whose first element lists sentence segments,
/// each segment starting with its translated text.
fn parse_gtx_response(body: &Value) -> Result<String, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::MalformedResponse("missing sentence list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        Err(ProviderError::MalformedResponse(
            "response contained no translated text".to_string(),
        ))
    } else {
        Ok(translated)
    }
}

/// Offline pseudo-localization: prefixes the text with the target tag.
///
/// Useful for previewing which strings a sync would add.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoTranslator;

impl Translator for PseudoTranslator {
    fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String, ProviderError> {
        Ok(format!("[{}] {}", target, text))
    }
}

/// Copies the source text unchanged, filling the key set without translating.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String, ProviderError> {
        Ok(text.to_string())
    }
}
