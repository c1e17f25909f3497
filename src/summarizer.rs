//! The summarization capability.
//!
//! [`Summarizer`] is the seam to whatever model shortens clause text. The
//! pipeline never looks inside it: it hands over text plus [`SummaryParams`]
//! and gets back a [`Summary`] or a [`ModelError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output length bounds and decoding mode passed to the model.
///
/// Lengths are in model tokens; [`ExtractiveSummarizer`] treats them as words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryParams {
    pub min_length: usize,
    pub max_length: usize,
    /// `false` requests deterministic (greedy/beam) decoding
    pub do_sample: bool,
}

impl Default for SummaryParams {
    fn default() -> Self {
        SummaryParams {
            min_length: 30,
            max_length: 100,
            do_sample: false,
        }
    }
}

/// Text produced by a [`Summarizer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub text: String,
    /// Backend-reported score, when the backend reports one
    pub score: Option<f64>,
}

impl Summary {
    pub fn new(text: impl Into<String>) -> Self {
        Summary {
            text: text.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// Failures raised by a summarization backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The request did not complete in time.
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The model is loading, rate limited or otherwise temporarily unavailable.
    #[error("model unavailable: {message}")]
    Unavailable {
        message: String,
        /// Backend estimate, in seconds, of when to retry
        retry_after: Option<f64>,
    },

    /// The connection failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend rejected the input itself.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backend answered with something that is not a summary.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Any other backend failure.
    #[error("model error: {0}")]
    Backend(String),
}

impl ModelError {
    /// Whether the same request could succeed if sent again later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ModelError::Timeout { .. } | ModelError::Unavailable { .. } | ModelError::Transport(_)
        )
    }
}

/// Result type for summarization calls.
pub type ModelResult<T> = Result<T, ModelError>;

/// An abstractive (or extractive) text shortener.
pub trait Summarizer {
    /// Model identifier used in logs.
    fn name(&self) -> &str;

    fn summarize(&self, text: &str, params: &SummaryParams) -> ModelResult<Summary>;
}

impl<S: Summarizer + ?Sized> Summarizer for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn summarize(&self, text: &str, params: &SummaryParams) -> ModelResult<Summary> {
        (**self).summarize(text, params)
    }
}

impl<S: Summarizer + ?Sized> Summarizer for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn summarize(&self, text: &str, params: &SummaryParams) -> ModelResult<Summary> {
        (**self).summarize(text, params)
    }
}

/// Offline summarizer that keeps leading sentences.
///
/// Whole sentences are taken until at least `min_length` words are collected,
/// and the result is cut at `max_length` words. `do_sample` is ignored; the
/// output is always deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveSummarizer;

fn ends_sentence(word: &str) -> bool {
    word.trim_end_matches(&['"', '\'', ')'][..])
        .ends_with(&['.', '!', '?'][..])
}

impl Summarizer for ExtractiveSummarizer {
    fn name(&self) -> &str {
        "extractive"
    }

    fn summarize(&self, text: &str, params: &SummaryParams) -> ModelResult<Summary> {
        let mut kept: Vec<&str> = Vec::new();
        for word in text.split_whitespace() {
            if kept.len() == params.max_length {
                break;
            }
            kept.push(word);
            if kept.len() >= params.min_length && ends_sentence(word) {
                break;
            }
        }

        if kept.is_empty() {
            return Err(ModelError::InvalidInput(
                "nothing to summarize".to_string(),
            ));
        }
        Ok(Summary::new(kept.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min_length: usize, max_length: usize) -> SummaryParams {
        SummaryParams {
            min_length,
            max_length,
            do_sample: false,
        }
    }

    #[test]
    fn extractive_keeps_whole_sentences_until_min_length() {
        let text = "The Supplier shall deliver. Delivery is final. Risk passes on delivery.";
        let summary = ExtractiveSummarizer.summarize(text, &params(5, 100)).unwrap();
        assert_eq!(summary.text, "The Supplier shall deliver. Delivery is final.");
        assert_eq!(summary.score, None);
    }

    #[test]
    fn extractive_cuts_at_max_length() {
        let text = "one two three four five six seven";
        let summary = ExtractiveSummarizer.summarize(text, &params(1, 3)).unwrap();
        assert_eq!(summary.text, "one two three");
    }

    #[test]
    fn extractive_rejects_empty_text() {
        let err = ExtractiveSummarizer.summarize("   ", &params(30, 100)).unwrap_err();
        assert_eq!(err, ModelError::InvalidInput("nothing to summarize".to_string()));
        assert!(!err.is_transient());
    }

    #[test]
    fn transient_errors() {
        assert!(ModelError::Timeout { seconds: 60 }.is_transient());
        assert!(ModelError::Unavailable {
            message: "loading".to_string(),
            retry_after: Some(20.0),
        }
        .is_transient());
        assert!(ModelError::Transport("connection reset".to_string()).is_transient());
        assert!(!ModelError::MalformedResponse("[]".to_string()).is_transient());
        assert!(!ModelError::Backend("HTTP 500".to_string()).is_transient());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ModelError::Timeout { seconds: 5 }.to_string(),
            "request timed out after 5s"
        );
        assert_eq!(
            ModelError::MalformedResponse("missing summary_text".to_string()).to_string(),
            "malformed response: missing summary_text"
        );
    }
}
