//! Clause simplification.
//!
//! Each key clause longer than a few words is sent to the [`Summarizer`].
//! Short clauses pass through untouched, and a failing model call never stops
//! the batch: it becomes a diagnostic text for that clause only.

use std::borrow::Cow;

use serde::Serialize;

use crate::{Clause, ModelError, Summarizer, Summary, SummaryParams};

/// Clauses with this many words or fewer are not summarized.
pub const DEFAULT_MIN_WORDS: usize = 5;

/// Prefix of the text recorded for a clause the model failed on.
pub const ERROR_PREFIX: &str = "Error simplifying clause";

/// What happened to one clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Simplification {
    /// The model produced a summary.
    Summarized(Summary),
    /// The clause was too short to summarize and is kept as is.
    PassedThrough(String),
    /// The model call failed.
    Failed(ModelError),
}

impl Simplification {
    /// Text to show in place of the original clause.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Simplification::Summarized(summary) => Cow::Borrowed(&summary.text),
            Simplification::PassedThrough(text) => Cow::Borrowed(text),
            Simplification::Failed(err) => Cow::Owned(format!("{}: {}", ERROR_PREFIX, err)),
        }
    }

    pub fn status(&self) -> SimplificationStatus {
        match self {
            Simplification::Summarized(_) => SimplificationStatus::Summarized,
            Simplification::PassedThrough(_) => SimplificationStatus::PassedThrough,
            Simplification::Failed(err) => SimplificationStatus::Failed {
                transient: err.is_transient(),
            },
        }
    }

    pub fn error(&self) -> Option<&ModelError> {
        match self {
            Simplification::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Serializable summary of a [`Simplification`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimplificationStatus {
    Summarized,
    PassedThrough,
    Failed { transient: bool },
}

/// Runs clauses through a [`Summarizer`] with fixed parameters.
///
/// The summarizer is borrowed or owned for the whole batch and is never
/// reloaded between clauses.
#[derive(Debug, Clone)]
pub struct Simplifier<S> {
    summarizer: S,
    params: SummaryParams,
    min_words: usize,
}

impl<S: Summarizer> Simplifier<S> {
    pub fn new(summarizer: S) -> Self {
        Simplifier {
            summarizer,
            params: SummaryParams::default(),
            min_words: DEFAULT_MIN_WORDS,
        }
    }

    pub fn with_params(mut self, params: SummaryParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    pub fn summarizer(&self) -> &S {
        &self.summarizer
    }

    pub fn params(&self) -> &SummaryParams {
        &self.params
    }

    /// Simplify a single clause text.
    pub fn simplify(&self, clause: &str) -> Simplification {
        let words = clause.split_whitespace().count();
        if words <= self.min_words {
            return Simplification::PassedThrough(clause.to_string());
        }

        match self.summarizer.summarize(clause, &self.params) {
            Ok(summary) => Simplification::Summarized(summary),
            Err(err) => {
                tracing::warn!(
                    model = self.summarizer.name(),
                    transient = err.is_transient(),
                    error = %err,
                    "clause simplification failed"
                );
                Simplification::Failed(err)
            }
        }
    }

    /// Simplify every clause; the output is index-aligned with `clauses`.
    pub fn simplify_clauses(&self, clauses: &[Clause]) -> Vec<Simplification> {
        clauses
            .iter()
            .map(|clause| self.simplify(clause.text()))
            .collect()
    }
}

/// Simplify `clauses` with default parameters.
pub fn simplify_clauses<S: Summarizer + ?Sized>(
    clauses: &[Clause],
    summarizer: &S,
) -> Vec<Simplification> {
    Simplifier::new(summarizer).simplify_clauses(clauses)
}
