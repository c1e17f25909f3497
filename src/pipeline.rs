//! The segment -> filter -> simplify -> validate pipeline.
//!
//! [`ContractPipeline`] holds the per-run settings. The summarizer is passed
//! in already loaded ([`ContractPipeline::run`]) or as a loader that is only
//! called when there is at least one key clause
//! ([`ContractPipeline::run_with_loader`]).

use serde::Serialize;

use crate::{
    identify_key_clauses, validate_clauses, Clause, KeywordSet, ModelResult, PipelineError,
    PipelineResult, Segmenter, SimplificationStatus, SimplifyConfig, Simplifier, Summarizer,
    SummaryParams, ValidationRecord, DEFAULT_MIN_WORDS,
};

/// Reported when no clause matched a keyword.
pub const NO_KEY_CLAUSES_MESSAGE: &str = "No key clauses matched the keywords.";

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Nothing to simplify; the summarizer was not used.
    NoKeyClauses {
        /// Number of clauses the segmenter found (possibly zero)
        clauses_found: usize,
    },
    /// One record per key clause, in document order.
    Validated { records: Vec<ValidationRecord> },
}

impl PipelineOutcome {
    pub fn records(&self) -> &[ValidationRecord] {
        match self {
            PipelineOutcome::NoKeyClauses { .. } => &[],
            PipelineOutcome::Validated { records } => records,
        }
    }

    pub fn into_records(self) -> Vec<ValidationRecord> {
        match self {
            PipelineOutcome::NoKeyClauses { .. } => Vec::new(),
            PipelineOutcome::Validated { records } => records,
        }
    }

    /// Explanation for an empty result.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PipelineOutcome::NoKeyClauses { .. } => Some(NO_KEY_CLAUSES_MESSAGE),
            PipelineOutcome::Validated { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Settings for a contract simplification run.
///
/// ```
/// use clause_simplify::{ContractPipeline, ExtractiveSummarizer, KeywordSet};
///
/// let pipeline = ContractPipeline::new().with_keywords(KeywordSet::new(["warranty"]));
/// let outcome = pipeline.run("Section 9 The warranty period is twelve months.", &ExtractiveSummarizer);
/// assert_eq!(outcome.records().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ContractPipeline {
    segmenter: Segmenter,
    keywords: KeywordSet,
    params: SummaryParams,
    min_words: usize,
}

impl Default for ContractPipeline {
    fn default() -> Self {
        ContractPipeline {
            segmenter: Segmenter::new(),
            keywords: KeywordSet::default(),
            params: SummaryParams::default(),
            min_words: DEFAULT_MIN_WORDS,
        }
    }
}

impl ContractPipeline {
    /// Default keywords, unanchored labels, 30..100 token summaries.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SimplifyConfig) -> Self {
        ContractPipeline {
            segmenter: config.segmenter(),
            keywords: config.keyword_set(),
            params: config.summary,
            min_words: config.min_words,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Segmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_params(mut self, params: SummaryParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Stage 1 only.
    pub fn segment(&self, text: &str) -> Vec<Clause> {
        self.segmenter.segment(text)
    }

    /// Stages 1 and 2.
    pub fn key_clauses(&self, text: &str) -> Vec<Clause> {
        identify_key_clauses(&self.segment(text), &self.keywords)
    }

    /// Run every stage with an already loaded summarizer.
    pub fn run<S: Summarizer + ?Sized>(&self, text: &str, summarizer: &S) -> PipelineOutcome {
        let clauses = self.segment(text);
        let key_clauses = identify_key_clauses(&clauses, &self.keywords);
        if key_clauses.is_empty() {
            return no_key_clauses(clauses.len());
        }
        self.simplify_and_validate(&key_clauses, summarizer)
    }

    /// Run every stage, loading the summarizer only if there is a key clause.
    ///
    /// `load` is called at most once. A load failure aborts the run, since no
    /// clause could be simplified with it.
    pub fn run_with_loader<S, F>(&self, text: &str, load: F) -> PipelineResult<PipelineOutcome>
    where
        S: Summarizer,
        F: FnOnce() -> ModelResult<S>,
    {
        let clauses = self.segment(text);
        let key_clauses = identify_key_clauses(&clauses, &self.keywords);
        if key_clauses.is_empty() {
            return Ok(no_key_clauses(clauses.len()));
        }

        let summarizer = load().map_err(PipelineError::ModelLoad)?;
        tracing::info!(model = summarizer.name(), "loaded summarization model");
        Ok(self.simplify_and_validate(&key_clauses, &summarizer))
    }

    fn simplify_and_validate<S: Summarizer + ?Sized>(
        &self,
        key_clauses: &[Clause],
        summarizer: &S,
    ) -> PipelineOutcome {
        let simplifier = Simplifier::new(summarizer)
            .with_params(self.params)
            .with_min_words(self.min_words);
        let simplified = simplifier.simplify_clauses(key_clauses);
        let records = validate_clauses(key_clauses, &simplified);

        let failed = records
            .iter()
            .filter(|r| matches!(r.status, SimplificationStatus::Failed { .. }))
            .count();
        tracing::debug!(records = records.len(), failed, "validated key clauses");
        PipelineOutcome::Validated { records }
    }
}

fn no_key_clauses(clauses_found: usize) -> PipelineOutcome {
    tracing::info!(clauses_found, "{}", NO_KEY_CLAUSES_MESSAGE);
    PipelineOutcome::NoKeyClauses { clauses_found }
}

/// Run the default pipeline over `text`.
pub fn process_contract<S>(text: &str, summarizer: &S) -> PipelineOutcome
where
    S: Summarizer + ?Sized,
{
    ContractPipeline::default().run(text, summarizer)
}
