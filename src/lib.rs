#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Contract clause simplification.
//!
//! This crate runs a short, strictly forward pipeline over a contract body:
//!
//! 1. [`Segmenter`] - splits text on `Clause 4.2` / `Section 3` labels
//! 2. [`identify_key_clauses`] - keeps clauses mentioning a [`KeywordSet`] term
//! 3. [`Simplifier`] - shortens each key clause with a [`Summarizer`]
//! 4. [`validate_clauses`] - pairs original and simplified text with a review note
//!
//! [`ContractPipeline`] wires the stages together and only loads the
//! summarization model once it knows there is at least one key clause.
//!
//! ## Example
//!
//! ```
//! use clause_simplify::{process_contract, ExtractiveSummarizer, REVIEW_NOTE};
//!
//! let text = "Clause 1.1 This Agreement shall be governed by California law. \
//!             Clause 2.3 No termination shall occur without notice.";
//! let outcome = process_contract(text, &ExtractiveSummarizer);
//!
//! assert_eq!(outcome.records().len(), 1);
//! assert!(outcome.records()[0].original.starts_with("Clause 2.3"));
//! assert_eq!(outcome.records()[0].validation, REVIEW_NOTE);
//! ```

mod config;
mod errors;
mod keywords;
mod pipeline;
mod report;
mod segment;
mod simplify;
mod summarizer;
mod validate;

pub use config::{ModelConfig, SimplifyConfig};
pub use errors::{ConfigError, ConfigResult, PipelineError, PipelineResult};
pub use keywords::{identify_key_clauses, KeywordSet, DEFAULT_KEYWORDS};
pub use pipeline::{process_contract, ContractPipeline, PipelineOutcome, NO_KEY_CLAUSES_MESSAGE};
pub use report::{render_json, ReportDisplay, RULE_WIDTH};
pub use segment::{segment_document, Clause, ClauseLabel, LabelKind, Segmenter};
pub use simplify::{
    simplify_clauses, Simplification, SimplificationStatus, Simplifier, DEFAULT_MIN_WORDS,
    ERROR_PREFIX,
};
pub use summarizer::{ExtractiveSummarizer, ModelError, ModelResult, Summarizer, Summary, SummaryParams};
pub use validate::{validate_clauses, ValidationRecord, REVIEW_NOTE};
