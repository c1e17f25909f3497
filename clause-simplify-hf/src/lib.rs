//! Hosted inference backend for clause-simplify.
//!
//! [`HfSummarizer`] implements [`clause_simplify::Summarizer`] by posting
//! clause text to a summarization model served over HTTP, by default
//! `google/flan-t5-base` on the Hugging Face inference API.
//!
//! ```ignore
//! use clause_simplify::{ContractPipeline, SimplifyConfig};
//! use clause_simplify_hf::HfSummarizer;
//!
//! let config = SimplifyConfig::default();
//! let outcome = ContractPipeline::from_config(&config)
//!     .run_with_loader(text, || HfSummarizer::load(&config.model))?;
//! ```

mod client;
mod response;

pub use client::HfSummarizer;
pub use response::{parse_response, SummaryRequest};
