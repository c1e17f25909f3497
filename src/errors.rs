//! Error types for configuration loading and pipeline runs.
//!
//! Per-clause model failures are not errors at this level; they are recorded
//! on the clause (see [`crate::Simplification::Failed`]).

use thiserror::Error;

use crate::ModelError;

/// Errors that can occur while loading a [`crate::SimplifyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config: {path}: {message}")]
    Read { path: String, message: String },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {path}: {message}")]
    Parse { path: String, message: String },

    /// The values parsed but do not make sense together.
    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort a whole pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The summarization model could not be constructed.
    #[error("failed to load summarization model: {0}")]
    ModelLoad(#[source] ModelError),
}

/// Result type for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;
