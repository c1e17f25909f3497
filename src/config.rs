//! Pipeline configuration, loaded from TOML.
//!
//! Every field has a default, so an empty or missing file gives the standard
//! pipeline: the six default keywords, 30..100 token summaries with greedy
//! decoding, and `google/flan-t5-base` on the hosted inference API.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, ConfigResult, KeywordSet, Segmenter, SummaryParams, DEFAULT_KEYWORDS,
    DEFAULT_MIN_WORDS,
};

/// Settings for one simplification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimplifyConfig {
    /// Terms that make a clause a key clause.
    pub keywords: Vec<String>,
    /// Clauses with this many words or fewer are not summarized.
    pub min_words: usize,
    /// Only accept clause labels at the start of a line.
    pub anchored_labels: bool,
    pub summary: SummaryParams,
    pub model: ModelConfig,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        SimplifyConfig {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            min_words: DEFAULT_MIN_WORDS,
            anchored_labels: false,
            summary: SummaryParams::default(),
            model: ModelConfig::default(),
        }
    }
}

/// Where the summarization model is served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Base URL; the model id is appended as a path segment.
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Environment variable holding the API token, if any.
    pub token_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            model: "google/flan-t5-base".to_string(),
            timeout_secs: 60,
            token_env: "HF_API_TOKEN".to_string(),
        }
    }
}

impl SimplifyConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable together.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.keyword_set().is_empty() {
            return Err(invalid("keywords must contain at least one non-blank term"));
        }
        if self.summary.max_length == 0 {
            return Err(invalid("summary.max_length must be greater than zero"));
        }
        if self.summary.min_length > self.summary.max_length {
            return Err(invalid(format!(
                "summary.min_length ({}) exceeds summary.max_length ({})",
                self.summary.min_length, self.summary.max_length
            )));
        }
        if self.model.model.trim().is_empty() {
            return Err(invalid("model.model must not be empty"));
        }
        if self.model.timeout_secs == 0 {
            return Err(invalid("model.timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    pub fn keyword_set(&self) -> KeywordSet {
        KeywordSet::new(&self.keywords)
    }

    pub fn segmenter(&self) -> Segmenter {
        if self.anchored_labels {
            Segmenter::anchored()
        } else {
            Segmenter::new()
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        message: message.into(),
    }
}
