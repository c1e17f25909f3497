//! Blocking HTTP client for the hosted inference API.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;

use clause_simplify::{ModelConfig, ModelError, ModelResult, Summarizer, Summary, SummaryParams};

use crate::{parse_response, SummaryRequest};

/// A [`Summarizer`] backed by a model served over HTTP.
///
/// Build it once per document with [`HfSummarizer::load`]; the underlying
/// connection pool is reused for every clause.
#[derive(Debug, Clone)]
pub struct HfSummarizer {
    client: Client,
    url: String,
    model: String,
    token: Option<String>,
    timeout_secs: u64,
}

impl HfSummarizer {
    /// Build a client for `config.model` at `config.endpoint`.
    ///
    /// The bearer token is read from the environment variable named by
    /// `config.token_env`; requests go out unauthenticated when it is unset.
    pub fn load(config: &ModelConfig) -> ModelResult<Self> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty());
        Self::with_token(config, token)
    }

    pub fn with_token(config: &ModelConfig, token: Option<String>) -> ModelResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Backend(format!("failed to build HTTP client: {}", e)))?;

        let url = format!(
            "{}/{}",
            config.endpoint.trim_end_matches('/'),
            config.model.trim_matches('/')
        );
        tracing::debug!(url = %url, authenticated = token.is_some(), "configured inference client");

        Ok(HfSummarizer {
            client,
            url,
            model: config.model.clone(),
            token,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, err: reqwest::Error) -> ModelError {
        transport_error(err.is_timeout(), &err, self.timeout_secs)
    }
}

/// Map a failed send or body read onto a [`ModelError`].
fn transport_error(timed_out: bool, detail: &dyn fmt::Display, timeout_secs: u64) -> ModelError {
    if timed_out {
        ModelError::Timeout {
            seconds: timeout_secs,
        }
    } else {
        ModelError::Transport(detail.to_string())
    }
}

impl Summarizer for HfSummarizer {
    fn name(&self) -> &str {
        &self.model
    }

    fn summarize(&self, text: &str, params: &SummaryParams) -> ModelResult<Summary> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&SummaryRequest::new(text, params));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| self.transport_error(e))?;
        tracing::trace!(status, bytes = body.len(), "inference response");

        parse_response(status, &body)
    }
}
