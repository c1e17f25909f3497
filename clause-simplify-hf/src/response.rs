//! Request bodies and response parsing for the hosted inference API.
//!
//! A summarization call posts
//!
//! ```json
//! {"inputs": "...", "parameters": {"min_length": 30, "max_length": 100, "do_sample": false}}
//! ```
//!
//! and succeeds with `[{"summary_text": "..."}]`. Text2text deployments answer
//! with `generated_text` instead, which is accepted too. Failures come back as
//! `{"error": "...", "estimated_time": 20.0}` with a non-2xx status.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use clause_simplify::{ModelError, ModelResult, Summary, SummaryParams};

/// JSON body of a summarization request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRequest<'a> {
    pub inputs: &'a str,
    pub parameters: SummaryParams,
}

impl<'a> SummaryRequest<'a> {
    pub fn new(inputs: &'a str, params: &SummaryParams) -> Self {
        SummaryRequest {
            inputs,
            parameters: *params,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    #[serde(alias = "generated_text")]
    summary_text: String,
    #[serde(default)]
    score: Option<f64>,
}

/// Interpret an HTTP status and body as a summary or a [`ModelError`].
pub fn parse_response(status: u16, body: &str) -> ModelResult<Summary> {
    let value: Option<Value> = serde_json::from_str(body).ok();
    let error_message = value.as_ref().and_then(error_message);
    let retry_after = value
        .as_ref()
        .and_then(|v| v.get("estimated_time"))
        .and_then(Value::as_f64);

    match status {
        200..=299 => {}
        503 | 429 => {
            return Err(ModelError::Unavailable {
                message: error_message.unwrap_or_else(|| format!("HTTP {}", status)),
                retry_after,
            })
        }
        408 | 504 => {
            return Err(ModelError::Unavailable {
                message: error_message.unwrap_or_else(|| format!("HTTP {} gateway timeout", status)),
                retry_after,
            })
        }
        400 | 413 | 422 => {
            return Err(ModelError::InvalidInput(
                error_message.unwrap_or_else(|| format!("HTTP {}", status)),
            ))
        }
        _ => {
            return Err(ModelError::Backend(match error_message {
                Some(message) => format!("HTTP {}: {}", status, message),
                None => format!("HTTP {}", status),
            }))
        }
    }

    let value = value.ok_or_else(|| ModelError::MalformedResponse(truncate(body)))?;
    if let Some(message) = error_message {
        return Err(match retry_after {
            Some(_) => ModelError::Unavailable {
                message,
                retry_after,
            },
            None => ModelError::Backend(message),
        });
    }

    let items: Vec<SummaryItem> = match value {
        Value::Array(_) => serde_json::from_value(value)
            .map_err(|e| ModelError::MalformedResponse(e.to_string()))?,
        Value::Object(_) => vec![serde_json::from_value(value)
            .map_err(|e| ModelError::MalformedResponse(e.to_string()))?],
        other => return Err(ModelError::MalformedResponse(truncate(&other.to_string()))),
    };

    let item = items
        .into_iter()
        .next()
        .ok_or_else(|| ModelError::MalformedResponse("empty summary list".to_string()))?;

    let summary = Summary::new(item.summary_text.trim());
    Ok(match item.score {
        Some(score) => summary.with_score(score),
        None => summary,
    })
}

fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(messages) => Some(
            messages
                .iter()
                .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn truncate(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body() {
        let request = SummaryRequest::new("Clause 4.2 In the event of termination", &SummaryParams::default());
        insta::assert_snapshot!(serde_json::to_string_pretty(&request).unwrap(), @r###"
        {
          "inputs": "Clause 4.2 In the event of termination",
          "parameters": {
            "min_length": 30,
            "max_length": 100,
            "do_sample": false
          }
        }
        "###);
    }

    #[test]
    fn summary_text() {
        let summary = parse_response(200, r#"[{"summary_text": " Either party must give notice. "}]"#).unwrap();
        assert_eq!(summary.text, "Either party must give notice.");
        assert_eq!(summary.score, None);
    }

    #[test]
    fn generated_text_with_score() {
        let summary =
            parse_response(200, r#"[{"generated_text": "Pay within 30 days.", "score": 0.9}]"#).unwrap();
        assert_eq!(summary.text, "Pay within 30 days.");
        assert_eq!(summary.score, Some(0.9));
    }

    #[test]
    fn single_object_body() {
        let summary = parse_response(200, r#"{"summary_text": "Disputes go to San Francisco courts."}"#).unwrap();
        assert_eq!(summary.text, "Disputes go to San Francisco courts.");
    }

    #[test]
    fn model_loading_is_transient() {
        let err = parse_response(
            503,
            r#"{"error": "Model google/flan-t5-base is currently loading", "estimated_time": 20.5}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::Unavailable {
                message: "Model google/flan-t5-base is currently loading".to_string(),
                retry_after: Some(20.5),
            }
        );
        assert!(err.is_transient());
    }

    #[test]
    fn rate_limit_without_body() {
        let err = parse_response(429, "").unwrap_err();
        assert_eq!(
            err,
            ModelError::Unavailable {
                message: "HTTP 429".to_string(),
                retry_after: None,
            }
        );
    }

    #[test]
    fn validation_errors_are_invalid_input() {
        let err = parse_response(422, r#"{"error": ["Input is too long", "max 1024 tokens"]}"#).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidInput("Input is too long; max 1024 tokens".to_string())
        );
        assert!(!err.is_transient());
    }

    #[test]
    fn server_error_is_backend() {
        let err = parse_response(500, r#"{"error": "CUDA out of memory"}"#).unwrap_err();
        assert_eq!(err, ModelError::Backend("HTTP 500: CUDA out of memory".to_string()));
    }

    #[test]
    fn error_inside_success_status() {
        let err = parse_response(200, r#"{"error": "unknown task"}"#).unwrap_err();
        assert_eq!(err, ModelError::Backend("unknown task".to_string()));
    }

    #[test]
    fn malformed_bodies() {
        assert!(matches!(
            parse_response(200, "<html>gateway</html>"),
            Err(ModelError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_response(200, "[]"),
            Err(ModelError::MalformedResponse(message)) if message == "empty summary list"
        ));
        assert!(matches!(
            parse_response(200, r#"[{"label": "POSITIVE"}]"#),
            Err(ModelError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_response(200, "42"),
            Err(ModelError::MalformedResponse(_))
        ));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        match parse_response(200, &body) {
            Err(ModelError::MalformedResponse(message)) => {
                assert_eq!(message.len(), 203);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
