//! Human and machine readable renderings of a [`PipelineOutcome`].
//!
//! The text layout is one block per record:
//!
//! ```text
//! Clause 1
//! Original   : Clause 4.2 In the event of termination, ...
//! Simplified : Either party must give 30 days' notice ...
//! Validation : Requires legal review for compliance.
//! --------------------------------------------------------------------------------
//! ```
//!
//! With a width set, long values wrap under their first character.

use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::PipelineOutcome;

/// Width of the dashed rule closing each record.
pub const RULE_WIDTH: usize = 80;

/// Narrowest column a wrapped value is allowed to use.
const MIN_VALUE_WIDTH: usize = 20;

/// `Display` adapter for an outcome.
pub struct ReportDisplay<'a> {
    outcome: &'a PipelineOutcome,
    width: Option<usize>,
}

impl<'a> ReportDisplay<'a> {
    pub fn new(outcome: &'a PipelineOutcome) -> Self {
        ReportDisplay {
            outcome,
            width: None,
        }
    }

    /// Wrap values so each line fits in `width` columns.
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }
}

impl<'a> fmt::Display for ReportDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.outcome.message() {
            return writeln!(f, "{}", message);
        }

        let rule = "-".repeat(RULE_WIDTH);
        for (idx, record) in self.outcome.records().iter().enumerate() {
            writeln!(f, "Clause {}", idx + 1)?;
            write_field(f, "Original", &record.original, self.width)?;
            write_field(f, "Simplified", &record.simplified, self.width)?;
            write_field(f, "Validation", &record.validation, self.width)?;
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

fn write_field(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    value: &str,
    width: Option<usize>,
) -> fmt::Result {
    let head = format!("{:<11}: ", name);
    let indent = UnicodeWidthStr::width(head.as_str());

    let width = match width {
        Some(width) => width,
        None => return writeln!(f, "{}{}", head, value),
    };
    let available = width.saturating_sub(indent).max(MIN_VALUE_WIDTH);

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;
    for word in value.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        if line_width > 0 && line_width + 1 + word_width > available {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }
    lines.push(line);

    for (idx, line) in lines.iter().enumerate() {
        if idx == 0 {
            writeln!(f, "{}{}", head, line)?;
        } else {
            writeln!(f, "{:indent$}{}", "", line, indent = indent)?;
        }
    }
    Ok(())
}

/// Pretty-printed JSON for an outcome.
pub fn render_json(outcome: &PipelineOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}
