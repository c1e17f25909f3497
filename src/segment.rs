//! Clause segmentation.
//!
//! Contract text is split on clause labels:
//! - `Clause 4.2` / `clause 7` - clause labels
//! - `Section 3` / `SECTION 1.2.1.` - section labels
//!
//! Each label is paired with the text that follows it up to the next label or
//! the end of the document. Text before the first label (a preamble, recitals,
//! a title) is not part of any clause and is dropped.
//!
//! Note: the default segmenter recognises labels anywhere, so an inline cross
//! reference such as "see Clause 2.3" starts a new clause. Use
//! [`Segmenter::anchored`] to only accept labels at the start of a line.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(clause|section)\s*([0-9]+(?:\.[0-9]+)*)\.?")
        .expect("Invalid clause label regex")
});

static ANCHORED_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(clause|section)\s*([0-9]+(?:\.[0-9]+)*)\.?")
        .expect("Invalid anchored clause label regex")
});

/// The keyword a label starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LabelKind {
    Clause,
    Section,
}

impl LabelKind {
    fn from_text(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "clause" => Some(LabelKind::Clause),
            "section" => Some(LabelKind::Section),
            _ => None,
        }
    }
}

/// A matched clause label such as `Clause 4.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClauseLabel {
    /// Whether the label reads "Clause" or "Section"
    pub kind: LabelKind,
    /// Numeric identifier without a trailing period ("4.2", "7", "1.2.1")
    pub number: String,
    /// Label text as it appears in the document, trimmed
    pub raw: String,
}

impl ClauseLabel {
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let kind = LabelKind::from_text(caps.get(1)?.as_str())?;
        let number = caps.get(2)?.as_str().to_string();
        let raw = caps.get(0)?.as_str().trim().to_string();
        Some(ClauseLabel { kind, number, raw })
    }

    /// Numeric parts of the identifier: "4.2" -> `["4", "2"]`.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.number.split('.')
    }

    /// Nesting depth implied by the identifier ("4" -> 1, "4.2" -> 2).
    pub fn depth(&self) -> usize {
        self.parts().count()
    }
}

/// A labelled span of contract text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    pub label: ClauseLabel,
    /// Text between this label and the next, trimmed
    pub body: String,
    text: String,
}

impl Clause {
    pub fn new(label: ClauseLabel, body: &str) -> Self {
        let body = body.trim().to_string();
        let text = if body.is_empty() {
            label.raw.clone()
        } else {
            format!("{} {}", label.raw, body)
        };
        Clause { label, body, text }
    }

    /// Full clause text: `"<label> <body>"`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of whitespace-separated words, label included.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Clause {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Splits contract text into [`Clause`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Segmenter {
    anchored: bool,
}

impl Segmenter {
    /// Recognise labels anywhere in the text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only recognise labels at the start of a line (leading spaces allowed).
    pub fn anchored() -> Self {
        Segmenter { anchored: true }
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    fn pattern(&self) -> &'static Regex {
        if self.anchored {
            &*ANCHORED_LABEL_PATTERN
        } else {
            &*LABEL_PATTERN
        }
    }

    /// Split `text` into clauses in document order.
    ///
    /// Returns an empty vector when no label is found.
    pub fn segment(&self, text: &str) -> Vec<Clause> {
        let labels: Vec<(usize, usize, ClauseLabel)> = self
            .pattern()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = ClauseLabel::from_captures(&caps)?;
                Some((whole.start(), whole.end(), label))
            })
            .collect();

        if let Some(preamble) = self.preamble(text) {
            tracing::debug!(
                preamble_len = preamble.len(),
                "dropping text before the first clause label"
            );
        }

        let body_ends: Vec<usize> = labels
            .iter()
            .skip(1)
            .map(|(start, _, _)| *start)
            .chain(std::iter::once(text.len()))
            .collect();

        let clauses: Vec<Clause> = labels
            .into_iter()
            .zip(body_ends)
            .map(|((_, body_start, label), body_end)| {
                Clause::new(label, &text[body_start..body_end])
            })
            .collect();

        tracing::debug!(
            clauses = clauses.len(),
            anchored = self.anchored,
            "segmented document"
        );
        clauses
    }

    /// Text that [`Segmenter::segment`] discards: everything before the
    /// first label, or the whole document when there is no label.
    ///
    /// Returns `None` when the discarded text is empty or whitespace.
    pub fn preamble<'t>(&self, text: &'t str) -> Option<&'t str> {
        let end = self
            .pattern()
            .find(text)
            .map_or(text.len(), |m| m.start());
        let preamble = text[..end].trim();
        if preamble.is_empty() {
            None
        } else {
            Some(preamble)
        }
    }
}

/// Segment `text` with the default (unanchored) [`Segmenter`].
pub fn segment_document(text: &str) -> Vec<Clause> {
    Segmenter::new().segment(text)
}
