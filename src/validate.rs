//! Validation records.
//!
//! There is no compliance check here: every record carries the same
//! [`REVIEW_NOTE`] so a reader knows the simplified text is not legal advice.

use serde::Serialize;

use crate::{Clause, Simplification, SimplificationStatus};

/// Annotation attached to every record.
pub const REVIEW_NOTE: &str = "Requires legal review for compliance.";

/// One key clause next to its simplified text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRecord {
    pub original: String,
    pub simplified: String,
    pub validation: String,
    pub status: SimplificationStatus,
}

impl ValidationRecord {
    pub fn new(clause: &Clause, simplification: &Simplification) -> Self {
        ValidationRecord {
            original: clause.text().to_string(),
            simplified: simplification.text().into_owned(),
            validation: REVIEW_NOTE.to_string(),
            status: simplification.status(),
        }
    }
}

/// Pair each clause with its simplification.
///
/// # Panics
///
/// Panics if `originals` and `simplified` differ in length; records must stay
/// index-aligned with the clauses they came from.
pub fn validate_clauses(originals: &[Clause], simplified: &[Simplification]) -> Vec<ValidationRecord> {
    assert_eq!(
        originals.len(),
        simplified.len(),
        "every key clause needs exactly one simplification"
    );
    originals
        .iter()
        .zip(simplified)
        .map(|(clause, simplification)| ValidationRecord::new(clause, simplification))
        .collect()
}
