//! Key-clause identification.
//!
//! A clause is a key clause when its lowercased text contains at least one
//! term of a [`KeywordSet`]. Matching is a plain substring scan, so
//! "terminate" does not match "termination" but "indemnity" matches
//! "indemnity obligations".

use serde::{Deserialize, Serialize};

use crate::Clause;

/// Terms that mark a clause as worth simplifying.
pub const DEFAULT_KEYWORDS: [&str; 6] = [
    "termination",
    "liability",
    "confidentiality",
    "indemnity",
    "jurisdiction",
    "payment",
];

/// Lowercase terms matched as case-insensitive substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    /// Build a set from arbitrary terms.
    ///
    /// Terms are trimmed and lowercased; blanks and duplicates are dropped,
    /// first occurrence wins.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !normalized.contains(&term) {
                normalized.push(term);
            }
        }
        KeywordSet { terms: normalized }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether any term occurs in `text`, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.terms.iter().any(|term| lower.contains(term.as_str()))
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        KeywordSet::new(DEFAULT_KEYWORDS)
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(terms: Vec<String>) -> Self {
        KeywordSet::new(terms)
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.terms
    }
}

/// Keep the clauses that mention any keyword, in their original order.
pub fn identify_key_clauses(clauses: &[Clause], keywords: &KeywordSet) -> Vec<Clause> {
    let key_clauses: Vec<Clause> = clauses
        .iter()
        .filter(|clause| keywords.matches(clause.text()))
        .cloned()
        .collect();

    tracing::debug!(
        clauses = clauses.len(),
        key_clauses = key_clauses.len(),
        "filtered key clauses"
    );
    key_clauses
}
