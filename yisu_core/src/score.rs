use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::record::Record;

/// Ordered, duplicate-free list of factors recognised in a query.
///
/// Distinctness is case-insensitive: `EGFR` and `egfr` are the same factor,
/// and the first spelling seen is the one kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorSet(Vec<String>);

impl FactorSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a factor unless an equivalent one is already present.
    ///
    /// Returns `true` if the factor was added.
    pub fn push(&mut self, factor: impl Into<String>) -> bool {
        let factor = factor.into();
        if factor.is_empty() || self.contains(&factor) {
            return false;
        }
        self.0.push(factor);
        true
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, factor: &str) -> bool {
        let key = factor.to_uppercase();
        self.0.iter().any(|f| f.to_uppercase() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FactorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for factor in iter {
            set.push(factor);
        }
        set
    }
}

/// A corpus record that matched a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// 1-based position in the ranked list.
    pub rank: usize,
    pub score: u32,
    /// Position of the record in the corpus it was scored from.
    pub index: usize,
    pub record: Record,
}

/// Result of scoring a corpus against one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub ranked: Vec<ScoredRecord>,
    pub factors: FactorSet,
}

impl SearchOutcome {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// No record matched. This is a normal outcome, not an error.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    #[must_use]
    pub fn matched_indices(&self) -> HashSet<usize> {
        self.ranked.iter().map(|r| r.index).collect()
    }

    /// Split `corpus` into (matched, background), both in corpus order.
    ///
    /// `corpus` must be the slice this outcome was scored from. Every record
    /// lands in exactly one side.
    #[must_use]
    pub fn partition<'a>(&self, corpus: &'a [Record]) -> (Vec<&'a Record>, Vec<&'a Record>) {
        let matched = self.matched_indices();
        let mut hits = Vec::with_capacity(matched.len());
        let mut rest = Vec::with_capacity(corpus.len().saturating_sub(matched.len()));
        for (i, record) in corpus.iter().enumerate() {
            if matched.contains(&i) {
                hits.push(record);
            } else {
                rest.push(record);
            }
        }
        (hits, rest)
    }
}
