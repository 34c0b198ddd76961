//! Clinical factor recognition.
//!
//! A factor library decides which parts of a free-text query are treated as
//! search terms. The default library is a fixed list of drugs, diagnoses,
//! staging tokens and biomarkers matched as case-insensitive substrings.

use tracing::debug;
use yisu_core::{FactorSet, ScoringConfig};

/// Source of the factors a query is scored with.
pub trait FactorLibrary: Send + Sync {
    /// Extract the factors recognised in `query`.
    ///
    /// An empty or whitespace-only query yields an empty set.
    fn extract(&self, query: &str) -> FactorSet;
}

/// Substring-matched library of clinical factor strings.
#[derive(Debug, Clone)]
pub struct ClinicalLibrary {
    /// Library factors in scan order, paired with their upper-cased form.
    factors: Vec<(String, String)>,
}

impl ClinicalLibrary {
    /// Create a library from factors in scan order. Empty entries are ignored.
    #[must_use]
    pub fn new<I, S>(factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let factors = factors
            .into_iter()
            .map(Into::into)
            .filter(|f: &String| !f.trim().is_empty())
            .map(|f| {
                let upper = f.to_uppercase();
                (f, upper)
            })
            .collect();
        Self { factors }
    }

    /// Create a library with the built-in clinical factors.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(yisu_core::settings::default_factor_library())
    }

    #[must_use]
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.factor_library.iter().cloned())
    }

    pub fn factors(&self) -> impl Iterator<Item = &str> {
        self.factors.iter().map(|(f, _)| f.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Library factors present in the query, in library order.
    fn scan(&self, query_upper: &str) -> FactorSet {
        self.factors
            .iter()
            .filter(|(_, upper)| query_upper.contains(upper.as_str()))
            .map(|(f, _)| f.clone())
            .collect()
    }

    /// Plain keyword fallback: every whitespace token longer than one character.
    fn tokens(query: &str) -> FactorSet {
        query
            .split_whitespace()
            .filter(|t| t.chars().count() > 1)
            .collect()
    }
}

impl Default for ClinicalLibrary {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FactorLibrary for ClinicalLibrary {
    fn extract(&self, query: &str) -> FactorSet {
        if query.trim().is_empty() {
            return FactorSet::new();
        }

        let recognised = self.scan(&query.to_uppercase());
        if !recognised.is_empty() {
            debug!("Recognised {} library factors", recognised.len());
            return recognised;
        }

        let tokens = Self::tokens(query);
        debug!(
            "No library factor in query, falling back to {} raw tokens",
            tokens.len()
        );
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(query: &str) -> Vec<String> {
        ClinicalLibrary::with_defaults()
            .extract(query)
            .iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn empty_query_has_no_factors() {
        assert!(extract("").is_empty());
        assert!(extract("   ").is_empty());
    }

    #[test]
    fn recognises_factors_in_library_order() {
        assert_eq!(
            extract("我想找找75岁以上用华法林出血的房颤病人"),
            vec!["华法林", "房颤"]
        );
        assert_eq!(extract("房颤 华法林 黑便"), vec!["华法林", "房颤", "黑便"]);
    }

    #[test]
    fn recognition_is_case_insensitive_and_distinct() {
        assert_eq!(extract("egfr EGFR Egfr 突变"), vec!["EGFR"]);
        assert_eq!(extract("DMMR 胃癌"), vec!["胃癌", "dMMR"]);
    }

    #[test]
    fn generic_staging_token_matches_any_n() {
        // "N" is a bare library factor, so any query containing the letter hits it.
        assert_eq!(extract("lymph node"), vec!["N"]);
        assert_eq!(extract("T4N2M0"), vec!["T4", "N"]);
    }

    #[test]
    fn falls_back_to_tokens_when_nothing_recognised() {
        let lib = ClinicalLibrary::new(["华法林"]);
        let factors = lib.extract("高龄 x 随访 高龄 病例");
        assert_eq!(factors.iter().collect::<Vec<_>>(), vec!["高龄", "随访", "病例"]);
    }

    #[test]
    fn blank_library_entries_are_skipped() {
        let lib = ClinicalLibrary::new(["", "  ", "肺癌"]);
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.factors().collect::<Vec<_>>(), vec!["肺癌"]);
    }
}
