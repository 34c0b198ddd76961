//! Per-record relevance rules.

use once_cell::sync::Lazy;
use regex::Regex;
use yisu_core::{FactorSet, Record, ScoringConfig, ScoringWeights, StagingMarker};

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("Static regex pattern is guaranteed to be valid"));

/// Query-side state computed once and shared by every record of a pass.
#[derive(Debug, Clone)]
pub struct QueryContext<'a> {
    pub query: &'a str,
    pub factors: &'a FactorSet,
    /// Upper-cased factors, aligned with `factors`.
    pub factors_upper: Vec<String>,
    /// Every run of digits in the query, duplicates included.
    pub numbers: Vec<&'a str>,
}

impl<'a> QueryContext<'a> {
    #[must_use]
    pub fn new(query: &'a str, factors: &'a FactorSet) -> Self {
        Self {
            query,
            factors,
            factors_upper: factors.iter().map(str::to_uppercase).collect(),
            numbers: NUMBER_PATTERN
                .find_iter(query)
                .map(|m| m.as_str())
                .collect(),
        }
    }
}

/// Assigns a relevance score to one record.
///
/// Scores are additive integers; `0` means the record is not relevant.
pub trait ScoringRule: Send + Sync {
    fn score(&self, context: &QueryContext<'_>, record: &Record) -> u32;
}

/// Additive substring rule.
///
/// * `weights.factor` per distinct factor found in the record text
/// * `weights.staging_bonus` if the staging token was queried and the text
///   carries a qualified stage
/// * `weights.age_bonus` per query number found inside the record's age
#[derive(Debug, Clone)]
pub struct SubstringRule {
    weights: ScoringWeights,
    staging_token: String,
    qualified_upper: Vec<String>,
}

impl SubstringRule {
    #[must_use]
    pub fn new(weights: ScoringWeights, staging: &StagingMarker) -> Self {
        Self {
            weights,
            staging_token: staging.token.clone(),
            qualified_upper: staging
                .qualified
                .iter()
                .filter(|q| !q.is_empty())
                .map(|q| q.to_uppercase())
                .collect(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.weights, &config.staging)
    }

    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    fn factor_points(&self, context: &QueryContext<'_>, text_upper: &str) -> u32 {
        let hits = context
            .factors_upper
            .iter()
            .filter(|f| text_upper.contains(f.as_str()))
            .count();
        u32::try_from(hits)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.weights.factor)
    }

    fn staging_points(&self, context: &QueryContext<'_>, text_upper: &str) -> u32 {
        let requested = context.factors.contains(&self.staging_token);
        if requested && self.qualified_upper.iter().any(|q| text_upper.contains(q.as_str())) {
            self.weights.staging_bonus
        } else {
            0
        }
    }

    fn age_points(&self, context: &QueryContext<'_>, age: Option<u32>) -> u32 {
        let Some(age) = age else {
            return 0;
        };
        let age = age.to_string();
        let hits = context
            .numbers
            .iter()
            .filter(|n| age.contains(**n))
            .count();
        u32::try_from(hits)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.weights.age_bonus)
    }
}

impl Default for SubstringRule {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl ScoringRule for SubstringRule {
    fn score(&self, context: &QueryContext<'_>, record: &Record) -> u32 {
        let text_upper = record.text.to_uppercase();
        self.factor_points(context, &text_upper)
            .saturating_add(self.staging_points(context, &text_upper))
            .saturating_add(self.age_points(context, record.age))
    }
}
