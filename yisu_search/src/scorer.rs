//! Query scoring and ranking over an in-memory corpus.

use rayon::prelude::*;
use tracing::{debug, info};
use yisu_core::{CohortScorer, Record, ScoredRecord, ScoringConfig, SearchOutcome};

use crate::library::{ClinicalLibrary, FactorLibrary};
use crate::scoring::{QueryContext, ScoringRule, SubstringRule};

/// Ranks corpus records against a free-text query.
///
/// Pairs a [`FactorLibrary`] with a [`ScoringRule`]. Whatever the pair, the
/// ranking contract is the same: records scoring `0` are dropped, the rest are
/// ordered by descending score, and equal scores keep their corpus order.
pub struct QueryScorer<L = ClinicalLibrary, R = SubstringRule> {
    library: L,
    rule: R,
}

impl QueryScorer {
    /// Scorer with the built-in clinical library and default weights.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ClinicalLibrary::with_defaults(), SubstringRule::default())
    }

    #[must_use]
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            ClinicalLibrary::from_config(config),
            SubstringRule::from_config(config),
        )
    }
}

impl Default for QueryScorer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<L, R> QueryScorer<L, R>
where
    L: FactorLibrary,
    R: ScoringRule,
{
    pub const fn new(library: L, rule: R) -> Self {
        Self { library, rule }
    }

    pub const fn library(&self) -> &L {
        &self.library
    }

    pub const fn rule(&self) -> &R {
        &self.rule
    }

    /// Score and rank `corpus` against `query`.
    pub fn rank(&self, corpus: &[Record], query: &str) -> SearchOutcome {
        let factors = self.library.extract(query);
        if factors.is_empty() && query.trim().is_empty() {
            return SearchOutcome::empty();
        }

        let context = QueryContext::new(query, &factors);

        // Indexed collect keeps corpus order.
        let scores: Vec<u32> = corpus
            .par_iter()
            .map(|record| self.rule.score(&context, record))
            .collect();

        let mut hits: Vec<(usize, u32)> = scores
            .into_iter()
            .enumerate()
            .filter(|&(_, score)| score > 0)
            .collect();

        // `par_sort_by` is stable: tied scores stay in corpus order.
        hits.par_sort_by(|a, b| b.1.cmp(&a.1));

        let ranked: Vec<ScoredRecord> = hits
            .into_iter()
            .enumerate()
            .map(|(pos, (index, score))| ScoredRecord {
                rank: pos + 1,
                score,
                index,
                record: corpus[index].clone(),
            })
            .collect();

        info!(
            "Query matched {} of {} records using {} factors",
            ranked.len(),
            corpus.len(),
            factors.len()
        );
        if let Some(top) = ranked.first() {
            debug!("Top score {} at corpus index {}", top.score, top.index);
        }

        SearchOutcome { ranked, factors }
    }
}

impl<L, R> CohortScorer for QueryScorer<L, R>
where
    L: FactorLibrary,
    R: ScoringRule,
{
    fn score(&self, corpus: &[Record], query: &str) -> SearchOutcome {
        self.rank(corpus, query)
    }
}
