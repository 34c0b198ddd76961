#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod record;
pub mod score;
pub mod session;
pub mod settings;
pub mod survival;
mod util;

pub use record::{Record, Sex};
pub use score::{FactorSet, ScoredRecord, SearchOutcome};
pub use session::{CohortSession, SessionReport};
pub use settings::{ScoringConfig, ScoringWeights, StagingMarker, SurvivalConfig, TieHandling};
pub use survival::SurvivalPoint;
pub use util::corpus_fingerprint;

/// Turns a free-text query into a relevance-ranked subset of a corpus.
///
/// Implementations must be pure: the same corpus and query always yield the
/// same outcome, and records with equal scores keep their corpus order.
pub trait CohortScorer: Send + Sync {
    fn score(&self, corpus: &[Record], query: &str) -> SearchOutcome;
}

/// Produces a survival step function for one cohort.
///
/// An empty cohort yields an empty curve; otherwise the curve starts at
/// `(0, 1.0)` and never increases.
pub trait SurvivalEstimator: Send + Sync {
    fn estimate(&self, cohort: &[&Record]) -> Vec<SurvivalPoint>;
}
