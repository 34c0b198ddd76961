//! Request-scoped analysis session.
//!
//! A `CohortSession` owns the corpus for exactly one scoring + estimation
//! pass. `run` consumes the session, so the corpus is dropped as soon as the
//! report is built and nothing outlives the request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::record::Record;
use crate::score::SearchOutcome;
use crate::survival::SurvivalPoint;
use crate::util::corpus_fingerprint;
use crate::{CohortScorer, SurvivalEstimator};

pub struct CohortSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    fingerprint: String,
    corpus: Vec<Record>,
}

impl CohortSession {
    #[must_use]
    pub fn new(corpus: Vec<Record>) -> Self {
        let id = Uuid::now_v7();
        let fingerprint = corpus_fingerprint(&corpus);

        let mut seen = HashSet::with_capacity(corpus.len());
        let duplicates = corpus.iter().filter(|r| !seen.insert(r.id.as_str())).count();
        if duplicates > 0 {
            warn!("Session {id}: corpus has {duplicates} duplicate record ids");
        }

        info!(
            "Opened session {id} over {} records (fingerprint {})",
            corpus.len(),
            &fingerprint[..12]
        );

        Self {
            id,
            created_at: Utc::now(),
            fingerprint,
            corpus,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    #[must_use]
    pub fn corpus(&self) -> &[Record] {
        &self.corpus
    }

    /// Score the corpus, split it, and estimate both survival curves.
    pub fn run<S, E>(self, scorer: &S, estimator: &E, query: &str) -> SessionReport
    where
        S: CohortScorer + ?Sized,
        E: SurvivalEstimator + ?Sized,
    {
        let outcome = scorer.score(&self.corpus, query);
        let (matched, background) = outcome.partition(&self.corpus);

        debug!(
            "Session {}: {} factors, {} matched, {} background",
            self.id,
            outcome.factors.len(),
            matched.len(),
            background.len()
        );

        let matched_curve = estimator.estimate(&matched);
        let background_curve = estimator.estimate(&background);
        let background_count = background.len();

        let report = SessionReport {
            session_id: self.id,
            created_at: self.created_at,
            fingerprint: self.fingerprint.clone(),
            corpus_size: self.corpus.len(),
            background_count,
            outcome,
            matched_curve,
            background_curve,
        };

        info!("Closed session {}, corpus released", self.id);
        report
    }
}

/// Everything the presentation layer needs from one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub fingerprint: String,
    pub corpus_size: usize,
    pub background_count: usize,
    pub outcome: SearchOutcome,
    pub matched_curve: Vec<SurvivalPoint>,
    pub background_curve: Vec<SurvivalPoint>,
}

impl SessionReport {
    #[must_use]
    pub const fn matched_count(&self) -> usize {
        self.outcome.ranked.len()
    }
}
