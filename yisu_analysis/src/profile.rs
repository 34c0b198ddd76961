//! Descriptive profile of a matched cohort.

use serde::Serialize;
use std::collections::BTreeMap;
use yisu_core::Record;

/// Width of the age histogram bins, in years.
const AGE_BAND_WIDTH: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SexCount {
    pub label: String,
    pub count: usize,
}

/// Half-open age interval `[lower, upper)` and how many records fall in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBand {
    pub lower: u32,
    pub upper: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortProfile {
    pub size: usize,
    pub corpus_size: usize,
    /// Share of the corpus in the cohort, as a percentage.
    pub enrollment_pct: f64,
    /// Mean over records that have an age; `None` if none do.
    pub mean_age: Option<f64>,
    /// Sex breakdown in order of first appearance.
    pub sex: Vec<SexCount>,
    /// Age histogram, ascending, empty bands omitted.
    pub age_bands: Vec<AgeBand>,
}

impl CohortProfile {
    pub fn build<'a, I>(cohort: I, corpus_size: usize) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut size = 0_usize;
        let mut age_sum = 0_u64;
        let mut aged = 0_usize;
        let mut sex: Vec<SexCount> = Vec::new();
        let mut bands: BTreeMap<u32, usize> = BTreeMap::new();

        for record in cohort {
            size += 1;

            if let Some(age) = record.age {
                age_sum += u64::from(age);
                aged += 1;
                *bands.entry(age / AGE_BAND_WIDTH).or_default() += 1;
            }

            let label = record.sex.label();
            match sex.iter_mut().find(|s| s.label == label) {
                Some(entry) => entry.count += 1,
                None => sex.push(SexCount {
                    label: label.to_string(),
                    count: 1,
                }),
            }
        }

        let enrollment_pct = if corpus_size == 0 {
            0.0
        } else {
            size as f64 / corpus_size as f64 * 100.0
        };
        let mean_age = (aged > 0).then(|| age_sum as f64 / aged as f64);
        let age_bands = bands
            .into_iter()
            .map(|(band, count)| AgeBand {
                lower: band.saturating_mul(AGE_BAND_WIDTH),
                upper: band.saturating_add(1).saturating_mul(AGE_BAND_WIDTH),
                count,
            })
            .collect();

        Self {
            size,
            corpus_size,
            enrollment_pct,
            mean_age,
            sex,
            age_bands,
        }
    }
}
