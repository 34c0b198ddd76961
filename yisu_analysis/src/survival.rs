//! Kaplan–Meier survival curves.
//!
//! The default estimator steps once per record: records are sorted by time
//! (stable, so equal times keep cohort order) and every event multiplies the
//! running survival by `(n - i - 1) / (n - i)`. Ties at the same time are not
//! pooled into one risk set. `TieHandling::Grouped` opts into the textbook
//! form where all records sharing a time form a single step.

use tracing::debug;
use yisu_core::{Record, SurvivalConfig, SurvivalEstimator, SurvivalPoint, TieHandling};

/// Product-limit survival estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct KaplanMeier {
    tie_handling: TieHandling,
}

impl KaplanMeier {
    #[must_use]
    pub const fn new(tie_handling: TieHandling) -> Self {
        Self { tie_handling }
    }

    #[must_use]
    pub const fn per_record() -> Self {
        Self::new(TieHandling::PerRecord)
    }

    #[must_use]
    pub const fn grouped() -> Self {
        Self::new(TieHandling::Grouped)
    }

    #[must_use]
    pub const fn from_config(config: &SurvivalConfig) -> Self {
        Self::new(config.tie_handling)
    }

    #[must_use]
    pub const fn tie_handling(&self) -> TieHandling {
        self.tie_handling
    }

    fn sorted<'a>(cohort: &[&'a Record]) -> Vec<&'a Record> {
        let mut sorted = cohort.to_vec();
        // Stable: equal times keep cohort order.
        sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
        sorted
    }

    fn step_per_record(sorted: &[&Record]) -> Vec<SurvivalPoint> {
        let n = sorted.len();
        let mut survival = 1.0_f64;
        let mut curve = Vec::with_capacity(n + 1);
        curve.push(SurvivalPoint::origin());

        for (i, record) in sorted.iter().enumerate() {
            if record.event {
                let at_risk = n - i;
                survival *= if at_risk == 0 {
                    0.0
                } else {
                    (at_risk - 1) as f64 / at_risk as f64
                };
            }
            curve.push(SurvivalPoint::new(record.time, survival));
        }
        curve
    }

    fn step_grouped(sorted: &[&Record]) -> Vec<SurvivalPoint> {
        let n = sorted.len();
        let mut survival = 1.0_f64;
        let mut curve = vec![SurvivalPoint::origin()];

        let mut i = 0;
        while i < n {
            let time = sorted[i].time;
            let at_risk = n - i;
            let mut events = 0_usize;
            let mut j = i;
            while j < n && sorted[j].time.total_cmp(&time).is_eq() {
                if sorted[j].event {
                    events += 1;
                }
                j += 1;
            }
            if events > 0 {
                survival *= 1.0 - events as f64 / at_risk as f64;
            }
            curve.push(SurvivalPoint::new(time, survival.clamp(0.0, 1.0)));
            i = j;
        }
        curve
    }
}

impl SurvivalEstimator for KaplanMeier {
    fn estimate(&self, cohort: &[&Record]) -> Vec<SurvivalPoint> {
        if cohort.is_empty() {
            return Vec::new();
        }

        let sorted = Self::sorted(cohort);
        let curve = match self.tie_handling {
            TieHandling::PerRecord => Self::step_per_record(&sorted),
            TieHandling::Grouped => Self::step_grouped(&sorted),
        };

        debug!(
            "Estimated {} curve over {} records ({} points)",
            self.tie_handling.as_str(),
            cohort.len(),
            curve.len()
        );
        curve
    }
}

/// First time at which survival falls to 0.5 or below.
///
/// `None` when the curve never reaches the median.
#[must_use]
pub fn median_survival(curve: &[SurvivalPoint]) -> Option<f64> {
    curve.iter().find(|p| p.survival <= 0.5).map(|p| p.time)
}
