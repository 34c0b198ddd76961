use serde::{Deserialize, Serialize};

/// One step of a survival curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPoint {
    pub time: f64,
    /// Survival probability in `[0, 1]`.
    pub survival: f64,
}

impl SurvivalPoint {
    #[must_use]
    pub const fn new(time: f64, survival: f64) -> Self {
        Self { time, survival }
    }

    /// The `(0, 1.0)` point every non-empty curve starts from.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0.0, 1.0)
    }
}
