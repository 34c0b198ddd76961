#![warn(
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
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]

pub mod highlight;
pub mod library;
pub mod scorer;
pub mod scoring;

pub use highlight::{Highlighter, highlight};
pub use library::{ClinicalLibrary, FactorLibrary};
pub use scorer::QueryScorer;
pub use scoring::{QueryContext, ScoringRule, SubstringRule};
