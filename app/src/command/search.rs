//! Cohort search: rank, split, estimate survival and describe the cohort.

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use yisu_analysis::{CohortProfile, KaplanMeier, median_survival};
use yisu_config::Config;
use yisu_core::{CohortSession, SessionReport, SurvivalPoint};
use yisu_search::{Highlighter, QueryScorer};

use super::load_corpus;

/// Input parameters for the Search command strategy.
#[derive(Debug, Clone)]
pub struct SearchInput {
    pub query: String,
    /// Overrides `corpus.path` from the config
    pub corpus: Option<PathBuf>,
    /// Overrides `corpus.mock_seed` from the config
    pub seed: Option<u64>,
    /// Overrides `display.top_n` from the config
    pub top: Option<usize>,
    pub json: bool,
}

/// Strategy for running one cohort search session.
///
/// The corpus is moved into a [`CohortSession`] and dropped when the run
/// finishes; nothing is written to disk.
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy;

#[derive(Serialize)]
struct SearchView<'a> {
    #[serde(flatten)]
    report: &'a SessionReport,
    profile: CohortProfile,
    tie_handling: &'a str,
    matched_median: Option<f64>,
    background_median: Option<f64>,
}

impl super::CommandStrategy for SearchStrategy {
    type Input = SearchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;

        let corpus_path = input
            .corpus
            .or_else(|| config.corpus.path.as_ref().map(PathBuf::from));
        let seed = input.seed.or(config.corpus.mock_seed);
        let corpus = load_corpus(corpus_path.as_deref(), seed);

        let scorer = QueryScorer::from_config(&config.scoring);
        let estimator = KaplanMeier::from_config(&config.survival);

        let session = CohortSession::new(corpus);
        let report = session.run(&scorer, &estimator, &input.query);
        info!(
            "Session {} finished: {} of {} records matched",
            report.session_id,
            report.matched_count(),
            report.corpus_size
        );

        let profile = CohortProfile::build(
            report.outcome.ranked.iter().map(|hit| &hit.record),
            report.corpus_size,
        );
        let view = SearchView {
            report: &report,
            profile,
            tie_handling: estimator.tie_handling().as_str(),
            matched_median: median_survival(&report.matched_curve),
            background_median: median_survival(&report.background_curve),
        };

        if input.json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            let highlighter = Highlighter::new(
                config.display.highlight_open.as_str(),
                config.display.highlight_close.as_str(),
            );
            print_report(&view, &highlighter, input.top.unwrap_or(config.display.top_n));
        }

        Ok(())
    }
}

fn print_report(view: &SearchView<'_>, highlighter: &Highlighter, top_n: usize) {
    let report = view.report;
    let outcome = &report.outcome;
    let fingerprint = report.fingerprint.get(..12).unwrap_or(&report.fingerprint);

    println!("=== 医溯 Cohort Search ===\n");
    println!("Session: {}", report.session_id);
    println!(
        "Corpus: {} records (fingerprint {fingerprint})",
        report.corpus_size
    );

    if outcome.factors.is_empty() {
        println!("Factors: (none)");
    } else {
        let factors: Vec<&str> = outcome.factors.iter().collect();
        println!("Factors: {}", factors.join(", "));
    }
    println!();

    if outcome.is_empty() {
        println!("No matching records.");
        println!();
        print_curve("Background", &report.background_curve, view.background_median, false);
        return;
    }

    let profile = &view.profile;
    println!(
        "Cohort: {} / {} records ({:.1}%)",
        profile.size, profile.corpus_size, profile.enrollment_pct
    );
    if let Some(mean_age) = profile.mean_age {
        println!("  Mean age: {mean_age:.1}");
    }
    let sex: Vec<String> = profile
        .sex
        .iter()
        .map(|s| format!("{} {}", s.label, s.count))
        .collect();
    println!("  Sex: {}", sex.join(", "));
    for band in &profile.age_bands {
        println!("  {:>3}-{:<3} {}", band.lower, band.upper - 1, band.count);
    }
    println!();

    println!("Top {}:", top_n.min(outcome.ranked.len()));
    for hit in outcome.ranked.iter().take(top_n) {
        let record = &hit.record;
        let age = record
            .age
            .map_or_else(|| "-".to_string(), |a| format!("{a}岁"));
        println!(
            "  #{:<3} [{:>2}] {}  {} {}",
            hit.rank,
            hit.score,
            record.id,
            record.sex.label(),
            age
        );
        println!("        {}", highlighter.apply(&record.text, &outcome.factors));
    }
    println!();

    println!("Survival ({}):", view.tie_handling);
    print_curve("Matched", &report.matched_curve, view.matched_median, true);
    print_curve("Background", &report.background_curve, view.background_median, false);
}

/// Summary line, plus every step when `steps` is set.
fn print_curve(label: &str, curve: &[SurvivalPoint], median: Option<f64>, steps: bool) {
    let median = median.map_or_else(|| "not reached".to_string(), |m| format!("{m:.1}"));
    println!("  {label}: {} points, median {median}", curve.len());
    if steps && !curve.is_empty() {
        let points: Vec<String> = curve
            .iter()
            .map(|p| format!("({:.1}, {:.3})", p.time, p.survival))
            .collect();
        println!("    {}", points.join(" "));
    }
}
