//! Synthetic demo corpus.
//!
//! Four clinical scenarios with 20 patients each, followed by 100 stable
//! background follow-ups. A fixed seed reproduces the same corpus.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use yisu_core::{Record, Sex};

/// Records per clinical scenario.
const SCENARIO_SIZE: u32 = 20;
/// Background (non-scenario) records.
const BACKGROUND_SIZE: u32 = 100;
/// Total number of records in a generated corpus.
pub const MOCK_CORPUS_SIZE: usize = 4 * SCENARIO_SIZE as usize + BACKGROUND_SIZE as usize;

struct Scenario {
    prefix: &'static str,
    text: &'static str,
    age_base: u32,
    event: bool,
    sex: Sex,
}

fn scenarios() -> [Scenario; 4] {
    [
        Scenario {
            prefix: "IM",
            text: "患者高龄房颤病史，长期口服华法林。主诉：消化道出血、黑便。INR升高。",
            age_base: 80,
            event: true,
            sex: Sex::Male,
        },
        Scenario {
            prefix: "ON",
            text: "非小细胞肺癌，基因检测EGFR突变(+)。临床分期T4N2M0。预后风险高。",
            age_base: 65,
            event: true,
            sex: Sex::Female,
        },
        Scenario {
            prefix: "SG",
            text: "结肠腺癌手术后。病理报告：低分化。淋巴结转移发现N2级。高风险复发。",
            age_base: 55,
            event: true,
            sex: Sex::Male,
        },
        Scenario {
            prefix: "IO",
            text: "胃癌患者。分子检测dMMR。行新辅助免疫治疗。病理缓解明显，生存获益显著。",
            age_base: 62,
            event: false,
            sex: Sex::Female,
        },
    ]
}

const BACKGROUND_TEXT: &str = "常规临床随访病例。目前病情稳定，预后良好。";
const BACKGROUND_NOTE: &str = "常规体检及术后复查记录。";

/// Generator for the demo corpus.
pub struct MockCorpus {
    rng: StdRng,
}

impl MockCorpus {
    /// `Some(seed)` gives a reproducible corpus; `None` seeds from entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { rng }
    }

    #[must_use]
    pub fn generate(&mut self) -> Vec<Record> {
        let mut records = Vec::with_capacity(MOCK_CORPUS_SIZE);

        for scenario in scenarios() {
            for i in 1..=SCENARIO_SIZE {
                let id = format!("{}-{i:03}", scenario.prefix);
                let sex = if self.rng.gen_bool(0.8) {
                    scenario.sex.clone()
                } else {
                    opposite(&scenario.sex)
                };
                let age = scenario
                    .age_base
                    .saturating_add_signed(self.rng.gen_range(-5..=5));
                let time = f64::from(self.rng.gen_range(5_u32..=70));
                let full_record = format!(
                    "【系统存根 - {id}】\n原始临床记录：{}\n辅助检查：指标异常详见原始报告。随访计划：按临床指南定期复查。",
                    scenario.text
                );
                records.push(
                    Record::new(id, scenario.text)
                        .with_age(age)
                        .with_sex(sex)
                        .with_follow_up(time, scenario.event)
                        .with_full_record(full_record),
                );
            }
        }

        for i in 1..=BACKGROUND_SIZE {
            let sex = if self.rng.gen_bool(0.5) {
                Sex::Male
            } else {
                Sex::Female
            };
            records.push(
                Record::new(format!("B-{i:03}"), BACKGROUND_TEXT)
                    .with_age(self.rng.gen_range(30..=80))
                    .with_sex(sex)
                    .with_follow_up(f64::from(self.rng.gen_range(60_u32..=90)), false)
                    .with_full_record(BACKGROUND_NOTE),
            );
        }

        debug!("Generated mock corpus of {} records", records.len());
        records
    }
}

impl Default for MockCorpus {
    fn default() -> Self {
        Self::new(None)
    }
}

fn opposite(sex: &Sex) -> Sex {
    match sex {
        Sex::Male => Sex::Female,
        Sex::Female => Sex::Male,
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn corpus_has_expected_shape() {
        let records = MockCorpus::new(Some(7)).generate();
        assert_eq!(records.len(), MOCK_CORPUS_SIZE);

        let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), records.len(), "ids must be unique");
        assert_eq!(records[0].id, "IM-001");
        assert_eq!(records[80].id, "B-001");
    }

    #[test]
    fn values_stay_in_scenario_ranges() {
        let records = MockCorpus::new(Some(11)).generate();
        for r in records.iter().filter(|r| r.id.starts_with("IM-")) {
            assert!(r.age.is_some_and(|a| (75..=85).contains(&a)));
            assert!((5.0..=70.0).contains(&r.time));
            assert!(r.event);
        }
        for r in records.iter().filter(|r| r.id.starts_with("B-")) {
            assert!(r.age.is_some_and(|a| (30..=80).contains(&a)));
            assert!((60.0..=90.0).contains(&r.time));
            assert!(!r.event);
        }
    }

    #[test]
    fn same_seed_same_corpus() {
        let a = MockCorpus::new(Some(42)).generate();
        let b = MockCorpus::new(Some(42)).generate();
        assert_eq!(a, b);
    }
}
