//! Integration tests for query scoring and ranking.
//!
//! These tests verify that:
//! - Ranked results are ordered by score with stable ties
//! - Only positive scores are returned, and every record lands on one side
//! - Factor extraction and weighting behave on realistic clinical text

use yisu_core::{CohortScorer, Record, ScoringConfig, Sex};
use yisu_search::{ClinicalLibrary, QueryScorer, SubstringRule};

fn clinical_corpus() -> Vec<Record> {
    vec![
        Record::new("IM-001", "患者高龄房颤病史，长期口服华法林。主诉：消化道出血、黑便。INR升高。")
            .with_age(80)
            .with_sex(Sex::Male)
            .with_follow_up(12.0, true),
        Record::new("ON-001", "非小细胞肺癌，基因检测EGFR突变(+)。临床分期T4N2M0。预后风险高。")
            .with_age(65)
            .with_sex(Sex::Female)
            .with_follow_up(20.0, true),
        Record::new("SG-001", "结肠腺癌手术后。病理报告：低分化。淋巴结转移发现N2级。高风险复发。")
            .with_age(55)
            .with_sex(Sex::Male)
            .with_follow_up(30.0, true),
        Record::new("IO-001", "胃癌患者。分子检测dMMR。行新辅助免疫治疗。病理缓解明显，生存获益显著。")
            .with_age(62)
            .with_sex(Sex::Female)
            .with_follow_up(50.0, false),
        Record::new("IM-002", "患者高龄房颤病史，长期口服华法林。主诉：消化道出血、黑便。INR升高。")
            .with_age(75)
            .with_sex(Sex::Female)
            .with_follow_up(8.0, true),
        Record::new("B-001", "常规临床随访病例。目前病情稳定，预后良好。")
            .with_age(47)
            .with_follow_up(70.0, false),
    ]
}

fn ids(outcome: &yisu_core::SearchOutcome) -> Vec<&str> {
    outcome.ranked.iter().map(|r| r.record.id.as_str()).collect()
}

#[test]
fn test_empty_query_returns_nothing() {
    let corpus = clinical_corpus();
    let outcome = QueryScorer::with_defaults().score(&corpus, "");

    assert!(outcome.ranked.is_empty());
    assert!(outcome.factors.is_empty());
}

#[test]
fn test_warfarin_bleeding_query_ranks_internal_medicine_cases() {
    let corpus = clinical_corpus();
    let outcome = QueryScorer::with_defaults().score(&corpus, "我想找找75岁以上用华法林出血的房颤病人");

    assert_eq!(
        outcome.factors.iter().collect::<Vec<_>>(),
        vec!["华法林", "房颤"]
    );
    // IM-002 gets the numeric age bonus for "75" and outranks IM-001.
    assert_eq!(ids(&outcome), vec!["IM-002", "IM-001"]);
    assert_eq!(outcome.ranked[0].score, 7);
    assert_eq!(outcome.ranked[1].score, 6);
}

#[test]
fn test_factor_and_age_scenario_with_custom_library() {
    let corpus = clinical_corpus();
    let config = ScoringConfig::default();
    let scorer = QueryScorer::new(
        ClinicalLibrary::new(["房颤", "出血"]),
        SubstringRule::from_config(&config),
    );

    let outcome = scorer.score(&corpus, "75岁房颤出血");

    assert_eq!(outcome.factors.iter().collect::<Vec<_>>(), vec!["房颤", "出血"]);
    let im002 = outcome
        .ranked
        .iter()
        .find(|r| r.record.id == "IM-002")
        .map(|r| r.score);
    let im001 = outcome
        .ranked
        .iter()
        .find(|r| r.record.id == "IM-001")
        .map(|r| r.score);
    assert_eq!(im002, Some(3 * 2 + 1));
    assert_eq!(im001, Some(3 * 2));
}

#[test]
fn test_staging_query_rewards_qualified_stage() {
    let corpus = clinical_corpus();
    let outcome = QueryScorer::with_defaults().score(&corpus, "淋巴结 N 分期");

    // "N" also occurs in "INR", so the warfarin cases match the bare token.
    let top = &outcome.ranked[0];
    assert_eq!(top.record.id, "SG-001");
    assert_eq!(top.score, 3 + 3 + 2);
    let on001 = outcome
        .ranked
        .iter()
        .find(|r| r.record.id == "ON-001")
        .map(|r| r.score);
    assert_eq!(on001, Some(3 + 2));
}

#[test]
fn test_scores_descend_and_ties_keep_corpus_order() {
    let corpus = clinical_corpus();
    let outcome = QueryScorer::with_defaults().score(&corpus, "华法林");

    for pair in outcome.ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].index < pair[1].index, "ties must keep corpus order");
        }
    }
    assert_eq!(ids(&outcome), vec!["IM-001", "IM-002"]);
    let ranks: Vec<_> = outcome.ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[test]
fn test_only_positive_scores_are_ranked() {
    let corpus = clinical_corpus();
    let outcome = QueryScorer::with_defaults().score(&corpus, "EGFR 肺癌");

    assert!(outcome.ranked.iter().all(|r| r.score > 0));
    assert_eq!(ids(&outcome), vec!["ON-001"]);
}

#[test]
fn test_repeated_factor_counted_once() {
    let corpus = clinical_corpus();
    let once = QueryScorer::with_defaults().score(&corpus, "dMMR");
    let many = QueryScorer::with_defaults().score(&corpus, "dmmr DMMR dMMR");

    assert_eq!(once.factors, many.factors);
    assert_eq!(once.ranked[0].score, many.ranked[0].score);
}

#[test]
fn test_fallback_tokens_act_as_keyword_search() {
    let corpus = clinical_corpus();
    let outcome = QueryScorer::with_defaults().score(&corpus, "预后良好 病情稳定");

    assert_eq!(
        outcome.factors.iter().collect::<Vec<_>>(),
        vec!["预后良好", "病情稳定"]
    );
    assert_eq!(ids(&outcome), vec!["B-001"]);
    assert_eq!(outcome.ranked[0].score, 6);
}

#[test]
fn test_partition_covers_corpus_for_every_query() {
    let corpus = clinical_corpus();
    let scorer = QueryScorer::with_defaults();

    for query in ["", "房颤", "N", "75", "不存在的描述", "胃癌 新辅助 免疫"] {
        let outcome = scorer.score(&corpus, query);
        let (matched, background) = outcome.partition(&corpus);
        assert_eq!(matched.len() + background.len(), corpus.len());
        assert_eq!(matched.len(), outcome.ranked.len());
        for record in &corpus {
            let in_matched = matched.iter().any(|r| r.id == record.id);
            let in_background = background.iter().any(|r| r.id == record.id);
            assert!(in_matched ^ in_background, "{} must be on exactly one side", record.id);
        }
    }
}
