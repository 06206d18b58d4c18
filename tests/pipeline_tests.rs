// End-to-end tests: CSV fixture → loader → scorer → report
//
// Run with: cargo test --test pipeline_tests

use approx::assert_relative_eq;
use beverage_scorer_rust::methods::nutriscore;
use beverage_scorer_rust::report::JsonFormatter;
use beverage_scorer_rust::{
    category_summaries, AnalysisReport, BeverageData, BeverageScorer, DatasetSummary,
    OrdinalLabel, Procedure, ProductReport, RecordId, ScoringConfig,
};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/beverages.csv")
}

fn load() -> BeverageData {
    BeverageData::load(&fixture_path()).expect("fixture should load")
}

fn scorer(data: &BeverageData) -> BeverageScorer {
    BeverageScorer::new(data.records.clone(), ScoringConfig::default()).expect("scorer")
}

// =========================================================================
// Section 1: Loading
// =========================================================================

#[test]
fn test_fixture_loads_with_trimmed_headers() {
    let data = load();
    assert_eq!(data.len(), 12);
    assert!(data.frame.column("Nom_Produit").is_ok());

    let evian = &data.records[0];
    assert_eq!(evian.name, "Evian");
    assert!(evian.is_water());

    let pepsi = data.find_product("pepsi max").expect("Pepsi Max present");
    assert!(pepsi.has_sweeteners());
    assert_eq!(pepsi.environmental_label, None);
    assert_relative_eq!(pepsi.additive_count, 4.0);
}

#[test]
fn test_dataset_summary() {
    let data = load();
    let summary = DatasetSummary::from_records(&data.records);

    assert_eq!(summary.products, 12);
    assert_eq!(summary.brands, 11);
    assert_eq!(summary.categories, 6);
    assert_relative_eq!(summary.organic_pct, 25.0);
    assert_relative_eq!(summary.mean_additives.unwrap(), 1.75);
    assert_eq!(summary.reference_labels.get(OrdinalLabel::A), 2);
    assert_eq!(summary.reference_labels.get(OrdinalLabel::C), 3);
    assert_eq!(summary.reference_labels.get(OrdinalLabel::E), 5);
    assert_eq!(summary.reference_labels.unlabeled, 0);
}

#[test]
fn test_top_categories() {
    let data = load();
    let categories = category_summaries(&data.records, 3);
    let names: Vec<&str> = categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Soda", "Eau", "Jus"]);
    assert_eq!(categories[0].products, 4);
    assert_relative_eq!(categories[0].mean_sugars.unwrap(), 5.1, epsilon = 1e-12);
}

// =========================================================================
// Section 2: Nutri-Score
// =========================================================================

#[test]
fn test_nutriscore_on_fixture() {
    let data = load();
    let cola = data.find_product("Coca-Cola Original").unwrap();
    let breakdown = nutriscore::score_record(cola);
    assert_eq!(breakdown.points.energy, 6);
    assert_eq!(breakdown.points.sugars, 11);
    assert_eq!(breakdown.score, 17);
    assert_eq!(breakdown.label, OrdinalLabel::E);

    let zero = nutriscore::score_record(data.find_product("Coca-Cola Zero").unwrap());
    assert_eq!(zero.points.sweeteners, 4);
    assert_eq!(zero.label, OrdinalLabel::C);

    let juice = nutriscore::score_record(data.find_product("Tropicana").unwrap());
    assert_eq!(juice.positive, 5);
    assert_eq!(juice.score, 10);
}

#[test]
fn test_nutriscore_agreement_with_reference() {
    let data = load();
    let agreement = scorer(&data).nutriscore_agreement();

    // Only the iced tea disagrees: reference D, recomputed C
    assert_eq!(agreement.metrics.total, 12);
    assert_relative_eq!(agreement.metrics.accuracy, 11.0 / 12.0, epsilon = 1e-12);
    assert_eq!(agreement.matrix.get(OrdinalLabel::D, OrdinalLabel::C), 1);
}

#[test]
fn test_nutriscore_all_matches_per_record() {
    let data = load();
    let all = scorer(&data).score_nutriscore_all();
    assert_eq!(all.len(), 12);
    for record in &data.records {
        assert_eq!(all[&record.id].score, nutriscore::score_record(record).score);
    }
}

// =========================================================================
// Section 3: ELECTRE TRI
// =========================================================================

#[test]
fn test_electre_extremes() {
    let data = load();
    let scorer = scorer(&data);

    let pessimistic = scorer.classify(Procedure::Pessimistic, 0.6).unwrap();
    let optimistic = scorer.classify(Procedure::Optimistic, 0.6).unwrap();
    assert_eq!(pessimistic.len(), 12);
    assert_eq!(optimistic.len(), 12);

    // Water sits at the best end of every minimized criterion
    assert_eq!(pessimistic[0].label, OrdinalLabel::A);
    assert_eq!(optimistic[0].label, OrdinalLabel::A);

    // Energy drink outranks no profile
    let red_bull = data.find_product("Red Bull").unwrap().id;
    assert_eq!(pessimistic[red_bull.0].label, OrdinalLabel::E);
    assert_eq!(pessimistic[red_bull.0].deciding_profile, None);
}

#[test]
fn test_parallel_classification_identical() {
    let data = load();
    let scorer = scorer(&data);
    for procedure in Procedure::BOTH {
        for lambda in [0.5, 0.6, 0.7, 0.9] {
            let seq = scorer.classify(procedure, lambda).unwrap();
            let par = scorer.classify_parallel(procedure, lambda).unwrap();
            assert_eq!(
                seq.iter().map(|a| (a.record_id, a.label)).collect::<Vec<_>>(),
                par.iter().map(|a| (a.record_id, a.label)).collect::<Vec<_>>(),
            );
        }
    }
}

#[test]
fn test_labeled_frame_export() {
    let data = load();
    let labels: Vec<OrdinalLabel> = scorer(&data)
        .classify(Procedure::Pessimistic, 0.6)
        .unwrap()
        .iter()
        .map(|a| a.label)
        .collect();

    let frame = data.with_label_column("Classe_ELECTRE", &labels).unwrap();
    assert_eq!(frame.height(), 12);
    assert!(frame.column("Classe_ELECTRE").is_ok());
}

// =========================================================================
// Section 4: SuperNutri and comparison
// =========================================================================

#[test]
fn test_supernutri_ranking() {
    let data = load();
    let ranking = scorer(&data).rank_by_supernutri(3);

    assert_eq!(ranking.best[0].name, "Cristaline");
    assert_relative_eq!(ranking.best[0].score, 0.25, epsilon = 1e-12);
    assert_eq!(ranking.worst[0].name, "Red Bull");
    assert_eq!(ranking.worst[1].name, "Coca-Cola Original");
}

#[test]
fn test_compare_methods() {
    let data = load();
    let comparisons = scorer(&data).compare_methods().unwrap();

    assert_eq!(comparisons.len(), 5);
    for comparison in &comparisons {
        assert_eq!(comparison.matrix.total(), 12);
        assert!((0.0..=1.0).contains(&comparison.metrics.accuracy));
    }
}

#[test]
fn test_custom_lambdas() {
    let data = load();
    let mut config = ScoringConfig::default();
    config.electre.lambdas_to_compare = vec![0.55, 0.65, 0.75];

    let scorer = BeverageScorer::new(data.records.clone(), config).unwrap();
    let comparisons = scorer.compare_methods().unwrap();
    assert_eq!(comparisons.len(), 7);
    assert_eq!(comparisons[4].lambda, Some(0.75));
}

// =========================================================================
// Section 5: Reports
// =========================================================================

#[test]
fn test_analysis_report_json() {
    let data = load();
    let report = AnalysisReport::build(&scorer(&data), 5, 5).unwrap();

    let json = JsonFormatter::format_analysis(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["dataset"]["products"], 12);
    assert_eq!(value["comparisons"].as_array().map(Vec::len), Some(5));
    assert_eq!(value["ranking"]["best"].as_array().map(Vec::len), Some(5));

    let text = report.render_text();
    assert!(text.contains("REFERENCE PROFILES"));
    assert!(text.contains("Red Bull"));
}

#[test]
fn test_report_classifies_at_configured_lambda() {
    let data = load();
    let default_report = AnalysisReport::build(&scorer(&data), 5, 5).unwrap();

    let config = ScoringConfig::default().with_lambda_override(Some("0.7")).unwrap();
    let strict = BeverageScorer::new(data.records.clone(), config).unwrap();
    let strict_report = AnalysisReport::build(&strict, 5, 5).unwrap();

    assert_eq!(default_report.working_lambda.lambda, 0.6);
    assert_eq!(strict_report.working_lambda.lambda, 0.7);

    // comparisons run λ ∈ {0.6, 0.7} × {pessimistic, optimistic}
    let pessimistic = |report: &AnalysisReport| {
        let run = &report.working_lambda.procedures[0];
        assert_eq!(run.procedure, Procedure::Pessimistic);
        run.accuracy
    };
    assert_relative_eq!(pessimistic(&default_report), default_report.comparisons[0].metrics.accuracy);
    assert_relative_eq!(pessimistic(&strict_report), strict_report.comparisons[2].metrics.accuracy);
    assert!((pessimistic(&default_report) - pessimistic(&strict_report)).abs() > 1e-9);

    assert!(default_report.render_text().contains("CLASSIFICATION AT λ = 0.6"));
    assert!(strict_report.render_text().contains("CLASSIFICATION AT λ = 0.7"));
}

#[test]
fn test_product_report() {
    let data = load();
    let scorer = scorer(&data);
    let orangina = data.find_product("orangina").unwrap();
    let report = ProductReport::build(&scorer, orangina).unwrap();

    assert_eq!(report.product.id, RecordId(4));
    assert_eq!(report.nutriscore.score, 15);
    assert_eq!(report.electre.len(), 2);

    let text = report.render_text();
    assert!(text.contains("Orangina"));
    assert!(text.contains("Nutri-Score: E (15)"));
}
