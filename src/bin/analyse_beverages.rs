// Beverage analysis entry point
//
// Usage:
//   analyse_beverages                  full dataset report
//   analyse_beverages <product name>   single-product analysis
//
// Environment: BEVERAGE_DATA (CSV path), SCORING_CONFIG (JSON), ELECTRE_LAMBDA, RUST_LOG

use anyhow::Context;
use beverage_scorer_rust::config::{data_path_from_env, ScoringConfig};
use beverage_scorer_rust::report::{DEFAULT_CATEGORY_COUNT, DEFAULT_RANKING_SIZE};
use beverage_scorer_rust::{AnalysisReport, BeverageData, BeverageScorer, ProductReport};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beverage_scorer_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let data_path = data_path_from_env();
    let config = ScoringConfig::from_env()?;
    tracing::info!("Configuration:");
    tracing::info!("  Data: {:?}", data_path);
    tracing::info!("  λ: {}", config.electre.lambda);

    let start = Instant::now();
    let data = BeverageData::load(&data_path)?;
    let scorer = BeverageScorer::new(data.records.clone(), config)?;

    if query.trim().is_empty() {
        let report = AnalysisReport::build(&scorer, DEFAULT_RANKING_SIZE, DEFAULT_CATEGORY_COUNT)?;
        println!("{}", report.render_text());
    } else {
        let product = data
            .find_product(&query)
            .with_context(|| format!("No product matching '{}'", query))?;
        let report = ProductReport::build(&scorer, product)?;
        println!("{}", report.render_text());
    }

    tracing::info!("Analysis completed in {:.2?}", start.elapsed());
    Ok(())
}
