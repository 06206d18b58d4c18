// Print the full analysis report as pretty JSON on stdout
//
// Environment: BEVERAGE_DATA (CSV path), SCORING_CONFIG (JSON), ELECTRE_LAMBDA, RUST_LOG

use beverage_scorer_rust::config::{data_path_from_env, ScoringConfig};
use beverage_scorer_rust::report::{JsonFormatter, DEFAULT_CATEGORY_COUNT, DEFAULT_RANKING_SIZE};
use beverage_scorer_rust::{AnalysisReport, BeverageData, BeverageScorer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beverage_scorer_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data = BeverageData::load(&data_path_from_env())?;
    let scorer = BeverageScorer::new(data.records, ScoringConfig::from_env()?)?;

    let report = AnalysisReport::build(&scorer, DEFAULT_RANKING_SIZE, DEFAULT_CATEGORY_COUNT)?;
    println!("{}", JsonFormatter::format_analysis(&report)?);

    Ok(())
}
