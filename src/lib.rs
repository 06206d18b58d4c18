//! Beverage Scorer Rust Implementation
//!
//! Grades beverages A-E with three independent methods and measures how well they agree:
//! - `methods/nutriscore`: threshold-table Nutri-Score for beverages
//! - `methods/electre_tri`: outranking sort against quantile-based boundary profiles
//! - `methods/supernutri`: weighted nutrition / environment / organic aggregate
//! - `evaluation/`: confusion matrix and agreement metrics
//!
//! Supporting modules:
//! - `utils/`: threshold tables, quantiles, categorical ranks, column extraction
//! - `data`: CSV loading with Polars
//! - `scorer`: batch coordinator (sequential + Rayon)
//! - `summary`, `report`: dataset statistics and report formatting

pub mod error;
pub mod labels;
pub mod utils;
pub mod data;
pub mod methods;
pub mod evaluation;
pub mod config;
pub mod scorer;
pub mod summary;
pub mod report;

// Re-export commonly used types
pub use error::ScoringError;
pub use labels::OrdinalLabel;
pub use data::{BeverageData, ProductRecord, RecordId};
pub use methods::*;
pub use evaluation::{compute_metrics, ClassMetrics, ConfusionMatrix, Metrics};
pub use config::{ElectreConfig, ScoringConfig};
pub use scorer::{BeverageScorer, MethodComparison, RankedProduct, SuperNutriRanking};
pub use summary::{category_summaries, CategorySummary, DatasetSummary, LabelDistribution};
pub use report::{AnalysisReport, ProductReport};
