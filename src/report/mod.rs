//! Analysis reports
//!
//! Serializable aggregates of everything the scorer computes, built once and handed to a
//! formatter (plain text or JSON).

pub mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use crate::data::ProductRecord;
use crate::error::ScoringError;
use crate::labels::OrdinalLabel;
use crate::methods::criteria::CriteriaWeights;
use crate::methods::electre_tri::{ElectreAssignment, Procedure};
use crate::methods::nutriscore::{self, ScoreBreakdown};
use crate::methods::profiles::ReferenceProfileSet;
use crate::methods::supernutri::{self, SuperNutriScore, SuperNutriWeights};
use crate::scorer::{BeverageScorer, MethodComparison, SuperNutriRanking};
use crate::summary::{category_summaries, CategorySummary, DatasetSummary, LabelDistribution};
use serde::Serialize;

/// Products listed at each end of the SuperNutri ranking
pub const DEFAULT_RANKING_SIZE: usize = 5;

/// Categories broken down in the report
pub const DEFAULT_CATEGORY_COUNT: usize = 5;

/// Whole-dataset analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub dataset: DatasetSummary,
    pub lambda: f64,
    pub criteria_weights: CriteriaWeights,
    pub supernutri_weights: SuperNutriWeights,
    pub profiles: ReferenceProfileSet,
    pub nutriscore_agreement: MethodComparison,
    pub working_lambda: WorkingLambdaRun,
    pub comparisons: Vec<MethodComparison>,
    pub ranking: SuperNutriRanking,
    pub categories: Vec<CategorySummary>,
}

/// Both ELECTRE TRI procedures at the configured λ
#[derive(Debug, Clone, Serialize)]
pub struct WorkingLambdaRun {
    pub lambda: f64,
    pub procedures: Vec<ProcedureRun>,
    pub supernutri: LabelDistribution,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcedureRun {
    pub procedure: Procedure,
    pub labels: LabelDistribution,
    pub accuracy: f64,
}

impl WorkingLambdaRun {
    pub fn build(scorer: &BeverageScorer) -> Result<Self, ScoringError> {
        let config = scorer.config();
        let lambda = config.electre.lambda;

        let procedures = Procedure::BOTH
            .iter()
            .map(|&procedure| -> Result<ProcedureRun, ScoringError> {
                let labels: Vec<OrdinalLabel> = scorer
                    .classify_parallel(procedure, lambda)?
                    .iter()
                    .map(|a| a.label)
                    .collect();
                let agreement = scorer.reference_agreement(
                    procedure.name(),
                    Some(lambda),
                    Some(procedure),
                    &labels,
                );
                Ok(ProcedureRun {
                    procedure,
                    labels: LabelDistribution::from_labels(labels.into_iter().map(Some)),
                    accuracy: agreement.metrics.accuracy,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let supernutri = LabelDistribution::from_labels(
            scorer
                .supernutri_all(&config.supernutri)
                .iter()
                .map(|s| Some(s.label)),
        );

        Ok(Self {
            lambda,
            procedures,
            supernutri,
        })
    }
}

impl AnalysisReport {
    pub fn build(
        scorer: &BeverageScorer,
        ranking_size: usize,
        category_count: usize,
    ) -> Result<Self, ScoringError> {
        let config = scorer.config();
        let records = scorer.records();

        Ok(Self {
            dataset: DatasetSummary::from_records(records),
            lambda: config.electre.lambda,
            criteria_weights: config.electre.weights.normalized(),
            supernutri_weights: config.supernutri,
            profiles: scorer.profiles().clone(),
            nutriscore_agreement: scorer.nutriscore_agreement(),
            working_lambda: WorkingLambdaRun::build(scorer)?,
            comparisons: scorer.compare_methods()?,
            ranking: scorer.rank_by_supernutri(ranking_size),
            categories: category_summaries(records, category_count),
        })
    }

    /// Comparison with the highest accuracy; the first one listed wins a tie
    pub fn best_method(&self) -> Option<&MethodComparison> {
        self.comparisons.iter().fold(None, |best: Option<&MethodComparison>, c| match best {
            Some(b) if b.metrics.accuracy >= c.metrics.accuracy => Some(b),
            _ => Some(c),
        })
    }

    pub fn render_text(&self) -> String {
        TextFormatter::format_analysis(self)
    }
}

/// Single-product analysis
#[derive(Debug, Clone, Serialize)]
pub struct ProductReport {
    pub product: ProductRecord,
    pub nutriscore: ScoreBreakdown,
    pub electre: Vec<ElectreAssignment>,
    pub supernutri: SuperNutriScore,
}

impl ProductReport {
    /// Score one product with every method at the configured λ
    pub fn build(scorer: &BeverageScorer, product: &ProductRecord) -> Result<Self, ScoringError> {
        let config = scorer.config();
        let classifier = scorer.electre(config.electre.lambda)?;

        Ok(Self {
            product: product.clone(),
            nutriscore: nutriscore::score_record(product),
            electre: Procedure::BOTH
                .iter()
                .map(|&p| classifier.assign(product, p))
                .collect(),
            supernutri: supernutri::score_record(product, &config.supernutri),
        })
    }

    pub fn render_text(&self) -> String {
        TextFormatter::format_product(self)
    }
}
