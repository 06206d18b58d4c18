//! Beverage Scorer - Main coordinator for the three classification methods
//!
//! Owns the product records and the reference profiles derived from them, and runs
//! Nutri-Score, ELECTRE TRI and SuperNutri-Score over the whole table. Each method is
//! compared against the reference Nutri-Score label printed in the source data.
//! Includes both sequential and parallel (Rayon) batch variants.

use crate::config::ScoringConfig;
use crate::data::{ProductRecord, RecordId};
use crate::error::ScoringError;
use crate::evaluation::{compute_metrics, ConfusionMatrix, Metrics};
use crate::labels::OrdinalLabel;
use crate::methods::electre_tri::{ElectreAssignment, ElectreTri, Procedure};
use crate::methods::nutriscore::{self, ScoreBreakdown};
use crate::methods::profiles::{build_profiles, ReferenceProfileSet};
use crate::methods::supernutri::{self, SuperNutriScore, SuperNutriWeights};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;

/// Main beverage scorer
#[derive(Debug, Clone)]
pub struct BeverageScorer {
    records: Vec<ProductRecord>,
    profiles: ReferenceProfileSet,
    config: ScoringConfig,
}

/// Agreement of one method with the reference labels
#[derive(Debug, Clone, Serialize)]
pub struct MethodComparison {
    pub method: String,
    pub lambda: Option<f64>,
    pub procedure: Option<Procedure>,
    pub matrix: ConfusionMatrix,
    pub metrics: Metrics,
}

/// One entry of a SuperNutri ranking
#[derive(Debug, Clone, Serialize)]
pub struct RankedProduct {
    pub record_id: RecordId,
    pub name: String,
    pub brand: String,
    pub score: f64,
    pub label: OrdinalLabel,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SuperNutriRanking {
    /// Lowest scores first
    pub best: Vec<RankedProduct>,
    /// Highest scores first
    pub worst: Vec<RankedProduct>,
}

/// Reference label text of every record, empty when missing
fn reference_labels(records: &[ProductRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.reference_label.as_deref().unwrap_or(""))
        .collect()
}

impl BeverageScorer {
    /// Initialize the scorer and derive the reference profiles
    ///
    /// # Errors
    /// `ScoringError::EmptyDataset` when `records` is empty.
    pub fn new(records: Vec<ProductRecord>, config: ScoringConfig) -> Result<Self, ScoringError> {
        let profiles = build_profiles(&records)?;

        tracing::info!("Beverage scorer initialized");
        tracing::info!("  Products: {}", records.len());
        tracing::info!("  λ: {}", config.electre.lambda);

        Ok(Self {
            records,
            profiles,
            config,
        })
    }

    /// Swap in a new dataset snapshot; profiles are rebuilt from it
    ///
    /// On error the scorer keeps its previous records and profiles.
    pub fn replace_records(&mut self, records: Vec<ProductRecord>) -> Result<(), ScoringError> {
        let profiles = build_profiles(&records)?;
        tracing::info!("Replaced dataset: {} -> {} products", self.records.len(), records.len());
        self.records = records;
        self.profiles = profiles;
        Ok(())
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn profiles(&self) -> &ReferenceProfileSet {
        &self.profiles
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn record(&self, id: RecordId) -> Option<&ProductRecord> {
        self.records.get(id.0).filter(|r| r.id == id)
    }

    /// ELECTRE TRI classifier over the cached profiles with the configured weights
    pub fn electre(&self, lambda: f64) -> Result<ElectreTri, ScoringError> {
        ElectreTri::new(
            self.config.electre.weights,
            self.profiles.clone(),
            lambda,
        )
    }

    // ========================================================================
    // Nutri-Score
    // ========================================================================

    /// Computed Nutri-Score of every record, keyed by record identity
    pub fn score_nutriscore_all(&self) -> FxHashMap<RecordId, ScoreBreakdown> {
        self.records
            .par_iter()
            .map(|r| (r.id, nutriscore::score_record(r)))
            .collect()
    }

    /// Computed Nutri-Score labels in record order
    pub fn nutriscore_labels(&self) -> Vec<OrdinalLabel> {
        self.records
            .iter()
            .map(|r| nutriscore::score_record(r).label)
            .collect()
    }

    /// Reference label vs recomputed label
    pub fn nutriscore_agreement(&self) -> MethodComparison {
        let comparison = self.reference_agreement(
            "Nutri-Score (recomputed)",
            None,
            None,
            &self.nutriscore_labels(),
        );
        tracing::info!(
            "Nutri-Score recomputation agreement: {:.1}%",
            comparison.metrics.accuracy * 100.0
        );
        comparison
    }

    // ========================================================================
    // ELECTRE TRI
    // ========================================================================

    /// Classify every record (sequential)
    pub fn classify(&self, procedure: Procedure, lambda: f64) -> Result<Vec<ElectreAssignment>, ScoringError> {
        Ok(self.electre(lambda)?.classify(&self.records, procedure))
    }

    /// Classify every record across threads; identical output to [`classify`](Self::classify)
    pub fn classify_parallel(
        &self,
        procedure: Procedure,
        lambda: f64,
    ) -> Result<Vec<ElectreAssignment>, ScoringError> {
        let assignments = self.electre(lambda)?.classify_parallel(&self.records, procedure);
        tracing::debug!(
            "ELECTRE TRI {} (λ={}): classified {} records in parallel",
            procedure, lambda, assignments.len()
        );
        Ok(assignments)
    }

    // ========================================================================
    // SuperNutri-Score
    // ========================================================================

    /// SuperNutri-Score of every record, in record order
    pub fn supernutri_all(&self, weights: &SuperNutriWeights) -> Vec<SuperNutriScore> {
        self.records
            .par_iter()
            .map(|r| supernutri::score_record(r, weights))
            .collect()
    }

    /// Best and worst `n` products by SuperNutri score (configured weights)
    ///
    /// Equal scores keep record order in both lists.
    pub fn rank_by_supernutri(&self, n: usize) -> SuperNutriRanking {
        let scored: Vec<(&ProductRecord, SuperNutriScore)> = self
            .records
            .iter()
            .zip(self.supernutri_all(&self.config.supernutri))
            .collect();

        let by_score = |a: &(&ProductRecord, SuperNutriScore), b: &(&ProductRecord, SuperNutriScore)| {
            a.1.score.partial_cmp(&b.1.score).unwrap_or(Ordering::Equal)
        };

        let mut ascending: Vec<&(&ProductRecord, SuperNutriScore)> = scored.iter().collect();
        ascending.sort_by(|a, b| by_score(a, b).then_with(|| a.0.id.cmp(&b.0.id)));

        let mut descending: Vec<&(&ProductRecord, SuperNutriScore)> = scored.iter().collect();
        descending.sort_by(|a, b| by_score(b, a).then_with(|| a.0.id.cmp(&b.0.id)));

        let entry = |(record, score): &&(&ProductRecord, SuperNutriScore)| RankedProduct {
            record_id: record.id,
            name: record.name.clone(),
            brand: record.brand.clone(),
            score: score.score,
            label: score.label,
        };

        SuperNutriRanking {
            best: ascending.iter().take(n).map(entry).collect(),
            worst: descending.iter().take(n).map(entry).collect(),
        }
    }

    // ========================================================================
    // Method comparison
    // ========================================================================

    /// Agreement of `predicted` (record order) with the reference labels
    pub fn reference_agreement(
        &self,
        method: &str,
        lambda: Option<f64>,
        procedure: Option<Procedure>,
        predicted: &[OrdinalLabel],
    ) -> MethodComparison {
        let letters: Vec<&str> = predicted.iter().map(|l| l.letter()).collect();
        let matrix = ConfusionMatrix::from_labels(reference_labels(&self.records), letters);
        let metrics = compute_metrics(&matrix);

        MethodComparison {
            method: method.to_string(),
            lambda,
            procedure,
            matrix,
            metrics,
        }
    }

    /// One ELECTRE TRI run compared with the reference labels
    pub fn electre_agreement(&self, procedure: Procedure, lambda: f64) -> Result<MethodComparison, ScoringError> {
        let labels: Vec<OrdinalLabel> = self
            .classify_parallel(procedure, lambda)?
            .iter()
            .map(|a| a.label)
            .collect();
        let comparison = self.reference_agreement(
            &format!("ELECTRE TRI {}", procedure),
            Some(lambda),
            Some(procedure),
            &labels,
        );

        tracing::info!(
            "ELECTRE {} λ={}: accuracy {:.1}%",
            procedure, lambda, comparison.metrics.accuracy * 100.0
        );
        Ok(comparison)
    }

    /// SuperNutri labels (configured weights) compared with the reference labels
    pub fn supernutri_agreement(&self) -> MethodComparison {
        let labels: Vec<OrdinalLabel> = self
            .supernutri_all(&self.config.supernutri)
            .iter()
            .map(|s| s.label)
            .collect();
        let comparison = self.reference_agreement("SuperNutri-Score", None, None, &labels);
        tracing::info!("SuperNutri-Score: accuracy {:.1}%", comparison.metrics.accuracy * 100.0);
        comparison
    }

    /// Every configured λ × procedure, plus SuperNutri, against the reference labels
    pub fn compare_methods(&self) -> Result<Vec<MethodComparison>, ScoringError> {
        let mut comparisons = Vec::new();
        for &lambda in &self.config.electre.lambdas_to_compare {
            for procedure in Procedure::BOTH {
                comparisons.push(self.electre_agreement(procedure, lambda)?);
            }
        }
        comparisons.push(self.supernutri_agreement());
        Ok(comparisons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn product(id: usize, name: &str, category: &str, sugars: f64, label: &str, green: Option<&str>, bio: &str) -> ProductRecord {
        ProductRecord {
            id: RecordId(id),
            name: name.to_string(),
            brand: format!("Brand {}", id),
            category: category.to_string(),
            energy_kj: sugars * 17.0,
            sugars_g: sugars,
            salt_g: 0.01,
            fruit_veg_pct: 0.0,
            additive_count: (sugars / 3.0).floor(),
            reference_label: Some(label.to_string()),
            environmental_label: green.map(str::to_string),
            organic_label: bio.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<ProductRecord> {
        vec![
            product(0, "Eau minérale", "Eau", 0.0, "A", Some("A"), "NON"),
            product(1, "Thé glacé", "Thé", 4.5, "C", Some("B"), "OUI"),
            product(2, "Cola", "Soda", 10.6, "E", Some("D"), "NON"),
            product(3, "Limonade", "Soda", 9.0, "E", None, "NON"),
            product(4, "Jus de pomme", "Jus", 10.0, "'C'", Some("C"), "OUI"),
        ]
    }

    fn scorer() -> BeverageScorer {
        BeverageScorer::new(sample(), ScoringConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = BeverageScorer::new(Vec::new(), ScoringConfig::default()).unwrap_err();
        assert!(matches!(err, ScoringError::EmptyDataset(_)));
    }

    #[test]
    fn test_replace_records_rebuilds_profiles() {
        let mut scorer = scorer();
        let original = scorer.profiles().clone();

        assert!(scorer.replace_records(Vec::new()).is_err());
        assert_eq!(scorer.records().len(), 5);
        assert_eq!(scorer.profiles(), &original);

        let smaller = sample()[..2].to_vec();
        scorer.replace_records(smaller.clone()).unwrap();
        assert_eq!(scorer.records().len(), 2);
        assert_eq!(scorer.profiles(), &build_profiles(&smaller).unwrap());
        assert_ne!(scorer.profiles(), &original);
    }

    #[test]
    fn test_ranking_ties_keep_record_order() {
        let same = |id| product(id, "Cola", "Soda", 10.6, "E", Some("D"), "NON");
        let scorer = BeverageScorer::new((0..4).map(same).collect(), ScoringConfig::default()).unwrap();

        let ranking = scorer.rank_by_supernutri(2);
        let best: Vec<RecordId> = ranking.best.iter().map(|p| p.record_id).collect();
        let worst: Vec<RecordId> = ranking.worst.iter().map(|p| p.record_id).collect();
        assert_eq!(best, vec![RecordId(0), RecordId(1)]);
        assert_eq!(worst, vec![RecordId(0), RecordId(1)]);
    }

    #[test]
    fn test_electre_agreement_uses_requested_lambda() {
        let scorer = scorer();
        let comparison = scorer.electre_agreement(Procedure::Optimistic, 0.9).unwrap();
        assert_eq!(comparison.lambda, Some(0.9));
        assert_eq!(comparison.procedure, Some(Procedure::Optimistic));

        let labels: Vec<OrdinalLabel> = scorer
            .classify(Procedure::Optimistic, 0.9)
            .unwrap()
            .iter()
            .map(|a| a.label)
            .collect();
        let expected = scorer.reference_agreement("x", None, None, &labels);
        assert_eq!(comparison.matrix, expected.matrix);
    }

    #[test]
    fn test_nutriscore_all_keyed_by_id() {
        let scorer = scorer();
        let scores = scorer.score_nutriscore_all();
        assert_eq!(scores.len(), 5);
        assert!(scores[&RecordId(0)].is_water);
        assert_eq!(scores[&RecordId(0)].label, OrdinalLabel::A);
        assert_eq!(scores[&RecordId(2)].label, OrdinalLabel::E);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scorer = scorer();
        for procedure in Procedure::BOTH {
            let seq = scorer.classify(procedure, 0.6).unwrap();
            let par = scorer.classify_parallel(procedure, 0.6).unwrap();
            let seq: Vec<_> = seq.iter().map(|a| (a.record_id, a.label)).collect();
            let par: Vec<_> = par.iter().map(|a| (a.record_id, a.label)).collect();
            assert_eq!(seq, par);
        }
    }

    #[test]
    fn test_compare_methods_layout() {
        let comparisons = scorer().compare_methods().unwrap();
        // 2 λ × 2 procedures + SuperNutri
        assert_eq!(comparisons.len(), 5);
        assert_eq!(comparisons[0].lambda, Some(0.6));
        assert_eq!(comparisons[0].procedure, Some(Procedure::Pessimistic));
        assert_eq!(comparisons[3].lambda, Some(0.7));
        assert_eq!(comparisons[3].procedure, Some(Procedure::Optimistic));
        assert_eq!(comparisons[4].method, "SuperNutri-Score");
        for c in &comparisons {
            assert_eq!(c.metrics.total, 5);
            assert_eq!(c.metrics.dropped, 0);
        }
    }

    #[test]
    fn test_rank_by_supernutri() {
        let ranking = scorer().rank_by_supernutri(2);
        assert_eq!(ranking.best.len(), 2);
        assert_eq!(ranking.worst.len(), 2);

        // water 0.25, iced tea 0.35, apple juice 0.40, lemonade 0.85, cola 0.90
        assert_eq!(ranking.best[0].record_id, RecordId(0));
        assert_eq!(ranking.best[1].record_id, RecordId(1));
        assert_eq!(ranking.worst[0].record_id, RecordId(2));
        assert_eq!(ranking.worst[1].record_id, RecordId(3));
        assert_relative_eq!(ranking.best[0].score, 0.25, epsilon = 1e-12);
        assert!(ranking.best[0].score <= ranking.best[1].score);
        assert!(ranking.worst[0].score >= ranking.worst[1].score);
    }

    #[test]
    fn test_rank_larger_than_dataset() {
        let ranking = scorer().rank_by_supernutri(50);
        assert_eq!(ranking.best.len(), 5);
        assert_eq!(ranking.worst.len(), 5);
    }

    #[test]
    fn test_supernutri_missing_environmental_is_not_applicable() {
        let scores = scorer().supernutri_all(&SuperNutriWeights::new(0.0, 1.0, 0.0));
        // No Green-Score → rank 3 of 6
        assert_relative_eq!(scores[3].score, 0.5);
        assert_eq!(scores[3].record_id, Some(RecordId(3)));
    }

    #[test]
    fn test_record_lookup() {
        let scorer = scorer();
        assert_eq!(scorer.record(RecordId(4)).map(|r| r.name.as_str()), Some("Jus de pomme"));
        assert!(scorer.record(RecordId(9)).is_none());
    }
}
