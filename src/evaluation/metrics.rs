//! Agreement metrics derived from a confusion matrix
//!
//! Every ratio defaults to 0 when its denominator is 0.

use crate::evaluation::confusion::ConfusionMatrix;
use crate::labels::OrdinalLabel;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Ground-truth count of the class
    pub support: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// trace / total
    pub accuracy: f64,
    pub per_class: BTreeMap<OrdinalLabel, ClassMetrics>,
    /// Unweighted mean of per-class F1
    pub macro_f1: f64,
    /// Pairs counted
    pub total: u64,
    /// Pairs excluded before counting
    pub dropped: usize,
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Accuracy and per-class precision / recall / F1
pub fn compute_metrics(matrix: &ConfusionMatrix) -> Metrics {
    let total = matrix.total();
    let accuracy = ratio(matrix.trace(), total);

    let mut per_class = BTreeMap::new();
    for label in OrdinalLabel::ALL {
        let tp = matrix.get(label, label);
        let fp = matrix.column_sum(label) - tp;
        let fn_ = matrix.row_sum(label) - tp;

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        per_class.insert(
            label,
            ClassMetrics {
                precision,
                recall,
                f1,
                support: matrix.row_sum(label),
            },
        );
    }

    let macro_f1 = per_class.values().map(|m| m.f1).sum::<f64>() / OrdinalLabel::ALL.len() as f64;

    Metrics {
        accuracy,
        per_class,
        macro_f1,
        total,
        dropped: matrix.dropped(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_sequences_perfect_accuracy() {
        let labels = ["A", "B", "C", "D", "E", "A", "C"];
        let metrics = compute_metrics(&ConfusionMatrix::from_labels(labels, labels));
        assert_eq!(metrics.accuracy, 1.0);
        for label in [OrdinalLabel::A, OrdinalLabel::C] {
            let m = metrics.per_class[&label];
            assert_eq!((m.precision, m.recall, m.f1), (1.0, 1.0, 1.0));
        }
    }

    #[test]
    fn test_empty_matrix() {
        let metrics = compute_metrics(&ConfusionMatrix::from_labels(["?"], ["!"]));
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.accuracy, 0.0);
        assert_eq!(metrics.dropped, 1);
        assert!(metrics.per_class.values().all(|m| m.f1 == 0.0 && !m.precision.is_nan()));
    }

    #[test]
    fn test_per_class_values() {
        // truth:   A A B B C
        // pred:    A B B B A
        let m = ConfusionMatrix::from_labels(["A", "A", "B", "B", "C"], ["A", "B", "B", "B", "A"]);
        let metrics = compute_metrics(&m);
        assert_relative_eq!(metrics.accuracy, 0.6);

        let a = metrics.per_class[&OrdinalLabel::A];
        assert_relative_eq!(a.precision, 0.5);
        assert_relative_eq!(a.recall, 0.5);
        assert_relative_eq!(a.f1, 0.5);

        let b = metrics.per_class[&OrdinalLabel::B];
        assert_relative_eq!(b.precision, 2.0 / 3.0);
        assert_relative_eq!(b.recall, 1.0);
        assert_relative_eq!(b.f1, 0.8, epsilon = 1e-12);

        let c = metrics.per_class[&OrdinalLabel::C];
        assert_eq!((c.precision, c.recall, c.f1), (0.0, 0.0, 0.0));
        assert_eq!(c.support, 1);
    }
}
