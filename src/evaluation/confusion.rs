//! Confusion matrix between two label sequences
//!
//! Rows are ground truth, columns predictions, both indexed A..E. Pairs where either side
//! is not a valid label after cleanup are excluded from the tally and counted in
//! [`ConfusionMatrix::dropped`].

use crate::labels::OrdinalLabel;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    counts: [[u64; 5]; 5],
    dropped: usize,
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally two label sequences pairwise
    ///
    /// Each value has quote markers and surrounding whitespace stripped before lookup.
    /// If the sequences differ in length, the unmatched tail is counted as dropped.
    pub fn from_labels<T, P, I, J>(ground_truth: I, predicted: J) -> Self
    where
        T: AsRef<str>,
        P: AsRef<str>,
        I: IntoIterator<Item = T>,
        J: IntoIterator<Item = P>,
    {
        let mut matrix = Self::new();
        let mut truth_iter = ground_truth.into_iter();
        let mut pred_iter = predicted.into_iter();
        let mut unmatched = 0usize;

        loop {
            match (truth_iter.next(), pred_iter.next()) {
                (Some(truth), Some(pred)) => {
                    matrix.record_raw(truth.as_ref(), pred.as_ref());
                }
                (Some(_), None) | (None, Some(_)) => unmatched += 1,
                (None, None) => break,
            }
        }

        if unmatched > 0 {
            tracing::warn!("Label sequences differ in length; {} unmatched labels ignored", unmatched);
            matrix.dropped += unmatched;
        }
        if matrix.dropped > 0 {
            tracing::debug!("Confusion matrix: {} of {} pairs excluded", matrix.dropped, matrix.total() as usize + matrix.dropped);
        }

        matrix
    }

    /// Tally already-typed labels
    pub fn from_ordinal(ground_truth: &[OrdinalLabel], predicted: &[OrdinalLabel]) -> Self {
        let mut matrix = Self::new();
        for (truth, pred) in ground_truth.iter().zip(predicted) {
            matrix.record(*truth, *pred);
        }
        matrix.dropped = ground_truth.len().abs_diff(predicted.len());
        matrix
    }

    pub fn record(&mut self, truth: OrdinalLabel, predicted: OrdinalLabel) {
        self.counts[truth.index()][predicted.index()] += 1;
    }

    /// Tally one raw pair; returns false when it was excluded
    pub fn record_raw(&mut self, truth: &str, predicted: &str) -> bool {
        match (OrdinalLabel::parse_lenient(truth), OrdinalLabel::parse_lenient(predicted)) {
            (Some(t), Some(p)) => {
                self.record(t, p);
                true
            }
            _ => {
                self.dropped += 1;
                false
            }
        }
    }

    pub fn get(&self, truth: OrdinalLabel, predicted: OrdinalLabel) -> u64 {
        self.counts[truth.index()][predicted.index()]
    }

    pub fn counts(&self) -> &[[u64; 5]; 5] {
        &self.counts
    }

    /// Number of pairs excluded from the tally
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Sum of the diagonal (agreements)
    pub fn trace(&self) -> u64 {
        OrdinalLabel::ALL.iter().map(|&l| self.get(l, l)).sum()
    }

    /// Ground-truth count of `label`
    pub fn row_sum(&self, label: OrdinalLabel) -> u64 {
        self.counts[label.index()].iter().sum()
    }

    /// Predicted count of `label`
    pub fn column_sum(&self, label: OrdinalLabel) -> u64 {
        self.counts.iter().map(|row| row[label.index()]).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_pairs() {
        let truth = ["A", "B", "C", "C", "E"];
        let pred = ["A", "C", "C", "C", "D"];
        let m = ConfusionMatrix::from_labels(truth, pred);
        assert_eq!(m.total(), 5);
        assert_eq!(m.trace(), 3);
        assert_eq!(m.get(OrdinalLabel::C, OrdinalLabel::C), 2);
        assert_eq!(m.get(OrdinalLabel::B, OrdinalLabel::C), 1);
        assert_eq!(m.row_sum(OrdinalLabel::C), 2);
        assert_eq!(m.column_sum(OrdinalLabel::C), 3);
        assert_eq!(m.dropped(), 0);
    }

    #[test]
    fn test_normalizes_markers() {
        let m = ConfusionMatrix::from_labels(["A", " B "], ["A'", "'B'"]);
        assert_eq!(m.trace(), 2);
    }

    #[test]
    fn test_invalid_pairs_dropped() {
        let m = ConfusionMatrix::from_labels(["A", "Z", "B", ""], ["A", "A", "nan", "C"]);
        assert_eq!(m.total(), 1);
        assert_eq!(m.dropped(), 3);
    }

    #[test]
    fn test_all_invalid() {
        let m = ConfusionMatrix::from_labels(["X", "Y"], ["1", "2"]);
        assert_eq!(m.total(), 0);
        assert_eq!(m.dropped(), 2);
    }

    #[test]
    fn test_length_mismatch_counted() {
        let truth = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let pred = vec!["A"];
        let m = ConfusionMatrix::from_labels(&truth, pred);
        assert_eq!(m.total(), 1);
        assert_eq!(m.dropped(), 2);
    }

    #[test]
    fn test_from_ordinal() {
        let m = ConfusionMatrix::from_ordinal(
            &[OrdinalLabel::A, OrdinalLabel::E],
            &[OrdinalLabel::B, OrdinalLabel::E],
        );
        assert_eq!(m.get(OrdinalLabel::A, OrdinalLabel::B), 1);
        assert_eq!(m.trace(), 1);
    }
}
