//! Dataset statistics
//!
//! Descriptive counts over the loaded records: overall summary, label distributions and
//! per-category breakdowns.

use crate::data::ProductRecord;
use crate::labels::OrdinalLabel;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::collections::BTreeMap;

/// Count per label, plus values that are not a valid label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelDistribution {
    pub counts: BTreeMap<OrdinalLabel, usize>,
    pub unlabeled: usize,
}

impl LabelDistribution {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<OrdinalLabel>>,
    {
        let mut counts: BTreeMap<OrdinalLabel, usize> =
            OrdinalLabel::ALL.iter().map(|&l| (l, 0)).collect();
        let mut unlabeled = 0;

        for label in labels {
            match label {
                Some(l) => *counts.entry(l).or_insert(0) += 1,
                None => unlabeled += 1,
            }
        }

        Self { counts, unlabeled }
    }

    pub fn get(&self, label: OrdinalLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn labeled(&self) -> usize {
        self.counts.values().sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub products: usize,
    pub brands: usize,
    pub categories: usize,
    /// Share of organic products, in percent
    pub organic_pct: f64,
    pub mean_additives: Option<f64>,
    pub reference_labels: LabelDistribution,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub products: usize,
    pub reference_labels: LabelDistribution,
    pub mean_sugars: Option<f64>,
    pub mean_additives: Option<f64>,
}

/// Mean of the finite values, `None` if there are none
pub fn finite_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));

    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

impl DatasetSummary {
    pub fn from_records(records: &[ProductRecord]) -> Self {
        let brands: FxHashSet<&str> = records
            .iter()
            .map(|r| r.brand.trim())
            .filter(|b| !b.is_empty())
            .collect();
        let categories: FxHashSet<&str> = records
            .iter()
            .map(|r| r.category.trim())
            .filter(|c| !c.is_empty())
            .collect();

        let organic = records.iter().filter(|r| r.organic().is_organic()).count();
        let organic_pct = if records.is_empty() {
            0.0
        } else {
            organic as f64 / records.len() as f64 * 100.0
        };

        Self {
            products: records.len(),
            brands: brands.len(),
            categories: categories.len(),
            organic_pct,
            mean_additives: finite_mean(records.iter().map(|r| r.additive_count)),
            reference_labels: LabelDistribution::from_labels(records.iter().map(|r| r.reference())),
        }
    }
}

/// Summaries for the `top_n` most frequent categories
///
/// Ordered by product count (descending), ties by category name.
pub fn category_summaries(records: &[ProductRecord], top_n: usize) -> Vec<CategorySummary> {
    let mut groups: FxHashMap<&str, Vec<&ProductRecord>> = FxHashMap::default();
    for record in records {
        groups.entry(record.category.trim()).or_default().push(record);
    }

    let mut ordered: Vec<(&str, Vec<&ProductRecord>)> = groups.into_iter().collect();
    ordered.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

    ordered
        .into_iter()
        .take(top_n)
        .map(|(category, members)| CategorySummary {
            category: category.to_string(),
            products: members.len(),
            reference_labels: LabelDistribution::from_labels(members.iter().map(|r| r.reference())),
            mean_sugars: finite_mean(members.iter().map(|r| r.sugars_g)),
            mean_additives: finite_mean(members.iter().map(|r| r.additive_count)),
        })
        .collect()
}
