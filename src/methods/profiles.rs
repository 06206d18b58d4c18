//! Reference Profile Builder
//!
//! Six boundary profiles b1..b6 derived from per-criterion quantiles of the dataset.
//! b1 is the most permissive (worst) boundary, b6 the most restrictive (best).
//!
//! Minimized criteria pin the best profile to the low tail:
//!   b6 = q05, b5 = q20, b4 = q40, b3 = q60, b2 = q80, b1 = q95
//! Maximized criteria mirror this:
//!   b6 = q95, b5 = q80, b4 = q60, b3 = q40, b2 = q20, b1 = q05

use crate::data::ProductRecord;
use crate::error::ScoringError;
use crate::methods::criteria::{Criterion, CriterionValues, Direction};
use crate::utils::normalization::{quantile_sorted, sorted_finite};
use serde::Serialize;

pub const PROFILE_COUNT: usize = 6;

/// Quantile used for b1..b6 on a minimized criterion (index 0 = b1)
const MINIMIZE_QUANTILES: [f64; PROFILE_COUNT] = [0.95, 0.80, 0.60, 0.40, 0.20, 0.05];

/// Quantile used for b1..b6 on a maximized criterion (index 0 = b1)
const MAXIMIZE_QUANTILES: [f64; PROFILE_COUNT] = [0.05, 0.20, 0.40, 0.60, 0.80, 0.95];

/// One boundary profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceProfile {
    /// 1..=6
    pub index: usize,
    pub values: CriterionValues,
}

impl ReferenceProfile {
    pub fn value(&self, criterion: Criterion) -> f64 {
        self.values[criterion.index()]
    }

    pub fn name(&self) -> String {
        format!("b{}", self.index)
    }
}

/// Ordered set b1..b6, built once per dataset snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceProfileSet {
    profiles: [ReferenceProfile; PROFILE_COUNT],
}

impl ReferenceProfileSet {
    /// Build from explicit values, `values[0]` = b1
    pub fn from_values(values: [CriterionValues; PROFILE_COUNT]) -> Self {
        let profiles = std::array::from_fn(|i| ReferenceProfile {
            index: i + 1,
            values: values[i],
        });
        Self { profiles }
    }

    /// Profile b`index` (1-based)
    pub fn get(&self, index: usize) -> Option<&ReferenceProfile> {
        index.checked_sub(1).and_then(|i| self.profiles.get(i))
    }

    /// Profiles b1..b6
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ReferenceProfile> {
        self.profiles.iter()
    }
}

/// Build the six reference profiles from the dataset's quantiles
///
/// NaN values are ignored. A criterion with no finite value at all yields NaN for every
/// profile, which never satisfies a concordance comparison.
///
/// # Errors
/// `ScoringError::EmptyDataset` when `records` is empty.
pub fn build_profiles(records: &[ProductRecord]) -> Result<ReferenceProfileSet, ScoringError> {
    if records.is_empty() {
        return Err(ScoringError::EmptyDataset(
            "cannot derive reference profiles from zero records".to_string(),
        ));
    }

    let mut values = [[f64::NAN; Criterion::COUNT]; PROFILE_COUNT];

    for criterion in Criterion::ALL {
        let column: Vec<f64> = records.iter().map(|r| criterion.value(r)).collect();
        let sorted = sorted_finite(&column);

        let quantiles = match criterion.direction() {
            Direction::Minimize => &MINIMIZE_QUANTILES,
            Direction::Maximize => &MAXIMIZE_QUANTILES,
        };

        for (profile_idx, &q) in quantiles.iter().enumerate() {
            values[profile_idx][criterion.index()] = quantile_sorted(&sorted, q).unwrap_or(f64::NAN);
        }
    }

    tracing::debug!("Built {} reference profiles from {} records", PROFILE_COUNT, records.len());
    Ok(ReferenceProfileSet::from_values(values))
}
