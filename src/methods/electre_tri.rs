//! METHOD 2: ELECTRE TRI (OUTRANKING SORT)
//!
//! Each record is compared with the six boundary profiles. Per criterion the partial
//! concordance is binary (no indifference or preference thresholds):
//!   - maximized: a ≥ b  ⇒ c(a,b) = 1
//!   - minimized: b ≥ a  ⇒ c(a,b) = 1
//! Global concordance C(a,b) is the weight-normalized sum; a outranks b iff C(a,b) ≥ λ.
//!
//! Two assignment procedures:
//!   - pessimistic: scan b6 → b1, stop at the first profile the record outranks
//!   - optimistic: scan b1 → b6, stop at the first profile strictly preferred to the
//!     record (profile outranks record and record does not outrank profile)
//!
//! Indifference (mutual outranking) counts for the pessimistic rule but not for the
//! optimistic one, which is what makes the two procedures diverge.

use crate::data::{ProductRecord, RecordId};
use crate::error::ScoringError;
use crate::labels::OrdinalLabel;
use crate::methods::criteria::{criterion_values, CriteriaWeights, Criterion, CriterionValues, Direction};
use crate::methods::profiles::{ReferenceProfile, ReferenceProfileSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default concordance threshold
pub const DEFAULT_LAMBDA: f64 = 0.6;

/// Assignment procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Procedure {
    Pessimistic,
    Optimistic,
}

impl Procedure {
    pub const BOTH: [Procedure; 2] = [Procedure::Pessimistic, Procedure::Optimistic];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Pessimistic => "Pessimistic",
            Self::Optimistic => "Optimistic",
        }
    }

    /// Class for a matched profile b`index`
    fn label_for_profile(self, index: usize) -> OrdinalLabel {
        match (self, index) {
            (Self::Pessimistic, 6) => OrdinalLabel::A,
            (Self::Pessimistic, 5) => OrdinalLabel::B,
            (Self::Pessimistic, 4) => OrdinalLabel::C,
            (Self::Pessimistic, 3) => OrdinalLabel::D,
            (Self::Pessimistic, _) => OrdinalLabel::E,
            (Self::Optimistic, 1) => OrdinalLabel::E,
            (Self::Optimistic, 2) => OrdinalLabel::D,
            (Self::Optimistic, 3) => OrdinalLabel::C,
            (Self::Optimistic, 4) => OrdinalLabel::B,
            (Self::Optimistic, _) => OrdinalLabel::A,
        }
    }

    /// Class when no profile matches
    const fn fallback_label(self) -> OrdinalLabel {
        match self {
            Self::Pessimistic => OrdinalLabel::E,
            Self::Optimistic => OrdinalLabel::A,
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Procedure {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pessimistic" | "pessimiste" => Ok(Self::Pessimistic),
            "optimistic" | "optimiste" => Ok(Self::Optimistic),
            _ => Err(ScoringError::UnknownProcedure(s.to_string())),
        }
    }
}

/// Outcome of comparing a record `a` with one profile `b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileComparison {
    pub profile: usize,
    /// C(a, b)
    pub concordance_ab: f64,
    /// C(b, a)
    pub concordance_ba: f64,
    pub record_outranks_profile: bool,
    pub profile_outranks_record: bool,
}

impl ProfileComparison {
    /// Profile strictly preferred: b S a and not a S b
    pub fn profile_strictly_preferred(&self) -> bool {
        self.profile_outranks_record && !self.record_outranks_profile
    }

    pub fn indifferent(&self) -> bool {
        self.profile_outranks_record && self.record_outranks_profile
    }
}

/// Class assigned to one record, with the comparisons that led to it
#[derive(Debug, Clone, Serialize)]
pub struct ElectreAssignment {
    pub record_id: RecordId,
    pub procedure: Procedure,
    pub label: OrdinalLabel,
    /// Profile that stopped the scan, `None` when the fallback class applied
    pub deciding_profile: Option<usize>,
    /// Comparisons in scan order, up to the deciding one
    pub comparisons: Vec<ProfileComparison>,
}

/// Partial concordances (c(a,b), c(b,a)) on one criterion
pub fn partial_concordance(direction: Direction, a: f64, b: f64) -> (f64, f64) {
    let indicator = |holds: bool| if holds { 1.0 } else { 0.0 };
    match direction {
        Direction::Maximize => (indicator(a >= b), indicator(b >= a)),
        Direction::Minimize => (indicator(b >= a), indicator(a >= b)),
    }
}

/// Outranking classifier
#[derive(Debug, Clone)]
pub struct ElectreTri {
    weights: CriteriaWeights,
    profiles: ReferenceProfileSet,
    lambda: f64,
}

impl ElectreTri {
    /// Create a classifier
    ///
    /// Weights are normalized to sum 1. λ outside [0, 1] is accepted but logged, since
    /// such thresholds make every (or no) comparison succeed.
    ///
    /// # Errors
    /// Rejects negative or zero-sum weight vectors.
    pub fn new(
        weights: CriteriaWeights,
        profiles: ReferenceProfileSet,
        lambda: f64,
    ) -> Result<Self, ScoringError> {
        weights.validate()?;
        if !(0.0..=1.0).contains(&lambda) {
            tracing::warn!("Concordance threshold λ={} is outside [0, 1]", lambda);
        }

        Ok(Self {
            weights: weights.normalized(),
            profiles,
            lambda,
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn weights(&self) -> &CriteriaWeights {
        &self.weights
    }

    pub fn profiles(&self) -> &ReferenceProfileSet {
        &self.profiles
    }

    /// Global concordances (C(a,b), C(b,a)) of values `a` against profile `b`
    pub fn global_concordance(&self, a: &CriterionValues, profile: &ReferenceProfile) -> (f64, f64) {
        let mut c_ab = 0.0;
        let mut c_ba = 0.0;
        let mut total = 0.0;

        for criterion in Criterion::ALL {
            let weight = self.weights.get(criterion);
            let (p_ab, p_ba) = partial_concordance(
                criterion.direction(),
                a[criterion.index()],
                profile.value(criterion),
            );
            c_ab += weight * p_ab;
            c_ba += weight * p_ba;
            total += weight;
        }

        (c_ab / total, c_ba / total)
    }

    /// Outranking test in both directions
    pub fn compare(&self, a: &CriterionValues, profile: &ReferenceProfile) -> ProfileComparison {
        let (concordance_ab, concordance_ba) = self.global_concordance(a, profile);
        ProfileComparison {
            profile: profile.index,
            concordance_ab,
            concordance_ba,
            record_outranks_profile: concordance_ab >= self.lambda,
            profile_outranks_record: concordance_ba >= self.lambda,
        }
    }

    /// Pessimistic procedure: b6 → b1, first profile outranked by the record
    pub fn assign_pessimistic(&self, record: &ProductRecord) -> ElectreAssignment {
        let values = criterion_values(record);
        let mut comparisons = Vec::new();

        for profile in self.profiles.iter().rev() {
            let comparison = self.compare(&values, profile);
            comparisons.push(comparison);
            if comparison.record_outranks_profile {
                return self.assignment(record, Procedure::Pessimistic, Some(profile.index), comparisons);
            }
        }

        self.assignment(record, Procedure::Pessimistic, None, comparisons)
    }

    /// Optimistic procedure: b1 → b6, first profile strictly preferred to the record
    pub fn assign_optimistic(&self, record: &ProductRecord) -> ElectreAssignment {
        let values = criterion_values(record);
        let mut comparisons = Vec::new();

        for profile in self.profiles.iter() {
            let comparison = self.compare(&values, profile);
            comparisons.push(comparison);
            if comparison.profile_strictly_preferred() {
                return self.assignment(record, Procedure::Optimistic, Some(profile.index), comparisons);
            }
        }

        self.assignment(record, Procedure::Optimistic, None, comparisons)
    }

    fn assignment(
        &self,
        record: &ProductRecord,
        procedure: Procedure,
        deciding_profile: Option<usize>,
        comparisons: Vec<ProfileComparison>,
    ) -> ElectreAssignment {
        let label = deciding_profile
            .map_or(procedure.fallback_label(), |idx| procedure.label_for_profile(idx));

        ElectreAssignment {
            record_id: record.id,
            procedure,
            label,
            deciding_profile,
            comparisons,
        }
    }

    pub fn assign(&self, record: &ProductRecord, procedure: Procedure) -> ElectreAssignment {
        match procedure {
            Procedure::Pessimistic => self.assign_pessimistic(record),
            Procedure::Optimistic => self.assign_optimistic(record),
        }
    }

    /// Classify every record independently, in record order
    pub fn classify(&self, records: &[ProductRecord], procedure: Procedure) -> Vec<ElectreAssignment> {
        let assignments: Vec<_> = records.iter().map(|r| self.assign(r, procedure)).collect();
        tracing::debug!(
            "ELECTRE TRI {} (λ={}): classified {} records",
            procedure, self.lambda, assignments.len()
        );
        assignments
    }

    /// Same as [`classify`](Self::classify) using Rayon across records
    pub fn classify_parallel(&self, records: &[ProductRecord], procedure: Procedure) -> Vec<ElectreAssignment> {
        records.par_iter().map(|r| self.assign(r, procedure)).collect()
    }
}
