//! Scoring and classification methods
//!
//! Each method lives in its own module; all of them end in an [`OrdinalLabel`](crate::OrdinalLabel).

pub mod nutriscore;
pub mod criteria;
pub mod profiles;
pub mod electre_tri;
pub mod supernutri;

pub use nutriscore::{calculate_nutriscore, NutrientInputs, PointContributions, ScoreBreakdown};
pub use criteria::{CriteriaWeights, Criterion, Direction};
pub use profiles::{build_profiles, ReferenceProfile, ReferenceProfileSet};
pub use electre_tri::{ElectreAssignment, ElectreTri, Procedure, ProfileComparison, DEFAULT_LAMBDA};
pub use supernutri::{aggregate, aggregate_raw, SuperNutriInputs, SuperNutriScore, SuperNutriWeights};
