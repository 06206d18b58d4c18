//! Utility modules for beverage scoring
//!
//! Contains shared functionality used across the methods:
//! - Thresholds: Nutri-Score point tables
//! - Normalization: Quantiles and min-max scaling
//! - Ratings: Categorical label → ordinal rank
//! - Columns: Safe column extraction with validation

pub mod thresholds;
pub mod normalization;
pub mod ratings;
pub mod columns;

// Re-export commonly used types
pub use thresholds::{Bucket, ThresholdTable};
pub use normalization::{min_max_normalize, quantile, quantile_sorted, sorted_finite};
pub use ratings::{nutrition_rank, EnvironmentalLabel, OrganicFlag};
pub use columns::require_columns;
