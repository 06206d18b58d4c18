//! METHOD 1: NUTRI-SCORE (BEVERAGES)
//!
//! Deterministic piecewise-linear score: negative points for energy, saturated fat,
//! sugars, salt and sweeteners (N), positive points for protein, fiber and
//! fruit/vegetable content capped at 7 (P). Final score = N - P, mapped to A-E.
//!
//! Waters short-circuit to -10 / A.

use crate::data::ProductRecord;
use crate::labels::OrdinalLabel;
use crate::utils::thresholds::{
    ENERGY, FIBER, FRUIT_VEG, MAX_POSITIVE_POINTS, PROTEIN, SALT, SATURATED_FAT, SUGARS,
    SWEETENER_POINTS,
};
use serde::Serialize;

/// Score assigned to every water
pub const WATER_SCORE: i32 = -10;

/// Class ranges on the final score (inclusive), best first
///
/// Contiguous and exhaustive over i32.
pub const SCORE_CLASSES: [(i32, i32, OrdinalLabel); 5] = [
    (i32::MIN, -2, OrdinalLabel::A),
    (-1, 2, OrdinalLabel::B),
    (3, 6, OrdinalLabel::C),
    (7, 9, OrdinalLabel::D),
    (10, i32::MAX, OrdinalLabel::E),
];

/// Nutrient inputs per 100 ml
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NutrientInputs {
    pub energy_kj: f64,
    pub saturated_fat_g: f64,
    pub sugars_g: f64,
    pub salt_g: f64,
    pub has_sweeteners: bool,
    pub protein_g: f64,
    pub fiber_g: f64,
    pub fruit_veg_pct: f64,
    pub is_water: bool,
}

impl From<&ProductRecord> for NutrientInputs {
    fn from(record: &ProductRecord) -> Self {
        Self {
            energy_kj: record.energy_kj,
            saturated_fat_g: record.saturated_fat_g,
            sugars_g: record.sugars_g,
            salt_g: record.salt_g,
            has_sweeteners: record.has_sweeteners(),
            protein_g: record.protein_g,
            fiber_g: record.fiber_g,
            fruit_veg_pct: record.fruit_veg_pct,
            is_water: record.is_water(),
        }
    }
}

/// Per-criterion point contributions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointContributions {
    pub energy: i32,
    pub saturated_fat: i32,
    pub sugars: i32,
    pub salt: i32,
    pub sweeteners: i32,
    pub protein: i32,
    pub fiber: i32,
    pub fruit_veg: i32,
}

/// Result of one Nutri-Score computation
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub is_water: bool,
    /// N component
    pub negative: i32,
    /// P component, after the cap
    pub positive: i32,
    pub points: PointContributions,
    /// N - P (signed)
    pub score: i32,
    pub label: OrdinalLabel,
    pub explanation: String,
}

/// Label for a final score
pub fn label_for_score(score: i32) -> OrdinalLabel {
    SCORE_CLASSES
        .iter()
        .find(|(min, max, _)| *min <= score && score <= *max)
        .map_or(OrdinalLabel::E, |(_, _, label)| *label)
}

/// Calculate the beverage Nutri-Score
///
/// Inputs are not validated: negative or physically impossible values still map
/// through the threshold tables.
pub fn calculate_nutriscore(inputs: &NutrientInputs) -> ScoreBreakdown {
    if inputs.is_water {
        return ScoreBreakdown {
            is_water: true,
            negative: 0,
            positive: 0,
            points: PointContributions::default(),
            score: WATER_SCORE,
            label: OrdinalLabel::A,
            explanation: "Waters are automatically classified A".to_string(),
        };
    }

    let points = PointContributions {
        energy: ENERGY.lookup(inputs.energy_kj),
        saturated_fat: SATURATED_FAT.lookup(inputs.saturated_fat_g),
        sugars: SUGARS.lookup(inputs.sugars_g),
        salt: SALT.lookup(inputs.salt_g),
        sweeteners: if inputs.has_sweeteners { SWEETENER_POINTS } else { 0 },
        protein: PROTEIN.lookup(inputs.protein_g),
        fiber: FIBER.lookup(inputs.fiber_g),
        fruit_veg: FRUIT_VEG.lookup(inputs.fruit_veg_pct),
    };

    let negative = points.energy + points.saturated_fat + points.sugars + points.salt + points.sweeteners;
    let positive = (points.protein + points.fiber + points.fruit_veg).min(MAX_POSITIVE_POINTS);
    let score = negative - positive;

    ScoreBreakdown {
        is_water: false,
        negative,
        positive,
        points,
        score,
        label: label_for_score(score),
        explanation: format!("Score = N({}) - P({}) = {}", negative, positive, score),
    }
}

/// Nutri-Score of a product record
pub fn score_record(record: &ProductRecord) -> ScoreBreakdown {
    calculate_nutriscore(&NutrientInputs::from(record))
}
