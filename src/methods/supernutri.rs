//! METHOD 3: SUPERNUTRI-SCORE
//!
//! Weighted linear combination of three normalized ranks:
//!   - nutrition label (A-E)            → rank / 4
//!   - environmental label (A-PLUS..F)  → rank / 6
//!   - organic flag                     → 0 or 1
//!
//! The weighted sum is bucketed back into A-E.
//! Weights are applied as given; callers normalize beforehand if they want a [0, 1] score.

use crate::data::{ProductRecord, RecordId};
use crate::labels::OrdinalLabel;
use crate::utils::normalization::min_max_normalize;
use crate::utils::ratings::{
    nutrition_rank, EnvironmentalLabel, OrganicFlag, ENVIRONMENTAL_MAX_RANK, NUTRITION_MAX_RANK,
};
use serde::{Deserialize, Serialize};

/// Upper bounds (inclusive) of classes A-D; anything above is E
pub const CLASS_UPPER_BOUNDS: [(f64, OrdinalLabel); 4] = [
    (0.2, OrdinalLabel::A),
    (0.4, OrdinalLabel::B),
    (0.6, OrdinalLabel::C),
    (0.8, OrdinalLabel::D),
];

/// Dimension weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperNutriWeights {
    pub nutrition: f64,
    pub environmental: f64,
    pub organic: f64,
}

impl Default for SuperNutriWeights {
    fn default() -> Self {
        Self {
            nutrition: 0.5,
            environmental: 0.3,
            organic: 0.2,
        }
    }
}

impl SuperNutriWeights {
    pub fn new(nutrition: f64, environmental: f64, organic: f64) -> Self {
        Self { nutrition, environmental, organic }
    }

    pub fn total(&self) -> f64 {
        self.nutrition + self.environmental + self.organic
    }

    /// Weights divided by their sum; a zero total leaves them unchanged
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total == 0.0 {
            return *self;
        }
        Self::new(self.nutrition / total, self.environmental / total, self.organic / total)
    }
}

/// Inputs of one aggregation, already resolved to typed categories
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuperNutriInputs {
    pub nutrition: Option<OrdinalLabel>,
    pub environmental: EnvironmentalLabel,
    pub organic: OrganicFlag,
}

impl From<&ProductRecord> for SuperNutriInputs {
    fn from(record: &ProductRecord) -> Self {
        Self {
            nutrition: record.reference(),
            environmental: record.environmental(),
            organic: record.organic(),
        }
    }
}

/// Normalized components and weights behind a score
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuperNutriDetails {
    pub nutrition_norm: f64,
    pub environmental_norm: f64,
    pub organic_norm: f64,
    pub weights: SuperNutriWeights,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuperNutriScore {
    pub record_id: Option<RecordId>,
    /// Weighted sum, lower is better
    pub score: f64,
    pub label: OrdinalLabel,
    pub inputs: SuperNutriInputs,
    pub details: SuperNutriDetails,
}

/// Class of a final aggregate score
pub fn label_for_score(score: f64) -> OrdinalLabel {
    CLASS_UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| score <= *upper)
        .map_or(OrdinalLabel::E, |(_, label)| *label)
}

/// Aggregate the three dimensions
pub fn aggregate(inputs: SuperNutriInputs, weights: &SuperNutriWeights) -> SuperNutriScore {
    let nutrition_norm = min_max_normalize(
        f64::from(nutrition_rank(inputs.nutrition)),
        0.0,
        f64::from(NUTRITION_MAX_RANK),
    );
    let environmental_norm = min_max_normalize(
        f64::from(inputs.environmental.rank()),
        0.0,
        f64::from(ENVIRONMENTAL_MAX_RANK),
    );
    let organic_norm = f64::from(inputs.organic.rank());

    let score = weights.nutrition * nutrition_norm
        + weights.environmental * environmental_norm
        + weights.organic * organic_norm;

    SuperNutriScore {
        record_id: None,
        score,
        label: label_for_score(score),
        inputs,
        details: SuperNutriDetails {
            nutrition_norm,
            environmental_norm,
            organic_norm,
            weights: *weights,
        },
    }
}

/// Aggregate from raw source strings
///
/// `environmental` is `None` when the product has no environmental label; it is treated
/// as not applicable.
pub fn aggregate_raw(
    nutrition: &str,
    environmental: Option<&str>,
    organic: &str,
    weights: &SuperNutriWeights,
) -> SuperNutriScore {
    let inputs = SuperNutriInputs {
        nutrition: OrdinalLabel::parse_lenient(nutrition),
        environmental: EnvironmentalLabel::parse(environmental),
        organic: OrganicFlag::parse(organic),
    };
    aggregate(inputs, weights)
}

/// SuperNutri-Score of a product record (uses its reference Nutri-Score label)
pub fn score_record(record: &ProductRecord, weights: &SuperNutriWeights) -> SuperNutriScore {
    let mut result = aggregate(SuperNutriInputs::from(record), weights);
    result.record_id = Some(record.id);
    result
}
