//! Classification criteria and their weights
//!
//! Eight criteria drive the outranking classifier. Five are minimized (less is better),
//! three are maximized.

use crate::data::{columns, ProductRecord};
use crate::error::ScoringError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preference direction of a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Criterion {
    Energy,
    SaturatedFat,
    Sugars,
    Salt,
    Protein,
    Fiber,
    FruitVeg,
    Additives,
}

impl Criterion {
    pub const COUNT: usize = 8;

    pub const ALL: [Criterion; Criterion::COUNT] = [
        Criterion::Energy,
        Criterion::SaturatedFat,
        Criterion::Sugars,
        Criterion::Salt,
        Criterion::Protein,
        Criterion::Fiber,
        Criterion::FruitVeg,
        Criterion::Additives,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Energy => 0,
            Self::SaturatedFat => 1,
            Self::Sugars => 2,
            Self::Salt => 3,
            Self::Protein => 4,
            Self::Fiber => 5,
            Self::FruitVeg => 6,
            Self::Additives => 7,
        }
    }

    pub const fn direction(self) -> Direction {
        match self {
            Self::Protein | Self::Fiber | Self::FruitVeg => Direction::Maximize,
            Self::Energy | Self::SaturatedFat | Self::Sugars | Self::Salt | Self::Additives => {
                Direction::Minimize
            }
        }
    }

    /// Short machine name, also the key used in weight configuration
    pub const fn key(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::SaturatedFat => "saturated_fat",
            Self::Sugars => "sugars",
            Self::Salt => "salt",
            Self::Protein => "protein",
            Self::Fiber => "fiber",
            Self::FruitVeg => "fruit_veg",
            Self::Additives => "additives",
        }
    }

    /// Source table column holding this criterion
    pub const fn column(self) -> &'static str {
        match self {
            Self::Energy => columns::ENERGY_KJ,
            Self::SaturatedFat => columns::SATURATED_FAT,
            Self::Sugars => columns::SUGARS,
            Self::Salt => columns::SALT,
            Self::Protein => columns::PROTEIN,
            Self::Fiber => columns::FIBER,
            Self::FruitVeg => columns::FRUIT_VEG,
            Self::Additives => columns::ADDITIVE_COUNT,
        }
    }

    /// Value of this criterion on a record
    pub fn value(self, record: &ProductRecord) -> f64 {
        match self {
            Self::Energy => record.energy_kj,
            Self::SaturatedFat => record.saturated_fat_g,
            Self::Sugars => record.sugars_g,
            Self::Salt => record.salt_g,
            Self::Protein => record.protein_g,
            Self::Fiber => record.fiber_g,
            Self::FruitVeg => record.fruit_veg_pct,
            Self::Additives => record.additive_count,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Criterion {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Criterion::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(needle) || c.column() == needle)
            .ok_or_else(|| ScoringError::UnknownCriterion(s.to_string()))
    }
}

/// Per-criterion criterion values in `Criterion::ALL` order
pub type CriterionValues = [f64; Criterion::COUNT];

/// Criterion values of a record
pub fn criterion_values(record: &ProductRecord) -> CriterionValues {
    Criterion::ALL.map(|c| c.value(record))
}

/// Weight per criterion
///
/// Weights are non-negative. At the point of use they are divided by their sum, so only
/// their ratios matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaWeights {
    pub energy: f64,
    pub saturated_fat: f64,
    pub sugars: f64,
    pub salt: f64,
    pub protein: f64,
    pub fiber: f64,
    pub fruit_veg: f64,
    pub additives: f64,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            energy: 0.15,
            saturated_fat: 0.10,
            sugars: 0.20,
            salt: 0.10,
            protein: 0.10,
            fiber: 0.10,
            fruit_veg: 0.15,
            additives: 0.10,
        }
    }
}

impl CriteriaWeights {
    /// Same weight for every criterion
    pub fn uniform(weight: f64) -> Self {
        Self::from_array([weight; Criterion::COUNT])
    }

    pub fn from_array(w: CriterionValues) -> Self {
        Self {
            energy: w[0],
            saturated_fat: w[1],
            sugars: w[2],
            salt: w[3],
            protein: w[4],
            fiber: w[5],
            fruit_veg: w[6],
            additives: w[7],
        }
    }

    pub fn as_array(&self) -> CriterionValues {
        [
            self.energy,
            self.saturated_fat,
            self.sugars,
            self.salt,
            self.protein,
            self.fiber,
            self.fruit_veg,
            self.additives,
        ]
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        self.as_array()[criterion.index()]
    }

    pub fn with(self, criterion: Criterion, weight: f64) -> Self {
        let mut w = self.as_array();
        w[criterion.index()] = weight;
        Self::from_array(w)
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Weights divided by their sum
    ///
    /// A zero total leaves the weights as given.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total == 0.0 {
            return *self;
        }
        Self::from_array(self.as_array().map(|w| w / total))
    }

    /// Reject negative, non-finite or zero-sum weight vectors
    pub fn validate(&self) -> Result<(), ScoringError> {
        for criterion in Criterion::ALL {
            let weight = self.get(criterion);
            if weight < 0.0 || !weight.is_finite() {
                return Err(ScoringError::NegativeWeight {
                    criterion: criterion.key().to_string(),
                    weight,
                });
            }
        }

        let total = self.total();
        if total <= 0.0 {
            return Err(ScoringError::DegenerateWeights { total });
        }
        Ok(())
    }
}
