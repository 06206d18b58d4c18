//! Categorical Rating Utilities
//!
//! Converts the three categorical inputs of the SuperNutri aggregate into ordinal ranks:
//! nutrition label (A-E), environmental label (seven-step Green-Score scale) and the
//! organic flag. Every conversion is total: unknown input resolves to a fixed default
//! rank instead of an error.

use crate::labels::OrdinalLabel;
use serde::{Deserialize, Serialize};

/// Rank used for a missing or unrecognized nutrition label (worst)
pub const NUTRITION_DEFAULT_RANK: u8 = 4;
pub const NUTRITION_MAX_RANK: u8 = 4;

/// Rank used for "not applicable" and unrecognized environmental labels (midpoint)
pub const ENVIRONMENTAL_DEFAULT_RANK: u8 = 3;
pub const ENVIRONMENTAL_MAX_RANK: u8 = 6;

/// Rank used for an unrecognized organic flag (treated as non-organic)
pub const ORGANIC_DEFAULT_RANK: u8 = 1;

/// Nutrition rank (A = 0 .. E = 4)
///
/// # Rating Scale
/// - A = 0, B = 1, C = 2, D = 3, E = 4
/// - missing = 4
pub fn nutrition_rank(label: Option<OrdinalLabel>) -> u8 {
    match label {
        Some(l) => l.index() as u8,
        None => NUTRITION_DEFAULT_RANK,
    }
}

/// Environmental (Green-Score) label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentalLabel {
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    NotApplicable,
    Unrecognized,
}

impl EnvironmentalLabel {
    /// Parse a source cell. A missing cell is `NotApplicable`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::NotApplicable;
        };

        match raw.trim().to_ascii_uppercase().as_str() {
            "A-PLUS" | "A+" | "A_PLUS" => Self::APlus,
            "A" => Self::A,
            "B" => Self::B,
            "C" => Self::C,
            "D" => Self::D,
            "E" => Self::E,
            "F" => Self::F,
            "NOT-APPLICABLE" | "NOT_APPLICABLE" | "" => Self::NotApplicable,
            _ => {
                tracing::debug!("Unrecognized environmental label '{}', using midpoint rank", raw);
                Self::Unrecognized
            }
        }
    }

    /// Rank on the seven-step scale (A-PLUS = 0 .. F = 6)
    ///
    /// - NotApplicable = 3
    /// - Unrecognized = 3
    pub fn rank(self) -> u8 {
        match self {
            Self::APlus => 0,
            Self::A => 1,
            Self::B => 2,
            Self::C => 3,
            Self::D => 4,
            Self::E => 5,
            Self::F => 6,
            Self::NotApplicable | Self::Unrecognized => ENVIRONMENTAL_DEFAULT_RANK,
        }
    }
}

/// Organic certification flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganicFlag {
    Yes,
    No,
}

impl OrganicFlag {
    /// "OUI"/"YES"/"TRUE"/"1" → Yes, anything else → No
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "OUI" | "YES" | "TRUE" | "1" => Self::Yes,
            _ => Self::No,
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Self::Yes => 0,
            Self::No => ORGANIC_DEFAULT_RANK,
        }
    }

    pub fn is_organic(self) -> bool {
        self == Self::Yes
    }
}
