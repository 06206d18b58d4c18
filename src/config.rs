//! Scoring configuration
//!
//! JSON file with ELECTRE TRI parameters and SuperNutri weights. Every field has a default,
//! so an empty object `{}` is a valid configuration.

use crate::methods::criteria::CriteriaWeights;
use crate::methods::electre_tri::DEFAULT_LAMBDA;
use crate::methods::supernutri::SuperNutriWeights;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// ELECTRE TRI parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectreConfig {
    /// Concordance threshold λ (sensible range 0.5-0.9)
    pub lambda: f64,
    pub weights: CriteriaWeights,
    /// Thresholds evaluated by the method comparison
    pub lambdas_to_compare: Vec<f64>,
}

impl Default for ElectreConfig {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
            weights: CriteriaWeights::default(),
            lambdas_to_compare: vec![0.6, 0.7],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub electre: ElectreConfig,
    pub supernutri: SuperNutriWeights,
}

impl ScoringConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring config: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scoring config JSON: {:?}", path))
    }

    /// Load from an optional path, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Configuration for the binaries
    ///
    /// `SCORING_CONFIG` names an optional JSON file, `ELECTRE_LAMBDA` overrides λ.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let config = Self::load_or_default(path.as_deref())?;
        config.with_lambda_override(std::env::var(LAMBDA_ENV).ok().as_deref())
    }

    /// Replace λ with a parsed override, if any
    pub fn with_lambda_override(mut self, raw: Option<&str>) -> Result<Self> {
        if let Some(raw) = raw {
            self.electre.lambda = raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid {} value: {:?}", LAMBDA_ENV, raw))?;
        }
        Ok(self)
    }
}

pub const DATA_ENV: &str = "BEVERAGE_DATA";
pub const CONFIG_ENV: &str = "SCORING_CONFIG";
pub const LAMBDA_ENV: &str = "ELECTRE_LAMBDA";
pub const DEFAULT_DATA_PATH: &str = "base_donnees_boissons.csv";

/// Beverage CSV path from `BEVERAGE_DATA`, or the default file name
pub fn data_path_from_env() -> PathBuf {
    std::env::var(DATA_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH))
}
