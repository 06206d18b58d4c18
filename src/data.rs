//! Data Loading and Management
//!
//! Loads the beverage table with Polars and converts each row into an immutable
//! [`ProductRecord`]. The scoring methods only ever see records; the frame is kept for
//! tabular output (label columns appended to a copy).

use crate::labels::OrdinalLabel;
use crate::utils::columns::{f64_values, opt_str_values, optional_f64_column, optional_str_column, require_columns};
use crate::utils::ratings::{EnvironmentalLabel, OrganicFlag};
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source column names
pub mod columns {
    pub const NAME: &str = "Nom_Produit";
    pub const BRAND: &str = "Marque";
    pub const CATEGORY: &str = "Categorie";
    pub const ENERGY_KJ: &str = "Energie_kJ";
    pub const ENERGY_KCAL: &str = "Energie_kcal";
    pub const SATURATED_FAT: &str = "Acides_Gras_Satures_g";
    pub const SUGARS: &str = "Sucres_g";
    pub const SALT: &str = "Sel_g";
    pub const PROTEIN: &str = "Proteines_g";
    pub const FIBER: &str = "Fibres_g";
    pub const FRUIT_VEG: &str = "Fruits_Legumes_Pct";
    pub const ADDITIVE_COUNT: &str = "Nombre_Additifs";
    pub const ADDITIVE_LIST: &str = "Liste_Additifs";
    pub const REFERENCE_SCORE: &str = "Score_Nutriscore";
    pub const REFERENCE_LABEL: &str = "Label_Nutriscore";
    pub const ENVIRONMENTAL_LABEL: &str = "Label_Greenscore";
    pub const ORGANIC_LABEL: &str = "Label_Bio";

    pub const REQUIRED: [&str; 12] = [
        NAME, CATEGORY, ENERGY_KJ, SATURATED_FAT, SUGARS, SALT,
        PROTEIN, FIBER, FRUIT_VEG, ADDITIVE_COUNT, REFERENCE_LABEL, ORGANIC_LABEL,
    ];
}

/// Non-nutritive sweetener E-numbers (acesulfame K, aspartame, cyclamate, saccharin, sucralose)
pub const SWEETENER_CODES: [&str; 5] = ["e950", "e951", "e952", "e954", "e955"];

/// Stable identity of a record: its row position in the source table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RecordId(pub usize);

/// One beverage, values per 100 ml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: RecordId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub energy_kj: f64,
    pub energy_kcal: f64,
    pub saturated_fat_g: f64,
    pub sugars_g: f64,
    pub salt_g: f64,
    pub protein_g: f64,
    pub fiber_g: f64,
    pub fruit_veg_pct: f64,
    pub additive_count: f64,
    pub additives: Option<String>,
    pub reference_score: Option<f64>,
    /// Nutri-Score label as printed in the source table (raw text)
    pub reference_label: Option<String>,
    /// Green-Score label, `None` when the cell is empty
    pub environmental_label: Option<String>,
    pub organic_label: String,
}

impl ProductRecord {
    /// Waters are scored by a dedicated rule
    pub fn is_water(&self) -> bool {
        let category = self.category.trim();
        category.eq_ignore_ascii_case("eau") || category.eq_ignore_ascii_case("water")
    }

    /// True when the additive list mentions a non-nutritive sweetener
    pub fn has_sweeteners(&self) -> bool {
        let Some(list) = self.additives.as_deref() else {
            return false;
        };
        let list = list.to_lowercase();
        SWEETENER_CODES.iter().any(|code| list.contains(code))
    }

    pub fn reference(&self) -> Option<OrdinalLabel> {
        self.reference_label.as_deref().and_then(OrdinalLabel::parse_lenient)
    }

    pub fn environmental(&self) -> EnvironmentalLabel {
        EnvironmentalLabel::parse(self.environmental_label.as_deref())
    }

    pub fn organic(&self) -> OrganicFlag {
        OrganicFlag::parse(&self.organic_label)
    }
}

/// Loaded beverage table
#[derive(Debug, Clone)]
pub struct BeverageData {
    /// Source frame with trimmed column names
    pub frame: DataFrame,

    /// One record per frame row, same order
    pub records: Vec<ProductRecord>,
}

impl BeverageData {
    /// Load the beverage table from a CSV file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading beverage table: {:?}", path);

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load beverage CSV: {:?}", path))?;

        let data = Self::from_frame(frame)?;
        tracing::info!("  Products: {}", data.records.len());
        Ok(data)
    }

    /// Build records from an in-memory frame
    pub fn from_frame(mut frame: DataFrame) -> Result<Self> {
        let trimmed: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        frame
            .set_column_names(trimmed)
            .with_context(|| "Failed to normalize column names")?;

        require_columns(&frame, &columns::REQUIRED, "beverage table")?;
        let records = Self::extract_records(&frame)?;

        Ok(Self { frame, records })
    }

    fn extract_records(frame: &DataFrame) -> Result<Vec<ProductRecord>> {
        let names = opt_str_values(frame, columns::NAME)?;
        let brands = optional_str_column(frame, columns::BRAND)?;
        let categories = opt_str_values(frame, columns::CATEGORY)?;
        let energy_kj = f64_values(frame, columns::ENERGY_KJ)?;
        let energy_kcal = optional_f64_column(frame, columns::ENERGY_KCAL)?;
        let saturated_fat = f64_values(frame, columns::SATURATED_FAT)?;
        let sugars = f64_values(frame, columns::SUGARS)?;
        let salt = f64_values(frame, columns::SALT)?;
        let protein = f64_values(frame, columns::PROTEIN)?;
        let fiber = f64_values(frame, columns::FIBER)?;
        let fruit_veg = f64_values(frame, columns::FRUIT_VEG)?;
        let additive_count = f64_values(frame, columns::ADDITIVE_COUNT)?;
        let additives = optional_str_column(frame, columns::ADDITIVE_LIST)?;
        let reference_score = optional_f64_column(frame, columns::REFERENCE_SCORE)?;
        let reference_label = opt_str_values(frame, columns::REFERENCE_LABEL)?;
        let environmental = optional_str_column(frame, columns::ENVIRONMENTAL_LABEL)?;
        let organic = opt_str_values(frame, columns::ORGANIC_LABEL)?;

        let mut records = Vec::with_capacity(frame.height());
        for idx in 0..frame.height() {
            records.push(ProductRecord {
                id: RecordId(idx),
                name: names[idx].clone().unwrap_or_default(),
                brand: brands[idx].clone().unwrap_or_default(),
                category: categories[idx].clone().unwrap_or_default(),
                energy_kj: energy_kj[idx],
                energy_kcal: energy_kcal[idx],
                saturated_fat_g: saturated_fat[idx],
                sugars_g: sugars[idx],
                salt_g: salt[idx],
                protein_g: protein[idx],
                fiber_g: fiber[idx],
                fruit_veg_pct: fruit_veg[idx],
                additive_count: additive_count[idx],
                additives: additives[idx].clone().filter(|s| !s.trim().is_empty()),
                reference_score: Some(reference_score[idx]).filter(|v| !v.is_nan()),
                reference_label: reference_label[idx].clone(),
                environmental_label: environmental[idx].clone().filter(|s| !s.trim().is_empty()),
                organic_label: organic[idx].clone().unwrap_or_default(),
            });
        }

        Ok(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First product whose name contains `query` (case-insensitive)
    pub fn find_product(&self, query: &str) -> Option<&ProductRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.name.to_lowercase().contains(&needle))
    }

    /// Copy of the source frame with a derived label column appended
    ///
    /// `labels` must be in record order. The loaded frame is left untouched.
    pub fn with_label_column(&self, name: &str, labels: &[OrdinalLabel]) -> Result<DataFrame> {
        if labels.len() != self.frame.height() {
            anyhow::bail!(
                "Label column '{}' has {} values for {} rows",
                name,
                labels.len(),
                self.frame.height()
            );
        }

        let values: Vec<&str> = labels.iter().map(|l| l.letter()).collect();
        let mut out = self.frame.clone();
        out.with_column(Series::new(name.into(), values))
            .with_context(|| format!("Failed to append column '{}'", name))?;
        Ok(out)
    }
}
