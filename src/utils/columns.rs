//! DataFrame column extraction helpers with validation
//!
//! Explicit patterns for pulling typed vectors out of a Polars DataFrame so that a
//! missing or mistyped column surfaces as an error naming the column.

use crate::error::ScoringError;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Check that every required column is present
///
/// # Errors
/// Returns an error listing the first missing column and the available ones.
pub fn require_columns(df: &DataFrame, columns: &[&str], context: &str) -> Result<()> {
    let actual_cols: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !actual_cols.contains(expected) {
            let mut available: Vec<&String> = actual_cols.iter().collect();
            available.sort();
            return Err(ScoringError::MissingColumn(format!(
                "{}: '{}' (available: {:?})",
                context, expected, available
            ))
            .into());
        }
    }

    Ok(())
}

/// Column cast to Float64; nulls and unparsable cells become NaN
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let casted = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be read as numbers", name))?;

    let values = casted
        .f64()
        .with_context(|| format!("Column '{}' is not Float64 after cast", name))?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();

    Ok(values)
}

/// Column cast to String; nulls stay `None`
pub fn opt_str_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let casted = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as text", name))?;

    let values = casted
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();

    Ok(values)
}

/// Like [`opt_str_values`] but absent columns yield all-`None`
pub fn optional_str_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    if df.get_column_names().iter().any(|c| c.as_str() == name) {
        opt_str_values(df, name)
    } else {
        Ok(vec![None; df.height()])
    }
}

/// Like [`f64_values`] but absent columns yield all-NaN
pub fn optional_f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    if df.get_column_names().iter().any(|c| c.as_str() == name) {
        f64_values(df, name)
    } else {
        Ok(vec![f64::NAN; df.height()])
    }
}
