//! Nutri-Score Beverage Threshold Tables
//!
//! Maps continuous nutrient values (per 100 ml) to integer point counts.
//! Tables follow the beverage algorithm revision of March 2025.
//!
//! Every table is an ordered list of `(upper_bound, points)` buckets with strictly
//! increasing bounds, closed by an unbounded bucket. A value falls in the first bucket
//! whose bound is strictly greater than it.

/// A single bucket: values strictly below `upper` score `points`
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    pub upper: f64,
    pub points: i32,
}

/// Ordered breakpoint table for one nutrient
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable {
    pub name: &'static str,
    pub buckets: &'static [Bucket],
}

impl ThresholdTable {
    /// Points for `value`.
    ///
    /// Values at or above every finite bound take the last bucket's points. NaN compares
    /// false against every bound and therefore lands in the last bucket as well.
    pub fn lookup(&self, value: f64) -> i32 {
        for bucket in self.buckets {
            if value < bucket.upper {
                return bucket.points;
            }
        }
        self.max_points()
    }

    pub fn max_points(&self) -> i32 {
        self.buckets.last().map_or(0, |b| b.points)
    }

    pub fn min_points(&self) -> i32 {
        self.buckets.first().map_or(0, |b| b.points)
    }
}

const fn b(upper: f64, points: i32) -> Bucket {
    Bucket { upper, points }
}

// ============================================================================
// NEGATIVE COMPONENT (N)
// ============================================================================

static ENERGY_BUCKETS: &[Bucket] = &[
    b(30.0, 0), b(60.0, 1), b(90.0, 2), b(120.0, 3), b(150.0, 4),
    b(180.0, 5), b(210.0, 6), b(240.0, 7), b(270.0, 8), b(300.0, 9),
    b(330.0, 10), b(360.0, 11), b(390.0, 12), b(f64::INFINITY, 13),
];

static SUGARS_BUCKETS: &[Bucket] = &[
    b(0.5, 0), b(1.5, 1), b(2.5, 2), b(3.5, 3), b(4.5, 4),
    b(5.5, 5), b(6.5, 6), b(7.5, 7), b(8.5, 8), b(9.5, 9),
    b(10.5, 10), b(11.0, 11), b(f64::INFINITY, 12),
];

static SATURATED_FAT_BUCKETS: &[Bucket] = &[
    b(0.1, 0), b(0.2, 1), b(0.3, 2), b(0.4, 3), b(0.5, 4),
    b(0.6, 5), b(0.7, 6), b(0.8, 7), b(0.9, 8), b(1.0, 9),
    b(f64::INFINITY, 10),
];

static SALT_BUCKETS: &[Bucket] = &[
    b(0.09, 0), b(0.18, 1), b(0.27, 2), b(0.36, 3), b(0.45, 4),
    b(0.54, 5), b(0.63, 6), b(0.72, 7), b(0.81, 8), b(0.90, 9),
    b(f64::INFINITY, 10),
];

/// Flat penalty added to N when the drink contains non-nutritive sweeteners
pub const SWEETENER_POINTS: i32 = 4;

// ============================================================================
// POSITIVE COMPONENT (P)
// ============================================================================

static PROTEIN_BUCKETS: &[Bucket] = &[
    b(0.8, 0), b(1.6, 1), b(2.4, 2), b(3.2, 3), b(4.0, 4),
    b(f64::INFINITY, 5),
];

static FIBER_BUCKETS: &[Bucket] = &[
    b(0.7, 0), b(1.4, 1), b(2.1, 2), b(2.8, 3), b(3.5, 4),
    b(f64::INFINITY, 5),
];

static FRUIT_VEG_BUCKETS: &[Bucket] = &[
    b(40.0, 0), b(60.0, 2), b(80.0, 4), b(f64::INFINITY, 5),
];

/// Hard cap on the positive component
pub const MAX_POSITIVE_POINTS: i32 = 7;

pub static ENERGY: ThresholdTable = ThresholdTable { name: "energy_kj", buckets: ENERGY_BUCKETS };
pub static SUGARS: ThresholdTable = ThresholdTable { name: "sugars_g", buckets: SUGARS_BUCKETS };
pub static SATURATED_FAT: ThresholdTable = ThresholdTable { name: "saturated_fat_g", buckets: SATURATED_FAT_BUCKETS };
pub static SALT: ThresholdTable = ThresholdTable { name: "salt_g", buckets: SALT_BUCKETS };
pub static PROTEIN: ThresholdTable = ThresholdTable { name: "protein_g", buckets: PROTEIN_BUCKETS };
pub static FIBER: ThresholdTable = ThresholdTable { name: "fiber_g", buckets: FIBER_BUCKETS };
pub static FRUIT_VEG: ThresholdTable = ThresholdTable { name: "fruit_veg_pct", buckets: FRUIT_VEG_BUCKETS };

/// Every table, for validation and reporting
pub static ALL_TABLES: [&ThresholdTable; 7] = [
    &ENERGY, &SATURATED_FAT, &SUGARS, &SALT, &PROTEIN, &FIBER, &FRUIT_VEG,
];
