//! Agreement evaluation between label sequences

pub mod confusion;
pub mod metrics;

pub use confusion::ConfusionMatrix;
pub use metrics::{compute_metrics, ClassMetrics, Metrics};
