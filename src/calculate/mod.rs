//! Analytics calculation engine.
//!
//! Derives chart-ready view models from raw player records:
//! - Quadrant partitioning around axis medians
//! - Label-placement collision offsets
//! - Min-max radar normalization
//! - Rank and percentile computation
//! - Table filtering and sorting
//!
//! Every operation is a pure function of its inputs, recomputed fresh on
//! each call. Failures are synchronous `AnalyticsError`s; stored
//! non-finite values are non-fatal and surface as `MetricWarning`s.

use serde::Serialize;
use thiserror::Error;

use crate::models::{MetricKey, PlayerId, Position};

mod index;
mod labels;
mod quadrant;
mod radar;
mod ranking;
mod table;

pub use index::MetricIndex;
pub use labels::{resolve_label_offsets, LabelOffset};
pub use quadrant::{partition_quadrants, QuadrantPartition};
pub use radar::{normalize_for_radar, MetricRange, RadarNormalization};
pub use ranking::{rank_player, rank_profile, RankResult};
pub use table::{filter_and_sort, SortDirection, SortState};

/// Errors that can occur during analytics computation.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    #[error("unknown player id: {0}")]
    UnknownPlayer(PlayerId),

    #[error("metric '{metric}' is not in the {position} metric table")]
    InvalidMetric {
        metric: MetricKey,
        position: Position,
    },
}

/// Non-fatal flag for a stored non-finite metric value. The value is
/// excluded from every aggregate; the player is retained with the metric
/// treated as missing.
#[derive(Debug, Clone, Serialize)]
pub struct MetricWarning {
    pub player: PlayerId,
    pub metric: MetricKey,
    /// The offending stored value (serializes as null for NaN/inf).
    pub value: f64,
}

/// Median of a population: the element at index `floor(n/2)` of the
/// ascending-sorted values. For even n this is the upper of the two
/// middle elements; callers depend on that exact parity behavior.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(sorted[sorted.len() / 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[5.0, 1.0, 3.0, 2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn test_median_even_takes_upper_middle() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(3.0));
    }

    #[test]
    fn test_median_single() {
        assert_eq!(median(&[42.0]), Some(42.0));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_median_does_not_mutate_input() {
        let values = vec![3.0, 1.0, 2.0];
        let _ = median(&values);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }
}
