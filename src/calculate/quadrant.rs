//! Quadrant partitioning around axis medians.

use serde::Serialize;
use std::collections::HashMap;

use super::{median, AnalyticsError, MetricIndex, MetricWarning};
use crate::models::{
    quadrant_labels, MetricKey, PlayerId, PlayerRecord, Position, Quadrant, QuadrantLabels,
};

/// Result of partitioning a population on two metrics.
#[derive(Debug, Clone, Serialize)]
pub struct QuadrantPartition {
    pub x_metric: MetricKey,
    pub y_metric: MetricKey,

    /// Median of the finite x values (reference line position)
    pub x_median: f64,

    /// Median of the finite y values
    pub y_median: f64,

    /// Labels for the four regions of this chart
    pub labels: QuadrantLabels,

    /// Quadrant per player. Players without a finite value on both axes
    /// have no entry.
    pub assignments: HashMap<PlayerId, Quadrant>,

    /// Non-finite stored values found on either axis
    pub warnings: Vec<MetricWarning>,
}

/// Partition a population into quadrants around the medians of the two
/// chart axes.
///
/// Both metrics must belong to the position's active set. Non-finite
/// values are excluded from the medians and flagged, never defaulted to
/// zero. An empty population, or an axis with no finite values at all,
/// is an error.
pub fn partition_quadrants(
    players: &[PlayerRecord],
    x_metric: MetricKey,
    y_metric: MetricKey,
    position: Position,
) -> Result<QuadrantPartition, AnalyticsError> {
    for metric in [x_metric, y_metric] {
        if !metric.is_active_for(position) {
            return Err(AnalyticsError::InvalidMetric { metric, position });
        }
    }

    if players.is_empty() {
        return Err(AnalyticsError::EmptyDataset(
            "cannot partition zero players".to_string(),
        ));
    }

    let index = MetricIndex::new(players);
    let warnings = index.sweep_non_finite(&[x_metric, y_metric]);

    let x_median = median(&index.values(x_metric)).ok_or_else(|| {
        AnalyticsError::EmptyDataset(format!("no finite values for {}", x_metric))
    })?;
    let y_median = median(&index.values(y_metric)).ok_or_else(|| {
        AnalyticsError::EmptyDataset(format!("no finite values for {}", y_metric))
    })?;

    let mut assignments = HashMap::new();
    for player in players {
        if let (Some(x), Some(y)) = (player.metric(x_metric), player.metric(y_metric)) {
            assignments.insert(player.id.clone(), Quadrant::classify(x, y, x_median, y_median));
        }
    }

    Ok(QuadrantPartition {
        x_metric,
        y_metric,
        x_median,
        y_median,
        labels: quadrant_labels(position, x_metric, y_metric),
        assignments,
        warnings,
    })
}
