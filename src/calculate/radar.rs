//! Min-max normalization for radar comparison.

use serde::Serialize;
use std::collections::HashMap;

use super::{AnalyticsError, MetricIndex};
use crate::models::{MetricKey, PlayerId, PlayerRecord};

/// Observed (min, max) for one metric across the population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    /// Rescale a raw value into [0, 1]. A degenerate range maps
    /// everything to the midpoint; the clamp absorbs floating error.
    fn normalize(&self, value: f64) -> f64 {
        if self.max == self.min {
            return 0.5;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Radar-ready normalized profiles.
///
/// Vectors are aligned to `metrics` order; the renderer consumes them as
/// fixed-order vertex lists.
#[derive(Debug, Clone, Serialize)]
pub struct RadarNormalization {
    /// Profile metrics in vertex order
    pub metrics: Vec<MetricKey>,

    /// Per-player normalized vectors
    pub per_player: HashMap<PlayerId, Vec<f64>>,

    /// Population average, normalized after averaging
    pub average: Vec<f64>,

    /// Observed ranges; metrics with no defined values have no entry
    pub ranges: HashMap<MetricKey, MetricRange>,
}

/// Normalize a metric profile across a population for radar display.
///
/// Per metric the (min, max) range covers players with a defined finite
/// value; missing values are excluded from the range, never coerced to
/// zero. A player's missing value renders at the neutral midpoint 0.5 so
/// the vertex count stays fixed. The population average is the raw mean
/// passed through the same transform as individual players — normalized
/// after averaging, not an average of normalized values.
pub fn normalize_for_radar(
    players: &[PlayerRecord],
    profile: &[MetricKey],
) -> Result<RadarNormalization, AnalyticsError> {
    if players.is_empty() {
        return Err(AnalyticsError::EmptyDataset(
            "cannot normalize zero players".to_string(),
        ));
    }

    let position = players[0].position;
    for &metric in profile {
        if !metric.is_active_for(position) {
            return Err(AnalyticsError::InvalidMetric { metric, position });
        }
    }

    let index = MetricIndex::new(players);

    let mut ranges = HashMap::new();
    for &metric in profile {
        if let Some((min, max)) = index.range(metric) {
            ranges.insert(metric, MetricRange { min, max });
        }
    }

    let normalize = |metric: MetricKey, value: Option<f64>| -> f64 {
        match (ranges.get(&metric), value) {
            (Some(range), Some(value)) => range.normalize(value),
            // Missing value, or a metric nobody reported: neutral midpoint
            _ => 0.5,
        }
    };

    let mut per_player = HashMap::new();
    for player in players {
        let vector: Vec<f64> = profile
            .iter()
            .map(|&metric| normalize(metric, player.metric(metric)))
            .collect();
        per_player.insert(player.id.clone(), vector);
    }

    let average: Vec<f64> = profile
        .iter()
        .map(|&metric| normalize(metric, index.mean(metric)))
        .collect();

    Ok(RadarNormalization {
        metrics: profile.to_vec(),
        per_player,
        average,
        ranges,
    })
}
