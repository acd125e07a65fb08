//! Quadrant classification and label lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MetricKey, Position};

/// One of four regions of the metric plane split by each axis's median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Classify a point against the axis medians.
    /// x >= median goes right, y >= median goes top.
    pub fn classify(x: f64, y: f64, x_median: f64, y_median: f64) -> Self {
        match (x >= x_median, y >= y_median) {
            (true, true) => Quadrant::TopRight,
            (false, true) => Quadrant::TopLeft,
            (true, false) => Quadrant::BottomRight,
            (false, false) => Quadrant::BottomLeft,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quadrant::TopLeft => write!(f, "top-left"),
            Quadrant::TopRight => write!(f, "top-right"),
            Quadrant::BottomLeft => write!(f, "bottom-left"),
            Quadrant::BottomRight => write!(f, "bottom-right"),
        }
    }
}

/// Display labels for the four quadrants of one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantLabels {
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
}

impl QuadrantLabels {
    fn from_static(labels: &StaticLabels) -> Self {
        Self {
            top_left: labels.top_left.to_string(),
            top_right: labels.top_right.to_string(),
            bottom_left: labels.bottom_left.to_string(),
            bottom_right: labels.bottom_right.to_string(),
        }
    }

    /// Label text for one quadrant.
    pub fn get(&self, quadrant: Quadrant) -> &str {
        match quadrant {
            Quadrant::TopLeft => &self.top_left,
            Quadrant::TopRight => &self.top_right,
            Quadrant::BottomLeft => &self.bottom_left,
            Quadrant::BottomRight => &self.bottom_right,
        }
    }
}

struct StaticLabels {
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
}

/// Curated label sets keyed by (position, x-metric, y-metric).
/// New metric pairings extend this table; the partition arithmetic
/// never changes.
const LABEL_TABLE: &[((Position, MetricKey, MetricKey), StaticLabels)] = &[
    (
        (
            Position::Qb,
            MetricKey::AvgDepthOfTarget,
            MetricKey::ShortCompletionPct,
        ),
        StaticLabels {
            top_left: "Short Game Specialists",
            top_right: "Balanced Passers",
            bottom_left: "Limited Passers",
            bottom_right: "Deep Ball Specialists",
        },
    ),
    (
        (
            Position::Qb,
            MetricKey::RushYardsPerAttempt,
            MetricKey::RushTdPct,
        ),
        StaticLabels {
            top_left: "Goal Line Rushers",
            top_right: "Dual Threats",
            bottom_left: "Pocket Passers",
            bottom_right: "Scrambling QBs",
        },
    ),
    (
        (
            Position::Wr,
            MetricKey::ManSeparation,
            MetricKey::ZoneSeparation,
        ),
        StaticLabels {
            top_left: "Zone Beaters",
            top_right: "Elite Separators",
            bottom_left: "Contested Catchers",
            bottom_right: "Man Beaters",
        },
    ),
];

/// Resolve quadrant labels for a chart. Exact-match lookup against the
/// curated table, with a generic High/Low fallback for unknown pairs.
pub fn quadrant_labels(
    position: Position,
    x_metric: MetricKey,
    y_metric: MetricKey,
) -> QuadrantLabels {
    if let Some((_, labels)) = LABEL_TABLE
        .iter()
        .find(|((p, x, y), _)| *p == position && *x == x_metric && *y == y_metric)
    {
        return QuadrantLabels::from_static(labels);
    }

    QuadrantLabels {
        top_left: "High Y, Low X".to_string(),
        top_right: "High Y, High X".to_string(),
        bottom_left: "Low Y, Low X".to_string(),
        bottom_right: "Low Y, High X".to_string(),
    }
}
