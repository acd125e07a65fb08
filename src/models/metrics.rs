//! Metric catalog: keys, display names, and formatting classes.
//!
//! Every statistic the dashboard knows about lives in one static table.
//! Adding a metric means adding a catalog row and (optionally) a row in
//! the per-position metric sets; no arithmetic elsewhere changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Position;

/// Identifies a statistic in a player's metric map.
///
/// Serialized names match the upstream feed (camelCase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    AvgDepthOfTarget,
    ShortCompletionPct,
    IntermediateCompletionPct,
    LongCompletionPct,
    RushYardsPerAttempt,
    RushTdPct,
    ManSeparation,
    ZoneSeparation,
    CatchRate,
    YardsPerRoute,
    TargetShare,
    RedZoneTargets,
    OverallRating,
}

/// How a metric value is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    /// One decimal place with a trailing percent sign.
    Percentage,
    /// Rounded to a whole number.
    Count,
    /// Two decimal places.
    Decimal,
}

/// One catalog row: key, names, and formatting class.
#[derive(Debug, Clone, Copy)]
pub struct MetricInfo {
    pub key: MetricKey,
    /// Full display name, e.g. "Avg. Depth of Target".
    pub name: &'static str,
    /// Short column header, e.g. "Avg Depth".
    pub short_name: &'static str,
    pub format: MetricFormat,
}

/// The metric catalog. Lookup is by exact key.
const CATALOG: &[MetricInfo] = &[
    MetricInfo {
        key: MetricKey::AvgDepthOfTarget,
        name: "Avg. Depth of Target",
        short_name: "Avg Depth",
        format: MetricFormat::Decimal,
    },
    MetricInfo {
        key: MetricKey::ShortCompletionPct,
        name: "Short Completion %",
        short_name: "Short %",
        format: MetricFormat::Percentage,
    },
    MetricInfo {
        key: MetricKey::IntermediateCompletionPct,
        name: "Intermediate Completion %",
        short_name: "Mid %",
        format: MetricFormat::Percentage,
    },
    MetricInfo {
        key: MetricKey::LongCompletionPct,
        name: "Long Completion %",
        short_name: "Long %",
        format: MetricFormat::Percentage,
    },
    MetricInfo {
        key: MetricKey::RushYardsPerAttempt,
        name: "Rush Yards Per Attempt",
        short_name: "Rush YPA",
        format: MetricFormat::Decimal,
    },
    MetricInfo {
        key: MetricKey::RushTdPct,
        name: "Rush TD %",
        short_name: "Rush TD %",
        format: MetricFormat::Percentage,
    },
    MetricInfo {
        key: MetricKey::ManSeparation,
        name: "Man Separation",
        short_name: "Man Sep",
        format: MetricFormat::Decimal,
    },
    MetricInfo {
        key: MetricKey::ZoneSeparation,
        name: "Zone Separation",
        short_name: "Zone Sep",
        format: MetricFormat::Decimal,
    },
    MetricInfo {
        key: MetricKey::CatchRate,
        name: "Catch Rate",
        short_name: "Catch %",
        format: MetricFormat::Percentage,
    },
    MetricInfo {
        key: MetricKey::YardsPerRoute,
        name: "Yards Per Route",
        short_name: "YPR",
        format: MetricFormat::Decimal,
    },
    MetricInfo {
        key: MetricKey::TargetShare,
        name: "Target Share",
        short_name: "Target %",
        format: MetricFormat::Percentage,
    },
    MetricInfo {
        key: MetricKey::RedZoneTargets,
        name: "Red Zone Targets",
        short_name: "RZ Targets",
        format: MetricFormat::Count,
    },
    MetricInfo {
        key: MetricKey::OverallRating,
        name: "Overall Rating",
        short_name: "Rating",
        format: MetricFormat::Decimal,
    },
];

/// Active metric sets per position. The first two entries of each set are
/// the default quadrant axes; the full set drives the radar profile and
/// table columns.
const METRIC_SETS: &[(Position, &[MetricKey])] = &[
    (
        Position::Qb,
        &[
            MetricKey::AvgDepthOfTarget,
            MetricKey::ShortCompletionPct,
            MetricKey::IntermediateCompletionPct,
            MetricKey::LongCompletionPct,
            MetricKey::RushYardsPerAttempt,
            MetricKey::RushTdPct,
            MetricKey::OverallRating,
        ],
    ),
    (
        Position::Wr,
        &[
            MetricKey::ManSeparation,
            MetricKey::ZoneSeparation,
            MetricKey::CatchRate,
            MetricKey::YardsPerRoute,
            MetricKey::TargetShare,
            MetricKey::RedZoneTargets,
            MetricKey::OverallRating,
        ],
    ),
];

impl MetricKey {
    /// Catalog row for this key.
    pub fn info(&self) -> &'static MetricInfo {
        CATALOG
            .iter()
            .find(|m| m.key == *self)
            .expect("every MetricKey variant has a catalog row")
    }

    /// Full display name.
    pub fn display_name(&self) -> &'static str {
        self.info().name
    }

    /// Short column-header name.
    pub fn short_name(&self) -> &'static str {
        self.info().short_name
    }

    /// Formatting class.
    pub fn format(&self) -> MetricFormat {
        self.info().format
    }

    /// Whether this metric belongs to the position's active set.
    pub fn is_active_for(&self, position: Position) -> bool {
        metric_set(position).contains(self)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Active metrics for a position.
pub fn metric_set(position: Position) -> &'static [MetricKey] {
    METRIC_SETS
        .iter()
        .find(|(p, _)| *p == position)
        .map(|(_, set)| *set)
        .unwrap_or(&[])
}

/// Radar profile for a position: the active set minus the overall rating.
pub fn radar_profile(position: Position) -> Vec<MetricKey> {
    metric_set(position)
        .iter()
        .copied()
        .filter(|k| *k != MetricKey::OverallRating)
        .collect()
}

/// Format a metric value for display. `None` renders as "N/A".
pub fn format_value(value: Option<f64>, metric: MetricKey) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };

    match metric.format() {
        MetricFormat::Percentage => format!("{:.1}%", value),
        MetricFormat::Count => format!("{}", value.round() as i64),
        MetricFormat::Decimal => format!("{:.2}", value),
    }
}
