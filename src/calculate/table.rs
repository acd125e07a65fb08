//! Table filtering and sorting.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{MetricKey, PlayerRecord};

/// Sort direction for the rankings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort column and direction.
///
/// A plain value with a pure transition function; callers hold whatever
/// state they need and the table itself accumulates none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub metric: MetricKey,
    pub direction: SortDirection,
}

impl SortState {
    /// Fresh sort on a metric, highest first.
    pub fn new(metric: MetricKey) -> Self {
        Self {
            metric,
            direction: SortDirection::Descending,
        }
    }

    /// Header-click transition: a new metric resets to descending,
    /// re-selecting the active metric flips the direction.
    pub fn toggle(self, metric: MetricKey) -> Self {
        if self.metric == metric {
            Self {
                metric,
                direction: self.direction.flip(),
            }
        } else {
            Self::new(metric)
        }
    }
}

/// Filter a population by a search query, then stable-sort it by a
/// metric.
///
/// The query matches case-insensitively against name and team; an empty
/// query matches everyone. Missing metric values compare as negative
/// infinity (first ascending, last descending). Pure function of its
/// four inputs.
pub fn filter_and_sort<'a>(
    players: &'a [PlayerRecord],
    query: &str,
    sort_key: MetricKey,
    direction: SortDirection,
) -> Vec<&'a PlayerRecord> {
    let needle = query.to_lowercase();

    let mut rows: Vec<&PlayerRecord> = players
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.team.to_lowercase().contains(&needle)
        })
        .collect();

    let value_of = |p: &PlayerRecord| p.metric(sort_key).unwrap_or(f64::NEG_INFINITY);
    rows.sort_by(|a, b| {
        let (a, b) = (value_of(a), value_of(b));
        let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    rows
}
