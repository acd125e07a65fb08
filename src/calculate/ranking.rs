//! Rank and percentile computation.

use serde::Serialize;
use std::cmp::Ordering;

use super::{AnalyticsError, MetricIndex};
use crate::models::{MetricKey, PlayerId, PlayerRecord};

/// A player's standing on one metric within the full population.
#[derive(Debug, Clone, Serialize)]
pub struct RankResult {
    pub metric: MetricKey,

    /// Raw value; `None` when the player has no finite value
    pub value: Option<f64>,

    /// 1-based rank, 1 = highest value
    pub rank: u32,

    /// Population size
    pub total: u32,

    /// 0-100 standing, higher is better
    pub percentile: u8,
}

/// Descending order with missing values after all defined values. Stable
/// sorting on top of this keeps equal values in population order, which
/// is the tie-break contract the percentile text depends on.
fn compare_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank a player on one metric within the population.
///
/// Rank 1 is the highest value. Ties are not collapsed: equal values get
/// distinct consecutive ranks in stable population order. Ranking always
/// runs over the full population, never a filtered subset.
pub fn rank_player(
    players: &[PlayerRecord],
    metric: MetricKey,
    player_id: &PlayerId,
) -> Result<RankResult, AnalyticsError> {
    if players.is_empty() {
        return Err(AnalyticsError::EmptyDataset(
            "cannot rank within zero players".to_string(),
        ));
    }

    let index = MetricIndex::new(players);
    let (target_idx, target) = index
        .find(player_id)
        .ok_or_else(|| AnalyticsError::UnknownPlayer(player_id.clone()))?;

    let position = target.position;
    if !metric.is_active_for(position) {
        return Err(AnalyticsError::InvalidMetric { metric, position });
    }

    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by(|&a, &b| compare_desc(players[a].metric(metric), players[b].metric(metric)));

    let rank = order
        .iter()
        .position(|&i| i == target_idx)
        .expect("target index came from the same slice") as u32
        + 1;

    let total = players.len() as u32;
    let percentile = (((total - rank) as f64 / total as f64) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    Ok(RankResult {
        metric,
        value: target.metric(metric),
        rank,
        total,
        percentile,
    })
}

/// Rank a player on every metric of a profile, in profile order.
pub fn rank_profile(
    players: &[PlayerRecord],
    profile: &[MetricKey],
    player_id: &PlayerId,
) -> Result<Vec<RankResult>, AnalyticsError> {
    profile
        .iter()
        .map(|&metric| rank_player(players, metric, player_id))
        .collect()
}
