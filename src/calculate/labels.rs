//! Label-placement collision resolution.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::models::{MetricKey, PlayerId, PlayerRecord};
use crate::round_to;

/// Pixel offset applied to a player's chart label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelOffset {
    pub dx: f64,
    pub dy: f64,
}

impl LabelOffset {
    const ZERO: LabelOffset = LabelOffset { dx: 0.0, dy: 0.0 };

    /// Offset for the i-th member of a collision group: the first member
    /// stays put, later members fan out alternating left/right while
    /// stepping upward.
    fn for_group_index(i: usize, layout: &LayoutConfig) -> Self {
        if i == 0 {
            return LabelOffset::ZERO;
        }
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        LabelOffset {
            dx: sign * (i as f64 + 1.0) * layout.base_unit,
            dy: -(i as f64) * layout.vertical_step,
        }
    }
}

/// Compute label offsets for players whose plot coordinates collide.
///
/// Two players collide when their (x, y) coordinates are identical after
/// rounding to `layout.coordinate_precision` decimal places. Group
/// membership and offset order follow stable population order, so the
/// same input always yields the same offsets. Players lacking a finite
/// value on either axis receive no entry.
pub fn resolve_label_offsets(
    players: &[PlayerRecord],
    x_metric: MetricKey,
    y_metric: MetricKey,
    layout: &LayoutConfig,
) -> HashMap<PlayerId, LabelOffset> {
    let precision = layout.coordinate_precision;
    let mut occupancy: HashMap<String, usize> = HashMap::new();
    let mut offsets = HashMap::new();

    for player in players {
        let (Some(x), Some(y)) = (player.metric(x_metric), player.metric(y_metric)) else {
            continue;
        };

        let key = format!(
            "{:.prec$},{:.prec$}",
            round_to(x, precision),
            round_to(y, precision),
            prec = precision as usize,
        );
        let slot = occupancy.entry(key).or_insert(0);
        offsets.insert(player.id.clone(), LabelOffset::for_group_index(*slot, layout));
        *slot += 1;
    }

    offsets
}
