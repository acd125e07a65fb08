//! Metric accessor over raw player records.

use tracing::warn;

use super::MetricWarning;
use crate::models::{MetricKey, PlayerId, PlayerRecord};

/// Read-only view over a population, indexed by metric key.
///
/// All other engine components read through this accessor so the
/// missing-vs-non-finite rules live in exactly one place.
pub struct MetricIndex<'a> {
    players: &'a [PlayerRecord],
}

impl<'a> MetricIndex<'a> {
    pub fn new(players: &'a [PlayerRecord]) -> Self {
        Self { players }
    }

    /// The underlying records in stable population order.
    pub fn players(&self) -> &'a [PlayerRecord] {
        self.players
    }

    /// Finite values for a metric, in population order. Absent and
    /// non-finite entries are skipped.
    pub fn values(&self, metric: MetricKey) -> Vec<f64> {
        self.players
            .iter()
            .filter_map(|p| p.metric(metric))
            .collect()
    }

    /// Finite value for one player.
    pub fn get(&self, id: &PlayerId, metric: MetricKey) -> Option<f64> {
        self.find(id).and_then(|(_, p)| p.metric(metric))
    }

    /// Population index and record for a player id.
    pub fn find(&self, id: &PlayerId) -> Option<(usize, &'a PlayerRecord)> {
        self.players
            .iter()
            .enumerate()
            .find(|(_, p)| &p.id == id)
    }

    /// (min, max) over the finite values of a metric.
    pub fn range(&self, metric: MetricKey) -> Option<(f64, f64)> {
        let values = self.values(metric);
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// Arithmetic mean over the finite values of a metric.
    pub fn mean(&self, metric: MetricKey) -> Option<f64> {
        let values = self.values(metric);
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// One warning per (player, metric) pair holding a stored non-finite
    /// value. The sweep is limited to the metrics a computation touches.
    pub fn sweep_non_finite(&self, metrics: &[MetricKey]) -> Vec<MetricWarning> {
        let mut warnings = Vec::new();
        for player in self.players {
            for &metric in metrics {
                if let Some(value) = player.raw_metric(metric) {
                    if !value.is_finite() {
                        warn!(
                            player = %player.id,
                            metric = %metric,
                            "non-finite metric value excluded from aggregates"
                        );
                        warnings.push(MetricWarning {
                            player: player.id.clone(),
                            metric,
                            value,
                        });
                    }
                }
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn population() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord::new("A", "AA", Position::Wr).with_metric(MetricKey::CatchRate, 70.0),
            PlayerRecord::new("B", "BB", Position::Wr).with_metric(MetricKey::CatchRate, f64::NAN),
            PlayerRecord::new("C", "CC", Position::Wr),
            PlayerRecord::new("D", "DD", Position::Wr).with_metric(MetricKey::CatchRate, 60.0),
        ]
    }

    #[test]
    fn test_values_skip_missing_and_non_finite() {
        let players = population();
        let index = MetricIndex::new(&players);
        assert_eq!(index.values(MetricKey::CatchRate), vec![70.0, 60.0]);
    }

    #[test]
    fn test_get_by_id() {
        let players = population();
        let index = MetricIndex::new(&players);
        assert_eq!(index.get(&players[0].id, MetricKey::CatchRate), Some(70.0));
        assert_eq!(index.get(&players[1].id, MetricKey::CatchRate), None);
        assert_eq!(index.get(&PlayerId::from("nope"), MetricKey::CatchRate), None);
    }

    #[test]
    fn test_find_returns_population_index() {
        let players = population();
        let index = MetricIndex::new(&players);
        let (i, p) = index.find(&players[2].id).unwrap();
        assert_eq!(i, 2);
        assert_eq!(p.name, "C");
    }

    #[test]
    fn test_range_and_mean() {
        let players = population();
        let index = MetricIndex::new(&players);
        assert_eq!(index.range(MetricKey::CatchRate), Some((60.0, 70.0)));
        assert_eq!(index.mean(MetricKey::CatchRate), Some(65.0));
        assert_eq!(index.range(MetricKey::TargetShare), None);
        assert_eq!(index.mean(MetricKey::TargetShare), None);
    }

    #[test]
    fn test_sweep_flags_only_non_finite() {
        let players = population();
        let index = MetricIndex::new(&players);
        let warnings = index.sweep_non_finite(&[MetricKey::CatchRate]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].player, players[1].id);
        assert!(warnings[0].value.is_nan());
    }
}
