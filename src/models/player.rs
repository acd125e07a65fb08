//! Player record model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::{MetricKey, PlayerId};

/// Position group a dataset is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Qb,
    #[serde(rename = "WR")]
    Wr,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Qb => write!(f, "QB"),
            Position::Wr => write!(f, "WR"),
        }
    }
}

/// One player's raw performance record.
///
/// The metric map is sparse: an absent key means the statistic is missing,
/// never zero. A stored non-finite value is kept as-is so it can be
/// reported, but every accessor treats it as missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Unique identifier (derived from name + team + position)
    pub id: PlayerId,

    /// Player name
    pub name: String,

    /// Team abbreviation (e.g., "KC", "BUF")
    pub team: String,

    /// Position group
    pub position: Position,

    /// Top-tier flag, computed upstream and consumed here
    #[serde(default)]
    pub is_elite: bool,

    /// Metric values keyed by statistic
    #[serde(default)]
    pub metrics: HashMap<MetricKey, f64>,
}

impl PlayerRecord {
    /// Create a new PlayerRecord with auto-generated ID.
    pub fn new(name: impl Into<String>, team: impl Into<String>, position: Position) -> Self {
        let name = name.into();
        let team = team.into();
        let id = PlayerId::generate(&[&name, &team, &position.to_string()]);

        Self {
            id,
            name,
            team,
            position,
            is_elite: false,
            metrics: HashMap::new(),
        }
    }

    /// Builder method to set a metric value.
    pub fn with_metric(mut self, key: MetricKey, value: f64) -> Self {
        self.metrics.insert(key, value);
        self
    }

    /// Builder method to set the elite flag.
    pub fn with_elite(mut self, elite: bool) -> Self {
        self.is_elite = elite;
        self
    }

    /// Finite value for a metric. Absent or non-finite values are `None`.
    pub fn metric(&self, key: MetricKey) -> Option<f64> {
        self.metrics.get(&key).copied().filter(|v| v.is_finite())
    }

    /// Raw stored value, including non-finite ones.
    pub fn raw_metric(&self, key: MetricKey) -> Option<f64> {
        self.metrics.get(&key).copied()
    }

    /// Whether the metric has a usable (finite) value.
    pub fn has_metric(&self, key: MetricKey) -> bool {
        self.metric(key).is_some()
    }

    /// Name initials for compact chart labels ("Patrick Mahomes" -> "PM").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Which players get a chart label, and what text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// Full name for everyone
    All,
    /// Only the selected player
    #[serde(rename = "selected")]
    SelectedOnly,
    /// Initials for everyone
    Initials,
    /// Full name for elite players only
    #[serde(rename = "elite")]
    EliteOnly,
}

/// Label text for a player under the given mode, or `None` when the
/// label is hidden.
pub fn label_text(
    mode: LabelMode,
    player: &PlayerRecord,
    selected: Option<&PlayerId>,
) -> Option<String> {
    let is_selected = selected == Some(&player.id);
    match mode {
        LabelMode::All => Some(player.name.clone()),
        LabelMode::SelectedOnly => is_selected.then(|| player.name.clone()),
        LabelMode::Initials => Some(player.initials()),
        LabelMode::EliteOnly => player.is_elite.then(|| player.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mahomes() -> PlayerRecord {
        PlayerRecord::new("Patrick Mahomes", "KC", Position::Qb)
            .with_metric(MetricKey::AvgDepthOfTarget, 8.1)
            .with_metric(MetricKey::ShortCompletionPct, 78.4)
            .with_elite(true)
    }

    #[test]
    fn test_record_creation() {
        let p = mahomes();
        assert_eq!(p.name, "Patrick Mahomes");
        assert_eq!(p.team, "KC");
        assert_eq!(p.position, Position::Qb);
        assert!(p.is_elite);
    }

    #[test]
    fn test_id_deterministic_across_snapshots() {
        let a = PlayerRecord::new("Patrick Mahomes", "KC", Position::Qb);
        let b = mahomes();
        assert_eq!(a.id, b.id); // metrics don't feed the id
    }

    #[test]
    fn test_metric_accessor() {
        let p = mahomes();
        assert_eq!(p.metric(MetricKey::AvgDepthOfTarget), Some(8.1));
        assert_eq!(p.metric(MetricKey::LongCompletionPct), None);
    }

    #[test]
    fn test_non_finite_treated_as_missing() {
        let p = PlayerRecord::new("Broken Feed", "XX", Position::Qb)
            .with_metric(MetricKey::RushTdPct, f64::NAN)
            .with_metric(MetricKey::RushYardsPerAttempt, f64::INFINITY);

        assert_eq!(p.metric(MetricKey::RushTdPct), None);
        assert!(!p.has_metric(MetricKey::RushYardsPerAttempt));
        // but the raw value is still visible for reporting
        assert!(p.raw_metric(MetricKey::RushTdPct).unwrap().is_nan());
    }

    #[test]
    fn test_initials() {
        assert_eq!(mahomes().initials(), "PM");
        let p = PlayerRecord::new("Amon-Ra St. Brown", "DET", Position::Wr);
        assert_eq!(p.initials(), "ASB");
    }

    #[test]
    fn test_label_mode_all() {
        let p = mahomes();
        assert_eq!(
            label_text(LabelMode::All, &p, None),
            Some("Patrick Mahomes".to_string())
        );
    }

    #[test]
    fn test_label_mode_selected_only() {
        let p = mahomes();
        assert_eq!(label_text(LabelMode::SelectedOnly, &p, None), None);
        assert_eq!(
            label_text(LabelMode::SelectedOnly, &p, Some(&p.id)),
            Some("Patrick Mahomes".to_string())
        );
    }

    #[test]
    fn test_label_mode_initials() {
        let p = mahomes();
        assert_eq!(
            label_text(LabelMode::Initials, &p, None),
            Some("PM".to_string())
        );
    }

    #[test]
    fn test_label_mode_elite_only() {
        let elite = mahomes();
        let journeyman = PlayerRecord::new("Practice Squad", "FA", Position::Qb);
        assert!(label_text(LabelMode::EliteOnly, &elite, None).is_some());
        assert!(label_text(LabelMode::EliteOnly, &journeyman, None).is_none());
    }

    #[test]
    fn test_serialization_camel_case_metrics() {
        let p = mahomes();
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("avgDepthOfTarget"));
        assert!(json.contains("\"QB\""));

        let back: PlayerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, p.id);
        assert_eq!(back.metric(MetricKey::ShortCompletionPct), Some(78.4));
    }
}
