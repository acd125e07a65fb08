//! Validated dataset snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::{PlayerId, PlayerRecord, Position};

/// Dataset construction errors.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("duplicate player id {0} in dataset")]
    DuplicateId(PlayerId),

    #[error("player {name} is {actual}, expected {expected}")]
    PositionMismatch {
        name: String,
        expected: Position,
        actual: Position,
    },
}

/// An immutable snapshot of one position group's records.
///
/// Construction validates that ids are unique and that every record
/// belongs to the snapshot's position. Order is preserved; it is the
/// stable population order the analytics depend on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Position group this snapshot covers
    pub position: Position,

    /// Player records in stable population order
    players: Vec<PlayerRecord>,

    /// When this snapshot was assembled
    pub created_at: DateTime<Utc>,
}

impl Dataset {
    /// Create a validated snapshot.
    pub fn new(position: Position, players: Vec<PlayerRecord>) -> Result<Self, DatasetError> {
        let mut seen: HashSet<&PlayerId> = HashSet::new();
        for player in &players {
            if player.position != position {
                return Err(DatasetError::PositionMismatch {
                    name: player.name.clone(),
                    expected: position,
                    actual: player.position,
                });
            }
            if !seen.insert(&player.id) {
                return Err(DatasetError::DuplicateId(player.id.clone()));
            }
        }

        Ok(Self {
            position,
            players,
            created_at: Utc::now(),
        })
    }

    /// Records in stable population order.
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Look up a record by id.
    pub fn get(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricKey;

    fn qb(name: &str, team: &str) -> PlayerRecord {
        PlayerRecord::new(name, team, Position::Qb).with_metric(MetricKey::OverallRating, 90.0)
    }

    #[test]
    fn test_dataset_creation() {
        let ds = Dataset::new(
            Position::Qb,
            vec![qb("Patrick Mahomes", "KC"), qb("Josh Allen", "BUF")],
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        assert!(!ds.is_empty());
        assert_eq!(ds.players()[0].name, "Patrick Mahomes");
    }

    #[test]
    fn test_dataset_rejects_duplicate_ids() {
        let result = Dataset::new(
            Position::Qb,
            vec![qb("Patrick Mahomes", "KC"), qb("Patrick Mahomes", "KC")],
        );
        assert!(matches!(result, Err(DatasetError::DuplicateId(_))));
    }

    #[test]
    fn test_dataset_rejects_position_mismatch() {
        let wr = PlayerRecord::new("Tyreek Hill", "MIA", Position::Wr);
        let result = Dataset::new(Position::Qb, vec![qb("Patrick Mahomes", "KC"), wr]);
        assert!(matches!(
            result,
            Err(DatasetError::PositionMismatch { .. })
        ));
    }

    #[test]
    fn test_dataset_lookup_by_id() {
        let mahomes = qb("Patrick Mahomes", "KC");
        let id = mahomes.id.clone();
        let ds = Dataset::new(Position::Qb, vec![mahomes]).unwrap();

        assert!(ds.get(&id).is_some());
        assert!(ds.get(&PlayerId::from("missing")).is_none());
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let ds = Dataset::new(Position::Wr, vec![]).unwrap();
        assert!(ds.is_empty());
    }
}
