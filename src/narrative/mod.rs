//! Narrative description generation.
//!
//! The one asynchronous boundary in the crate. The analytics core never
//! awaits it: callers fire a request keyed by a target, the response
//! arrives later on a watch channel, and a newer request supersedes any
//! in-flight one so a stale description is never applied to the wrong
//! selection.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::calculate::{rank_profile, AnalyticsError, MetricIndex, RankResult};
use crate::models::{radar_profile, MetricKey, PlayerId, PlayerRecord, Position};

mod service;
mod template;

pub use service::{Description, DescriptionService};
pub use template::TemplateBackend;

/// Errors that can occur during description generation.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("description backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("timed out after {0} seconds")]
    Timeout(u64),
}

/// What a description request is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DescriptionTarget {
    /// One player's ideal-role analysis
    Player(PlayerId),
    /// Overall analysis of the whole position group
    PopulationSummary,
}

/// Selected-player context shipped with a request.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerContext {
    pub name: String,
    /// Standing on each profile metric, in profile order
    pub rankings: Vec<RankResult>,
}

/// A self-contained description request: ranked metrics in, prose out.
/// Backends never see the dataset itself.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptionRequest {
    pub id: Uuid,
    pub target: DescriptionTarget,
    pub position: Position,
    pub population: u32,
    /// Population mean per profile metric, where defined
    pub averages: Vec<(MetricKey, f64)>,
    /// Present for player targets
    pub player: Option<PlayerContext>,
}

impl DescriptionRequest {
    /// Build a population-summary request from a position group.
    pub fn for_population(position: Position, players: &[PlayerRecord]) -> Self {
        Self {
            id: Uuid::new_v4(),
            target: DescriptionTarget::PopulationSummary,
            position,
            population: players.len() as u32,
            averages: profile_averages(position, players),
            player: None,
        }
    }

    /// Build a player request carrying the player's ranked profile.
    pub fn for_player(
        players: &[PlayerRecord],
        player_id: &PlayerId,
    ) -> Result<Self, AnalyticsError> {
        let index = MetricIndex::new(players);
        let (_, player) = index
            .find(player_id)
            .ok_or_else(|| AnalyticsError::UnknownPlayer(player_id.clone()))?;

        let position = player.position;
        let profile = radar_profile(position);
        let rankings = rank_profile(players, &profile, player_id)?;

        Ok(Self {
            id: Uuid::new_v4(),
            target: DescriptionTarget::Player(player_id.clone()),
            position,
            population: players.len() as u32,
            averages: profile_averages(position, players),
            player: Some(PlayerContext {
                name: player.name.clone(),
                rankings,
            }),
        })
    }

    /// Population mean for a profile metric, if any player reported it.
    pub fn average(&self, metric: MetricKey) -> Option<f64> {
        self.averages
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }

    /// The target player's raw value for a profile metric.
    pub fn player_value(&self, metric: MetricKey) -> Option<f64> {
        self.player
            .as_ref()
            .and_then(|p| p.rankings.iter().find(|r| r.metric == metric))
            .and_then(|r| r.value)
    }
}

fn profile_averages(position: Position, players: &[PlayerRecord]) -> Vec<(MetricKey, f64)> {
    let index = MetricIndex::new(players);
    radar_profile(position)
        .into_iter()
        .filter_map(|metric| index.mean(metric).map(|mean| (metric, mean)))
        .collect()
}

/// A source of prose. The default is the deterministic template backend;
/// anything that can turn ranked metrics into text fits behind this.
#[async_trait]
pub trait DescriptionBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Generate prose for one request.
    async fn describe(&self, request: &DescriptionRequest) -> Result<String, NarrativeError>;
}
