//! Core data models for the analytics engine.

mod dataset;
mod ids;
mod metrics;
mod player;
mod quadrant;

pub use dataset::*;
pub use ids::*;
pub use metrics::*;
pub use player::*;
pub use quadrant::*;
