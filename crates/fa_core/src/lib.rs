//! # fa_core - Football Video Match Analytics
//!
//! Derives match analytics from per-frame object tracks (players, referees,
//! ball) that were already detected, tracked and projected onto the pitch
//! by upstream stages.
//!
//! ## Stages
//! - `kinematics` - windowed speed and cumulative distance per track
//! - `possession` - per-frame ball holder and team possession timeline
//! - `events` - control timeline, pass detection/classification, shots
//! - `stats` / `report` - summary record and per-player figures
//!
//! `analyzer::MatchAnalyzer` runs them in order over one `TrackStore`.
//!
//! ## Known limitation
//! Cumulative distance is kept per track id. When the upstream tracker
//! re-identifies a player under a new id, that player's distance restarts
//! from zero under the new id.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod events;
pub mod kinematics;
pub mod possession;
pub mod report;
pub mod stats;
pub mod tracks;

pub use analyzer::{MatchAnalysis, MatchAnalyzer};
pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, Result};
pub use events::{ControlEvent, MatchEvents, PassEvent, PassStats, ShotStats};
pub use possession::{BallAssigner, NearestFootAssigner, PossessionMark, PossessionTimeline};
pub use report::{MatchReport, PlayerReport};
pub use stats::MatchSummary;
pub use tracks::{BoundingBox, FrameSnapshot, TrackId, TrackRecord, TrackStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
