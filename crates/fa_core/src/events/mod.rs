//! # Event Inference Module
//!
//! Derives match events from an annotated track store.
//!
//! - `control` - Compressed ball control timeline
//! - `pass` - Pass detection and classification
//! - `shot` - Ball-speed shot detection

pub mod control;
pub mod pass;
pub mod shot;

pub use control::{build_control_sequence, ControlEvent};
pub use pass::{classify_passes, detect_passes, PassEvent, PassLength, PassStats};
pub use shot::{detect_shots, ShotStats};

use tracing::info;

use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::tracks::TrackStore;

/// Everything inferred from one track store.
#[derive(Debug, Clone, Default)]
pub struct MatchEvents {
    pub control: Vec<ControlEvent>,
    pub passes: Vec<PassEvent>,
    pub pass_stats: PassStats,
    pub shots: ShotStats,
}

/// Run control, pass and shot inference. Expects possession to have been
/// resolved already so `has_ball` flags are set.
pub fn infer_events(store: &TrackStore, config: &AnalyticsConfig) -> Result<MatchEvents> {
    let control = build_control_sequence(store.players()?);
    let passes = detect_passes(&control);
    let pass_stats = classify_passes(&passes, &config.passes);
    let shots = detect_shots(store.ball()?, &config.shots);

    info!(
        controls = control.len(),
        passes = pass_stats.total_passes,
        shots = shots.total_shots,
        "events inferred"
    );

    Ok(MatchEvents {
        control,
        passes,
        pass_stats,
        shots,
    })
}
