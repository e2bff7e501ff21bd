//! # Match Analyzer
//!
//! Runs the analytics stages over one track store in a fixed order:
//!
//! 1. structural validation
//! 2. player speed and distance
//! 3. ball speed (optional)
//! 4. possession
//! 5. control, pass and shot inference
//! 6. summary and player report

use tracing::info;

use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::events::{infer_events, MatchEvents};
use crate::kinematics::{annotate_ball_speed, annotate_speed_and_distance};
use crate::possession::{resolve_possession, BallAssigner, NearestFootAssigner, PossessionTimeline};
use crate::report::{build_player_report, MatchReport};
use crate::stats::build_summary;
use crate::tracks::TrackStore;

/// Full output of one analysis run.
#[derive(Debug, Clone)]
pub struct MatchAnalysis {
    pub report: MatchReport,
    pub possession: PossessionTimeline,
    pub events: MatchEvents,
}

#[derive(Debug, Clone, Default)]
pub struct MatchAnalyzer {
    config: AnalyticsConfig,
}

impl MatchAnalyzer {
    /// Build an analyzer; the configuration is validated up front.
    pub fn new(config: AnalyticsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyze with a caller-supplied ball assignment rule.
    pub fn analyze<A>(&self, store: &mut TrackStore, assigner: &A) -> Result<MatchAnalysis>
    where
        A: BallAssigner + ?Sized,
    {
        store.validate()?;
        info!(frames = store.frame_count(), "match analysis started");

        annotate_speed_and_distance(store, &self.config.kinematics)?;
        if self.config.estimate_ball_speed {
            annotate_ball_speed(store, self.config.kinematics.frame_rate)?;
        }

        let possession = resolve_possession(store, assigner)?;
        let events = infer_events(store, &self.config)?;

        let report = MatchReport {
            summary: build_summary(&events, &possession, &self.config.teams),
            players: build_player_report(store.players()?),
        };

        info!(
            passes = report.summary.total_passes,
            shots = report.summary.total_shots,
            "match analysis finished"
        );

        Ok(MatchAnalysis {
            report,
            possession,
            events,
        })
    }

    /// Analyze using [`NearestFootAssigner`] with the configured radius.
    pub fn analyze_with_default_assigner(&self, store: &mut TrackStore) -> Result<MatchAnalysis> {
        let assigner = NearestFootAssigner::new(self.config.possession.max_player_ball_distance);
        self.analyze(store, &assigner)
    }
}
