//! # Match Report
//!
//! Per-player movement figures and the combined report handed to the
//! external reporting layer. Nothing here writes files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::possession::{split_possession, PossessionShare};
use crate::stats::{round2, MatchSummary};
use crate::tracks::{FrameSnapshot, TrackId};

/// Team label for players that never received a team.
pub const UNKNOWN_TEAM: &str = "Unknown";

/// Movement figures for one player track, 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub track_id: TrackId,
    /// Largest cumulative distance seen (m)
    pub longest_distance: f32,
    /// Mean of the per-frame cumulative distance (m)
    pub avg_distance: f32,
    /// km/h
    pub highest_speed: f32,
    /// km/h
    pub avg_speed: f32,
}

/// Report for a whole video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub summary: MatchSummary,
    /// Players grouped by team, ordered by track id
    pub players: BTreeMap<String, Vec<PlayerReport>>,
}

impl MatchReport {
    /// Two-team possession split, 50/50 when neither team held the ball.
    pub fn possession_between(&self, first: &str, second: &str) -> PossessionShare {
        let frames = &self.summary.possession_frames;
        split_possession(
            frames.get(first).copied().unwrap_or(0),
            frames.get(second).copied().unwrap_or(0),
        )
    }
}

#[derive(Default)]
struct Accumulator {
    distance_sum: f32,
    longest_distance: f32,
    speed_sum: f32,
    highest_speed: f32,
    samples: u32,
}

/// Aggregate speed and distance per (team, track id) over every frame a
/// player appears in. Frames without a value contribute 0.0.
///
/// A track that changes team label mid-video is reported under each label.
pub fn build_player_report(players: &[FrameSnapshot]) -> BTreeMap<String, Vec<PlayerReport>> {
    let mut acc: BTreeMap<(String, TrackId), Accumulator> = BTreeMap::new();

    for frame in players {
        for (&track_id, record) in frame {
            let team = record.team.as_deref().unwrap_or(UNKNOWN_TEAM).to_string();
            let speed = record.speed.unwrap_or(0.0);
            let distance = record.distance.unwrap_or(0.0);

            let entry = acc.entry((team, track_id)).or_default();
            entry.distance_sum += distance;
            entry.longest_distance = entry.longest_distance.max(distance);
            entry.speed_sum += speed;
            entry.highest_speed = entry.highest_speed.max(speed);
            entry.samples += 1;
        }
    }

    let mut report: BTreeMap<String, Vec<PlayerReport>> = BTreeMap::new();
    for ((team, track_id), a) in acc {
        let n = a.samples.max(1) as f32;
        report.entry(team).or_default().push(PlayerReport {
            track_id,
            longest_distance: round2(a.longest_distance),
            avg_distance: round2(a.distance_sum / n),
            highest_speed: round2(a.highest_speed),
            avg_speed: round2(a.speed_sum / n),
        });
    }
    report
}
