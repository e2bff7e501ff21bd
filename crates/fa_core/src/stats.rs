//! Match summary aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tracing::warn;

use crate::events::MatchEvents;
use crate::possession::{split_possession, PossessionTimeline};

/// Round to 2 decimal places.
#[inline]
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Summary statistics for one analysed video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub total_passes: u32,
    pub short_passes: u32,
    pub long_passes: u32,
    pub crosses: u32,
    pub back_passes: u32,
    /// Percent, 2 decimals
    pub pass_accuracy: f32,
    pub total_shots: u32,
    /// Possession percent for the two configured teams. Always holds both
    /// keys; 50.0 each when neither team held the ball.
    pub possession: BTreeMap<String, f32>,
    /// Frames attributed to each team label seen, plus both configured teams
    pub possession_frames: BTreeMap<String, usize>,
}

/// Combine event counts and the possession timeline into one record.
///
/// Possession is split between `teams` only; frames held by any other
/// label are left out of the percentages.
pub fn build_summary(
    events: &MatchEvents,
    timeline: &PossessionTimeline,
    teams: &(String, String),
) -> MatchSummary {
    let (first, second) = teams;
    let mut frames = timeline.frame_counts();
    for team in [first, second] {
        frames.entry(team.clone()).or_insert(0);
    }
    if frames.len() > 2 {
        let unexpected: Vec<&str> = frames
            .keys()
            .filter(|label| *label != first && *label != second)
            .map(String::as_str)
            .collect();
        warn!(?unexpected, "possession held by labels outside the configured teams");
    }

    let share = split_possession(frames[first], frames[second]);
    let possession = BTreeMap::from([(first.clone(), share.first), (second.clone(), share.second)]);

    let passes = &events.pass_stats;
    MatchSummary {
        total_passes: passes.total_passes,
        short_passes: passes.short_passes,
        long_passes: passes.long_passes,
        crosses: passes.crosses,
        back_passes: passes.back_passes,
        pass_accuracy: passes.pass_accuracy,
        total_shots: events.shots.total_shots,
        possession,
        possession_frames: frames,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{PassStats, ShotStats};

    #[test]
    fn test_round2() {
        assert_eq!(round2(35.0571), 35.06);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_summary_combines_stages() {
        let events = MatchEvents {
            pass_stats: PassStats {
                total_passes: 4,
                short_passes: 2,
                long_passes: 1,
                crosses: 1,
                back_passes: 1,
                pass_accuracy: 100.0,
            },
            shots: ShotStats {
                total_shots: 2,
                shot_frames: vec![10, 11],
            },
            ..Default::default()
        };
        let mut timeline = PossessionTimeline::new();
        timeline.push_unassigned();
        timeline.push_team("Red");
        timeline.push_team("Blue");

        let summary = build_summary(&events, &timeline, &teams());
        assert_eq!(summary.total_passes, 4);
        assert_eq!(summary.total_shots, 2);
        assert_eq!(summary.possession["Red"], 50.0);
        assert_eq!(summary.possession["Blue"], 50.0);
        assert_eq!(summary.possession_frames["Red"], 1);
    }

    fn teams() -> (String, String) {
        ("Red".to_string(), "Blue".to_string())
    }

    #[test]
    fn test_summary_reports_both_teams_without_possession() {
        let mut timeline = PossessionTimeline::new();
        timeline.push_unassigned();
        timeline.push_unassigned();

        let summary = build_summary(&MatchEvents::default(), &timeline, &teams());
        assert_eq!(summary.possession.len(), 2);
        assert_eq!(summary.possession["Red"], 50.0);
        assert_eq!(summary.possession["Blue"], 50.0);
        assert_eq!(summary.possession_frames["Blue"], 0);
    }

    #[test]
    fn test_summary_single_team_and_foreign_labels() {
        let mut timeline = PossessionTimeline::new();
        timeline.push_team("Red");
        timeline.push_team("Red");
        timeline.push_team("Green");

        let summary = build_summary(&MatchEvents::default(), &timeline, &teams());
        assert_eq!(summary.possession.len(), 2);
        assert_eq!(summary.possession["Red"], 100.0);
        assert_eq!(summary.possession["Blue"], 0.0);
        assert_eq!(summary.possession_frames["Green"], 1);
    }
}
