//! # Pass Detector
//!
//! A pass is two adjacent control events by the same team. Adjacent events
//! by different teams are a change of possession and produce nothing.
//!
//! ## Classification
//! - short: distance <= `short_pass_threshold`
//! - long: distance >= `long_pass_threshold` (checked only when not short)
//! - cross: starts in a wide band near a touchline and ends within
//!   `penalty_area_depth` of either goal line
//! - back pass: negative x displacement (positive x is the attacking direction)

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::control::ControlEvent;
use crate::config::PassConfig;
use crate::stats::round2;
use crate::tracks::{measure_distance, Point, TrackId};

/// A completed pass between two teammates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassEvent {
    pub from: TrackId,
    pub to: TrackId,
    pub team: String,
    pub start_frame: usize,
    pub end_frame: usize,
    /// Straight-line distance in meters
    pub distance_m: f32,
    /// Displacement `end - start`
    pub vector: (f32, f32),
    pub start_pos: Point,
    pub end_pos: Point,
}

/// Length bucket. Passes between the two thresholds are `Medium` and are
/// counted in neither the short nor the long total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassLength {
    Short,
    Medium,
    Long,
}

impl PassEvent {
    pub fn length(&self, config: &PassConfig) -> PassLength {
        if self.distance_m <= config.short_pass_threshold {
            PassLength::Short
        } else if self.distance_m >= config.long_pass_threshold {
            PassLength::Long
        } else {
            PassLength::Medium
        }
    }

    pub fn is_cross(&self, config: &PassConfig) -> bool {
        let (field_length, field_width) = config.field_dimensions;
        let wide_band = config.wide_area_fraction * field_width;
        let start_y = self.start_pos.1;
        let end_x = self.end_pos.0;

        let from_wide = start_y <= wide_band || start_y >= field_width - wide_band;
        let into_box =
            end_x <= config.penalty_area_depth || end_x >= field_length - config.penalty_area_depth;
        from_wide && into_box
    }

    pub fn is_back_pass(&self) -> bool {
        self.vector.0 < 0.0
    }
}

/// Pass counts for a set of detected passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassStats {
    pub total_passes: u32,
    pub short_passes: u32,
    pub long_passes: u32,
    pub crosses: u32,
    pub back_passes: u32,
    /// Percent of passes completed, 2 decimals. Every detected pass is a
    /// same-team transition, so this is 100.0 whenever any pass exists.
    pub pass_accuracy: f32,
}

/// Passes between adjacent same-team entries of a compressed control timeline.
///
/// Entries without a team never form a pass.
pub fn detect_passes(sequence: &[ControlEvent]) -> Vec<PassEvent> {
    let mut passes = Vec::new();

    for pair in sequence.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let team = match (&a.team, &b.team) {
            (Some(ta), Some(tb)) if ta == tb => ta,
            _ => {
                trace!(from = a.track_id, to = b.track_id, "possession changed");
                continue;
            }
        };

        passes.push(PassEvent {
            from: a.track_id,
            to: b.track_id,
            team: team.clone(),
            start_frame: a.frame,
            end_frame: b.frame,
            distance_m: measure_distance(a.position, b.position),
            vector: (b.position.0 - a.position.0, b.position.1 - a.position.1),
            start_pos: a.position,
            end_pos: b.position,
        });
    }

    debug!(passes = passes.len(), controls = sequence.len(), "passes detected");
    passes
}

/// Count passes per category.
pub fn classify_passes(passes: &[PassEvent], config: &PassConfig) -> PassStats {
    let mut stats = PassStats {
        total_passes: passes.len() as u32,
        ..Default::default()
    };

    for pass in passes {
        match pass.length(config) {
            PassLength::Short => stats.short_passes += 1,
            PassLength::Long => stats.long_passes += 1,
            PassLength::Medium => {}
        }
        if pass.is_cross(config) {
            stats.crosses += 1;
        }
        if pass.is_back_pass() {
            stats.back_passes += 1;
        }
    }

    // No failed-pass event exists, so every detected pass is successful
    let successful = passes.len();
    stats.pass_accuracy = if passes.is_empty() {
        0.0
    } else {
        round2(successful as f32 / passes.len() as f32 * 100.0)
    };

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(frame: usize, track_id: TrackId, team: &str, position: Point) -> ControlEvent {
        ControlEvent {
            frame,
            track_id,
            team: Some(team.to_string()),
            position,
        }
    }

    fn pass(start: Point, end: Point) -> PassEvent {
        PassEvent {
            from: 1,
            to: 2,
            team: "A".to_string(),
            start_frame: 0,
            end_frame: 10,
            distance_m: measure_distance(start, end),
            vector: (end.0 - start.0, end.1 - start.1),
            start_pos: start,
            end_pos: end,
        }
    }

    fn thresholds(short: f32, long: f32) -> PassConfig {
        PassConfig {
            short_pass_threshold: short,
            long_pass_threshold: long,
            ..PassConfig::default()
        }
    }

    #[test]
    fn test_same_team_pair_then_turnover() {
        let sequence = vec![
            control(0, 1, "A", (10.0, 10.0)),
            control(12, 2, "A", (45.0, 12.0)),
            control(30, 7, "B", (50.0, 12.0)),
        ];

        let passes = detect_passes(&sequence);
        assert_eq!(passes.len(), 1);

        let p = &passes[0];
        assert_eq!((p.from, p.to), (1, 2));
        assert_eq!(p.team, "A");
        assert!((p.distance_m - 1229.0f32.sqrt()).abs() < 1e-4);
        assert_eq!(p.vector, (35.0, 2.0));

        let stats = classify_passes(&passes, &thresholds(15.0, 30.0));
        assert_eq!(stats.total_passes, 1);
        assert_eq!(stats.long_passes, 1);
        assert_eq!(stats.short_passes, 0);
        assert_eq!(stats.back_passes, 0);
        assert_eq!(stats.crosses, 0);
        assert_eq!(stats.pass_accuracy, 100.0);
    }

    #[test]
    fn test_missing_team_never_passes() {
        let mut sequence = vec![control(0, 1, "A", (10.0, 10.0)), control(5, 2, "A", (20.0, 10.0))];
        sequence[1].team = None;
        assert!(detect_passes(&sequence).is_empty());
    }

    #[test]
    fn test_length_buckets_are_exclusive() {
        let config = thresholds(15.0, 30.0);
        assert_eq!(pass((0.0, 0.0), (15.0, 0.0)).length(&config), PassLength::Short);
        assert_eq!(pass((0.0, 0.0), (20.0, 0.0)).length(&config), PassLength::Medium);
        assert_eq!(pass((0.0, 0.0), (30.0, 0.0)).length(&config), PassLength::Long);

        // Equal thresholds: short wins
        let degenerate = thresholds(20.0, 20.0);
        assert_eq!(pass((0.0, 0.0), (20.0, 0.0)).length(&degenerate), PassLength::Short);
    }

    #[test]
    fn test_cross_requires_wide_start_and_box_end() {
        let config = PassConfig::default(); // 100 x 64, wide band 12.8, box 16.5

        // Near touchline into the right box
        assert!(pass((70.0, 5.0), (90.0, 30.0)).is_cross(&config));
        // Near the far touchline into the left box
        assert!(pass((30.0, 60.0), (16.5, 32.0)).is_cross(&config));
        // Central start
        assert!(!pass((70.0, 32.0), (90.0, 30.0)).is_cross(&config));
        // Wide start, ends in midfield
        assert!(!pass((40.0, 5.0), (60.0, 30.0)).is_cross(&config));
    }

    #[test]
    fn test_wide_band_edges_are_inclusive() {
        let config = PassConfig::default();
        let wide_band = config.wide_area_fraction * config.field_dimensions.1; // 12.8
        let far_edge = config.field_dimensions.1 - wide_band; // 51.2

        assert!(pass((70.0, wide_band), (90.0, 30.0)).is_cross(&config));
        assert!(pass((70.0, far_edge), (90.0, 30.0)).is_cross(&config));
        assert!(!pass((70.0, wide_band + 0.01), (90.0, 30.0)).is_cross(&config));
        assert!(!pass((70.0, far_edge - 0.01), (90.0, 30.0)).is_cross(&config));
    }

    #[test]
    fn test_back_pass() {
        assert!(pass((50.0, 30.0), (40.0, 30.0)).is_back_pass());
        assert!(!pass((50.0, 30.0), (50.0, 10.0)).is_back_pass());
    }

    #[test]
    fn test_no_passes_zero_accuracy() {
        let stats = classify_passes(&[], &PassConfig::default());
        assert_eq!(stats, PassStats::default());
        assert_eq!(stats.pass_accuracy, 0.0);
    }

    #[test]
    fn test_mixed_classification_counts() {
        let passes = vec![
            pass((50.0, 30.0), (45.0, 30.0)), // short, back
            pass((70.0, 3.0), (95.0, 30.0)),  // long (~36.8m), cross
            pass((20.0, 30.0), (40.0, 30.0)), // medium
        ];
        let stats = classify_passes(&passes, &PassConfig::default());
        assert_eq!(stats.total_passes, 3);
        assert_eq!(stats.short_passes, 1);
        assert_eq!(stats.long_passes, 1);
        assert_eq!(stats.crosses, 1);
        assert_eq!(stats.back_passes, 1);
    }
}
