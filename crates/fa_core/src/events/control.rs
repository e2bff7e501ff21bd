//! # Ball Control Timeline
//!
//! Turns per-frame `has_ball` flags into a compressed sequence of control
//! events: one entry each time the ball changes to a different player.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tracks::{FrameSnapshot, Point, TrackId};

/// A player taking control of the ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlEvent {
    /// First frame of this control spell
    pub frame: usize,
    pub track_id: TrackId,
    pub team: Option<String>,
    /// Pitch position, or raw position when the transform was unavailable
    pub position: Point,
}

/// Every `has_ball` record in frame order, uncompressed.
///
/// Records with neither a pitch nor a raw position are dropped.
pub fn collect_control_events(players: &[FrameSnapshot]) -> Vec<ControlEvent> {
    let mut events = Vec::new();

    for (frame, snapshot) in players.iter().enumerate() {
        for (&track_id, record) in snapshot {
            if !record.has_ball {
                continue;
            }
            let Some(position) = record.best_position() else {
                trace!(frame, track_id, "ball holder without position");
                continue;
            };
            events.push(ControlEvent {
                frame,
                track_id,
                team: record.team.clone(),
                position,
            });
        }
    }

    events
}

/// Collapse consecutive events by the same player into the first of them.
pub fn compress_control_events(events: Vec<ControlEvent>) -> Vec<ControlEvent> {
    let mut compressed: Vec<ControlEvent> = Vec::with_capacity(events.len());
    for event in events {
        if compressed.last().map_or(true, |last| last.track_id != event.track_id) {
            compressed.push(event);
        }
    }
    compressed
}

/// Compressed control timeline for the given player frames.
pub fn build_control_sequence(players: &[FrameSnapshot]) -> Vec<ControlEvent> {
    compress_control_events(collect_control_events(players))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::TrackRecord;

    fn holder(track_id: TrackId, team: &str, pos: Option<Point>) -> FrameSnapshot {
        let mut frame = FrameSnapshot::new();
        let mut record = TrackRecord::default().with_team(team);
        record.position_transformed = pos;
        record.has_ball = true;
        frame.insert(track_id, record);
        frame
    }

    #[test]
    fn test_consecutive_same_player_collapsed() {
        let frames = vec![
            holder(4, "Red", Some((10.0, 10.0))),
            holder(4, "Red", Some((11.0, 10.0))),
            holder(4, "Red", Some((12.0, 10.0))),
            holder(9, "Red", Some((30.0, 12.0))),
            holder(4, "Red", Some((40.0, 12.0))),
        ];

        let sequence = build_control_sequence(&frames);
        let ids: Vec<_> = sequence.iter().map(|e| e.track_id).collect();
        assert_eq!(ids, vec![4, 9, 4]);
        assert_eq!(sequence[0].frame, 0);
        assert_eq!(sequence[0].position, (10.0, 10.0));
        assert_eq!(sequence[1].frame, 3);
    }

    #[test]
    fn test_frames_without_holder_do_not_split_spell() {
        let frames = vec![
            holder(4, "Red", Some((10.0, 10.0))),
            FrameSnapshot::new(),
            holder(4, "Red", Some((12.0, 10.0))),
        ];
        assert_eq!(build_control_sequence(&frames).len(), 1);
    }

    #[test]
    fn test_raw_position_fallback_and_skip() {
        let mut raw_only = holder(5, "Blue", None);
        raw_only.get_mut(&5).unwrap().position = Some((640.0, 360.0));

        let frames = vec![raw_only, holder(6, "Blue", None)];
        let sequence = build_control_sequence(&frames);

        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].track_id, 5);
        assert_eq!(sequence[0].position, (640.0, 360.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_control_sequence(&[]).is_empty());
    }
}
