//! Ball-to-player assignment rule.

use crate::tracks::{measure_distance, BoundingBox, FrameSnapshot, TrackId};

/// Decides which player (if any) controls the ball in one frame.
pub trait BallAssigner {
    fn assign(&self, players: &FrameSnapshot, ball: &BoundingBox) -> Option<TrackId>;
}

/// Nearest player by foot-to-ball distance, within a pixel radius.
///
/// Distance is the smaller of the two bottom corners of the player box to
/// the ball center. Ties resolve to the lowest track id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestFootAssigner {
    pub max_distance: f32,
}

impl Default for NearestFootAssigner {
    fn default() -> Self {
        Self { max_distance: 70.0 }
    }
}

impl NearestFootAssigner {
    pub fn new(max_distance: f32) -> Self {
        Self { max_distance }
    }
}

impl BallAssigner for NearestFootAssigner {
    fn assign(&self, players: &FrameSnapshot, ball: &BoundingBox) -> Option<TrackId> {
        let ball_center = ball.center();
        let mut best: Option<(TrackId, f32)> = None;

        for (&track_id, record) in players {
            let Some(bbox) = record.bbox else {
                continue;
            };
            let (left, right) = bbox.feet();
            let distance =
                measure_distance(left, ball_center).min(measure_distance(right, ball_center));

            if distance >= self.max_distance {
                continue;
            }
            // Strict comparison keeps the first (lowest) track id on ties
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((track_id, distance));
            }
        }

        best.map(|(track_id, _)| track_id)
    }
}

impl<F> BallAssigner for F
where
    F: Fn(&FrameSnapshot, &BoundingBox) -> Option<TrackId>,
{
    fn assign(&self, players: &FrameSnapshot, ball: &BoundingBox) -> Option<TrackId> {
        self(players, ball)
    }
}
