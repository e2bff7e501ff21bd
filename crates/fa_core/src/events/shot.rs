//! # Shot Detector
//!
//! Counts frames where the ball moves at or above `shot_speed_threshold`.
//! Consecutive fast frames are counted separately; a single strike that
//! stays fast for three frames yields three shots.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ShotConfig;
use crate::tracks::FrameSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotStats {
    pub total_shots: u32,
    /// Frame index of every counted shot
    pub shot_frames: Vec<usize>,
}

/// Ball speed in a frame; a frame without a ball record or speed reads 0.
pub fn ball_speed(frame: &FrameSnapshot) -> f32 {
    frame
        .values()
        .next()
        .and_then(|record| record.speed)
        .unwrap_or(0.0)
}

pub fn detect_shots(ball: &[FrameSnapshot], config: &ShotConfig) -> ShotStats {
    let shot_frames: Vec<usize> = ball
        .iter()
        .enumerate()
        .filter(|(_, frame)| ball_speed(frame) >= config.shot_speed_threshold)
        .map(|(idx, _)| idx)
        .collect();

    debug!(shots = shot_frames.len(), "shots detected");
    ShotStats {
        total_shots: shot_frames.len() as u32,
        shot_frames,
    }
}
