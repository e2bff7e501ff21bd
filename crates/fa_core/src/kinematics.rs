//! # Speed and Distance Estimator
//!
//! Converts pitch-coordinate displacement into speed (km/h) and cumulative
//! distance (m) per track.
//!
//! ## Algorithm
//! 1. Split each class's frames into windows of `window_size` frames
//! 2. The window end is clamped to the last frame
//! 3. For every track id in the window's first frame, measure the straight
//!    line between its start and end pitch positions
//! 4. Write the window speed and running distance into every frame of
//!    `[start, end)` where the track exists
//!
//! Ball and referee tracks are never annotated here. Ball speed comes from
//! [`annotate_ball_speed`] or from an external source.

use std::collections::HashMap;
use tracing::{debug, info, trace};

use crate::config::KinematicsConfig;
use crate::error::Result;
use crate::tracks::{measure_distance, FrameSnapshot, TrackId, TrackStore, BALL, REFEREES};

/// m/s to km/h
pub const MPS_TO_KMH: f32 = 3.6;

/// Classes excluded from windowed estimation.
pub const EXCLUDED_CLASSES: [&str; 2] = [BALL, REFEREES];

/// Counters describing one estimator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KinematicsSummary {
    /// Windows with non-zero length that were scanned
    pub windows: usize,
    /// (window, track) pairs that produced a measurement
    pub measured: usize,
    /// (window, track) pairs skipped for a missing endpoint or position
    pub skipped: usize,
}

/// Half-open frame window `[start, end)`; `end` is also the sampled endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameWindow {
    pub start: usize,
    pub end: usize,
}

impl FrameWindow {
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Windows covering `total_frames`, each ending at `min(start + size, total - 1)`.
///
/// A final window that starts on the last frame has zero length and is
/// still returned; callers treat it as a no-op.
pub fn frame_windows(total_frames: usize, window_size: usize) -> Vec<FrameWindow> {
    if total_frames == 0 || window_size == 0 {
        return Vec::new();
    }

    (0..total_frames)
        .step_by(window_size)
        .map(|start| FrameWindow {
            start,
            end: (start + window_size).min(total_frames - 1),
        })
        .collect()
}

/// Annotate `speed` and `distance` on every class except ball and referees.
pub fn annotate_speed_and_distance(
    store: &mut TrackStore,
    config: &KinematicsConfig,
) -> Result<KinematicsSummary> {
    let mut summary = KinematicsSummary::default();

    for (class, frames) in store.iter_classes_mut() {
        if EXCLUDED_CLASSES.contains(&class) {
            continue;
        }
        let class_summary = annotate_class(frames, config);
        debug!(
            class,
            windows = class_summary.windows,
            measured = class_summary.measured,
            skipped = class_summary.skipped,
            "kinematics class done"
        );
        summary.windows += class_summary.windows;
        summary.measured += class_summary.measured;
        summary.skipped += class_summary.skipped;
    }

    info!(
        windows = summary.windows,
        measured = summary.measured,
        skipped = summary.skipped,
        "speed and distance annotated"
    );
    Ok(summary)
}

/// Windowed estimation over the frames of a single class.
pub fn annotate_class(frames: &mut [FrameSnapshot], config: &KinematicsConfig) -> KinematicsSummary {
    let mut summary = KinematicsSummary::default();
    let mut total_distance: HashMap<TrackId, f32> = HashMap::new();

    for window in frame_windows(frames.len(), config.window_size) {
        if window.is_empty() {
            continue;
        }
        summary.windows += 1;

        let elapsed_s = window.len() as f32 / config.frame_rate;
        let track_ids: Vec<TrackId> = frames[window.start].keys().copied().collect();

        for track_id in track_ids {
            let Some(end_record) = frames[window.end].get(&track_id) else {
                trace!(track_id, start = window.start, "track absent at window end");
                summary.skipped += 1;
                continue;
            };

            let start_pos = frames[window.start][&track_id].position_transformed;
            let (Some(start_pos), Some(end_pos)) = (start_pos, end_record.position_transformed)
            else {
                trace!(track_id, start = window.start, "missing pitch position");
                summary.skipped += 1;
                continue;
            };

            let covered = measure_distance(start_pos, end_pos);
            let speed_kmh = covered / elapsed_s * MPS_TO_KMH;

            let total = total_distance.entry(track_id).or_insert(0.0);
            *total += covered;
            let total = *total;

            for frame in &mut frames[window.start..window.end] {
                if let Some(record) = frame.get_mut(&track_id) {
                    record.speed = Some(speed_kmh);
                    record.distance = Some(total);
                }
            }
            summary.measured += 1;
        }
    }

    summary
}

/// Derive ball speed from frame-to-frame pitch displacement.
///
/// Each ball record whose track id also has a pitch position in the
/// previous frame gets `speed = displacement * frame_rate * 3.6`. Records
/// that already carry a speed are left alone. Returns the number of
/// records written.
pub fn annotate_ball_speed(store: &mut TrackStore, frame_rate: f32) -> Result<usize> {
    let frames = store.require_mut(BALL)?;
    let mut written = 0;

    for idx in 1..frames.len() {
        let (before, after) = frames.split_at_mut(idx);
        let prev = &before[idx - 1];

        for (track_id, record) in after[0].iter_mut() {
            if record.speed.is_some() {
                continue;
            }
            let Some(pos) = record.position_transformed else {
                continue;
            };
            let Some(prev_pos) = prev.get(track_id).and_then(|r| r.position_transformed) else {
                continue;
            };

            record.speed = Some(measure_distance(prev_pos, pos) * frame_rate * MPS_TO_KMH);
            written += 1;
        }
    }

    debug!(written, "ball speed estimated");
    Ok(written)
}
