//! Per-frame team possession timeline and possession shares.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::round2;

/// Team in control for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PossessionMark {
    /// No team has been established yet
    Unknown,
    Team(String),
}

impl PossessionMark {
    pub fn team(&self) -> Option<&str> {
        match self {
            PossessionMark::Unknown => None,
            PossessionMark::Team(name) => Some(name),
        }
    }
}

/// Two-team possession split in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PossessionShare {
    pub first: f32,
    pub second: f32,
}

/// One mark per frame, in frame order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PossessionTimeline {
    marks: Vec<PossessionMark>,
}

impl PossessionTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(frames: usize) -> Self {
        Self {
            marks: Vec::with_capacity(frames),
        }
    }

    /// Record a frame with a known team in control.
    pub fn push_team(&mut self, team: &str) {
        self.marks.push(PossessionMark::Team(team.to_string()));
    }

    /// Record a frame without an assignment: the previous team keeps the
    /// ball, or `Unknown` before any team has had it.
    pub fn push_unassigned(&mut self) {
        let mark = self
            .marks
            .last()
            .cloned()
            .unwrap_or(PossessionMark::Unknown);
        self.marks.push(mark);
    }

    pub fn marks(&self) -> &[PossessionMark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Frames attributed to each team.
    pub fn frame_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for team in self.marks.iter().filter_map(PossessionMark::team) {
            *counts.entry(team.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Possession percentage per team over all non-Unknown frames.
    pub fn shares(&self) -> BTreeMap<String, f32> {
        let counts = self.frame_counts();
        let total: usize = counts.values().sum();
        counts
            .into_iter()
            .map(|(team, n)| (team, round2(n as f32 / total as f32 * 100.0)))
            .collect()
    }

    /// Split between two named teams. Frames held by any other label are
    /// ignored.
    pub fn share_between(&self, first: &str, second: &str) -> PossessionShare {
        let counts = self.frame_counts();
        split_possession(
            counts.get(first).copied().unwrap_or(0),
            counts.get(second).copied().unwrap_or(0),
        )
    }
}

/// Percent split of two frame counts; 50/50 when both are zero.
pub fn split_possession(first_frames: usize, second_frames: usize) -> PossessionShare {
    let total = first_frames + second_frames;
    if total == 0 {
        return PossessionShare {
            first: 50.0,
            second: 50.0,
        };
    }

    PossessionShare {
        first: round2(first_frames as f32 / total as f32 * 100.0),
        second: round2(second_frames as f32 / total as f32 * 100.0),
    }
}
