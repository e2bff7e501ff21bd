//! Track store shared by every analytics stage.
//!
//! Frames are kept in a dense `Vec` indexed by frame number; within a frame
//! records are keyed by track id in a `BTreeMap` so every scan visits track
//! ids in the same order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::record::{TrackId, TrackRecord};
use crate::error::{AnalyticsError, Result};

pub const PLAYERS: &str = "players";
pub const REFEREES: &str = "referees";
pub const BALL: &str = "ball";

/// Classes that must be present for the pipeline to run.
pub const REQUIRED_CLASSES: [&str; 2] = [PLAYERS, BALL];

/// All records of one entity class in one frame.
pub type FrameSnapshot = BTreeMap<TrackId, TrackRecord>;

/// Mapping from entity class label to its per-frame snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackStore {
    classes: BTreeMap<String, Vec<FrameSnapshot>>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert or replace the frames of an entity class.
    pub fn insert_class(&mut self, class: &str, frames: Vec<FrameSnapshot>) {
        self.classes.insert(class.to_string(), frames);
    }

    pub fn class(&self, class: &str) -> Option<&[FrameSnapshot]> {
        self.classes.get(class).map(Vec::as_slice)
    }

    pub fn class_mut(&mut self, class: &str) -> Option<&mut Vec<FrameSnapshot>> {
        self.classes.get_mut(class)
    }

    /// Class labels in sorted order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn iter_classes_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<FrameSnapshot>)> {
        self.classes.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Frames of a class that must exist, or a structural error.
    pub fn require(&self, class: &str) -> Result<&[FrameSnapshot]> {
        self.class(class)
            .ok_or_else(|| AnalyticsError::MissingEntityClass {
                class: class.to_string(),
            })
    }

    pub fn require_mut(&mut self, class: &str) -> Result<&mut Vec<FrameSnapshot>> {
        self.classes
            .get_mut(class)
            .ok_or_else(|| AnalyticsError::MissingEntityClass {
                class: class.to_string(),
            })
    }

    pub fn players(&self) -> Result<&[FrameSnapshot]> {
        self.require(PLAYERS)
    }

    pub fn ball(&self) -> Result<&[FrameSnapshot]> {
        self.require(BALL)
    }

    /// Number of frames, taken from the players class.
    pub fn frame_count(&self) -> usize {
        self.class(PLAYERS).map_or(0, <[FrameSnapshot]>::len)
    }

    /// Structural check: required classes present, at least one frame, and
    /// every class aligned to the same frame count.
    pub fn validate(&self) -> Result<()> {
        for class in REQUIRED_CLASSES {
            self.require(class)?;
        }

        let expected = self.frame_count();
        if expected == 0 {
            return Err(AnalyticsError::EmptyTrackStore);
        }

        for (class, frames) in &self.classes {
            if frames.len() != expected {
                return Err(AnalyticsError::FrameCountMismatch {
                    class: class.clone(),
                    expected,
                    found: frames.len(),
                });
            }
        }

        Ok(())
    }
}
