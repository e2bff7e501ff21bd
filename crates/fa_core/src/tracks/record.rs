//! Per-frame attribute record for one tracked entity.

use serde::{Deserialize, Serialize};

/// Stable track identifier within one entity class.
pub type TrackId = u32;

/// 2D point (x, y). Pitch coordinates are meters, raw coordinates pixels.
pub type Point = (f32, f32);

/// Euclidean distance between two points.
#[inline]
pub fn measure_distance(a: Point, b: Point) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// Pixel bounding box `[x1, y1, x2, y2]` as produced by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox(pub [f32; 4]);

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self([x1, y1, x2, y2])
    }

    pub fn center(&self) -> Point {
        let [x1, y1, x2, y2] = self.0;
        ((x1 + x2) / 2.0, (y1 + y2) / 2.0)
    }

    pub fn width(&self) -> f32 {
        self.0[2] - self.0[0]
    }

    /// Bottom-center of the box, where the player stands.
    pub fn foot_position(&self) -> Point {
        let [x1, _, x2, y2] = self.0;
        ((x1 + x2) / 2.0, y2)
    }

    /// Bottom-left and bottom-right corners.
    pub fn feet(&self) -> (Point, Point) {
        let [x1, _, x2, y2] = self.0;
        ((x1, y2), (x2, y2))
    }
}

/// Attributes of one entity in one frame.
///
/// Upstream collaborators fill `bbox`, `position`, `position_transformed`
/// and `team`. This crate writes `has_ball`, `speed` and `distance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRecord {
    pub bbox: Option<BoundingBox>,
    /// Camera-compensated pixel position
    pub position: Option<Point>,
    /// Pitch position in meters, `None` when the homography failed
    pub position_transformed: Option<Point>,
    pub team: Option<String>,
    pub has_ball: bool,
    /// Speed in km/h
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    /// Cumulative distance in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
}

impl TrackRecord {
    pub fn with_transformed(pos: Point) -> Self {
        Self {
            position_transformed: Some(pos),
            ..Default::default()
        }
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Pitch position if known, else the untransformed position.
    pub fn best_position(&self) -> Option<Point> {
        self.position_transformed.or(self.position)
    }
}
