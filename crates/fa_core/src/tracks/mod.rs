//! # Track Store
//!
//! Per-frame object tracks produced by the upstream detection, tracking and
//! perspective stages. The analytics stages annotate records in place and
//! never remove frames or track ids.

pub mod record;
pub mod store;

pub use record::{measure_distance, BoundingBox, Point, TrackId, TrackRecord};
pub use store::{FrameSnapshot, TrackStore, BALL, PLAYERS, REFEREES, REQUIRED_CLASSES};
