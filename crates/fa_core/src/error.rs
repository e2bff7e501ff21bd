use thiserror::Error;

/// Fatal errors raised by the analytics core.
///
/// Missing per-frame data (null positions, vanished track ids) is never an
/// error; it is skipped where it occurs. Only a structurally broken track
/// store or an unusable configuration stops the pipeline.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Missing entity class: {class}")]
    MissingEntityClass { class: String },

    #[error("Frame count mismatch for '{class}': expected {expected}, found {found}")]
    FrameCountMismatch {
        class: String,
        expected: usize,
        found: usize,
    },

    #[error("Track store contains no frames")]
    EmptyTrackStore,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyticsError {
    /// Whether the error comes from the track store shape rather than from
    /// configuration or I/O.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AnalyticsError::MissingEntityClass { .. }
                | AnalyticsError::FrameCountMismatch { .. }
                | AnalyticsError::EmptyTrackStore
        )
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
