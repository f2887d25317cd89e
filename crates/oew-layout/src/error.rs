// ABOUTME: Error type for layout construction and resize calls.
// ABOUTME: Configuration errors come from unsatisfiable setups, usage errors from bad arguments.

use crate::PaneKey;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Layout has no panes")]
    EmptyLayout,

    #[error("Duplicate pane key: {0}")]
    DuplicateKey(PaneKey),

    #[error("Invalid constraints: min {min}, max {max}")]
    InvalidConstraints { min: f32, max: f32 },

    #[error("Layout extent must be a finite, non-negative length, got {0}")]
    InvalidExtent(f32),

    #[error("Pane minimums need {required} but only {available} is available")]
    MinimumsExceedExtent { required: f32, available: f32 },

    #[error("Pane maximums allow {allowed} but {available} must be filled")]
    MaximumsBelowExtent { allowed: f32, available: f32 },

    #[error("Boundary {index} out of range ({boundaries} boundaries)")]
    InvalidBoundary { index: usize, boundaries: usize },

    #[error("Size vector has {sizes} entries but {constraints} constraints were given")]
    LengthMismatch { sizes: usize, constraints: usize },

    #[error("Invalid resize amount: {0}")]
    InvalidDelta(f32),

    #[error("Unknown pane: {0}")]
    UnknownPane(PaneKey),
}

impl LayoutError {
    /// True for errors caused by an unsatisfiable layout setup rather than a bad call
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LayoutError::EmptyLayout
                | LayoutError::DuplicateKey(_)
                | LayoutError::InvalidConstraints { .. }
                | LayoutError::InvalidExtent(_)
                | LayoutError::MinimumsExceedExtent { .. }
                | LayoutError::MaximumsBelowExtent { .. }
        )
    }
}
