// ABOUTME: Pane layout management for the workstation shell.
// ABOUTME: Tracks pane sizes along one axis and resizes them under min/max constraints.

mod engine;
mod error;
mod model;
pub mod solver;

pub use engine::{PaneResize, ResizeCallback, ResizeEvent};
pub use error::LayoutError;
pub use model::{Pane, PaneConstraints, PaneKey, PaneSpec, Span, SIZE_EPSILON};
pub use oew_core::{Axis, PointerPosition};
pub use solver::{fit, solve};
