// ABOUTME: Axis and pointer coordinate types shared by layout and input handling.
// ABOUTME: The axis picks which pointer component drives a resize gesture.

use serde::{Deserialize, Serialize};

/// Direction along which a layout stacks its panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Panes sit side by side; boundaries are dragged left/right.
    Horizontal,
    /// Panes are stacked top to bottom; boundaries are dragged up/down.
    #[default]
    Vertical,
}

impl Axis {
    /// Component of a pointer position that lies along this axis
    pub fn component(&self, position: PointerPosition) -> f32 {
        match self {
            Axis::Horizontal => position.x,
            Axis::Vertical => position.y,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

/// Pointer location in window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position with only the given axis component set
    pub fn along(axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(value, 0.0),
            Axis::Vertical => Self::new(0.0, value),
        }
    }
}

impl From<(f64, f64)> for PointerPosition {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x as f32, y as f32)
    }
}
