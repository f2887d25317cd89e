// ABOUTME: Size model for resizable panes.
// ABOUTME: Pane keys, min/max constraints, pane descriptors, and axis spans.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Tolerance for comparing sizes after floating point arithmetic
pub const SIZE_EPSILON: f32 = 1e-3;

/// Stable identifier of a pane, unique within one layout
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneKey(pub String);

impl PaneKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaneKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for PaneKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Inclusive size bounds of one pane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneConstraints {
    pub min: f32,
    pub max: f32,
}

impl PaneConstraints {
    pub const UNBOUNDED: Self = Self {
        min: 0.0,
        max: f32::INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Result<Self, LayoutError> {
        if min.is_nan() || max.is_nan() || min < 0.0 || min > max {
            return Err(LayoutError::InvalidConstraints { min, max });
        }
        Ok(Self { min, max })
    }

    /// Build from optional bounds, defaulting to `0` and `+inf`
    pub fn from_bounds(min: Option<f32>, max: Option<f32>) -> Result<Self, LayoutError> {
        Self::new(min.unwrap_or(0.0), max.unwrap_or(f32::INFINITY))
    }

    pub fn clamp(&self, size: f32) -> f32 {
        size.max(self.min).min(self.max)
    }

    /// Whether `size` is within bounds, allowing for rounding
    pub fn contains(&self, size: f32) -> bool {
        size >= self.min - SIZE_EPSILON && size <= self.max + SIZE_EPSILON
    }

    /// How far the pane can grow from `size`
    pub fn grow_room(&self, size: f32) -> f32 {
        (self.max - size).max(0.0)
    }

    /// How far the pane can shrink from `size`
    pub fn shrink_room(&self, size: f32) -> f32 {
        (size - self.min).max(0.0)
    }
}

impl Default for PaneConstraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Pane descriptor handed to the engine at construction
#[derive(Debug, Clone)]
pub struct PaneSpec<T> {
    pub key: PaneKey,
    pub content: T,
    pub initial_size: Option<f32>,
    pub min_size: Option<f32>,
    pub max_size: Option<f32>,
}

impl<T> PaneSpec<T> {
    pub fn new(key: impl Into<PaneKey>, content: T) -> Self {
        Self {
            key: key.into(),
            content,
            initial_size: None,
            min_size: None,
            max_size: None,
        }
    }

    pub fn with_initial_size(mut self, size: f32) -> Self {
        self.initial_size = Some(size);
        self
    }

    pub fn with_min_size(mut self, size: f32) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn with_max_size(mut self, size: f32) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn constraints(&self) -> Result<PaneConstraints, LayoutError> {
        PaneConstraints::from_bounds(self.min_size, self.max_size)
    }
}

/// A live pane. The engine never looks inside `content`.
#[derive(Debug, Clone)]
pub struct Pane<T> {
    pub key: PaneKey,
    pub content: T,
    pub size: f32,
    pub constraints: PaneConstraints,
}

/// Stretch of the layout axis occupied by a pane or a handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f32,
    pub len: f32,
}

impl Span {
    pub fn end(&self) -> f32 {
        self.start + self.len
    }

    pub fn contains(&self, coordinate: f32) -> bool {
        coordinate >= self.start && coordinate < self.end()
    }
}
