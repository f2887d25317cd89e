// ABOUTME: Shared types and configuration for the Orpheus workstation shell.
// ABOUTME: Defines the layout axis, pointer positions, and config file handling.

pub mod config;
pub mod geometry;

pub use config::{Config, ConfigError, LayoutSettings, MixerSettings, PaneSettings};
pub use geometry::{Axis, PointerPosition};
