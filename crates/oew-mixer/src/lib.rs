// ABOUTME: Mixer panel state shared across the view tree.
// ABOUTME: Provides a scoped height cell and keeps it coherent with the pane layout.

pub mod bridge;
pub mod context;
pub mod panel;

pub use bridge::{use_mixer, Mixer, MixerBridge, MixerError, MixerHeight};
pub use context::{Consumer, ContextError, Provider};
pub use panel::MixerPanel;
