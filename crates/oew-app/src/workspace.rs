// ABOUTME: Workstation pane layout wired to the mixer height context.
// ABOUTME: Turns pointer, focus, and window events into resize engine calls.

use anyhow::{Context, Result};
use oew_core::{Config, PointerPosition};
use oew_layout::{PaneKey, PaneResize, PaneSpec, ResizeEvent};
use oew_mixer::{MixerBridge, MixerHeight, MixerPanel};

/// What a pane shows. The layout carries it without looking at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Transport,
    Timeline,
    Mixer,
    Browser,
    Other,
}

impl View {
    fn for_key(key: &str, mixer_key: &str) -> Self {
        match key {
            k if k == mixer_key => View::Mixer,
            "transport" => View::Transport,
            "timeline" => View::Timeline,
            "browser" => View::Browser,
            _ => View::Other,
        }
    }
}

/// Pointer feedback for the host window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    Nothing,
    Boundary,
    Dragging,
}

pub struct Workspace {
    layout: PaneResize<View>,
    mixer_height: MixerHeight,
    mixer: Option<MixerBridge>,
    panel: Option<MixerPanel>,
    expanded_mixer: f32,
    grab_tolerance: f32,
    pointer: PointerPosition,
}

impl Workspace {
    pub fn from_config(config: &Config) -> Result<Self> {
        let specs = config
            .panes
            .iter()
            .map(|pane| {
                let mut spec = PaneSpec::new(
                    pane.key.as_str(),
                    View::for_key(&pane.key, &config.mixer.pane),
                );
                spec.initial_size = pane.initial_size;
                spec.min_size = pane.min_size;
                spec.max_size = pane.max_size;
                spec
            })
            .collect();

        let mut layout = PaneResize::with_settings(specs, config.window_extent(), &config.layout)
            .context("Pane layout does not fit the window")?;

        let mixer_height = MixerHeight::new(0.0);
        let (mixer, panel) = if layout.index_of(&config.mixer.pane).is_some() {
            let bridge = MixerBridge::new(
                config.mixer.pane.as_str(),
                mixer_height.consumer(),
                &layout,
            )?;
            let panel = MixerPanel::mount(&mixer_height.consumer(), &config.mixer)?;
            (Some(bridge), Some(panel))
        } else {
            tracing::warn!("No pane named {:?}; mixer disabled", config.mixer.pane);
            (None, None)
        };

        let mut mirror = mixer
            .as_ref()
            .map(|bridge| bridge.observer(&layout))
            .transpose()?;
        let keys: Vec<PaneKey> = layout.panes().iter().map(|p| p.key.clone()).collect();
        layout.on_resize(move |sizes| {
            if let Some(mirror) = mirror.as_mut() {
                mirror(sizes);
            }
            log_resize(&keys, sizes);
        });

        Ok(Self {
            layout,
            mixer_height,
            mixer,
            panel,
            expanded_mixer: config.mixer.expanded_height,
            grab_tolerance: config.layout.grab_tolerance,
            pointer: PointerPosition::default(),
        })
    }

    pub fn layout(&self) -> &PaneResize<View> {
        &self.layout
    }

    pub fn mixer_height(&self) -> f32 {
        self.mixer_height.get()
    }

    pub fn fader_length(&self) -> Option<f32> {
        self.panel.as_ref().map(MixerPanel::fader_length)
    }

    fn hovered_boundary(&self) -> Option<usize> {
        let coordinate = self.layout.axis().component(self.pointer);
        self.layout.boundary_at(coordinate, self.grab_tolerance)
    }

    /// What the pointer is over right now
    pub fn hover(&self) -> Hover {
        if self.layout.is_dragging() {
            Hover::Dragging
        } else if self.hovered_boundary().is_some() {
            Hover::Boundary
        } else {
            Hover::Nothing
        }
    }

    pub fn pointer_moved(&mut self, pointer: PointerPosition) -> Hover {
        self.pointer = pointer;
        if self.layout.is_dragging() {
            if let Err(e) = self.layout.drag_move(pointer) {
                tracing::error!("Drag step failed: {}", e);
            }
        }
        self.hover()
    }

    /// Primary button went down; starts a drag if a handle is under the pointer
    pub fn pointer_pressed(&mut self) -> bool {
        let Some(boundary) = self.hovered_boundary() else {
            return false;
        };
        let panes = self.layout.panes();
        tracing::debug!(
            "Grabbed handle between {:?} and {:?}",
            panes[boundary].content,
            panes[boundary + 1].content
        );
        match self.layout.drag_start(boundary, self.pointer) {
            Ok(started) => started,
            Err(e) => {
                tracing::error!("Cannot drag boundary {}: {}", boundary, e);
                false
            }
        }
    }

    pub fn pointer_released(&mut self) {
        self.layout.drag_end();
    }

    /// Pointer capture lost (focus change, escape); the last drag step sticks
    pub fn pointer_lost(&mut self) {
        if self.layout.cancel_drag() {
            tracing::info!("Drag cancelled");
        }
    }

    pub fn resized(&mut self, extent: f32) {
        if let Err(e) = self.layout.set_extent(extent) {
            tracing::warn!("Keeping previous layout: {}", e);
        }
    }

    /// Flip the mixer between its expanded height and its smallest allowed height
    pub fn toggle_mixer(&mut self) -> Option<f32> {
        let bridge = self.mixer.as_ref()?;
        let pane = self.layout.pane(bridge.key().as_str())?;
        let expanded = pane.constraints.clamp(self.expanded_mixer);
        let target = if pane.size + oew_layout::SIZE_EPSILON >= expanded {
            pane.constraints.min
        } else {
            expanded
        };

        match bridge.set_height(&mut self.layout, target) {
            Ok(granted) => {
                tracing::info!("Mixer height {}", granted);
                Some(granted)
            }
            Err(e) => {
                tracing::error!("Cannot resize mixer: {}", e);
                None
            }
        }
    }
}

fn log_resize(keys: &[PaneKey], sizes: &[f32]) {
    let event = ResizeEvent {
        keys: keys.to_vec(),
        sizes: sizes.to_vec(),
    };
    match serde_json::to_string(&event) {
        Ok(json) => tracing::debug!("resize {}", json),
        Err(e) => tracing::warn!("Cannot encode resize event: {}", e),
    }
}
