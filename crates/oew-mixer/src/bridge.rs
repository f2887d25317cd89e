// ABOUTME: Mixer height handle and the bridge that keeps it in step with the pane layout.
// ABOUTME: Height writes go through the layout engine so pane constraints still apply.

use oew_layout::{LayoutError, PaneKey, PaneResize, ResizeCallback};

use crate::{Consumer, ContextError, Provider};

/// Scope that owns the mixer panel's height
pub type MixerHeight = Provider<f32>;

#[derive(Debug, thiserror::Error)]
pub enum MixerError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Mixer height as seen by one view, with a setter
#[derive(Debug, Clone)]
pub struct Mixer {
    height: f32,
    context: Consumer<f32>,
}

impl Mixer {
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Update the shared height. This does not move any pane; see [`MixerBridge`].
    pub fn set_height(&mut self, height: f32) -> Result<(), ContextError> {
        self.context.write(height)?;
        self.height = height;
        Ok(())
    }
}

/// Read the mixer height from the enclosing scope
pub fn use_mixer(context: &Consumer<f32>) -> Result<Mixer, ContextError> {
    Ok(Mixer {
        height: context.read()?,
        context: context.clone(),
    })
}

/// Connects the mixer height context to the pane that shows the mixer
#[derive(Debug, Clone)]
pub struct MixerBridge {
    key: PaneKey,
    context: Consumer<f32>,
}

impl MixerBridge {
    /// Bind `context` to pane `key`, seeding the context with the pane's current size
    pub fn new<T>(
        key: impl Into<PaneKey>,
        context: Consumer<f32>,
        engine: &PaneResize<T>,
    ) -> Result<Self, MixerError> {
        let bridge = Self {
            key: key.into(),
            context,
        };
        bridge.sync(engine)?;
        Ok(bridge)
    }

    pub fn key(&self) -> &PaneKey {
        &self.key
    }

    /// Resize the mixer pane and mirror the size the layout actually granted
    pub fn set_height<T>(
        &self,
        engine: &mut PaneResize<T>,
        height: f32,
    ) -> Result<f32, MixerError> {
        // Fail before touching the layout if we are outside the provider
        if !self.context.is_bound() {
            return Err(ContextError::OutsideProvider.into());
        }
        let granted = engine.resize_pane(self.key.as_str(), height)?;
        if self.context.read()? != granted {
            self.context.write(granted)?;
        }
        if granted != height {
            tracing::debug!("Mixer height {} clamped to {}", height, granted);
        }
        Ok(granted)
    }

    /// Copy the pane's current size into the context
    pub fn sync<T>(&self, engine: &PaneResize<T>) -> Result<f32, MixerError> {
        let size = engine
            .size_of(self.key.as_str())
            .ok_or_else(|| LayoutError::UnknownPane(self.key.clone()))?;
        if self.context.read()? != size {
            self.context.write(size)?;
        }
        Ok(size)
    }

    /// Resize callback that mirrors the mixer pane's size into the context.
    ///
    /// Install it with [`PaneResize::on_resize`], directly or inside a larger callback.
    pub fn observer<T>(&self, engine: &PaneResize<T>) -> Result<ResizeCallback, MixerError> {
        let index = engine
            .index_of(self.key.as_str())
            .ok_or_else(|| LayoutError::UnknownPane(self.key.clone()))?;
        Ok(mirror(index, self.key.clone(), self.context.clone()))
    }
}

fn mirror(index: usize, key: PaneKey, context: Consumer<f32>) -> ResizeCallback {
    Box::new(move |sizes: &[f32]| {
        let Some(&size) = sizes.get(index) else {
            return;
        };
        let mirrored = match context.read() {
            Ok(current) if current == size => Ok(()),
            Ok(_) => context.write(size),
            Err(e) => Err(e),
        };
        if let Err(e) = mirrored {
            tracing::warn!("Cannot mirror {} size: {}", key, e);
        }
    })
}
