// ABOUTME: Mixer panel content that re-flows when its allotted height changes.
// ABOUTME: Subscribes to the height context and keeps the fader length current.

use std::cell::Cell;
use std::rc::Rc;

use oew_core::MixerSettings;

use crate::{Consumer, ContextError};

/// Channel strip geometry for the mixer panel
#[derive(Debug, Clone)]
pub struct MixerPanel {
    header_height: f32,
    footer_height: f32,
    fader_length: Rc<Cell<f32>>,
    reflows: Rc<Cell<u32>>,
}

impl MixerPanel {
    /// Mount the panel under the scope `context` belongs to
    pub fn mount(context: &Consumer<f32>, settings: &MixerSettings) -> Result<Self, ContextError> {
        let header_height = settings.header_height.max(0.0);
        let footer_height = settings.footer_height.max(0.0);
        let fader_length = Rc::new(Cell::new(fader_travel(
            context.read()?,
            header_height,
            footer_height,
        )));
        let reflows = Rc::new(Cell::new(0));

        let length = Rc::clone(&fader_length);
        let count = Rc::clone(&reflows);
        context.subscribe(move |height| {
            length.set(fader_travel(height, header_height, footer_height));
            count.set(count.get() + 1);
        })?;

        Ok(Self {
            header_height,
            footer_height,
            fader_length,
            reflows,
        })
    }

    /// Vertical travel available to each channel fader
    pub fn fader_length(&self) -> f32 {
        self.fader_length.get()
    }

    /// Smallest panel height that still shows any fader travel
    pub fn chrome_height(&self) -> f32 {
        self.header_height + self.footer_height
    }

    pub fn reflow_count(&self) -> u32 {
        self.reflows.get()
    }
}

fn fader_travel(height: f32, header: f32, footer: f32) -> f32 {
    (height - header - footer).max(0.0)
}
