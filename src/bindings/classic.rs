use crate::bindings::setup::MapComponentSetup;
use crate::core::animation::AnimationMode;
use crate::core::context::{ClassicMarkerSlot, MapContext};
use crate::core::events::{EmitFn, CLASSIC_MARKER_EVENTS};
use crate::sdk::api::MARKER_COMPONENT;
use crate::sdk::handle::ClassicMarkerHandle;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

/// Declarative binding for a classic marker.
///
/// The create/update/teardown cycle and event wiring live in the shared
/// [`MapComponentSetup`] helper; this component adds animation handling and
/// re-exposes the live handle to descendants.
pub struct ClassicMarkerBinding {
    context: MapContext,
    options: Value,
    animation: Option<AnimationMode>,
    setup: MapComponentSetup<dyn ClassicMarkerHandle>,
    slot: ClassicMarkerSlot,
}

impl ClassicMarkerBinding {
    pub fn new(
        context: MapContext,
        options: Value,
        animation: Option<AnimationMode>,
        emit: EmitFn,
    ) -> Self {
        Self {
            context,
            options,
            animation,
            setup: MapComponentSetup::new(MARKER_COMPONENT, CLASSIC_MARKER_EVENTS, emit),
            slot: ClassicMarkerSlot::new(),
        }
    }

    /// The immediate first pass: creates the marker if the context is ready
    /// and applies the initial animation.
    pub fn mount(&mut self) -> Result<()> {
        self.sync()?;
        self.apply_animation();
        Ok(())
    }

    /// Reconciles the live handle with current options and context.
    pub fn sync(&mut self) -> Result<()> {
        self.setup
            .sync(&self.context, &self.options, |api, tag, options| {
                api.instantiate(tag, options)
            })?;
        if let Some(handle) = self.setup.handle() {
            self.slot.set(handle);
        }
        Ok(())
    }

    /// Replaces the options blob and applies the delta in place.
    pub fn set_options(&mut self, options: Value) -> Result<()> {
        self.options = options;
        self.sync()
    }

    /// Replaces the ancestor context (map arrival or map swap).
    pub fn set_context(&mut self, context: MapContext) -> Result<()> {
        self.context = context;
        self.sync()
    }

    /// Changes the animation mode and applies it immediately.
    pub fn set_animation(&mut self, animation: Option<AnimationMode>) {
        self.animation = animation;
        self.apply_animation();
    }

    fn apply_animation(&self) {
        let Some(marker) = self.setup.handle() else {
            return;
        };
        marker.set_animation(self.animation.map(Into::into));
    }

    /// Clears animation, then runs the shared helper's teardown.
    pub fn unmount(&mut self) {
        if let Some(marker) = self.setup.handle() {
            marker.set_animation(None);
        }
        self.setup.teardown();
        self.slot.clear();
    }

    /// The live marker handle, if one has been created.
    pub fn marker(&self) -> Option<Arc<dyn ClassicMarkerHandle>> {
        self.setup.handle()
    }

    /// The cell through which descendants observe the live handle.
    pub fn slot(&self) -> ClassicMarkerSlot {
        self.slot.clone()
    }
}
