use crate::core::context::{same_map, MapContext};
use crate::core::events::{EmitFn, MarkerEvent};
use crate::sdk::api::MarkerApi;
use crate::sdk::handle::{MapHandle, SdkComponent};
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

/// Shared mount/sync/teardown cycle for classic SDK components.
///
/// Owns at most one live handle, keeps its options and map attachment in
/// step with the caller's state, and re-emits every SDK event listed in
/// `events` through the emit callback. Generic over the handle flavor so any
/// in-place-updatable component shares the same lifecycle.
pub struct MapComponentSetup<H: SdkComponent + ?Sized> {
    tag: &'static str,
    events: &'static [&'static str],
    emit: EmitFn,
    handle: Option<Arc<H>>,
    prev_options: Option<Value>,
    prev_map: Option<Arc<dyn MapHandle>>,
}

impl<H: SdkComponent + ?Sized> MapComponentSetup<H> {
    pub fn new(tag: &'static str, events: &'static [&'static str], emit: EmitFn) -> Self {
        Self {
            tag,
            events,
            emit,
            handle: None,
            prev_options: None,
            prev_map: None,
        }
    }

    /// One sync pass.
    ///
    /// Dormant until the context carries both map and api. The first ready
    /// pass constructs the component via `create(api, tag, options)`,
    /// attaches it and wires its listeners; later passes apply option deltas
    /// in place and re-home the handle when the map reference changed.
    pub fn sync<F>(&mut self, context: &MapContext, options: &Value, create: F) -> Result<()>
    where
        F: FnOnce(&Arc<dyn MarkerApi>, &'static str, &Value) -> Result<Arc<H>>,
    {
        let (Some(map), Some(api)) = (context.map.clone(), context.api.clone()) else {
            return Ok(());
        };

        match &self.handle {
            None => {
                log::debug!("creating {} component", self.tag);
                let handle = create(&api, self.tag, options)?;
                handle.set_map(Some(map.clone()));
                for &event in self.events {
                    let emit = self.emit.clone();
                    handle.add_listener(
                        event,
                        Box::new(move |payload| emit(MarkerEvent { name: event, payload })),
                    );
                }
                self.handle = Some(handle);
            }
            Some(handle) => {
                if self.prev_options.as_ref() != Some(options) {
                    handle.apply_options(options)?;
                }
                if !same_map(&self.prev_map, &context.map) {
                    log::debug!("re-homing {} component to new map", self.tag);
                    handle.set_map(Some(map.clone()));
                }
            }
        }

        self.prev_options = Some(options.clone());
        self.prev_map = Some(map);
        Ok(())
    }

    /// The live handle, if one has been created.
    pub fn handle(&self) -> Option<Arc<H>> {
        self.handle.clone()
    }

    /// Clears listeners, detaches from the map, and drops the handle.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::debug!("tearing down {} component", self.tag);
            handle.clear_listeners();
            handle.set_map(None);
        }
        self.prev_options = None;
        self.prev_map = None;
    }
}
