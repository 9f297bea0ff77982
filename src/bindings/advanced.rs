use crate::bindings::reconcile::{plan, PropSnapshot, ReconcileAction};
use crate::core::animation::{AnimationMode, BOUNCE_CLASS, DROP_CLASS};
use crate::core::context::{same_map, AdvancedMarkerSlot, MapContext};
use crate::core::events::{EmitFn, MarkerEvent, ADVANCED_MARKER_EVENTS};
use crate::core::options::{AdvancedMarkerOptions, PinOptions};
use crate::sdk::handle::{AdvancedMarkerHandle, MapHandle, PinHandle};
use crate::sdk::observer::VisibilityObserver;
use crate::Result;
use std::sync::Arc;

/// Reactive inputs of an [`AdvancedMarkerBinding`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdvancedMarkerProps {
    pub options: AdvancedMarkerOptions,
    pub pin_options: Option<PinOptions>,
    pub animation: Option<AnimationMode>,
}

/// Declarative binding for an advanced marker.
///
/// Advanced markers cannot have their options mutated in place, so this
/// binding owns the full lifecycle itself: any deep change to options, pin
/// styling, or animation clears the old handle's listeners and rebuilds the
/// marker, while a map-reference-only change merely re-homes the existing
/// object. The decision half lives in [`plan`]; this type executes it
/// against the SDK.
///
/// A pass is `sync(&mut self)`, so passes on one instance cannot overlap:
/// triggers run to completion in order and the latest props win. Independent
/// instances may still have overlapping in-flight library loads.
pub struct AdvancedMarkerBinding {
    context: MapContext,
    props: AdvancedMarkerProps,
    emit: EmitFn,
    observer: Arc<dyn VisibilityObserver>,
    prev: Option<PropSnapshot>,
    prev_map: Option<Arc<dyn MapHandle>>,
    marker: Option<Arc<dyn AdvancedMarkerHandle>>,
    pin: Option<Arc<dyn PinHandle>>,
    slot: AdvancedMarkerSlot,
}

impl AdvancedMarkerBinding {
    pub fn new(
        context: MapContext,
        props: AdvancedMarkerProps,
        emit: EmitFn,
        observer: Arc<dyn VisibilityObserver>,
    ) -> Self {
        Self {
            context,
            props,
            emit,
            observer,
            prev: None,
            prev_map: None,
            marker: None,
            pin: None,
            slot: AdvancedMarkerSlot::new(),
        }
    }

    /// The immediate first reconciliation pass.
    pub async fn mount(&mut self) -> Result<()> {
        self.sync().await
    }

    /// Replaces all reactive inputs. Takes effect on the next [`sync`] pass.
    ///
    /// [`sync`]: Self::sync
    pub fn set_props(&mut self, props: AdvancedMarkerProps) {
        self.props = props;
    }

    pub fn set_options(&mut self, options: AdvancedMarkerOptions) {
        self.props.options = options;
    }

    pub fn set_pin_options(&mut self, pin_options: Option<PinOptions>) {
        self.props.pin_options = pin_options;
    }

    pub fn set_animation(&mut self, animation: Option<AnimationMode>) {
        self.props.animation = animation;
    }

    /// Replaces the ancestor context. Takes effect on the next pass.
    pub fn set_context(&mut self, context: MapContext) {
        self.context = context;
    }

    /// One reconciliation pass over the observed tuple
    /// `(map, options, pin_options, animation)`.
    ///
    /// Suspends at the SDK's library loader; everything else runs
    /// synchronously. Failures propagate unhandled.
    pub async fn sync(&mut self) -> Result<()> {
        let next = PropSnapshot {
            options: self.props.options.clone(),
            pin_options: self.props.pin_options.clone(),
            animation: self.props.animation,
        };
        let map_changed = !same_map(&self.prev_map, &self.context.map);
        let action = plan(
            self.prev.as_ref(),
            &next,
            map_changed,
            self.context.is_ready(),
            self.marker.is_some(),
        );

        // The observed tuple advances every trigger, skipped or not.
        self.prev = Some(next);
        self.prev_map = self.context.map.clone();

        if action == ReconcileAction::Skip {
            return Ok(());
        }

        let (Some(api), Some(map)) = (self.context.api.clone(), self.context.map.clone()) else {
            return Ok(());
        };

        // Suspension point: constructors come from the async library loader,
        // cached by the SDK after first resolution.
        let library = api.marker_library().await?;

        let mut recreating = false;
        if let Some(marker) = self.marker.clone() {
            self.detach(&marker);
            if action == ReconcileAction::Recreate {
                log::debug!("advanced marker options changed, recreating");
                marker.clear_listeners();
                recreating = true;
            } else {
                // Map-only change: the object is still valid, re-home it.
                log::debug!("re-homing advanced marker to new map");
                self.attach(&marker, &map);
            }
        }

        if self.marker.is_none() || recreating {
            let mut options = self.props.options.clone();
            self.pin = None;
            if options.content.is_none() {
                if let Some(pin_options) = &self.props.pin_options {
                    let pin = library.new_pin(pin_options)?;
                    options.content = Some(pin.element());
                    self.pin = Some(pin);
                }
            }

            let marker = library.new_advanced_marker(&options)?;
            self.attach(&marker, &map);

            for &event in ADVANCED_MARKER_EVENTS {
                let emit = self.emit.clone();
                marker.add_listener(
                    event,
                    Box::new(move |payload| emit(MarkerEvent { name: event, payload })),
                );
            }

            self.arm_animation(&marker);
            self.slot.set(marker.clone());
            self.marker = Some(marker);
        }

        Ok(())
    }

    /// Clears listeners, detaches, and drops marker and pin.
    pub fn unmount(&mut self) {
        if let Some(marker) = self.marker.take() {
            log::debug!("tearing down advanced marker");
            marker.clear_listeners();
            self.detach(&marker);
        }
        self.pin = None;
        self.slot.clear();
    }

    /// The live marker handle, if one has been created.
    pub fn marker(&self) -> Option<Arc<dyn AdvancedMarkerHandle>> {
        self.marker.clone()
    }

    /// The cell through which descendants observe the live handle.
    pub fn slot(&self) -> AdvancedMarkerSlot {
        self.slot.clone()
    }

    /// Cluster membership is exclusive with direct map attachment. No
    /// handle-type check is needed: this binding only ever holds advanced
    /// markers.
    fn is_clustered(&self) -> bool {
        self.context.cluster.is_some() && self.context.api.is_some()
    }

    fn attach(&self, marker: &Arc<dyn AdvancedMarkerHandle>, map: &Arc<dyn MapHandle>) {
        if self.is_clustered() {
            if let Some(cluster) = &self.context.cluster {
                cluster.add_marker(marker);
            }
        } else {
            marker.set_map(Some(map.clone()));
        }
    }

    fn detach(&self, marker: &Arc<dyn AdvancedMarkerHandle>) {
        if self.is_clustered() {
            if let Some(cluster) = &self.context.cluster {
                cluster.remove_marker(marker);
            }
        } else {
            marker.set_map(None);
        }
    }

    /// Applies the animation mode to freshly created content. Runs on every
    /// full (re)creation and never on a reattach-only pass, so the drop
    /// entrance does not replay on minor updates.
    fn arm_animation(&self, marker: &Arc<dyn AdvancedMarkerHandle>) {
        let Some(animation) = self.props.animation else {
            return;
        };
        let Some(content) = marker.content() else {
            return;
        };
        match animation {
            AnimationMode::Drop => {
                content.on_animation_end(Box::new(|element| element.remove_class(DROP_CLASS)));
                self.observer
                    .observe(&content, Box::new(|element| element.add_class(DROP_CLASS)));
            }
            AnimationMode::Bounce => content.add_class(BOUNCE_CLASS),
        }
    }
}
