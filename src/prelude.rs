//! Prelude module for common markerkit types and traits
//!
//! Re-exports the most commonly used types, traits, and functions for easy
//! importing with `use markerkit::prelude::*;`

pub use crate::core::{
    animation::{AnimationMode, SdkAnimation, BOUNCE_CLASS, DROP_CLASS},
    context::{AdvancedMarkerSlot, ClassicMarkerSlot, MapContext, Slot},
    events::{EmitFn, MarkerEvent, ADVANCED_MARKER_EVENTS, CLASSIC_MARKER_EVENTS},
    options::{AdvancedMarkerOptions, PinOptions},
};

pub use crate::bindings::{
    advanced::{AdvancedMarkerBinding, AdvancedMarkerProps},
    classic::ClassicMarkerBinding,
    reconcile::{plan, PropSnapshot, ReconcileAction},
    setup::MapComponentSetup,
};

pub use crate::sdk::{
    api::{MarkerApi, MarkerLibrary, MARKER_COMPONENT},
    cluster::ClusterAggregator,
    handle::{
        AdvancedMarkerHandle, ClassicMarkerHandle, ElementHandle, EventTarget, ListenerFn,
        MapHandle, PinHandle, SdkComponent,
    },
    observer::{InertObserver, OnVisibleFn, VisibilityObserver},
};

pub use crate::{MarkerError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
