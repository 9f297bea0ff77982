//! # Markerkit
//!
//! Declarative marker bindings over an imperative map SDK.
//!
//! This library keeps reactive marker state — an options blob, optional pin
//! styling, an animation mode, and ancestor-supplied map context — consistent
//! with the stateful marker objects a map SDK actually renders: creating,
//! updating, re-parenting and destroying markers (including into and out of a
//! clustering aggregator) as props and context change, without leaking
//! event listeners.
//!
//! The SDK itself is a set of traits (see [`sdk`]) so the bindings can be
//! exercised against the in-memory doubles in [`testing`].

pub mod bindings;
pub mod core;
pub mod prelude;
pub mod sdk;
pub mod testing;

// Re-export public API
pub use crate::core::{
    animation::{AnimationMode, SdkAnimation},
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

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MarkerError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("SDK error: {0}")]
    Sdk(String),

    #[error("marker library load failed: {0}")]
    LibraryLoad(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid animation code: {0}")]
    InvalidAnimation(u8),
}

/// Error type alias for convenience
pub type Error = MarkerError;
