use serde_json::Value;
use std::sync::Arc;

/// Events a classic marker can raise. Each is re-emitted through the
/// binding's [`EmitFn`] with the SDK payload unchanged.
pub const CLASSIC_MARKER_EVENTS: &[&str] = &[
    "animation_changed",
    "click",
    "dblclick",
    "rightclick",
    "dragstart",
    "dragend",
    "drag",
    "mouseover",
    "mousedown",
    "mouseout",
    "mouseup",
    "draggable_changed",
    "clickable_changed",
    "contextmenu",
    "cursor_changed",
    "flat_changed",
    "zindex_changed",
    "icon_changed",
    "position_changed",
    "shape_changed",
    "title_changed",
    "visible_changed",
];

/// Events an advanced marker can raise.
pub const ADVANCED_MARKER_EVENTS: &[&str] = &["click", "drag", "dragend", "dragstart", "gmp-click"];

/// An SDK event re-emitted by a binding as a component event.
///
/// The payload is whatever the SDK delivered, passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEvent {
    pub name: &'static str,
    pub payload: Value,
}

/// Callback through which bindings re-emit SDK events to the host.
pub type EmitFn = Arc<dyn Fn(MarkerEvent) + Send + Sync>;
