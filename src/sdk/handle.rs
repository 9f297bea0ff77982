use crate::core::animation::SdkAnimation;
use crate::Result;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

/// Listener callback attached to an SDK object; receives the raw SDK event
/// payload.
pub type ListenerFn = Box<dyn Fn(Value) + Send + Sync>;

/// An SDK object that raises events.
pub trait EventTarget: Send + Sync {
    fn add_listener(&self, event: &'static str, listener: ListenerFn);

    /// Removes every listener attached to this object.
    fn clear_listeners(&self);
}

/// Opaque handle to a live map instance. Bindings never mutate the map
/// itself; they only compare identity and hand the handle to markers.
pub trait MapHandle: Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// A DOM-ish element handle: the rendered content of an advanced marker or
/// pin. The bindings only ever toggle animation classes on it.
pub trait ElementHandle: Send + Sync {
    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Registers a handler invoked whenever a CSS animation on this element
    /// finishes; the handler receives the element.
    fn on_animation_end(&self, handler: Box<dyn Fn(&dyn ElementHandle) + Send + Sync>);
}

/// A classic SDK component whose options can be updated in place.
pub trait SdkComponent: EventTarget {
    /// Applies an options delta to the live object.
    fn apply_options(&self, options: &Value) -> Result<()>;

    /// Attaches to or detaches from a map.
    fn set_map(&self, map: Option<Arc<dyn MapHandle>>);
}

/// A classic marker: an in-place-updatable component with native animation
/// support.
pub trait ClassicMarkerHandle: SdkComponent {
    fn set_animation(&self, animation: Option<SdkAnimation>);
}

/// An advanced marker.
///
/// Deliberately not an [`SdkComponent`]: the SDK cannot update advanced
/// marker options in place, so the binding recreates the object instead.
/// Keeping `apply_options` off this trait makes that limitation
/// unrepresentable.
pub trait AdvancedMarkerHandle: EventTarget {
    fn set_map(&self, map: Option<Arc<dyn MapHandle>>);

    /// The rendered content element, if any.
    fn content(&self) -> Option<Arc<dyn ElementHandle>>;
}

/// A constructed pin: the default styled content backing an advanced marker
/// when no custom content is supplied.
pub trait PinHandle: Send + Sync {
    fn element(&self) -> Arc<dyn ElementHandle>;
}
