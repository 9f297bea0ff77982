use crate::sdk::handle::ElementHandle;
use std::sync::Arc;

/// Callback fired at most once, when the observed element first becomes
/// visible.
pub type OnVisibleFn = Box<dyn FnOnce(&dyn ElementHandle) + Send>;

/// Visibility observation capability backing the drop entrance animation.
///
/// Injected into [`crate::AdvancedMarkerBinding`] rather than shared as a
/// module-level singleton, so tests can trigger visibility deterministically.
pub trait VisibilityObserver: Send + Sync {
    /// Registers interest in `element`. Implementations invoke `on_visible`
    /// at most once, when the element first becomes visible, and drop the
    /// registration afterwards.
    fn observe(&self, element: &Arc<dyn ElementHandle>, on_visible: OnVisibleFn);
}

/// Observer for hosts without visibility tracking; registrations are dropped
/// and the drop animation never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertObserver;

impl VisibilityObserver for InertObserver {
    fn observe(&self, _element: &Arc<dyn ElementHandle>, _on_visible: OnVisibleFn) {}
}
