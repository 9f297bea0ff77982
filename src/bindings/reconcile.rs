use crate::core::animation::AnimationMode;
use crate::core::options::{AdvancedMarkerOptions, PinOptions};

/// The prop tuple one reconciliation pass observes. Deep-compared as a whole
/// against the previous pass's snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropSnapshot {
    pub options: AdvancedMarkerOptions,
    pub pin_options: Option<PinOptions>,
    pub animation: Option<AnimationMode>,
}

/// What a reconciliation pass has to do, decided before any SDK call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Context not ready or nothing changed; the pass is a no-op.
    Skip,
    /// No live marker yet; construct and attach one.
    Create,
    /// Options/pin/animation changed; clear listeners, rebuild, re-attach.
    Recreate,
    /// Only the map reference changed; the object is still valid, detach
    /// and re-attach it without reconstruction.
    Reattach,
}

/// Pure decision half of the reconciliation algorithm.
///
/// `prev` is the snapshot observed by the previous pass (`None` on the first
/// pass, which therefore counts as an option change). `map_changed` is
/// map-reference identity, not structural comparison.
pub fn plan(
    prev: Option<&PropSnapshot>,
    next: &PropSnapshot,
    map_changed: bool,
    context_ready: bool,
    has_marker: bool,
) -> ReconcileAction {
    let option_change = prev.map_or(true, |prev| prev != next);
    let changed = option_change || map_changed;

    if !context_ready || !changed {
        return ReconcileAction::Skip;
    }

    if has_marker {
        if option_change {
            ReconcileAction::Recreate
        } else {
            ReconcileAction::Reattach
        }
    } else {
        ReconcileAction::Create
    }
}
