use crate::sdk::handle::AdvancedMarkerHandle;
use std::sync::Arc;

/// External aggregator that groups nearby markers and manages their map
/// attachment on the binding's behalf.
///
/// Membership is exclusive with direct map attachment: a marker handed to
/// `add_marker` is never also given a map via `set_map`.
pub trait ClusterAggregator: Send + Sync {
    fn add_marker(&self, marker: &Arc<dyn AdvancedMarkerHandle>);

    fn remove_marker(&self, marker: &Arc<dyn AdvancedMarkerHandle>);
}
