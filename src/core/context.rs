use crate::sdk::{
    api::MarkerApi,
    cluster::ClusterAggregator,
    handle::{AdvancedMarkerHandle, ClassicMarkerHandle, MapHandle},
};
use std::sync::{Arc, RwLock};

/// Ancestor-supplied context a marker binding reads.
///
/// All three handles are owned by an ancestor; bindings only read them and
/// call mutation methods on the objects behind them. Absent handles keep the
/// binding dormant: no marker is created until both `map` and `api` are
/// present.
#[derive(Clone, Default)]
pub struct MapContext {
    pub map: Option<Arc<dyn MapHandle>>,
    pub api: Option<Arc<dyn MarkerApi>>,
    pub cluster: Option<Arc<dyn ClusterAggregator>>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(mut self, map: Arc<dyn MapHandle>) -> Self {
        self.map = Some(map);
        self
    }

    pub fn with_api(mut self, api: Arc<dyn MarkerApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_cluster(mut self, cluster: Arc<dyn ClusterAggregator>) -> Self {
        self.cluster = Some(cluster);
        self
    }

    /// Whether the context carries everything needed to materialize a marker.
    pub fn is_ready(&self) -> bool {
        self.map.is_some() && self.api.is_some()
    }
}

impl std::fmt::Debug for MapContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapContext")
            .field("map", &self.map.is_some())
            .field("api", &self.api.is_some())
            .field("cluster", &self.cluster.is_some())
            .finish()
    }
}

/// Object identity for trait-object handles, comparing data pointers only.
pub(crate) fn same_object<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Map-reference change detection; two absent maps count as the same.
pub(crate) fn same_map(a: &Option<Arc<dyn MapHandle>>, b: &Option<Arc<dyn MapHandle>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => same_object(a, b),
        _ => false,
    }
}

/// Shared cell through which a binding re-exposes its live handle to
/// descendants (e.g. an info window bound to its parent marker).
///
/// Cloning shares the cell; the value is absent before first creation and
/// after unmount.
pub struct Slot<T: ?Sized> {
    inner: Arc<RwLock<Option<Arc<T>>>>,
}

pub type AdvancedMarkerSlot = Slot<dyn AdvancedMarkerHandle>;
pub type ClassicMarkerSlot = Slot<dyn ClassicMarkerHandle>;

impl<T: ?Sized> Slot<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set(&self, value: Arc<T>) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(value);
    }

    pub fn clear(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_none()
    }
}

impl<T: ?Sized> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}
