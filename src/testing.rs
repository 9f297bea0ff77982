//! In-memory SDK doubles for exercising bindings without a live map SDK.
//!
//! Every external collaborator from [`crate::sdk`] has a counting,
//! inspectable fake here, so the reconciliation properties (creation counts,
//! listener hygiene, cluster exclusivity, animation arming) can be asserted
//! directly.

use crate::core::animation::SdkAnimation;
use crate::core::context::same_object;
use crate::core::events::{EmitFn, MarkerEvent};
use crate::core::options::{AdvancedMarkerOptions, PinOptions};
use crate::sdk::api::{MarkerApi, MarkerLibrary};
use crate::sdk::cluster::ClusterAggregator;
use crate::sdk::handle::{
    AdvancedMarkerHandle, ClassicMarkerHandle, ElementHandle, EventTarget, ListenerFn, MapHandle,
    PinHandle, SdkComponent,
};
use crate::sdk::observer::{OnVisibleFn, VisibilityObserver};
use crate::{MarkerError, Result};
use async_trait::async_trait;
use fxhash::FxHashMap;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A map instance double; identity is all the bindings ever use.
#[derive(Default)]
pub struct FakeMap;

impl FakeMap {
    pub fn new() -> Self {
        Self
    }
}

impl MapHandle for FakeMap {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

type AnimationEndHandler = Box<dyn Fn(&dyn ElementHandle) + Send + Sync>;

/// A content element double tracking CSS classes and animation-end handlers.
#[derive(Default)]
pub struct FakeElement {
    classes: Mutex<Vec<String>>,
    animation_end: Mutex<Vec<AnimationEndHandler>>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        lock(&self.classes).iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        lock(&self.classes).clone()
    }

    /// Simulates the element's CSS animation finishing.
    pub fn fire_animation_end(&self) {
        for handler in lock(&self.animation_end).iter() {
            handler(self);
        }
    }
}

impl ElementHandle for FakeElement {
    fn add_class(&self, class: &str) {
        let mut classes = lock(&self.classes);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        lock(&self.classes).retain(|c| c != class);
    }

    fn on_animation_end(&self, handler: Box<dyn Fn(&dyn ElementHandle) + Send + Sync>) {
        lock(&self.animation_end).push(handler);
    }
}

/// An advanced marker double: records construction options, map attachment,
/// and listeners. Like the real SDK, a default content element is
/// synthesized when the options carry none.
pub struct FakeAdvancedMarker {
    options: AdvancedMarkerOptions,
    content: Arc<dyn ElementHandle>,
    map: Mutex<Option<Arc<dyn MapHandle>>>,
    listeners: Mutex<FxHashMap<&'static str, Vec<ListenerFn>>>,
    set_map_calls: AtomicUsize,
}

impl FakeAdvancedMarker {
    fn new(options: AdvancedMarkerOptions) -> Self {
        let content = options
            .content
            .clone()
            .unwrap_or_else(|| Arc::new(FakeElement::new()) as Arc<dyn ElementHandle>);
        Self {
            options,
            content,
            map: Mutex::new(None),
            listeners: Mutex::new(FxHashMap::default()),
            set_map_calls: AtomicUsize::new(0),
        }
    }

    pub fn options(&self) -> &AdvancedMarkerOptions {
        &self.options
    }

    pub fn current_map(&self) -> Option<Arc<dyn MapHandle>> {
        lock(&self.map).clone()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).values().map(Vec::len).sum()
    }

    pub fn set_map_calls(&self) -> usize {
        self.set_map_calls.load(Ordering::SeqCst)
    }

    /// Delivers an SDK event to every listener registered for `event`.
    pub fn fire(&self, event: &str, payload: Value) {
        if let Some(listeners) = lock(&self.listeners).get(event) {
            for listener in listeners {
                listener(payload.clone());
            }
        }
    }
}

impl EventTarget for FakeAdvancedMarker {
    fn add_listener(&self, event: &'static str, listener: ListenerFn) {
        lock(&self.listeners).entry(event).or_default().push(listener);
    }

    fn clear_listeners(&self) {
        lock(&self.listeners).clear();
    }
}

impl AdvancedMarkerHandle for FakeAdvancedMarker {
    fn set_map(&self, map: Option<Arc<dyn MapHandle>>) {
        self.set_map_calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.map) = map;
    }

    fn content(&self) -> Option<Arc<dyn ElementHandle>> {
        Some(self.content.clone())
    }
}

/// A classic marker double supporting in-place option updates and native
/// animation.
pub struct FakeClassicMarker {
    options: Mutex<Value>,
    map: Mutex<Option<Arc<dyn MapHandle>>>,
    listeners: Mutex<FxHashMap<&'static str, Vec<ListenerFn>>>,
    animation: Mutex<Option<SdkAnimation>>,
    apply_calls: AtomicUsize,
}

impl FakeClassicMarker {
    fn new(options: Value) -> Self {
        Self {
            options: Mutex::new(options),
            map: Mutex::new(None),
            listeners: Mutex::new(FxHashMap::default()),
            animation: Mutex::new(None),
            apply_calls: AtomicUsize::new(0),
        }
    }

    pub fn options(&self) -> Value {
        lock(&self.options).clone()
    }

    pub fn current_map(&self) -> Option<Arc<dyn MapHandle>> {
        lock(&self.map).clone()
    }

    pub fn animation(&self) -> Option<SdkAnimation> {
        *lock(&self.animation)
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).values().map(Vec::len).sum()
    }

    pub fn apply_calls(&self) -> usize {
        self.apply_calls.load(Ordering::SeqCst)
    }

    pub fn fire(&self, event: &str, payload: Value) {
        if let Some(listeners) = lock(&self.listeners).get(event) {
            for listener in listeners {
                listener(payload.clone());
            }
        }
    }
}

impl EventTarget for FakeClassicMarker {
    fn add_listener(&self, event: &'static str, listener: ListenerFn) {
        lock(&self.listeners).entry(event).or_default().push(listener);
    }

    fn clear_listeners(&self) {
        lock(&self.listeners).clear();
    }
}

impl SdkComponent for FakeClassicMarker {
    fn apply_options(&self, options: &Value) -> Result<()> {
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.options) = options.clone();
        Ok(())
    }

    fn set_map(&self, map: Option<Arc<dyn MapHandle>>) {
        *lock(&self.map) = map;
    }
}

impl ClassicMarkerHandle for FakeClassicMarker {
    fn set_animation(&self, animation: Option<SdkAnimation>) {
        *lock(&self.animation) = animation;
    }
}

/// A pin double wrapping a [`FakeElement`].
pub struct FakePin {
    options: PinOptions,
    element: Arc<FakeElement>,
}

impl FakePin {
    fn new(options: PinOptions) -> Self {
        Self {
            options,
            element: Arc::new(FakeElement::new()),
        }
    }

    pub fn options(&self) -> &PinOptions {
        &self.options
    }

    pub fn fake_element(&self) -> Arc<FakeElement> {
        self.element.clone()
    }
}

impl PinHandle for FakePin {
    fn element(&self) -> Arc<dyn ElementHandle> {
        self.element.clone()
    }
}

/// A marker library double counting every construction.
#[derive(Default)]
pub struct FakeLibrary {
    markers: Mutex<Vec<Arc<FakeAdvancedMarker>>>,
    pins: Mutex<Vec<Arc<FakePin>>>,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_count(&self) -> usize {
        lock(&self.markers).len()
    }

    pub fn pin_count(&self) -> usize {
        lock(&self.pins).len()
    }

    pub fn marker(&self, index: usize) -> Option<Arc<FakeAdvancedMarker>> {
        lock(&self.markers).get(index).cloned()
    }

    pub fn last_marker(&self) -> Option<Arc<FakeAdvancedMarker>> {
        lock(&self.markers).last().cloned()
    }

    pub fn last_pin(&self) -> Option<Arc<FakePin>> {
        lock(&self.pins).last().cloned()
    }
}

impl MarkerLibrary for FakeLibrary {
    fn new_advanced_marker(
        &self,
        options: &AdvancedMarkerOptions,
    ) -> Result<Arc<dyn AdvancedMarkerHandle>> {
        let marker = Arc::new(FakeAdvancedMarker::new(options.clone()));
        lock(&self.markers).push(marker.clone());
        Ok(marker)
    }

    fn new_pin(&self, options: &PinOptions) -> Result<Arc<dyn PinHandle>> {
        let pin = Arc::new(FakePin::new(options.clone()));
        lock(&self.pins).push(pin.clone());
        Ok(pin)
    }
}

/// An SDK namespace double with a cached async library loader.
pub struct FakeApi {
    library: Arc<FakeLibrary>,
    cached: OnceCell<Arc<dyn MarkerLibrary>>,
    load_count: AtomicUsize,
    fail_library_load: AtomicBool,
    classic_markers: Mutex<Vec<Arc<FakeClassicMarker>>>,
    instantiated_tags: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            library: Arc::new(FakeLibrary::new()),
            cached: OnceCell::new(),
            load_count: AtomicUsize::new(0),
            fail_library_load: AtomicBool::new(false),
            classic_markers: Mutex::new(Vec::new()),
            instantiated_tags: Mutex::new(Vec::new()),
        }
    }

    pub fn library(&self) -> Arc<FakeLibrary> {
        self.library.clone()
    }

    /// How many times the library was actually loaded (cache misses).
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    /// Makes subsequent uncached loads fail, for error-propagation tests.
    pub fn set_library_failure(&self, fail: bool) {
        self.fail_library_load.store(fail, Ordering::SeqCst);
    }

    pub fn classic_marker_count(&self) -> usize {
        lock(&self.classic_markers).len()
    }

    pub fn last_classic_marker(&self) -> Option<Arc<FakeClassicMarker>> {
        lock(&self.classic_markers).last().cloned()
    }

    pub fn instantiated_tags(&self) -> Vec<&'static str> {
        lock(&self.instantiated_tags).clone()
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarkerApi for FakeApi {
    fn instantiate(
        &self,
        tag: &'static str,
        options: &Value,
    ) -> Result<Arc<dyn ClassicMarkerHandle>> {
        lock(&self.instantiated_tags).push(tag);
        let marker = Arc::new(FakeClassicMarker::new(options.clone()));
        lock(&self.classic_markers).push(marker.clone());
        Ok(marker)
    }

    async fn marker_library(&self) -> Result<Arc<dyn MarkerLibrary>> {
        if self.cached.get().is_none() && self.fail_library_load.load(Ordering::SeqCst) {
            return Err(MarkerError::LibraryLoad("network unavailable".into()));
        }
        let library = self.cached.get_or_init(|| {
            self.load_count.fetch_add(1, Ordering::SeqCst);
            self.library.clone()
        });
        Ok(library.clone())
    }
}

/// A cluster aggregator double tracking membership and call counts.
#[derive(Default)]
pub struct FakeCluster {
    members: Mutex<Vec<Arc<dyn AdvancedMarkerHandle>>>,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.members).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, marker: &Arc<dyn AdvancedMarkerHandle>) -> bool {
        lock(&self.members).iter().any(|m| same_object(m, marker))
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }
}

impl ClusterAggregator for FakeCluster {
    fn add_marker(&self, marker: &Arc<dyn AdvancedMarkerHandle>) {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.members).push(marker.clone());
    }

    fn remove_marker(&self, marker: &Arc<dyn AdvancedMarkerHandle>) {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.members).retain(|m| !same_object(m, marker));
    }
}

/// A visibility observer triggered by hand from tests.
#[derive(Default)]
pub struct ManualObserver {
    pending: Mutex<Vec<(Arc<dyn ElementHandle>, OnVisibleFn)>>,
}

impl ManualObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Makes every observed element "visible": fires each registration once
    /// and drops it.
    pub fn trigger_all(&self) {
        let pending = std::mem::take(&mut *lock(&self.pending));
        for (element, on_visible) in pending {
            on_visible(element.as_ref());
        }
    }
}

impl VisibilityObserver for ManualObserver {
    fn observe(&self, element: &Arc<dyn ElementHandle>, on_visible: OnVisibleFn) {
        lock(&self.pending).push((element.clone(), on_visible));
    }
}

/// Captures re-emitted component events.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<MarkerEvent>>,
}

impl EventLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// An [`EmitFn`] appending to this log.
    pub fn emitter(self: &Arc<Self>) -> EmitFn {
        let log = self.clone();
        Arc::new(move |event| lock(&log.events).push(event))
    }

    pub fn len(&self) -> usize {
        lock(&self.events).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<&'static str> {
        lock(&self.events).iter().map(|e| e.name).collect()
    }

    pub fn events(&self) -> Vec<MarkerEvent> {
        lock(&self.events).clone()
    }
}
