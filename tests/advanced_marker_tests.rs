use markerkit::prelude::*;
use markerkit::testing::{EventLog, FakeApi, FakeCluster, FakeElement, FakeMap, ManualObserver};
use serde_json::json;
use std::sync::Arc;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn same<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

fn position_props(lat: f64) -> AdvancedMarkerProps {
    AdvancedMarkerProps {
        options: AdvancedMarkerOptions::new(json!({"position": {"lat": lat, "lng": 0.0}})),
        ..Default::default()
    }
}

struct Harness {
    api: Arc<FakeApi>,
    map: Arc<dyn MapHandle>,
    observer: Arc<ManualObserver>,
    log: Arc<EventLog>,
}

impl Harness {
    fn new() -> Self {
        init_logs();
        Self {
            api: Arc::new(FakeApi::new()),
            map: Arc::new(FakeMap::new()),
            observer: Arc::new(ManualObserver::new()),
            log: EventLog::new(),
        }
    }

    fn context(&self) -> MapContext {
        MapContext::new()
            .with_map(self.map.clone())
            .with_api(self.api.clone())
    }

    fn binding(&self, props: AdvancedMarkerProps) -> AdvancedMarkerBinding {
        AdvancedMarkerBinding::new(
            self.context(),
            props,
            self.log.emitter(),
            self.observer.clone(),
        )
    }
}

#[tokio::test]
async fn mount_creates_single_marker_attached_to_map() {
    let harness = Harness::new();
    let mut binding = harness.binding(position_props(0.0));

    binding.mount().await.unwrap();

    let library = harness.api.library();
    assert_eq!(library.marker_count(), 1);
    assert_eq!(library.pin_count(), 0);

    let marker = library.last_marker().unwrap();
    let attached = marker.current_map().unwrap();
    assert!(same(&attached, &harness.map));
    assert_eq!(marker.listener_count(), ADVANCED_MARKER_EVENTS.len());
    assert!(binding.marker().is_some());
    assert!(!binding.slot().is_empty());
}

#[tokio::test]
async fn pin_is_built_and_used_as_content_when_no_explicit_content() {
    let harness = Harness::new();
    let mut binding = harness.binding(AdvancedMarkerProps {
        options: AdvancedMarkerOptions::new(json!({"position": {"lat": 0.0, "lng": 0.0}})),
        pin_options: Some(PinOptions {
            background: Some("red".into()),
            ..PinOptions::default()
        }),
        animation: None,
    });

    binding.mount().await.unwrap();

    let library = harness.api.library();
    assert_eq!(library.pin_count(), 1);
    assert_eq!(library.marker_count(), 1);

    let pin = library.last_pin().unwrap();
    assert_eq!(pin.options().background.as_deref(), Some("red"));

    let marker = library.last_marker().unwrap();
    let content = marker.content().unwrap();
    let pin_element: Arc<dyn ElementHandle> = pin.fake_element();
    assert!(same(&content, &pin_element));
}

#[tokio::test]
async fn explicit_content_suppresses_pin_construction() {
    let harness = Harness::new();
    let element: Arc<dyn ElementHandle> = Arc::new(FakeElement::new());
    let mut binding = harness.binding(AdvancedMarkerProps {
        options: AdvancedMarkerOptions::new(json!({})).with_content(element.clone()),
        pin_options: Some(PinOptions {
            background: Some("blue".into()),
            ..PinOptions::default()
        }),
        animation: None,
    });

    binding.mount().await.unwrap();

    let library = harness.api.library();
    assert_eq!(library.pin_count(), 0);
    let content = library.last_marker().unwrap().content().unwrap();
    assert!(same(&content, &element));
}

#[tokio::test]
async fn pin_options_change_rebuilds_pin_with_marker() {
    let harness = Harness::new();
    let mut binding = harness.binding(AdvancedMarkerProps {
        options: AdvancedMarkerOptions::new(json!({})),
        pin_options: Some(PinOptions {
            background: Some("red".into()),
            ..PinOptions::default()
        }),
        animation: None,
    });
    binding.mount().await.unwrap();

    let library = harness.api.library();
    assert_eq!(library.pin_count(), 1);

    binding.set_pin_options(Some(PinOptions {
        background: Some("blue".into()),
        ..PinOptions::default()
    }));
    binding.sync().await.unwrap();

    assert_eq!(library.marker_count(), 2);
    assert_eq!(library.pin_count(), 2);
    let pin = library.last_pin().unwrap();
    assert_eq!(pin.options().background.as_deref(), Some("blue"));

    let content = library.last_marker().unwrap().content().unwrap();
    let pin_element: Arc<dyn ElementHandle> = pin.fake_element();
    assert!(same(&content, &pin_element));
}

#[tokio::test]
async fn unchanged_tuple_is_a_no_op() {
    let harness = Harness::new();
    let mut binding = harness.binding(position_props(1.0));
    binding.mount().await.unwrap();

    let marker = harness.api.library().last_marker().unwrap();
    let set_map_calls = marker.set_map_calls();

    binding.set_props(position_props(1.0));
    binding.sync().await.unwrap();
    binding.sync().await.unwrap();

    assert_eq!(harness.api.library().marker_count(), 1);
    assert_eq!(marker.set_map_calls(), set_map_calls);
    assert_eq!(marker.listener_count(), ADVANCED_MARKER_EVENTS.len());
    assert_eq!(harness.api.load_count(), 1);
}

#[tokio::test]
async fn deep_option_change_recreates_and_clears_old_listeners() {
    let harness = Harness::new();
    let mut binding = harness.binding(position_props(1.0));
    binding.mount().await.unwrap();

    let library = harness.api.library();
    let old_marker = library.last_marker().unwrap();

    binding.set_options(AdvancedMarkerOptions::new(
        json!({"position": {"lat": 2.0, "lng": 0.0}}),
    ));
    binding.sync().await.unwrap();

    assert_eq!(library.marker_count(), 2);
    assert_eq!(old_marker.listener_count(), 0);
    assert!(old_marker.current_map().is_none());

    let new_marker = library.last_marker().unwrap();
    assert_eq!(new_marker.listener_count(), ADVANCED_MARKER_EVENTS.len());
    assert!(new_marker.current_map().is_some());

    let exposed = binding.marker().unwrap();
    let new_marker: Arc<dyn AdvancedMarkerHandle> = new_marker;
    assert!(same(&exposed, &new_marker));
}

#[tokio::test]
async fn map_only_change_reattaches_without_recreation() {
    let harness = Harness::new();
    let mut binding = harness.binding(position_props(1.0));
    binding.mount().await.unwrap();

    let marker = harness.api.library().last_marker().unwrap();
    assert_eq!(marker.set_map_calls(), 1);

    let new_map: Arc<dyn MapHandle> = Arc::new(FakeMap::new());
    binding.set_context(
        MapContext::new()
            .with_map(new_map.clone())
            .with_api(harness.api.clone()),
    );
    binding.sync().await.unwrap();

    assert_eq!(harness.api.library().marker_count(), 1);
    // Detach from the old map, attach to the new one.
    assert_eq!(marker.set_map_calls(), 3);
    let attached = marker.current_map().unwrap();
    assert!(same(&attached, &new_map));
    assert_eq!(marker.listener_count(), ADVANCED_MARKER_EVENTS.len());
}

#[tokio::test]
async fn clustered_marker_never_attaches_to_map_directly() {
    let harness = Harness::new();
    let cluster = Arc::new(FakeCluster::new());
    let mut binding = AdvancedMarkerBinding::new(
        harness.context().with_cluster(cluster.clone()),
        position_props(0.0),
        harness.log.emitter(),
        harness.observer.clone(),
    );

    binding.mount().await.unwrap();

    let marker = harness.api.library().last_marker().unwrap();
    assert_eq!(cluster.add_calls(), 1);
    assert_eq!(marker.set_map_calls(), 0);
    assert!(marker.current_map().is_none());
    let handle = binding.marker().unwrap();
    assert!(cluster.contains(&handle));

    binding.unmount();

    assert_eq!(cluster.remove_calls(), 1);
    assert!(cluster.is_empty());
    assert_eq!(marker.listener_count(), 0);
    assert!(marker.current_map().is_none());
}

#[tokio::test]
async fn unmount_detaches_and_clears_listeners() {
    let harness = Harness::new();
    let mut binding = harness.binding(position_props(0.0));
    binding.mount().await.unwrap();

    let marker = harness.api.library().last_marker().unwrap();
    let slot = binding.slot();

    binding.unmount();

    assert_eq!(marker.listener_count(), 0);
    assert!(marker.current_map().is_none());
    assert!(binding.marker().is_none());
    assert!(slot.is_empty());
}

#[tokio::test]
async fn bounce_animation_adds_persistent_class() {
    let harness = Harness::new();
    let element = Arc::new(FakeElement::new());
    let content: Arc<dyn ElementHandle> = element.clone();
    let mut binding = harness.binding(AdvancedMarkerProps {
        options: AdvancedMarkerOptions::new(json!({})).with_content(content),
        pin_options: None,
        animation: Some(AnimationMode::Bounce),
    });

    binding.mount().await.unwrap();

    assert!(element.has_class("bounce"));
    assert_eq!(harness.observer.pending_count(), 0);
}

#[tokio::test]
async fn drop_animation_arms_once_and_self_disarms() {
    let harness = Harness::new();
    let element = Arc::new(FakeElement::new());
    let content: Arc<dyn ElementHandle> = element.clone();
    let mut binding = harness.binding(AdvancedMarkerProps {
        options: AdvancedMarkerOptions::new(json!({})).with_content(content),
        pin_options: None,
        animation: Some(AnimationMode::Drop),
    });

    binding.mount().await.unwrap();
    assert_eq!(harness.observer.pending_count(), 1);
    assert!(!element.has_class("drop"));

    harness.observer.trigger_all();
    assert!(element.has_class("drop"));
    assert_eq!(harness.observer.pending_count(), 0);

    // Entrance animation finishing strips the class again.
    element.fire_animation_end();
    assert!(!element.has_class("drop"));
}

#[tokio::test]
async fn animation_only_change_recreates_and_arms_drop() {
    let harness = Harness::new();
    let element = Arc::new(FakeElement::new());
    let content: Arc<dyn ElementHandle> = element.clone();
    let mut binding = harness.binding(AdvancedMarkerProps {
        options: AdvancedMarkerOptions::new(json!({})).with_content(content),
        pin_options: None,
        animation: None,
    });
    binding.mount().await.unwrap();
    assert_eq!(harness.observer.pending_count(), 0);

    binding.set_animation(Some(AnimationMode::Drop));
    binding.sync().await.unwrap();

    // Animation is part of the compared tuple, so this is a recreation.
    assert_eq!(harness.api.library().marker_count(), 2);
    assert_eq!(harness.observer.pending_count(), 1);

    harness.observer.trigger_all();
    assert!(element.has_class("drop"));
}

#[tokio::test]
async fn reattach_does_not_rearm_drop() {
    let harness = Harness::new();
    let element = Arc::new(FakeElement::new());
    let content: Arc<dyn ElementHandle> = element.clone();
    let mut binding = harness.binding(AdvancedMarkerProps {
        options: AdvancedMarkerOptions::new(json!({})).with_content(content),
        pin_options: None,
        animation: Some(AnimationMode::Drop),
    });
    binding.mount().await.unwrap();
    harness.observer.trigger_all();
    assert_eq!(harness.observer.pending_count(), 0);

    binding.set_context(
        MapContext::new()
            .with_map(Arc::new(FakeMap::new()))
            .with_api(harness.api.clone()),
    );
    binding.sync().await.unwrap();

    assert_eq!(harness.api.library().marker_count(), 1);
    assert_eq!(harness.observer.pending_count(), 0);
}

#[tokio::test]
async fn latest_props_win_when_updated_between_passes() {
    let harness = Harness::new();
    let mut binding = harness.binding(position_props(0.0));

    // Two updates land before the first pass resolves anything.
    binding.set_options(AdvancedMarkerOptions::new(
        json!({"position": {"lat": 1.0, "lng": 0.0}}),
    ));
    binding.set_options(AdvancedMarkerOptions::new(
        json!({"position": {"lat": 2.0, "lng": 0.0}}),
    ));
    binding.mount().await.unwrap();

    let library = harness.api.library();
    assert_eq!(library.marker_count(), 1);
    assert_eq!(
        library.last_marker().unwrap().options().extra,
        json!({"position": {"lat": 2.0, "lng": 0.0}})
    );
}

#[tokio::test]
async fn dormant_until_context_ready() {
    let harness = Harness::new();
    let mut binding = AdvancedMarkerBinding::new(
        MapContext::new(),
        position_props(0.0),
        harness.log.emitter(),
        harness.observer.clone(),
    );

    binding.mount().await.unwrap();
    assert_eq!(harness.api.library().marker_count(), 0);
    assert!(binding.marker().is_none());

    // Options may change while dormant; the marker materializes with the
    // latest values once the context is ready.
    binding.set_options(AdvancedMarkerOptions::new(
        json!({"position": {"lat": 5.0, "lng": 5.0}}),
    ));
    binding.sync().await.unwrap();
    assert_eq!(harness.api.library().marker_count(), 0);

    binding.set_context(harness.context());
    binding.sync().await.unwrap();

    let library = harness.api.library();
    assert_eq!(library.marker_count(), 1);
    assert_eq!(
        library.last_marker().unwrap().options().extra,
        json!({"position": {"lat": 5.0, "lng": 5.0}})
    );
}

#[tokio::test]
async fn sdk_events_are_reemitted_with_payload() {
    let harness = Harness::new();
    let mut binding = harness.binding(position_props(0.0));
    binding.mount().await.unwrap();

    let marker = harness.api.library().last_marker().unwrap();
    marker.fire("click", json!({"latLng": {"lat": 0.5, "lng": 0.5}}));
    marker.fire("gmp-click", json!({}));

    assert_eq!(harness.log.names(), vec!["click", "gmp-click"]);
    assert_eq!(
        harness.log.events()[0].payload,
        json!({"latLng": {"lat": 0.5, "lng": 0.5}})
    );
}

#[tokio::test]
async fn library_load_failure_propagates() {
    let harness = Harness::new();
    harness.api.set_library_failure(true);
    let mut binding = harness.binding(position_props(0.0));

    let result = binding.mount().await;

    assert!(matches!(result, Err(MarkerError::LibraryLoad(_))));
    assert!(binding.marker().is_none());
}

#[tokio::test]
async fn library_resolution_is_cached_across_recreations() {
    let harness = Harness::new();
    let mut binding = harness.binding(position_props(0.0));
    binding.mount().await.unwrap();

    for lat in 1..4 {
        binding.set_options(AdvancedMarkerOptions::new(
            json!({"position": {"lat": lat, "lng": 0.0}}),
        ));
        binding.sync().await.unwrap();
    }

    assert_eq!(harness.api.library().marker_count(), 4);
    assert_eq!(harness.api.load_count(), 1);
}
