use crate::core::options::{AdvancedMarkerOptions, PinOptions};
use crate::sdk::handle::{AdvancedMarkerHandle, ClassicMarkerHandle, PinHandle};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Component tag the shared setup helper passes when instantiating a classic
/// marker.
pub const MARKER_COMPONENT: &str = "Marker";

/// The SDK namespace handle supplied through [`crate::MapContext`].
#[async_trait]
pub trait MarkerApi: Send + Sync {
    /// Synchronously constructs a classic component of the given tag.
    fn instantiate(&self, tag: &'static str, options: &Value) -> Result<Arc<dyn ClassicMarkerHandle>>;

    /// Resolves the marker library. Asynchronous on first call; SDK
    /// implementations cache the resolved library afterwards.
    async fn marker_library(&self) -> Result<Arc<dyn MarkerLibrary>>;
}

/// Constructors that only exist once the marker library has loaded.
pub trait MarkerLibrary: Send + Sync {
    fn new_advanced_marker(
        &self,
        options: &AdvancedMarkerOptions,
    ) -> Result<Arc<dyn AdvancedMarkerHandle>>;

    fn new_pin(&self, options: &PinOptions) -> Result<Arc<dyn PinHandle>>;
}
