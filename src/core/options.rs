use crate::core::context::same_object;
use crate::sdk::handle::ElementHandle;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Construction options for an advanced marker.
///
/// `extra` is the opaque constructor blob the SDK understands (position,
/// title, draggability, ...) and is deep-compared between reconciliation
/// passes. `content` is split out because the reconciler may fill it with a
/// constructed pin element; it is compared by object identity.
#[derive(Clone, Default)]
pub struct AdvancedMarkerOptions {
    /// Custom content element. When absent and pin options are supplied, the
    /// binding constructs a pin and uses its element here.
    pub content: Option<Arc<dyn ElementHandle>>,
    /// Remaining constructor options, passed through to the SDK untouched.
    pub extra: Value,
}

impl AdvancedMarkerOptions {
    pub fn new(extra: Value) -> Self {
        Self {
            content: None,
            extra,
        }
    }

    pub fn with_content(mut self, content: Arc<dyn ElementHandle>) -> Self {
        self.content = Some(content);
        self
    }
}

impl PartialEq for AdvancedMarkerOptions {
    fn eq(&self, other: &Self) -> bool {
        let content_eq = match (&self.content, &other.content) {
            (None, None) => true,
            (Some(a), Some(b)) => same_object(a, b),
            _ => false,
        };
        content_eq && self.extra == other.extra
    }
}

impl std::fmt::Debug for AdvancedMarkerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvancedMarkerOptions")
            .field("content", &self.content.is_some())
            .field("extra", &self.extra)
            .finish()
    }
}

/// Styling options for the default pin backing an advanced marker's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PinOptions {
    pub background: Option<String>,
    pub border_color: Option<String>,
    pub glyph: Option<String>,
    pub glyph_color: Option<String>,
    pub scale: Option<f64>,
}
