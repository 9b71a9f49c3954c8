//! Image references attached to console records.

use serde::{Deserialize, Serialize};

/// Reference to an image hosted by the console's media API.
///
/// The engine never dereferences these; they travel with their banner so the
/// view layer and the carousel preview can render them in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Public URL of the image.
    pub url: String,
    /// Alternative text, if the uploader supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl ImageRef {
    /// Create an image reference without alt text.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: None,
        }
    }

    /// Attach alt text.
    #[must_use]
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }
}
