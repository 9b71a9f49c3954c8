//! Banner domain models for the display-order editor.

use serde::{Deserialize, Serialize};

use shopdeck_core::{BannerId, ImageRef, Rank};

/// A banner as returned by the console API, before it has a canonical rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerRecord {
    /// Externally assigned banner ID.
    pub id: BannerId,
    /// Name shown in the editor list.
    pub display_name: String,
    /// Slides in display order.
    #[serde(default)]
    pub images: Vec<ImageRef>,
    /// Sort value last persisted by the API, if any. May contain gaps or
    /// duplicates; it is only used to order records on load.
    #[serde(default, rename = "rank")]
    pub stored_rank: Option<u32>,
}

impl BannerRecord {
    /// Create a record with no stored rank.
    #[must_use]
    pub fn new(id: BannerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            images: Vec::new(),
            stored_rank: None,
        }
    }

    /// Attach images.
    #[must_use]
    pub fn with_images(mut self, images: Vec<ImageRef>) -> Self {
        self.images = images;
        self
    }

    /// Attach the rank last persisted by the API.
    #[must_use]
    pub const fn with_stored_rank(mut self, rank: u32) -> Self {
        self.stored_rank = Some(rank);
        self
    }
}

/// A banner owned by a sequence model.
///
/// `rank` is written only by the sequence model; everything else is carried
/// through untouched from the loaded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerItem {
    /// Externally assigned banner ID.
    pub id: BannerId,
    /// Name shown in the editor list.
    pub display_name: String,
    /// Slides in display order.
    pub images: Vec<ImageRef>,
    /// Canonical 1-based display rank.
    pub rank: Rank,
}

impl BannerItem {
    pub(crate) fn from_record(record: BannerRecord, rank: Rank) -> Self {
        Self {
            id: record.id,
            display_name: record.display_name,
            images: record.images,
            rank,
        }
    }
}

/// One entry of the order payload sent back to the console API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankAssignment {
    /// Banner ID.
    pub id: BannerId,
    /// New 1-based rank.
    pub rank: Rank,
}
