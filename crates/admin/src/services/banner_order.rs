//! Banner ordering service.
//!
//! A [`BannerReorderSession`] is the state behind one banner-ordering
//! screen: the canonical [`SequenceModel`], the drag controller and the
//! manual rank editor. Loading and saving go through a [`BannerStore`], the
//! console API client supplied by the host.

use std::future::Future;

use thiserror::Error;
use tracing::{debug, info, instrument};

use shopdeck_core::{BannerId, TenantId};

use crate::banners::{
    DragReorderController, ManualRankEditor, ReorderError, SequenceModel, ShiftDirection,
};
use crate::models::{BannerItem, BannerRecord, RankAssignment};

/// Errors reported by a [`BannerStore`]. Passed upward unchanged; retries are
/// the caller's decision.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request could not be completed.
    #[error("Banner store request failed: {0}")]
    Request(String),

    /// The response could not be decoded.
    #[error("Banner store response error: {0}")]
    Decode(String),

    /// The tenant has no banner list.
    #[error("No banners for tenant {0}")]
    NotFound(TenantId),
}

/// Loader/saver for a tenant's banner list.
pub trait BannerStore {
    /// Fetch the tenant's banners.
    fn load_banners(
        &self,
        tenant: TenantId,
    ) -> impl Future<Output = Result<Vec<BannerRecord>, StoreError>> + Send;

    /// Persist a new order. `order` lists every banner, ranks `1..=N`.
    fn save_order(
        &self,
        tenant: TenantId,
        order: &[RankAssignment],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Editing state for one tenant's banner order.
#[derive(Debug, Clone)]
pub struct BannerReorderSession {
    tenant: TenantId,
    saved: SequenceModel,
    model: SequenceModel,
    drag: DragReorderController,
    ranks: ManualRankEditor,
}

impl BannerReorderSession {
    /// Start a session over already-fetched records.
    #[must_use]
    pub fn new(tenant: TenantId, records: Vec<BannerRecord>) -> Self {
        let model = SequenceModel::from_records(records);
        Self {
            tenant,
            saved: model.clone(),
            model,
            drag: DragReorderController::new(),
            ranks: ManualRankEditor::new(),
        }
    }

    /// Fetch the tenant's banners and start a session.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged.
    #[instrument(skip(store))]
    pub async fn load<S: BannerStore>(store: &S, tenant: TenantId) -> Result<Self, StoreError> {
        let records = store.load_banners(tenant).await?;
        let session = Self::new(tenant, records);
        info!(banners = session.model.len(), "Banner list loaded");
        Ok(session)
    }

    /// Persist the current order and return the payload that was sent.
    ///
    /// On failure the session keeps its unsaved changes.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged.
    #[instrument(skip(self, store), fields(tenant = %self.tenant))]
    pub async fn save<S: BannerStore>(
        &mut self,
        store: &S,
    ) -> Result<Vec<RankAssignment>, StoreError> {
        let order = self.model.assignments();
        store.save_order(self.tenant, &order).await?;
        self.saved = self.model.clone();
        info!(banners = order.len(), "Banner order saved");
        Ok(order)
    }

    /// Tenant this session edits.
    #[must_use]
    pub const fn tenant(&self) -> TenantId {
        self.tenant
    }

    /// Current canonical order.
    #[must_use]
    pub const fn model(&self) -> &SequenceModel {
        &self.model
    }

    /// Banners in display order, for rendering and the carousel preview.
    #[must_use]
    pub fn banners(&self) -> &[BannerItem] {
        self.model.as_ordered_list()
    }

    /// Whether the order differs from the last load or save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.model.same_order(&self.saved)
    }

    /// Revert to the last loaded or saved order.
    pub fn discard_changes(&mut self) {
        self.drag.on_drag_cancel();
        self.ranks.clear();
        self.model = self.saved.clone();
        debug!("Discarded unsaved banner order");
    }

    /// Begin dragging the banner at `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::IndexOutOfRange`] for an index outside the list.
    pub fn drag_start(&mut self, source: usize) -> Result<(), ReorderError> {
        self.drag.on_drag_start(source, &self.model)
    }

    /// Update the drag preview.
    pub fn drag_over(&mut self, dest: usize) {
        self.drag.on_drag_over(dest);
    }

    /// Commit the drag at `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::DragNotActive`] without a drag in progress and
    /// [`ReorderError::IndexOutOfRange`] for an index outside the list. The
    /// order is unchanged on error.
    pub fn drop_at(&mut self, dest: usize) -> Result<(), ReorderError> {
        self.model = self.drag.on_drop(dest, &self.model)?;
        Ok(())
    }

    /// Abort the drag. Returns whether one was in progress.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.on_drag_cancel()
    }

    /// Preview hint for the banner at `index` during a drag.
    #[must_use]
    pub fn shift_for(&self, index: usize) -> Option<ShiftDirection> {
        self.drag.shift_for(index)
    }

    /// Apply a rank typed for banner `id`.
    ///
    /// A successful entry cancels any drag in progress, since the drag's
    /// source index no longer refers to the banner that was picked up.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::InvalidRank`] for rejected input (also kept
    /// as the banner's inline error) and [`ReorderError::UnknownBanner`] if
    /// `id` is not in the list.
    pub fn enter_rank(&mut self, id: BannerId, raw: &str) -> Result<(), ReorderError> {
        let updated = self.ranks.on_rank_input(id, raw, &self.model)?;
        if updated != self.model && self.drag.on_drag_cancel() {
            debug!(banner_id = %id, "Cancelled drag after manual rank change");
        }
        self.model = updated;
        Ok(())
    }

    /// Drag controller, for rendering.
    #[must_use]
    pub const fn drag(&self) -> &DragReorderController {
        &self.drag
    }

    /// Manual rank editor, for rendering inline errors.
    #[must_use]
    pub const fn rank_editor(&self) -> &ManualRankEditor {
        &self.ranks
    }
}
