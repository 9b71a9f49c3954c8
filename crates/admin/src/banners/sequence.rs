//! Canonical banner display order.
//!
//! [`SequenceModel`] owns the ranked list for one editing screen. Every
//! mutation returns a new model and renumbers the whole list from positional
//! order, so ranks are always exactly `1..=N`.

use tracing::{debug, warn};

use shopdeck_core::{BannerId, Rank};

use super::error::{InvalidRank, RankRejection, ReorderError};
use crate::models::{BannerItem, BannerRecord, RankAssignment};

/// Ranked banner list.
///
/// Items are stored in display order and `items[i].rank == i + 1` holds
/// between operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceModel {
    items: Vec<BannerItem>,
}

impl SequenceModel {
    /// Build a model from loaded records, ranking them in input order.
    #[must_use]
    pub fn initialize(records: Vec<BannerRecord>) -> Self {
        let items = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| BannerItem::from_record(record, Rank::from_position(index)))
            .collect();
        Self { items }
    }

    /// Build a model from records carrying the rank last persisted by the API.
    ///
    /// Records are ordered by stored rank; records without one go last and
    /// ties keep their loader order. The result is renumbered to `1..=N`
    /// regardless of gaps or duplicates in the stored values.
    #[must_use]
    pub fn from_records(mut records: Vec<BannerRecord>) -> Self {
        records.sort_by_key(|record| (record.stored_rank.is_none(), record.stored_rank));
        Self::initialize(records)
    }

    /// Move the banner at `source` so it ends up at `dest`.
    ///
    /// `move_item(i, i)` returns an identical model.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::IndexOutOfRange`] if either index is outside
    /// the list. `self` is never modified.
    pub fn move_item(&self, source: usize, dest: usize) -> Result<Self, ReorderError> {
        let len = self.items.len();
        for index in [source, dest] {
            if index >= len {
                warn!(index, len, "Banner move rejected: index out of range");
                return Err(ReorderError::IndexOutOfRange { index, len });
            }
        }

        if source == dest {
            return Ok(self.clone());
        }

        let mut items = self.items.clone();
        let item = items.remove(source);
        debug!(banner_id = %item.id, source, dest, "Moving banner");
        items.insert(dest, item);
        Ok(Self::renumber(items))
    }

    /// Move banner `id` so that it holds `new_rank`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::InvalidRank`] tagged with `id` if `new_rank`
    /// is outside `1..=N`, and [`ReorderError::UnknownBanner`] if `id` is not
    /// in the list. `self` is never modified.
    pub fn set_rank(&self, id: BannerId, new_rank: i64) -> Result<Self, ReorderError> {
        let max = self.items.len();
        let rank = usize::try_from(new_rank)
            .ok()
            .filter(|rank| (1..=max).contains(rank))
            .and_then(|rank| Rank::new(rank).ok())
            .ok_or_else(|| InvalidRank {
                id,
                input: new_rank.to_string(),
                reason: RankRejection::OutOfRange {
                    value: new_rank,
                    max,
                },
            })?;

        self.set_rank_to(id, rank)
    }

    /// Move banner `id` to an already-validated `rank`.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::UnknownBanner`] if `id` is not in the list and
    /// [`ReorderError::InvalidRank`] if `rank` exceeds the list length.
    pub fn set_rank_to(&self, id: BannerId, rank: Rank) -> Result<Self, ReorderError> {
        let max = self.items.len();
        if rank.get() > max {
            return Err(InvalidRank {
                id,
                input: rank.to_string(),
                reason: RankRejection::OutOfRange {
                    value: i64::try_from(rank.get()).unwrap_or(i64::MAX),
                    max,
                },
            }
            .into());
        }

        let source = self
            .position_of(id)
            .ok_or(ReorderError::UnknownBanner(id))?;
        debug!(banner_id = %id, rank = rank.get(), "Setting banner rank");
        self.move_item(source, rank.position())
    }

    /// Banners in ascending rank order.
    #[must_use]
    pub fn as_ordered_list(&self) -> &[BannerItem] {
        &self.items
    }

    /// The `(id, rank)` payload for the saver, in rank order.
    #[must_use]
    pub fn assignments(&self) -> Vec<RankAssignment> {
        self.items
            .iter()
            .map(|item| RankAssignment {
                id: item.id,
                rank: item.rank,
            })
            .collect()
    }

    /// Number of banners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Banner at a 0-based index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BannerItem> {
        self.items.get(index)
    }

    /// 0-based index of banner `id`.
    #[must_use]
    pub fn position_of(&self, id: BannerId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Whether both models list the same banners in the same order.
    #[must_use]
    pub fn same_order(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| a.id == b.id)
    }

    fn renumber(mut items: Vec<BannerItem>) -> Self {
        for (index, item) in items.iter_mut().enumerate() {
            item.rank = Rank::from_position(index);
        }
        Self { items }
    }
}
