//! Manual rank entry.
//!
//! Turns the raw text typed into a banner's rank field into a validated
//! [`SequenceModel::set_rank`] call, and keeps the inline error badge for
//! each banner whose last entry was rejected.

use std::collections::HashMap;

use tracing::debug;

use shopdeck_core::BannerId;

use super::error::{InvalidRank, RankRejection, ReorderError};
use super::sequence::SequenceModel;

/// Per-screen manual rank editor.
#[derive(Debug, Clone, Default)]
pub struct ManualRankEditor {
    errors: HashMap<BannerId, InvalidRank>,
}

impl ManualRankEditor {
    /// Create an editor with no pending errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a rank typed for banner `id`.
    ///
    /// On success the banner's error badge is cleared and the reordered model
    /// is returned. On a rejected entry the badge is set for `id` only and
    /// the caller keeps its current model.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::InvalidRank`] for empty, non-numeric,
    /// fractional or out-of-range input, and [`ReorderError::UnknownBanner`]
    /// if `id` is not in `model`.
    pub fn on_rank_input(
        &mut self,
        id: BannerId,
        raw: &str,
        model: &SequenceModel,
    ) -> Result<SequenceModel, ReorderError> {
        let result = parse_rank(raw)
            .map_err(|reason| {
                ReorderError::from(InvalidRank {
                    id,
                    input: raw.to_string(),
                    reason,
                })
            })
            .and_then(|value| model.set_rank(id, value));

        match result {
            Ok(updated) => {
                self.errors.remove(&id);
                Ok(updated)
            }
            Err(ReorderError::InvalidRank(mut invalid)) => {
                invalid.input = raw.to_string();
                debug!(banner_id = %id, input = raw, reason = %invalid.reason, "Rank input rejected");
                self.errors.insert(id, invalid.clone());
                Err(ReorderError::InvalidRank(invalid))
            }
            Err(other) => Err(other),
        }
    }

    /// The pending error for banner `id`, if its last entry was rejected.
    #[must_use]
    pub fn error_for(&self, id: BannerId) -> Option<&InvalidRank> {
        self.errors.get(&id)
    }

    /// All pending errors.
    pub fn errors(&self) -> impl Iterator<Item = &InvalidRank> {
        self.errors.values()
    }

    /// Whether any banner currently shows an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drop every pending error (e.g. after the list is reloaded).
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Drop errors for banners no longer in `model`.
    pub fn retain_known(&mut self, model: &SequenceModel) {
        self.errors.retain(|id, _| model.position_of(*id).is_some());
    }
}

/// Parse a typed rank. Only whole-number literals are accepted; surrounding
/// whitespace is ignored.
fn parse_rank(raw: &str) -> Result<i64, RankRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RankRejection::NotANumber);
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        // Whole number too large for i64; certainly out of range.
        let value = if trimmed.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        };
        return Ok(value);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Err(RankRejection::NotAnInteger),
        _ => Err(RankRejection::NotANumber),
    }
}
