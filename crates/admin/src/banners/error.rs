//! Banner ordering errors.

use thiserror::Error;

use shopdeck_core::BannerId;

/// Why a typed rank was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankRejection {
    /// The input is empty or not a number at all.
    #[error("not a number")]
    NotANumber,

    /// The input is numeric but has a fractional part or exponent.
    #[error("not a whole number")]
    NotAnInteger,

    /// The input is a whole number outside `1..=max`.
    #[error("{value} is outside 1..={max}")]
    OutOfRange {
        /// Parsed value.
        value: i64,
        /// Number of banners in the list.
        max: usize,
    },
}

/// A rejected manual rank entry, scoped to one banner.
///
/// User-facing and recoverable: the list is left untouched and the view
/// renders `reason` under the offending banner only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid rank {input:?} for banner {id}: {reason}")]
pub struct InvalidRank {
    /// Banner the input was typed against.
    pub id: BannerId,
    /// Raw input as typed.
    pub input: String,
    /// Why it was rejected.
    pub reason: RankRejection,
}

/// Errors raised by the banner ordering engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// An index outside the rendered list was supplied. Callers only pass
    /// indices taken from the current list, so this is a contract violation.
    #[error("Index {index} out of range for {len} banners")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Current list length.
        len: usize,
    },

    /// A manual rank entry was rejected.
    #[error(transparent)]
    InvalidRank(#[from] InvalidRank),

    /// The banner is not part of the current list.
    #[error("Unknown banner: {0}")]
    UnknownBanner(BannerId),

    /// A drop arrived with no drag in progress.
    #[error("No drag in progress")]
    DragNotActive,
}

impl ReorderError {
    /// Whether this error should be shown to the user.
    ///
    /// Only rejected rank entries are; everything else is a caller bug and
    /// is logged instead.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidRank(_))
    }

    /// The banner a user-facing error belongs to.
    #[must_use]
    pub const fn banner_id(&self) -> Option<BannerId> {
        match self {
            Self::InvalidRank(invalid) => Some(invalid.id),
            Self::UnknownBanner(id) => Some(*id),
            Self::IndexOutOfRange { .. } | Self::DragNotActive => None,
        }
    }
}
