//! Display rank type.

use core::fmt;
use core::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rank`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankError {
    /// Ranks are 1-based; zero is never a valid rank.
    #[error("rank must be at least 1")]
    Zero,
}

/// A 1-based position in a display order.
///
/// Ranks never carry meaning on their own: a list of `N` ranked items always
/// holds exactly the ranks `1..=N`, and the owning sequence recomputes them
/// from positional order after every mutation.
///
/// ## Examples
///
/// ```
/// use shopdeck_core::Rank;
///
/// assert_eq!(Rank::from_position(0).get(), 1);
/// assert_eq!(Rank::new(3).map(Rank::position), Ok(2));
/// assert!(Rank::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(NonZeroUsize);

impl Rank {
    /// The first rank.
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Create a rank from its 1-based value.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Zero`] for `0`.
    pub const fn new(value: usize) -> Result<Self, RankError> {
        match NonZeroUsize::new(value) {
            Some(value) => Ok(Self(value)),
            None => Err(RankError::Zero),
        }
    }

    /// The rank held by the item at a 0-based `index`.
    #[must_use]
    pub const fn from_position(index: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(index))
    }

    /// The 1-based rank value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// The 0-based index this rank occupies.
    #[must_use]
    pub const fn position(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for Rank {
    type Error = RankError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rank> for usize {
    fn from(rank: Rank) -> Self {
        rank.get()
    }
}
