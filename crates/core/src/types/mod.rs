//! Core types for Shopdeck.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod image;
pub mod rank;

pub use id::*;
pub use image::ImageRef;
pub use rank::{Rank, RankError};
