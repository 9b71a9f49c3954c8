//! Domain models for admin.

pub mod banner;

pub use banner::{BannerItem, BannerRecord, RankAssignment};
