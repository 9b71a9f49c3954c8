//! Business logic services for admin.
//!
//! # Services
//!
//! - `banner_order` - Load, edit and save a tenant's banner display order

pub mod banner_order;

pub use banner_order::{BannerReorderSession, BannerStore, StoreError};
