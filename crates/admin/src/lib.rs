//! Shopdeck Admin library.
//!
//! Console-side logic for the Shopdeck retail admin. The CRUD screens around
//! it are thin wrappers over the console API; this crate holds the parts
//! with real state: the banner display-order engine and the session that
//! loads, edits and saves a tenant's banner order.
//!
//! Logging goes through `tracing`; installing a subscriber is left to the
//! host application.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod banners;
pub mod config;
pub mod models;
pub mod services;
