//! Shopdeck Core - Shared types library.
//!
//! This crate provides common types used across the Shopdeck console:
//! - `admin` - Banner ordering engine and console services
//! - `integration-tests` - Cross-crate scenarios
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no timers.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, ranks and image references

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
