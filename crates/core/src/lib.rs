//! Portfolio Core - Shared types library.
//!
//! This crate provides common types used across the portfolio components:
//! - `site` - Public pages and the authenticated admin area
//! - `integration-tests` - End-to-end tests against a mock backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email, statuses, the newline-delimited list
//!   codec, storage key derivation, and the list reorder computation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
