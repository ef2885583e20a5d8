//! Storekeeper Core - Shared types library.
//!
//! This crate provides common types used across all Storekeeper components:
//! - `app` - Embedded-app backend (catalog proxy + product mirror)
//! - `cli` - Command-line tools for migrations and catalog browsing
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and remote product references

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
