//! Core types for Storekeeper.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod remote;

pub use id::*;
pub use remote::{RemoteProductId, RemoteProductIdError};
