//! Document storage for the canteen meal planner.
//!
//! This crate provides the storage abstraction the meal planner depends on:
//! named collections of JSON documents with point lookups, merging upserts,
//! deletes, and change subscriptions that deliver full-collection snapshots.
//! An in-memory implementation is included for tests and single-process use.

mod document;
mod error;
mod memory;
mod store;

pub use document::*;
pub use error::*;
pub use memory::*;
pub use store::*;
