//! Shared domain types for the Cadence routine scheduler.
//!
//! No HTTP, no database: just the routine/slot model and the store trait
//! every backend implements.

// Trait methods return `impl Future + Send` so implementors can write plain
// `async fn` bodies; silence the advisory lint that nags about it.
#![allow(async_fn_in_trait)]

pub mod routine;
pub mod scope;
pub mod slot;
pub mod store;
