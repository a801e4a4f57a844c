//! Domain model for todo lists and their items.
//!
//! # Responsibility
//! - Define the canonical records shared by both storage backends.
//!
//! # Invariants
//! - Entity ids are positive integers, strictly increasing per store.
//! - A list never contains two items with the same id.

pub mod list;
