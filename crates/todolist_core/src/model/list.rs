//! List and item records.
//!
//! # Responsibility
//! - Define the read models returned by `TodoStore` implementations.
//!
//! # Invariants
//! - `ListSummary` carries aggregate counts; the items themselves are
//!   fetched separately through `TodoStore::load_todos`.
//! - `todos_completed_count <= todos_count` for any well-formed summary.

use serde::{Deserialize, Serialize};

/// Stable integer identifier for a list.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ListId = i64;

/// Stable integer identifier for an item within its owning list.
pub type TodoId = i64;

/// A single completable unit belonging to one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub name: String,
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new item in the not-completed initial state.
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }
}

/// Read model for a list annotated with completion counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
    /// Total number of items in the list.
    pub todos_count: u32,
    /// Number of items with `completed == true`.
    pub todos_completed_count: u32,
}

#[cfg(test)]
mod tests {
    use super::TodoItem;

    #[test]
    fn new_item_starts_not_completed() {
        let item = TodoItem::new(1, "buy milk");
        assert_eq!(item.id, 1);
        assert_eq!(item.name, "buy milk");
        assert!(!item.completed);
    }
}
