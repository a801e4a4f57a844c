//! Persistence contracts shared by both storage backends.
//!
//! # Responsibility
//! - Define the `TodoStore` capability set that handlers are written
//!   against.
//! - Keep storage details (SQL, session layout) behind one interface so
//!   the backend is selected once at startup, not per call site.
//!
//! # Invariants
//! - Every mutating call writes through immediately; there is no batching
//!   and no transaction spanning multiple calls.
//! - Every call logs the operation and the parameters issued.
//! - Backend failures surface as `StoreError::Db` and carry no recovery
//!   policy beyond propagating to the caller.

use crate::db::DbError;
use crate::model::list::{ListId, ListSummary, TodoId, TodoItem};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod session;
pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Connectivity or query failure in the relational backend.
    Db(DbError),
    /// Mutation or lookup targeted a list id that does not exist.
    ListNotFound(ListId),
    /// Mutation targeted an item id missing from its owning list.
    TodoNotFound { list_id: ListId, todo_id: TodoId },
    /// Persisted state violates a model invariant and is rejected rather
    /// than masked.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ListNotFound(list_id) => write!(f, "list not found: {list_id}"),
            Self::TodoNotFound { list_id, todo_id } => {
                write!(f, "todo not found: {todo_id} in list {list_id}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for list/item CRUD, implemented by the relational and
/// the session-backed backends.
pub trait TodoStore {
    /// All lists with aggregate counts, ordered by name.
    fn all_lists(&self) -> StoreResult<Vec<ListSummary>>;
    /// One list with aggregate counts, or `None` when absent.
    fn load_list(&self, list_id: ListId) -> StoreResult<Option<ListSummary>>;
    /// Items of one list in insertion order.
    fn load_todos(&self, list_id: ListId) -> StoreResult<Vec<TodoItem>>;
    /// Creates an empty list and returns its new id.
    fn create_list(&mut self, name: &str) -> StoreResult<ListId>;
    /// Renames an existing list.
    fn rename_list(&mut self, list_id: ListId, new_name: &str) -> StoreResult<()>;
    /// Deletes a list and all of its items.
    fn delete_list(&mut self, list_id: ListId) -> StoreResult<()>;
    /// Creates a not-completed item in the given list and returns its id.
    fn create_todo(&mut self, list_id: ListId, name: &str) -> StoreResult<TodoId>;
    /// Deletes one item from its owning list.
    fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> StoreResult<()>;
    /// Sets every item in the list to completed.
    fn mark_all_done(&mut self, list_id: ListId) -> StoreResult<()>;
    /// Sets the completion flag of one item.
    fn set_todo_status(
        &mut self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()>;
}
