//! Core domain logic for the todolist application.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod display;
pub mod logging;
pub mod model;
pub mod store;
pub mod validate;

pub use display::{is_list_complete, order_for_display, progress_label};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{ListId, ListSummary, TodoId, TodoItem};
pub use store::session::{SessionLists, SessionStore};
pub use store::sqlite::SqliteStore;
pub use store::{StoreError, StoreResult, TodoStore};
pub use validate::{validate_name, NameError, NAME_MAX_CHARS, NAME_MIN_CHARS};
