//! Session-backed `TodoStore` implementation.
//!
//! # Responsibility
//! - Keep one user's lists in a plain in-process value (`SessionLists`)
//!   owned by the per-user session.
//! - Satisfy the same contract as the relational backend so the two are
//!   interchangeable at startup.
//!
//! # Invariants
//! - Ids come from monotone counters, start at 1, and are never reused
//!   after deletion within the same store instance.
//! - The list id counter is store-wide; item id counters are per list.

use crate::model::list::{ListId, ListSummary, TodoId, TodoItem};
use crate::store::{StoreError, StoreResult, TodoStore};
use log::info;
use serde::{Deserialize, Serialize};

/// One user's lists, held in session state.
///
/// Serializable so a session layer can persist it across restarts if it
/// chooses to; counters travel with the data so id assignment stays
/// monotone after a round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLists {
    lists: Vec<StoredList>,
    next_list_id: ListId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredList {
    id: ListId,
    name: String,
    todos: Vec<TodoItem>,
    next_todo_id: TodoId,
}

impl SessionLists {
    fn find(&self, list_id: ListId) -> Option<&StoredList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    fn find_mut(&mut self, list_id: ListId) -> Option<&mut StoredList> {
        self.lists.iter_mut().find(|list| list.id == list_id)
    }
}

impl StoredList {
    fn summary(&self) -> ListSummary {
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        ListSummary {
            id: self.id,
            name: self.name.clone(),
            todos_count: self.todos.len() as u32,
            todos_completed_count: completed as u32,
        }
    }
}

/// Store over one session's lists, borrowed for the request duration.
pub struct SessionStore<'a> {
    data: &'a mut SessionLists,
}

impl<'a> SessionStore<'a> {
    pub fn new(data: &'a mut SessionLists) -> Self {
        Self { data }
    }
}

impl TodoStore for SessionStore<'_> {
    fn all_lists(&self) -> StoreResult<Vec<ListSummary>> {
        info!("event=store_op module=store backend=session op=all_lists");

        let mut lists: Vec<ListSummary> =
            self.data.lists.iter().map(StoredList::summary).collect();
        // Match the relational backend's by-name ordering so both satisfy
        // one contract.
        lists.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(lists)
    }

    fn load_list(&self, list_id: ListId) -> StoreResult<Option<ListSummary>> {
        info!("event=store_op module=store backend=session op=load_list list_id={list_id}");

        Ok(self.data.find(list_id).map(StoredList::summary))
    }

    fn load_todos(&self, list_id: ListId) -> StoreResult<Vec<TodoItem>> {
        info!("event=store_op module=store backend=session op=load_todos list_id={list_id}");

        match self.data.find(list_id) {
            Some(list) => Ok(list.todos.clone()),
            None => Ok(Vec::new()),
        }
    }

    fn create_list(&mut self, name: &str) -> StoreResult<ListId> {
        info!("event=store_op module=store backend=session op=create_list name={name:?}");

        let id = take_next(&mut self.data.next_list_id);
        self.data.lists.push(StoredList {
            id,
            name: name.to_string(),
            todos: Vec::new(),
            next_todo_id: 1,
        });
        Ok(id)
    }

    fn rename_list(&mut self, list_id: ListId, new_name: &str) -> StoreResult<()> {
        info!(
            "event=store_op module=store backend=session op=rename_list \
             list_id={list_id} new_name={new_name:?}"
        );

        let list = self
            .data
            .find_mut(list_id)
            .ok_or(StoreError::ListNotFound(list_id))?;
        list.name = new_name.to_string();
        Ok(())
    }

    fn delete_list(&mut self, list_id: ListId) -> StoreResult<()> {
        info!("event=store_op module=store backend=session op=delete_list list_id={list_id}");

        let before = self.data.lists.len();
        self.data.lists.retain(|list| list.id != list_id);
        if self.data.lists.len() == before {
            return Err(StoreError::ListNotFound(list_id));
        }
        Ok(())
    }

    fn create_todo(&mut self, list_id: ListId, name: &str) -> StoreResult<TodoId> {
        info!(
            "event=store_op module=store backend=session op=create_todo \
             list_id={list_id} name={name:?}"
        );

        let list = self
            .data
            .find_mut(list_id)
            .ok_or(StoreError::ListNotFound(list_id))?;
        let id = take_next(&mut list.next_todo_id);
        list.todos.push(TodoItem::new(id, name));
        Ok(id)
    }

    fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> StoreResult<()> {
        info!(
            "event=store_op module=store backend=session op=delete_todo \
             list_id={list_id} todo_id={todo_id}"
        );

        let list = self
            .data
            .find_mut(list_id)
            .ok_or(StoreError::ListNotFound(list_id))?;
        let before = list.todos.len();
        list.todos.retain(|todo| todo.id != todo_id);
        if list.todos.len() == before {
            return Err(StoreError::TodoNotFound { list_id, todo_id });
        }
        Ok(())
    }

    fn mark_all_done(&mut self, list_id: ListId) -> StoreResult<()> {
        info!("event=store_op module=store backend=session op=mark_all_done list_id={list_id}");

        let list = self
            .data
            .find_mut(list_id)
            .ok_or(StoreError::ListNotFound(list_id))?;
        for todo in &mut list.todos {
            todo.completed = true;
        }
        Ok(())
    }

    fn set_todo_status(
        &mut self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()> {
        info!(
            "event=store_op module=store backend=session op=set_todo_status \
             list_id={list_id} todo_id={todo_id} completed={completed}"
        );

        let list = self
            .data
            .find_mut(list_id)
            .ok_or(StoreError::ListNotFound(list_id))?;
        let todo = list
            .todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
            .ok_or(StoreError::TodoNotFound { list_id, todo_id })?;
        todo.completed = completed;
        Ok(())
    }
}

// Counters deserialize as 0 from older payloads; clamp to the first valid
// id before handing one out.
fn take_next(counter: &mut i64) -> i64 {
    if *counter < 1 {
        *counter = 1;
    }
    let id = *counter;
    *counter += 1;
    id
}
