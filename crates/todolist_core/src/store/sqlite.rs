//! SQLite-backed `TodoStore` implementation.
//!
//! # Responsibility
//! - Keep SQL details inside the persistence boundary.
//! - Annotate list reads with aggregate completion counts in one query.
//!
//! # Invariants
//! - List deletion relies on `ON DELETE CASCADE`; callers never see
//!   orphaned todo rows.
//! - Read paths reject invalid persisted state (`InvalidData`) instead of
//!   masking it.

use crate::model::list::{ListId, ListSummary, TodoId, TodoItem};
use crate::store::{StoreError, StoreResult, TodoStore};
use log::info;
use rusqlite::{params, Connection, Row};

// Plain COUNT is correct here: todos.list_id -> lists.id is the only join
// edge, so the left join cannot fan out per list.
const LIST_SELECT_SQL: &str = "SELECT
    lists.id,
    lists.name,
    COUNT(todos.id) AS todos_count,
    COUNT(NULLIF(todos.completed, 0)) AS todos_completed_count
FROM lists
LEFT OUTER JOIN todos ON todos.list_id = lists.id";

/// Relational store over a borrowed connection.
///
/// The connection is acquired at request start and released with the
/// borrow at request end; the store itself holds no other state.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn list_exists(&self, list_id: ListId) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM lists WHERE id = ?1);",
            [list_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl TodoStore for SqliteStore<'_> {
    fn all_lists(&self) -> StoreResult<Vec<ListSummary>> {
        info!("event=store_op module=store backend=sqlite op=all_lists");

        let mut stmt = self.conn.prepare(&format!(
            "{LIST_SELECT_SQL}
             GROUP BY lists.id
             ORDER BY lists.name;"
        ))?;
        let mut rows = stmt.query([])?;

        let mut lists = Vec::new();
        while let Some(row) = rows.next()? {
            lists.push(parse_summary_row(row)?);
        }
        Ok(lists)
    }

    fn load_list(&self, list_id: ListId) -> StoreResult<Option<ListSummary>> {
        info!("event=store_op module=store backend=sqlite op=load_list list_id={list_id}");

        let mut stmt = self.conn.prepare(&format!(
            "{LIST_SELECT_SQL}
             WHERE lists.id = ?1
             GROUP BY lists.id;"
        ))?;
        let mut rows = stmt.query([list_id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_summary_row(row)?));
        }
        Ok(None)
    }

    fn load_todos(&self, list_id: ListId) -> StoreResult<Vec<TodoItem>> {
        info!("event=store_op module=store backend=sqlite op=load_todos list_id={list_id}");

        let mut stmt = self.conn.prepare(
            "SELECT id, name, completed
             FROM todos
             WHERE list_id = ?1
             ORDER BY id;",
        )?;
        let mut rows = stmt.query([list_id])?;

        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }
        Ok(todos)
    }

    fn create_list(&mut self, name: &str) -> StoreResult<ListId> {
        info!("event=store_op module=store backend=sqlite op=create_list name={name:?}");

        self.conn
            .execute("INSERT INTO lists (name) VALUES (?1);", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn rename_list(&mut self, list_id: ListId, new_name: &str) -> StoreResult<()> {
        info!(
            "event=store_op module=store backend=sqlite op=rename_list \
             list_id={list_id} new_name={new_name:?}"
        );

        let changed = self.conn.execute(
            "UPDATE lists SET name = ?1 WHERE id = ?2;",
            params![new_name, list_id],
        )?;
        if changed == 0 {
            return Err(StoreError::ListNotFound(list_id));
        }
        Ok(())
    }

    fn delete_list(&mut self, list_id: ListId) -> StoreResult<()> {
        info!("event=store_op module=store backend=sqlite op=delete_list list_id={list_id}");

        let changed = self
            .conn
            .execute("DELETE FROM lists WHERE id = ?1;", [list_id])?;
        if changed == 0 {
            return Err(StoreError::ListNotFound(list_id));
        }
        Ok(())
    }

    fn create_todo(&mut self, list_id: ListId, name: &str) -> StoreResult<TodoId> {
        info!(
            "event=store_op module=store backend=sqlite op=create_todo \
             list_id={list_id} name={name:?}"
        );

        if !self.list_exists(list_id)? {
            return Err(StoreError::ListNotFound(list_id));
        }
        self.conn.execute(
            "INSERT INTO todos (name, list_id) VALUES (?1, ?2);",
            params![name, list_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> StoreResult<()> {
        info!(
            "event=store_op module=store backend=sqlite op=delete_todo \
             list_id={list_id} todo_id={todo_id}"
        );

        let changed = self.conn.execute(
            "DELETE FROM todos WHERE list_id = ?1 AND id = ?2;",
            params![list_id, todo_id],
        )?;
        if changed == 0 {
            return Err(StoreError::TodoNotFound { list_id, todo_id });
        }
        Ok(())
    }

    fn mark_all_done(&mut self, list_id: ListId) -> StoreResult<()> {
        info!("event=store_op module=store backend=sqlite op=mark_all_done list_id={list_id}");

        if !self.list_exists(list_id)? {
            return Err(StoreError::ListNotFound(list_id));
        }
        self.conn.execute(
            "UPDATE todos SET completed = 1 WHERE list_id = ?1;",
            [list_id],
        )?;
        Ok(())
    }

    fn set_todo_status(
        &mut self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreResult<()> {
        info!(
            "event=store_op module=store backend=sqlite op=set_todo_status \
             list_id={list_id} todo_id={todo_id} completed={completed}"
        );

        let changed = self.conn.execute(
            "UPDATE todos SET completed = ?1 WHERE list_id = ?2 AND id = ?3;",
            params![bool_to_int(completed), list_id, todo_id],
        )?;
        if changed == 0 {
            return Err(StoreError::TodoNotFound { list_id, todo_id });
        }
        Ok(())
    }
}

fn parse_summary_row(row: &Row<'_>) -> StoreResult<ListSummary> {
    let todos_count: i64 = row.get("todos_count")?;
    let todos_completed_count: i64 = row.get("todos_completed_count")?;

    let summary = ListSummary {
        id: row.get("id")?,
        name: row.get("name")?,
        todos_count: to_count(todos_count, "todos_count")?,
        todos_completed_count: to_count(todos_completed_count, "todos_completed_count")?,
    };

    if summary.todos_completed_count > summary.todos_count {
        return Err(StoreError::InvalidData(format!(
            "list {} reports {} completed of {} total",
            summary.id, summary.todos_completed_count, summary.todos_count
        )));
    }
    Ok(summary)
}

fn parse_todo_row(row: &Row<'_>) -> StoreResult<TodoItem> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid completed value `{other}` in todos.completed"
            )));
        }
    };

    Ok(TodoItem {
        id: row.get("id")?,
        name: row.get("name")?,
        completed,
    })
}

fn to_count(value: i64, column: &str) -> StoreResult<u32> {
    u32::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid count `{value}` in {column}")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
