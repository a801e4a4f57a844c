//! Request handlers: one store/validation call per route.
//!
//! # Responsibility
//! - Map each `Route` to a persistence or validation operation.
//! - Set flash messages and decide between render and redirect.
//!
//! # Invariants
//! - Validation runs before the corresponding store mutation; on error the
//!   mutation is skipped and the form re-renders with the submitted value.
//! - A request naming a nonexistent list sets an error flash and redirects
//!   to the index instead of producing a protocol-level not-found.
//! - `StoreError::Db` is never caught here; it propagates and terminates
//!   the request with a generic failure response.

use crate::form::FormData;
use crate::router::{ResponseFormat, Route};
use crate::session::FlashBag;
use crate::views;
use todolist_core::{
    is_list_complete, order_for_display, validate_name, ListId, NameError, StoreError,
    StoreResult, TodoId, TodoStore,
};

const LIST_NOT_FOUND: &str = "List not found.";

/// What the adapter layer should send back.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// 200 with an HTML page.
    Page(String),
    /// 302 to the given location.
    Redirect(String),
    /// 204, used by AJAX item deletion.
    NoContent,
    /// 200 with a plain-text body, used by AJAX list deletion.
    Text(String),
    /// 404 page.
    NotFound,
}

pub fn dispatch(
    route: Route,
    format: ResponseFormat,
    form: &FormData,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    match route {
        Route::Home => Ok(Outcome::Redirect("/lists".to_string())),
        Route::ListIndex => list_index(store, flash),
        Route::NewListForm => Ok(Outcome::Page(views::new_list_page("", &flash.take()))),
        Route::CreateList => create_list(form, store, flash),
        Route::ShowList(list_id) => show_list(list_id, store, flash),
        Route::EditListForm(list_id) => edit_list_form(list_id, store, flash),
        Route::RenameList(list_id) => rename_list(list_id, form, store, flash),
        Route::DeleteList(list_id) => delete_list(list_id, format, store, flash),
        Route::CompleteAll(list_id) => complete_all(list_id, store, flash),
        Route::CreateTodo(list_id) => create_todo(list_id, form, store, flash),
        Route::SetTodoStatus(list_id, todo_id) => {
            set_todo_status(list_id, todo_id, form, store, flash)
        }
        Route::DeleteTodo(list_id, todo_id) => {
            delete_todo(list_id, todo_id, format, store, flash)
        }
        Route::NotFound => Ok(Outcome::NotFound),
    }
}

fn list_index(store: &mut dyn TodoStore, flash: &mut FlashBag) -> StoreResult<Outcome> {
    let lists = order_for_display(store.all_lists()?, is_list_complete);
    Ok(Outcome::Page(views::lists_page(&lists, &flash.take())))
}

fn create_list(
    form: &FormData,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    let name = form.value("list_name").trim().to_string();
    let lists = store.all_lists()?;
    let existing = lists.iter().map(|list| list.name.as_str());

    match validate_name(&name, existing) {
        Err(err) => {
            flash.set_error(name_error_message("List", err));
            Ok(Outcome::Page(views::new_list_page(&name, &flash.take())))
        }
        Ok(()) => {
            store.create_list(&name)?;
            flash.set_success("The list has been created.");
            Ok(Outcome::Redirect("/lists".to_string()))
        }
    }
}

fn show_list(
    list_id: ListId,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    match store.load_list(list_id)? {
        None => Ok(missing_list(flash)),
        Some(list) => {
            let todos = order_for_display(store.load_todos(list_id)?, |todo| todo.completed);
            Ok(Outcome::Page(views::list_page(&list, &todos, &flash.take())))
        }
    }
}

fn edit_list_form(
    list_id: ListId,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    match store.load_list(list_id)? {
        None => Ok(missing_list(flash)),
        Some(list) => Ok(Outcome::Page(views::edit_list_page(
            &list,
            &list.name,
            &flash.take(),
        ))),
    }
}

fn rename_list(
    list_id: ListId,
    form: &FormData,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    let Some(list) = store.load_list(list_id)? else {
        return Ok(missing_list(flash));
    };

    let new_name = form.value("list_name").trim().to_string();
    let lists = store.all_lists()?;
    let existing = lists.iter().map(|list| list.name.as_str());

    match validate_name(&new_name, existing) {
        Err(err) => {
            flash.set_error(name_error_message("List", err));
            Ok(Outcome::Page(views::edit_list_page(
                &list,
                &new_name,
                &flash.take(),
            )))
        }
        Ok(()) => {
            store.rename_list(list_id, &new_name)?;
            flash.set_success("The list has been updated.");
            Ok(Outcome::Redirect(format!("/lists/{list_id}")))
        }
    }
}

fn delete_list(
    list_id: ListId,
    format: ResponseFormat,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    match store.delete_list(list_id) {
        Err(StoreError::ListNotFound(_)) => Ok(missing_list(flash)),
        Err(other) => Err(other),
        Ok(()) => match format {
            ResponseFormat::Ajax => Ok(Outcome::Text("/lists".to_string())),
            ResponseFormat::Html => {
                flash.set_success("The list has been deleted.");
                Ok(Outcome::Redirect("/lists".to_string()))
            }
        },
    }
}

fn complete_all(
    list_id: ListId,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    match store.mark_all_done(list_id) {
        Err(StoreError::ListNotFound(_)) => Ok(missing_list(flash)),
        Err(other) => Err(other),
        Ok(()) => {
            flash.set_success("All todos have been completed.");
            Ok(Outcome::Redirect(format!("/lists/{list_id}")))
        }
    }
}

fn create_todo(
    list_id: ListId,
    form: &FormData,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    let Some(list) = store.load_list(list_id)? else {
        return Ok(missing_list(flash));
    };

    let name = form.value("todo").trim().to_string();
    let todos = store.load_todos(list_id)?;
    let existing = todos.iter().map(|todo| todo.name.as_str());

    match validate_name(&name, existing) {
        Err(err) => {
            flash.set_error(name_error_message("Todo", err));
            let ordered = order_for_display(todos, |todo| todo.completed);
            Ok(Outcome::Page(views::list_page(
                &list,
                &ordered,
                &flash.take(),
            )))
        }
        Ok(()) => {
            store.create_todo(list_id, &name)?;
            flash.set_success("The todo was added.");
            Ok(Outcome::Redirect(format!("/lists/{list_id}")))
        }
    }
}

fn set_todo_status(
    list_id: ListId,
    todo_id: TodoId,
    form: &FormData,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    let completed = form.value("completed") == "true";
    match store.set_todo_status(list_id, todo_id, completed) {
        Err(StoreError::ListNotFound(_)) => Ok(missing_list(flash)),
        Err(StoreError::TodoNotFound { .. }) => Ok(missing_todo(list_id, flash)),
        Err(other) => Err(other),
        Ok(()) => Ok(Outcome::Redirect(format!("/lists/{list_id}"))),
    }
}

fn delete_todo(
    list_id: ListId,
    todo_id: TodoId,
    format: ResponseFormat,
    store: &mut dyn TodoStore,
    flash: &mut FlashBag,
) -> StoreResult<Outcome> {
    match store.delete_todo(list_id, todo_id) {
        Err(StoreError::ListNotFound(_)) => Ok(missing_list(flash)),
        Err(StoreError::TodoNotFound { .. }) => Ok(missing_todo(list_id, flash)),
        Err(other) => Err(other),
        Ok(()) => match format {
            ResponseFormat::Ajax => Ok(Outcome::NoContent),
            ResponseFormat::Html => {
                flash.set_success("The todo has been deleted.");
                Ok(Outcome::Redirect(format!("/lists/{list_id}")))
            }
        },
    }
}

fn missing_list(flash: &mut FlashBag) -> Outcome {
    flash.set_error(LIST_NOT_FOUND);
    Outcome::Redirect("/lists".to_string())
}

fn missing_todo(list_id: ListId, flash: &mut FlashBag) -> Outcome {
    flash.set_error("Todo not found.");
    Outcome::Redirect(format!("/lists/{list_id}"))
}

fn name_error_message(noun: &str, err: NameError) -> String {
    format!("{noun} {err}.")
}
