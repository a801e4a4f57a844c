//! URL dispatch table: method + path to a `Route`.
//!
//! # Responsibility
//! - Parse path segments and numeric ids before any handler runs.
//! - Derive the response format from the AJAX request header at the
//!   routing edge, so handlers receive it as an explicit parameter.

use tiny_http::{Header, Method};
use todolist_core::{ListId, TodoId};

/// The full HTTP surface of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    ListIndex,
    NewListForm,
    CreateList,
    ShowList(ListId),
    EditListForm(ListId),
    RenameList(ListId),
    DeleteList(ListId),
    CompleteAll(ListId),
    CreateTodo(ListId),
    SetTodoStatus(ListId, TodoId),
    DeleteTodo(ListId, TodoId),
    NotFound,
}

/// Whether the client asked for a full page or an AJAX-style response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Ajax,
}

pub fn route(method: &Method, url: &str) -> Route {
    let path = url.split('?').next().unwrap_or(url);
    let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();

    match (method, segments.as_slice()) {
        (&Method::Get, []) => Route::Home,
        (&Method::Get, ["lists"]) => Route::ListIndex,
        (&Method::Get, ["lists", "new"]) => Route::NewListForm,
        (&Method::Post, ["lists"]) => Route::CreateList,
        (&Method::Get, ["lists", id]) => with_id(id, Route::ShowList),
        (&Method::Get, ["lists", id, "edit"]) => with_id(id, Route::EditListForm),
        (&Method::Post, ["lists", id]) => with_id(id, Route::RenameList),
        (&Method::Post, ["lists", id, "delete"]) => with_id(id, Route::DeleteList),
        (&Method::Post, ["lists", id, "complete_all"]) => with_id(id, Route::CompleteAll),
        (&Method::Post, ["lists", id, "todos"]) => with_id(id, Route::CreateTodo),
        (&Method::Post, ["lists", list_id, "todos", todo_id]) => {
            with_ids(list_id, todo_id, Route::SetTodoStatus)
        }
        (&Method::Post, ["lists", list_id, "todos", todo_id, "delete"]) => {
            with_ids(list_id, todo_id, Route::DeleteTodo)
        }
        _ => Route::NotFound,
    }
}

pub fn response_format(headers: &[Header]) -> ResponseFormat {
    let ajax = headers.iter().any(|header| {
        header.field.equiv("X-Requested-With") && header.value.as_str() == "XMLHttpRequest"
    });
    if ajax {
        ResponseFormat::Ajax
    } else {
        ResponseFormat::Html
    }
}

fn with_id(raw: &str, make: impl Fn(ListId) -> Route) -> Route {
    match raw.parse::<ListId>() {
        Ok(id) => make(id),
        Err(_) => Route::NotFound,
    }
}

fn with_ids(raw_list: &str, raw_todo: &str, make: impl Fn(ListId, TodoId) -> Route) -> Route {
    match (raw_list.parse::<ListId>(), raw_todo.parse::<TodoId>()) {
        (Ok(list_id), Ok(todo_id)) => make(list_id, todo_id),
        _ => Route::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::{response_format, route, ResponseFormat, Route};
    use tiny_http::{Header, Method};

    #[test]
    fn routes_the_full_surface() {
        assert_eq!(route(&Method::Get, "/"), Route::Home);
        assert_eq!(route(&Method::Get, "/lists"), Route::ListIndex);
        assert_eq!(route(&Method::Get, "/lists/new"), Route::NewListForm);
        assert_eq!(route(&Method::Post, "/lists"), Route::CreateList);
        assert_eq!(route(&Method::Get, "/lists/7"), Route::ShowList(7));
        assert_eq!(route(&Method::Get, "/lists/7/edit"), Route::EditListForm(7));
        assert_eq!(route(&Method::Post, "/lists/7"), Route::RenameList(7));
        assert_eq!(route(&Method::Post, "/lists/7/delete"), Route::DeleteList(7));
        assert_eq!(
            route(&Method::Post, "/lists/7/complete_all"),
            Route::CompleteAll(7)
        );
        assert_eq!(route(&Method::Post, "/lists/7/todos"), Route::CreateTodo(7));
        assert_eq!(
            route(&Method::Post, "/lists/7/todos/3"),
            Route::SetTodoStatus(7, 3)
        );
        assert_eq!(
            route(&Method::Post, "/lists/7/todos/3/delete"),
            Route::DeleteTodo(7, 3)
        );
    }

    #[test]
    fn non_numeric_ids_fall_through_to_not_found() {
        assert_eq!(route(&Method::Get, "/lists/abc"), Route::NotFound);
        assert_eq!(route(&Method::Post, "/lists/7/todos/x/delete"), Route::NotFound);
    }

    #[test]
    fn unknown_paths_and_methods_are_not_found() {
        assert_eq!(route(&Method::Get, "/nothing/here"), Route::NotFound);
        assert_eq!(route(&Method::Delete, "/lists/7"), Route::NotFound);
    }

    #[test]
    fn query_strings_are_ignored_for_routing() {
        assert_eq!(route(&Method::Get, "/lists?sort=name"), Route::ListIndex);
    }

    #[test]
    fn ajax_header_selects_ajax_format() {
        let ajax = Header::from_bytes("X-Requested-With", "XMLHttpRequest").unwrap();
        let other = Header::from_bytes("Accept", "text/html").unwrap();

        assert_eq!(response_format(&[other.clone()]), ResponseFormat::Html);
        assert_eq!(response_format(&[other, ajax]), ResponseFormat::Ajax);
    }
}
