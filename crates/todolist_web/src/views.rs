//! Server-rendered HTML pages.
//!
//! # Responsibility
//! - Turn data contexts into full HTML documents.
//! - Escape every piece of interpolated user text.

use crate::session::FlashMessages;
use todolist_core::{is_list_complete, progress_label, ListSummary, TodoItem};

/// Escapes text for safe interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, flash: &FlashMessages, body: &str) -> String {
    let mut flash_html = String::new();
    if let Some(message) = &flash.error {
        flash_html.push_str(&format!(
            "<div class=\"flash error\">{}</div>\n",
            escape_html(message)
        ));
    }
    if let Some(message) = &flash.success {
        flash_html.push_str(&format!(
            "<div class=\"flash success\">{}</div>\n",
            escape_html(message)
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Todos</title>\n</head>\n<body>\n{flash_html}{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// List index page.
pub fn lists_page(lists: &[ListSummary], flash: &FlashMessages) -> String {
    let mut body = String::from("<h1>Todo Lists</h1>\n<ul class=\"lists\">\n");
    for list in lists {
        let class = if is_list_complete(list) {
            " class=\"complete\""
        } else {
            ""
        };
        body.push_str(&format!(
            "<li{class}><a href=\"/lists/{id}\">{name}</a> \
             <span class=\"count\">{progress}</span></li>\n",
            id = list.id,
            name = escape_html(&list.name),
            progress = progress_label(list),
        ));
    }
    body.push_str("</ul>\n<a href=\"/lists/new\">New List</a>");
    layout("All Lists", flash, &body)
}

/// Form for creating a new list; `value` preserves rejected input.
pub fn new_list_page(value: &str, flash: &FlashMessages) -> String {
    let body = format!(
        "<h1>New Todo List</h1>\n\
         <form action=\"/lists\" method=\"post\">\n\
         <label for=\"list_name\">Enter the name for your new list:</label>\n\
         <input type=\"text\" id=\"list_name\" name=\"list_name\" value=\"{value}\">\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <a href=\"/lists\">Cancel</a>",
        value = escape_html(value),
    );
    layout("New List", flash, &body)
}

/// Single list page with its items and item-level forms.
pub fn list_page(list: &ListSummary, todos: &[TodoItem], flash: &FlashMessages) -> String {
    let mut body = format!(
        "<h1>{name}</h1>\n\
         <a href=\"/lists\">All lists</a>\n\
         <a href=\"/lists/{id}/edit\">Edit List</a>\n\
         <form action=\"/lists/{id}/complete_all\" method=\"post\" class=\"complete_all\">\n\
         <button type=\"submit\">Complete All</button>\n\
         </form>\n\
         <ul class=\"todos\">\n",
        name = escape_html(&list.name),
        id = list.id,
    );

    for todo in todos {
        let class = if todo.completed {
            " class=\"complete\""
        } else {
            ""
        };
        body.push_str(&format!(
            "<li{class}>\n\
             <form action=\"/lists/{list_id}/todos/{todo_id}\" method=\"post\" class=\"check\">\n\
             <input type=\"hidden\" name=\"completed\" value=\"{next_status}\">\n\
             <button type=\"submit\">Complete</button>\n\
             </form>\n\
             <span>{name}</span>\n\
             <form action=\"/lists/{list_id}/todos/{todo_id}/delete\" method=\"post\" class=\"delete\">\n\
             <button type=\"submit\">Delete</button>\n\
             </form>\n\
             </li>\n",
            list_id = list.id,
            todo_id = todo.id,
            next_status = !todo.completed,
            name = escape_html(&todo.name),
        ));
    }

    body.push_str(&format!(
        "</ul>\n\
         <form action=\"/lists/{id}/todos\" method=\"post\">\n\
         <label for=\"todo\">Enter a new todo item:</label>\n\
         <input type=\"text\" id=\"todo\" name=\"todo\">\n\
         <button type=\"submit\">Add</button>\n\
         </form>",
        id = list.id,
    ));

    layout(&list.name, flash, &body)
}

/// Rename form for one list; `value` preserves rejected input.
pub fn edit_list_page(list: &ListSummary, value: &str, flash: &FlashMessages) -> String {
    let body = format!(
        "<h1>Editing '{name}'</h1>\n\
         <form action=\"/lists/{id}\" method=\"post\">\n\
         <label for=\"list_name\">Enter the new name for the list:</label>\n\
         <input type=\"text\" id=\"list_name\" name=\"list_name\" value=\"{value}\">\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <form action=\"/lists/{id}/delete\" method=\"post\">\n\
         <button type=\"submit\">Delete List</button>\n\
         </form>\n\
         <a href=\"/lists/{id}\">Cancel</a>",
        name = escape_html(&list.name),
        id = list.id,
        value = escape_html(value),
    );
    layout("Edit List", flash, &body)
}

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        &FlashMessages::default(),
        "<h1>Page not found</h1>\n<a href=\"/lists\">Back to all lists</a>",
    )
}

pub fn server_error_page() -> String {
    layout(
        "Error",
        &FlashMessages::default(),
        "<h1>Something went wrong</h1>\n<a href=\"/lists\">Back to all lists</a>",
    )
}

#[cfg(test)]
mod tests {
    use super::{escape_html, list_page, lists_page, new_list_page};
    use crate::session::FlashMessages;
    use todolist_core::{ListSummary, TodoItem};

    fn summary(id: i64, name: &str, total: u32, done: u32) -> ListSummary {
        ListSummary {
            id,
            name: name.to_string(),
            todos_count: total,
            todos_completed_count: done,
        }
    }

    #[test]
    fn user_text_is_escaped() {
        assert_eq!(
            escape_html("<b>\"a&b\"</b>"),
            "&lt;b&gt;&quot;a&amp;b&quot;&lt;/b&gt;"
        );

        let page = new_list_page("<script>", &FlashMessages::default());
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn complete_lists_get_the_complete_class_and_progress_label() {
        let lists = vec![summary(1, "done", 2, 2), summary(2, "open", 2, 1)];
        let page = lists_page(&lists, &FlashMessages::default());
        assert!(page.contains("<li class=\"complete\"><a href=\"/lists/1\">done</a>"));
        assert!(page.contains("<li><a href=\"/lists/2\">open</a>"));
        assert!(page.contains("2 / 2"));
        assert!(page.contains("1 / 2"));
    }

    #[test]
    fn flash_messages_are_rendered_in_the_layout() {
        let flash = FlashMessages {
            error: Some("List name must be unique.".to_string()),
            success: None,
        };
        let page = lists_page(&[], &flash);
        assert!(page.contains("class=\"flash error\""));
        assert!(page.contains("List name must be unique."));
    }

    #[test]
    fn todo_toggle_form_posts_the_inverted_status() {
        let list = summary(5, "sample", 1, 1);
        let todos = vec![TodoItem {
            id: 9,
            name: "done item".to_string(),
            completed: true,
        }];
        let page = list_page(&list, &todos, &FlashMessages::default());
        assert!(page.contains("action=\"/lists/5/todos/9\""));
        assert!(page.contains("name=\"completed\" value=\"false\""));
        assert!(page.contains("action=\"/lists/5/todos/9/delete\""));
    }
}
