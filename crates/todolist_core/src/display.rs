//! Completion aggregation helpers used by list/item rendering.
//!
//! # Responsibility
//! - Decide when a list counts as complete.
//! - Order lists and items for display: pending first, done last.
//!
//! # Invariants
//! - A list with zero items is never complete.
//! - `order_for_display` is a stable partition; relative order inside each
//!   half is preserved.

use crate::model::list::ListSummary;

/// True iff the list has items and every one of them is completed.
pub fn is_list_complete(list: &ListSummary) -> bool {
    list.todos_count > 0 && list.todos_completed_count == list.todos_count
}

/// Progress label in the form `"completed / total"`.
pub fn progress_label(list: &ListSummary) -> String {
    format!("{} / {}", list.todos_completed_count, list.todos_count)
}

/// Stable-partitions rows into pending-then-done order.
pub fn order_for_display<T>(rows: Vec<T>, is_done: impl Fn(&T) -> bool) -> Vec<T> {
    let (done, pending): (Vec<T>, Vec<T>) = rows.into_iter().partition(|row| is_done(row));
    let mut ordered = pending;
    ordered.extend(done);
    ordered
}

#[cfg(test)]
mod tests {
    use super::{is_list_complete, order_for_display, progress_label};
    use crate::model::list::{ListSummary, TodoItem};

    fn summary(todos_count: u32, todos_completed_count: u32) -> ListSummary {
        ListSummary {
            id: 1,
            name: "sample".to_string(),
            todos_count,
            todos_completed_count,
        }
    }

    #[test]
    fn empty_list_is_never_complete() {
        assert!(!is_list_complete(&summary(0, 0)));
    }

    #[test]
    fn list_is_complete_only_when_counts_match() {
        assert!(is_list_complete(&summary(3, 3)));
        assert!(!is_list_complete(&summary(3, 2)));
    }

    #[test]
    fn progress_label_shows_completed_over_total() {
        assert_eq!(progress_label(&summary(5, 2)), "2 / 5");
    }

    #[test]
    fn ordering_moves_done_rows_last_and_keeps_relative_order() {
        let items = vec![
            done_item(1, "A"),
            pending_item(2, "B"),
            done_item(3, "C"),
            pending_item(4, "D"),
        ];

        let ordered = order_for_display(items, |todo| todo.completed);
        let names: Vec<&str> = ordered.iter().map(|todo| todo.name.as_str()).collect();
        assert_eq!(names, ["B", "D", "A", "C"]);
    }

    #[test]
    fn ordering_applies_to_lists_by_completeness() {
        let lists = vec![
            ListSummary {
                id: 1,
                name: "done".to_string(),
                todos_count: 2,
                todos_completed_count: 2,
            },
            ListSummary {
                id: 2,
                name: "open".to_string(),
                todos_count: 2,
                todos_completed_count: 1,
            },
        ];

        let ordered = order_for_display(lists, is_list_complete);
        assert_eq!(ordered[0].name, "open");
        assert_eq!(ordered[1].name, "done");
    }

    fn done_item(id: i64, name: &str) -> TodoItem {
        TodoItem {
            id,
            name: name.to_string(),
            completed: true,
        }
    }

    fn pending_item(id: i64, name: &str) -> TodoItem {
        TodoItem::new(id, name)
    }
}
