//! Backend-specific tests for the session-backed store.

use todolist_core::{SessionLists, SessionStore, TodoStore};

#[test]
fn serde_roundtrip_preserves_lists_and_id_counters() {
    let mut data = SessionLists::default();
    {
        let mut store = SessionStore::new(&mut data);
        let list_id = store.create_list("travel").unwrap();
        store.create_todo(list_id, "book flights").unwrap();
        let dropped = store.create_todo(list_id, "cancel me").unwrap();
        store.delete_todo(list_id, dropped).unwrap();
    }

    let json = serde_json::to_string(&data).unwrap();
    let mut restored: SessionLists = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, data);

    // Counters travel with the payload: new ids keep increasing past the
    // deleted one.
    let mut store = SessionStore::new(&mut restored);
    let list_id = store.all_lists().unwrap()[0].id;
    let next = store.create_todo(list_id, "pack bags").unwrap();
    assert_eq!(next, 3);
}

#[test]
fn separate_sessions_do_not_share_lists() {
    let mut first = SessionLists::default();
    let mut second = SessionLists::default();

    SessionStore::new(&mut first).create_list("mine").unwrap();

    let store = SessionStore::new(&mut second);
    assert!(store.all_lists().unwrap().is_empty());
}

#[test]
fn load_todos_on_missing_list_is_empty_not_an_error() {
    let mut data = SessionLists::default();
    let store = SessionStore::new(&mut data);
    assert!(store.load_todos(7).unwrap().is_empty());
}
