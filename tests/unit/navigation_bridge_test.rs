mod recording_host;

use minibrowser::managers::tab_manager::{TabManager, TabManagerTrait};
use minibrowser::services::navigation_bridge::{NavigationBridge, ViewHandle, ViewSize};
use recording_host::{HostOp, RecordingHost};
use serde_json::json;

fn setup() -> (TabManager, NavigationBridge, RecordingHost) {
    let store = TabManager::new();
    let bridge = NavigationBridge::new(ViewSize::for_window(1280, 800, 100));
    (store, bridge, RecordingHost::new())
}

#[test]
fn test_blank_tab_shows_placeholder() {
    let (store, mut bridge, mut host) = setup();
    bridge.sync(&store, &mut host).unwrap();
    assert_eq!(host.last_shown(), Some(None));
    assert_eq!(bridge.view_count(), 0);
    assert_eq!(bridge.listening_view(), None);
}

#[test]
fn test_navigate_loads_normalized_target_and_attaches_listener() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "example.com").unwrap();

    let tab = store.get_active_tab().unwrap();
    assert_eq!(tab.url, "example.com");

    let view = bridge.view_for(&tab.id).unwrap();
    assert_eq!(
        host.ops[0],
        HostOp::Create(view, ViewSize { width: 1280, height: 700 })
    );
    assert_eq!(host.loads(), vec![(view, "https://example.com".to_string())]);
    assert_eq!(host.last_shown(), Some(Some(view)));
    assert_eq!(bridge.listening_view(), Some(view));
}

#[test]
fn test_navigate_keeps_secure_urls() {
    let (mut store, mut bridge, mut host) = setup();
    bridge
        .navigate(&mut store, &mut host, "https://example.com")
        .unwrap();
    assert_eq!(host.loads()[0].1, "https://example.com");
}

#[test]
fn test_navigate_twice_reuses_view() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    bridge.navigate(&mut store, &mut host, "b.com").unwrap();

    let loads = host.loads();
    assert_eq!(loads.len(), 2);
    assert_eq!(loads[0].0, loads[1].0);
    assert_eq!(loads[1].1, "https://b.com");
    assert_eq!(bridge.view_count(), 1);
}

#[test]
fn test_navigate_to_empty_text_shows_placeholder() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "example.com").unwrap();
    bridge.navigate(&mut store, &mut host, "").unwrap();

    assert_eq!(host.loads().len(), 1);
    assert_eq!(host.last_shown(), Some(None));
    assert_eq!(bridge.listening_view(), None);
}

#[test]
fn test_address_text_is_stored_without_loading() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.set_address_text(&mut store, "exam").unwrap();
    assert_eq!(store.get_active_tab().unwrap().url, "exam");
    assert!(host.ops.is_empty());
}

#[test]
fn test_sync_loads_tab_that_has_url_but_no_view() {
    let (mut store, mut bridge, mut host) = setup();
    let first = store.active_tab_id().to_string();
    bridge.set_address_text(&mut store, "example.com").unwrap();
    store.create_tab();
    bridge.sync(&store, &mut host).unwrap();
    assert!(host.loads().is_empty());

    store.select_tab(&first).unwrap();
    bridge.sync(&store, &mut host).unwrap();
    let view = bridge.view_for(&first).unwrap();
    assert_eq!(host.loads(), vec![(view, "https://example.com".to_string())]);
}

#[test]
fn test_title_notification_updates_bound_tab() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "example.com").unwrap();
    let view = bridge.listening_view().unwrap();

    let changed = bridge
        .on_title_notification(&mut store, view, &json!({"title": "Foo"}))
        .unwrap();
    assert!(changed);
    assert_eq!(store.get_active_tab().unwrap().title.as_deref(), Some("Foo"));

    bridge
        .on_title_notification(&mut store, view, &json!({"detail": {"title": "Bar"}}))
        .unwrap();
    assert_eq!(store.get_active_tab().unwrap().title.as_deref(), Some("Bar"));

    bridge
        .on_title_notification(
            &mut store,
            view,
            &json!({"title": "Direct", "detail": {"title": "Nested"}}),
        )
        .unwrap();
    assert_eq!(store.get_active_tab().unwrap().title.as_deref(), Some("Direct"));
}

#[test]
fn test_title_notification_without_title_is_ignored() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "example.com").unwrap();
    let view = bridge.listening_view().unwrap();

    let changed = bridge
        .on_title_notification(&mut store, view, &json!({"url": "https://example.com"}))
        .unwrap();
    assert!(!changed);
    assert!(store.get_active_tab().unwrap().title.is_none());
}

#[test]
fn test_switching_tabs_detaches_previous_listener() {
    let (mut store, mut bridge, mut host) = setup();
    let first = store.active_tab_id().to_string();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    let first_view = bridge.view_for(&first).unwrap();

    let second = store.create_tab();
    bridge.sync(&store, &mut host).unwrap();
    bridge.navigate(&mut store, &mut host, "b.com").unwrap();
    let second_view = bridge.view_for(&second).unwrap();

    assert_eq!(bridge.listening_view(), Some(second_view));
    assert_eq!(bridge.listeners().attached_count(), 1);

    // A late title from the first view must not land anywhere.
    let changed = bridge
        .on_title_notification(&mut store, first_view, &json!({"title": "Stale"}))
        .unwrap();
    assert!(!changed);
    assert!(store.get_tab(&first).unwrap().title.is_none());
    assert!(store.get_tab(&second).unwrap().title.is_none());

    // Switch back: only the first view is heard now.
    store.select_tab(&first).unwrap();
    bridge.sync(&store, &mut host).unwrap();
    assert_eq!(bridge.listening_view(), Some(first_view));
    assert_eq!(bridge.listeners().attached_count(), 1);

    bridge
        .on_title_notification(&mut store, second_view, &json!({"title": "Stale B"}))
        .unwrap();
    bridge
        .on_title_notification(&mut store, first_view, &json!({"title": "A"}))
        .unwrap();
    assert_eq!(store.get_tab(&first).unwrap().title.as_deref(), Some("A"));
    assert!(store.get_tab(&second).unwrap().title.is_none());
}

#[test]
fn test_switching_to_blank_tab_releases_listener() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    store.create_tab();
    bridge.sync(&store, &mut host).unwrap();

    assert_eq!(bridge.listening_view(), None);
    assert_eq!(bridge.listeners().attached_count(), 0);
    assert_eq!(host.last_shown(), Some(None));
}

#[test]
fn test_closing_tab_destroys_its_view() {
    let (mut store, mut bridge, mut host) = setup();
    let first = store.active_tab_id().to_string();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    let first_view = bridge.view_for(&first).unwrap();

    store.create_tab();
    bridge.sync(&store, &mut host).unwrap();
    store.close_tab(&first).unwrap();
    bridge.sync(&store, &mut host).unwrap();

    assert_eq!(host.destroyed(), vec![first_view]);
    assert!(bridge.view_for(&first).is_none());
    assert_eq!(bridge.listeners().bound_tab(first_view), None);
}

#[test]
fn test_closing_active_loaded_tab_rebinds_to_next() {
    let (mut store, mut bridge, mut host) = setup();
    let first = store.active_tab_id().to_string();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    let second = store.create_tab();
    bridge.sync(&store, &mut host).unwrap();
    bridge.navigate(&mut store, &mut host, "b.com").unwrap();

    store.select_tab(&first).unwrap();
    bridge.sync(&store, &mut host).unwrap();
    store.close_tab(&first).unwrap();
    bridge.sync(&store, &mut host).unwrap();

    let second_view = bridge.view_for(&second).unwrap();
    assert_eq!(store.active_tab_id(), second);
    assert_eq!(bridge.listening_view(), Some(second_view));
    assert_eq!(host.last_shown(), Some(Some(second_view)));
}

#[test]
fn test_teardown_releases_everything() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    let view = bridge.listening_view().unwrap();

    bridge.teardown(&mut host);

    assert_eq!(bridge.listening_view(), None);
    assert_eq!(bridge.listeners().attached_count(), 0);
    assert_eq!(bridge.view_count(), 0);
    assert_eq!(host.destroyed(), vec![view]);
    assert!(!bridge
        .on_title_notification(&mut store, view, &json!({"title": "Late"}))
        .unwrap());
}

#[test]
fn test_resize_recomputes_view_size() {
    let (_, mut bridge, mut host) = setup();
    bridge.resize(&mut host, 1024, 600, 100).unwrap();
    assert_eq!(bridge.size(), ViewSize { width: 1024, height: 500 });
    assert_eq!(
        host.ops,
        vec![HostOp::Resize(ViewSize { width: 1024, height: 500 })]
    );
}

#[test]
fn test_failed_load_is_reported() {
    let (mut store, mut bridge, mut host) = setup();
    host.fail_loads = true;
    assert!(bridge.navigate(&mut store, &mut host, "a.com").is_err());
    // The text was still stored on the tab.
    assert_eq!(store.get_active_tab().unwrap().url, "a.com");
}

#[test]
fn test_failed_load_releases_view_and_retries_on_sync() {
    let (mut store, mut bridge, mut host) = setup();
    let tab = store.active_tab_id().to_string();
    host.fail_loads = true;
    assert!(bridge.navigate(&mut store, &mut host, "b.com").is_err());

    assert_eq!(bridge.view_for(&tab), None);
    assert_eq!(host.destroyed(), vec![ViewHandle(1)]);
    assert_eq!(host.last_shown(), Some(None));
    assert_eq!(bridge.listening_view(), None);

    host.fail_loads = false;
    bridge.sync(&store, &mut host).unwrap();
    let view = bridge.view_for(&tab).unwrap();
    assert_eq!(host.loads(), vec![(view, "https://b.com".to_string())]);
    assert_eq!(host.last_shown(), Some(Some(view)));
    assert_eq!(bridge.listening_view(), Some(view));
}

#[test]
fn test_failed_reload_of_loaded_tab_falls_back_to_placeholder() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    let view = bridge.listening_view().unwrap();

    host.fail_loads = true;
    assert!(bridge.navigate(&mut store, &mut host, "b.com").is_err());

    assert_eq!(bridge.view_count(), 0);
    assert_eq!(host.destroyed(), vec![view]);
    assert_eq!(host.last_shown(), Some(None));
    assert_eq!(bridge.listeners().attached_count(), 0);
}

#[test]
fn test_sync_reports_failed_load_after_showing_placeholder() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.set_address_text(&mut store, "a.com").unwrap();
    host.fail_loads = true;

    assert!(bridge.sync(&store, &mut host).is_err());
    assert_eq!(bridge.view_count(), 0);
    assert_eq!(host.last_shown(), Some(None));
}

#[test]
fn test_dropping_bridge_detaches_listener() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    let listeners = bridge.listeners().clone();
    assert_eq!(listeners.attached_count(), 1);

    drop(bridge);
    assert_eq!(listeners.attached_count(), 0);
}

#[test]
fn test_view_handles_are_distinct() {
    let (mut store, mut bridge, mut host) = setup();
    bridge.navigate(&mut store, &mut host, "a.com").unwrap();
    store.create_tab();
    bridge.navigate(&mut store, &mut host, "b.com").unwrap();
    let handles: Vec<ViewHandle> = store
        .get_all_tabs()
        .iter()
        .filter_map(|t| bridge.view_for(&t.id))
        .collect();
    assert_eq!(handles.len(), 2);
    assert_ne!(handles[0], handles[1]);
}
