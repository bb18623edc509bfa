use std::sync::Arc;
use std::time::Duration;
use swiftkey::actions::{DispatchBinaries, RecordingNotifier};
use swiftkey::config::{ConfigService, MenuItem};
use swiftkey::navigation::{NavContext, NavKeyPress, NavSignal};
use swiftkey::session::Session;
use tempfile::tempdir;

fn stub_binaries() -> DispatchBinaries {
    DispatchBinaries {
        opener: "true".to_string(),
        shortcuts: "true".to_string(),
        shell: "sh".to_string(),
    }
}

fn session_with(items: Vec<MenuItem>, state_root: &std::path::Path) -> Session {
    let mut session = Session::new(
        NavContext::default(),
        stub_binaries(),
        Arc::new(RecordingNotifier::default()),
        state_root.to_path_buf(),
    );
    session.install_root(Arc::new(items));
    session
}

#[test]
fn session_flow_batch_dispatch_does_not_block_further_keystrokes() {
    let temp = tempdir().expect("tempdir");
    let mut batch = MenuItem::with_submenu(
        "g",
        "Group",
        vec![
            MenuItem::with_action("1", "Slowish", "shell://sleep 0.2; echo one"),
            MenuItem::with_action("2", "Quick", "shell://echo two"),
        ],
    );
    batch.batch = Some(true);
    let other = MenuItem::with_submenu(
        "o",
        "Other",
        vec![MenuItem::with_action("x", "X", "shell://echo x")],
    );
    let mut session = session_with(vec![batch, other], temp.path());

    let signal = session.handle_key(NavKeyPress::key('g')).expect("batch");
    assert_eq!(signal, NavSignal::ActionExecuted);

    // The next keystroke is handled immediately, before the batch finishes.
    let signal = session.handle_key(NavKeyPress::key('o')).expect("navigate");
    assert_eq!(signal, NavSignal::SubmenuPushed("Other".to_string()));
}

#[test]
fn session_flow_escape_resets_and_invalidates_pending_dynamics() {
    let temp = tempdir().expect("tempdir");
    let mut session = session_with(
        vec![MenuItem::with_action(
            "d",
            "Dyn",
            "dynamic://sleep 0.2; printf -- '- key: x\\n  title: Late\\n  action: shell://echo x\\n'",
        )],
        temp.path(),
    );

    assert_eq!(
        session.handle_key(NavKeyPress::key('d')).expect("start"),
        NavSignal::Loading
    );
    // Escape: the caller resets the session while resolution is in flight.
    assert_eq!(
        session.handle_key(NavKeyPress::escape()).expect("escape"),
        NavSignal::Escape
    );
    session.reset();

    assert_eq!(session.wait_event(Duration::from_secs(5)), None);
    assert!(session.breadcrumbs().is_empty());
}

#[test]
fn session_flow_config_reload_resets_navigation() {
    let temp = tempdir().expect("tempdir");
    let menu_path = temp.path().join("menu.yaml");
    std::fs::write(
        &menu_path,
        "- key: a\n  title: Apps\n  submenu:\n    - key: b\n      title: B\n      action: shell://echo b\n",
    )
    .expect("write menu");

    let (mut service, err) = ConfigService::start(menu_path.clone());
    assert!(err.is_none());
    let events = service.subscribe();

    let mut session = session_with(Vec::new(), temp.path());
    session.install_root(service.items());
    session.handle_key(NavKeyPress::key('a')).expect("descend");
    assert_eq!(session.breadcrumbs().len(), 1);

    std::fs::write(
        &menu_path,
        "- key: z\n  title: Replaced\n  action: shell://echo z\n",
    )
    .expect("rewrite menu");
    let bumped = std::fs::File::open(&menu_path)
        .and_then(|f| f.set_modified(std::time::SystemTime::now()));
    assert!(bumped.is_ok());
    service.poll_reload().expect("reload");

    // The config-changed message forces a full navigation reset.
    if let Ok(swiftkey::config::ConfigEvent::Reloaded(items)) = events.try_recv() {
        session.install_root(items);
    }
    assert!(session.breadcrumbs().is_empty());
    let visible = session.visible_items().expect("items");
    assert_eq!(visible[0].title, "Replaced");
}

#[test]
fn session_flow_hidden_items_are_listed_out_but_still_selectable() {
    let temp = tempdir().expect("tempdir");
    let mut hidden = MenuItem::with_action("h", "Hidden", "shell://echo hidden");
    hidden.hidden = Some(true);
    let visible = MenuItem::with_action("v", "Visible", "shell://echo visible");
    let mut session = session_with(vec![visible, hidden], temp.path());

    let listed = session.visible_items().expect("listing");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Visible");

    let signal = session.handle_key(NavKeyPress::key('h')).expect("hidden key");
    assert_eq!(signal, NavSignal::ActionExecuted);
}
