use gpui_dnd_core::{DragEvent, DragMsg, DragState, initial_state, reorder, update};

type Trace = (DragState<&'static str>, Vec<DragEvent<&'static str>>);

fn run(msgs: Vec<DragMsg<&'static str>>) -> Trace {
    let mut state = initial_state();
    let mut events = Vec::new();
    for msg in msgs {
        let (next, event) = update(msg, state);
        state = next;
        events.extend(event);
    }
    (state, events)
}

#[test]
fn start_then_stop_returns_to_rest_and_reports_both_events() {
    let (state, events) = run(vec![DragMsg::StartDragging("a"), DragMsg::StopDragging]);

    assert_eq!(state, initial_state());
    assert_eq!(state.dragging_id(), None);
    assert!(!state.mouse_over_ignored());
    assert_eq!(events, vec![DragEvent::DragStarted("a"), DragEvent::DragEnded]);
}

#[test]
fn attempted_drag_over_ignored_region_is_reported_but_never_drags() {
    let (state, events) = run(vec![
        DragMsg::MouseOverIgnored(true),
        DragMsg::StartDragging("x"),
    ]);

    assert_eq!(state.dragging_id(), None);
    assert!(state.mouse_over_ignored());
    assert_eq!(events, vec![DragEvent::DragStarted("x")]);

    let (state, _) = update(DragMsg::MouseOverIgnored(false), state);
    let (state, _) = update(DragMsg::StartDragging("x"), state);
    assert_eq!(state.dragging_id(), Some(&"x"));
}

#[test]
fn enters_along_the_pointer_path_accumulate() {
    let (state, _) = run(vec![DragMsg::StartDragging("d")]);
    let dragged = state.dragging_id().copied();

    let mut list = vec!["a", "b", "c", "d"];
    for target in ["c", "d", "b", "a"] {
        list = reorder(list, |s| *s, dragged.as_ref(), &target);
    }
    assert_eq!(list, vec!["d", "a", "b", "c"]);

    let (state, events) = update(DragMsg::StopDragging, state);
    assert!(!state.is_dragging());
    assert_eq!(events, Some(DragEvent::DragEnded));
}

#[test]
fn enter_order_changes_the_outcome() {
    let dragged = Some("a");
    let forward = ["c", "d"]
        .into_iter()
        .fold(vec!["a", "b", "c", "d"], |list, t| reorder(list, |s| *s, dragged.as_ref(), &t));
    let backward = ["d", "c"]
        .into_iter()
        .fold(vec!["a", "b", "c", "d"], |list, t| reorder(list, |s| *s, dragged.as_ref(), &t));

    assert_eq!(forward, vec!["b", "c", "a", "d"]);
    assert_eq!(backward, vec!["b", "a", "c", "d"]);
}

#[test]
fn state_and_events_serialize_for_host_snapshots() {
    let (state, event) = update(DragMsg::StartDragging("a"), initial_state());

    assert_eq!(
        serde_json::to_value(&state).unwrap(),
        serde_json::json!({ "dragging_id": "a", "mouse_over_ignored": false })
    );
    assert_eq!(
        serde_json::to_value(event).unwrap(),
        serde_json::json!({ "DragStarted": "a" })
    );
    assert_eq!(
        serde_json::to_value(DragEvent::<&str>::DragEnded).unwrap(),
        serde_json::json!("DragEnded")
    );

    let restored: DragState<String> = serde_json::from_value(serde_json::json!({
        "dragging_id": null,
        "mouse_over_ignored": true,
    }))
    .unwrap();
    assert!(restored.mouse_over_ignored());
    assert!(!restored.is_dragging());
}
