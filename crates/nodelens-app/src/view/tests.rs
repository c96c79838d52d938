use super::*;

#[test]
fn cursor_stays_within_bounds_going_down() {
    let mut cursor = ListCursor::default();
    for _ in 0..10 {
        cursor.down(3);
    }
    assert_eq!(cursor.selected, Some(2));
}

#[test]
fn cursor_stays_within_bounds_going_up() {
    let mut cursor = ListCursor { selected: Some(2) };
    for _ in 0..10 {
        cursor.up();
    }
    assert_eq!(cursor.selected, Some(0));
}

#[test]
fn cursor_never_wraps() {
    let mut cursor = ListCursor { selected: Some(2) };
    assert!(!cursor.down(3));
    assert_eq!(cursor.selected, Some(2));

    let mut cursor = ListCursor { selected: Some(0) };
    assert!(!cursor.up());
    assert_eq!(cursor.selected, Some(0));
}

#[test]
fn empty_list_has_no_selection() {
    let mut cursor = ListCursor::default();
    assert!(!cursor.down(0));
    assert_eq!(cursor.selected, None);
    assert!(!cursor.up());
    assert_eq!(cursor.selected, None);
}

#[test]
fn clamp_refits_selection_to_shrunk_list() {
    let mut cursor = ListCursor { selected: Some(5) };
    cursor.clamp(3);
    assert_eq!(cursor.selected, Some(2));
    cursor.clamp(0);
    assert_eq!(cursor.selected, None);
}

#[test]
fn clamp_selects_first_item_when_data_arrives() {
    let mut cursor = ListCursor::default();
    cursor.clamp(4);
    assert_eq!(cursor.selected, Some(0));
}

#[test]
fn movement_reports_whether_selection_changed() {
    let mut cursor = ListCursor::default();
    assert!(cursor.down(3));
    assert!(cursor.down(3));
    assert!(cursor.up());
    assert!(!cursor.up());

    let mut bottom = ListCursor { selected: Some(2) };
    assert!(!bottom.down(3));
}

#[test]
fn pod_detail_snapshot_needs_no_fetch() {
    use nodelens_core::{PodPhase, PodSummary};
    use std::time::Duration;

    let pod = PodSummary {
        name: "web".into(),
        namespace: "shop".into(),
        node: Some("node-1".into()),
        phase: PodPhase::Running,
        age: Duration::from_secs(60),
        cpu_used: None,
        mem_used: None,
    };
    let detail = DetailView::pod(&pod, View::Main(MainView::empty()));
    assert!(!detail.loading);
    assert!(detail.request.is_none());
    assert_eq!(detail.title, "Pod: shop/web");
    assert_eq!(detail.cursor.selected, Some(0));
    assert!(detail.content.len() > 0);
}

#[test]
fn node_detail_starts_loading() {
    let detail = DetailView::nodes(
        "Nodes: worker".into(),
        DetailRequest::GroupNodes { group: "worker".into() },
        View::Main(MainView::empty()),
    );
    assert!(detail.loading);
    assert_eq!(detail.content.len(), 0);
}
