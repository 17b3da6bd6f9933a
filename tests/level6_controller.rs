//! Level 6: Controller wiring tests
//!
//! Tests the Slint-facing side: drag-over tracking, highlighting, callback
//! factories, cancel handling and clones sharing one session.

mod common;

use common::harness::FormTestHarness;
use slint_form_builder::{row_drop_zone_id, AVAILABLE_DROP_ZONE_ID};

#[test]
fn test_drag_over_tracks_target() {
    let harness = FormTestHarness::with_fields(&["A"]);
    let column_id = harness.column_id(0, 0);

    harness.ctrl.handle_drag_started("available-0");
    assert_eq!(harness.ctrl.dragged_id(), "available-0");

    (harness.ctrl.drag_over_callback())(column_id.as_str().into());
    assert_eq!(harness.ctrl.over_id(), column_id.as_str());

    (harness.ctrl.drag_over_callback())("".into());
    assert!(harness.ctrl.over_id().is_empty());
}

#[test]
fn test_row_highlight_while_dragging_row() {
    let harness = FormTestHarness::with_fields(&[]);
    harness.add_row();
    let first = harness.row_id(0);
    let second = harness.row_id(1);

    harness.ctrl.handle_drag_started(&first);
    harness.ctrl.handle_drag_over(&second);
    assert!(harness.ctrl.row_highlighted(&second));
    assert!(!harness.ctrl.row_highlighted(&first));

    harness.ctrl.handle_drag_over(&row_drop_zone_id(&second));
    assert!((harness.ctrl.row_highlighted_callback())(second.as_str().into()));

    harness.ctrl.handle_drag_over(&first);
    assert!(!harness.ctrl.row_highlighted(&first));
}

#[test]
fn test_row_highlight_ignores_non_row_drags() {
    let harness = FormTestHarness::with_fields(&[]);
    harness.add_row();
    let second = harness.row_id(1);

    harness.ctrl.handle_drag_started(&harness.column_id(0, 0));
    harness.ctrl.handle_drag_over(&row_drop_zone_id(&second));

    assert!(!harness.ctrl.row_highlighted(&second));
}

#[test]
fn test_pool_highlight_only_for_fields() {
    let harness = FormTestHarness::with_fields(&["A", "B"]);
    let a = harness.place("A", 0, 0);

    harness.ctrl.handle_drag_started(&a);
    harness.ctrl.handle_drag_over(AVAILABLE_DROP_ZONE_ID);
    assert!(harness.ctrl.pool_highlighted());
    assert!((harness.ctrl.pool_highlighted_callback())());
    harness.ctrl.handle_drag_cancelled();
    assert!(!harness.ctrl.pool_highlighted());

    harness.ctrl.handle_drag_started(&harness.row_id(0));
    harness.ctrl.handle_drag_over(AVAILABLE_DROP_ZONE_ID);
    assert!(!harness.ctrl.pool_highlighted());
}

#[test]
fn test_cancel_clears_drag_and_keeps_state() {
    let harness = FormTestHarness::with_fields(&["A"]);
    let before = harness.state();

    harness.ctrl.handle_drag_over(&harness.column_id(0, 0));
    harness.drag_cancelled("available-0");

    assert_eq!(harness.state(), before);
    assert!(harness.ctrl.dragged_id().is_empty());
    assert!(harness.ctrl.over_id().is_empty());
    assert_eq!(*harness.tracker.drag_cancelled.borrow(), 1);
    assert_eq!(harness.rendered_pool(), vec!["A"]);
}

#[test]
fn test_drag_end_clears_drag() {
    let harness = FormTestHarness::with_fields(&["A"]);
    let column_id = harness.column_id(0, 0);

    harness.ctrl.handle_drag_started("available-0");
    harness.ctrl.handle_drag_over(&column_id);
    (harness.ctrl.drag_ended_callback())("available-0".into(), column_id.as_str().into());

    assert!(harness.ctrl.dragged_id().is_empty());
    assert!(harness.ctrl.over_id().is_empty());
    assert_eq!(harness.rendered_grid(), vec![vec![vec!["A"]]]);
}

#[test]
fn test_drag_end_without_start_still_resolves() {
    let harness = FormTestHarness::with_fields(&["A"]);
    let column_id = harness.column_id(0, 0);

    let transition = harness.ctrl.handle_drag_ended("available-0", &column_id);

    assert!(!transition.is_noop());
    assert_eq!(harness.state().tree.field_count(), 1);
}

#[test]
fn test_add_column_callback() {
    let harness = FormTestHarness::with_fields(&[]);
    let row_id = harness.row_id(0);

    (harness.ctrl.add_column_callback())(row_id.as_str().into());

    assert_eq!(harness.rendered_grid()[0].len(), 2);
}

#[test]
fn test_clones_share_session() {
    let harness = FormTestHarness::with_fields(&["A"]);
    let other = harness.ctrl.clone();

    assert!(other.handle_add_row());

    assert_eq!(harness.state().tree.rows.len(), 2);
    assert_eq!(harness.rendered_grid().len(), 2);
}

#[test]
fn test_building_a_form() {
    let harness = FormTestHarness::with_fields(&["Brand", "Brand Location", "Horn Status", "POIS"]);
    let first_row = harness.row_id(0);
    harness.add_column(&first_row);
    harness.add_row();

    harness.place("Brand", 0, 0);
    harness.place("Brand Location", 0, 1);
    let horn = harness.place("Horn Status", 1, 0);
    let pois = harness.place("POIS", 1, 0);

    harness.drag(&pois, &horn);
    harness.drag(&harness.row_id(1), &harness.row_id(0));

    assert_eq!(
        harness.rendered_grid(),
        vec![
            vec![vec!["POIS", "Horn Status"]],
            vec![vec!["Brand"], vec!["Brand Location"]],
        ]
    );
    assert!(harness.rendered_pool().is_empty());
    assert!(harness.state().validate().is_ok());
    assert_eq!(harness.tracker.drag_ended.borrow().len(), 6);
}
