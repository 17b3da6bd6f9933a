//! Level 7: Scalability tests
//!
//! Tests that larger forms keep working: many rows, many columns and the full
//! default pool placed and shuffled around.

mod common;

use common::harness::FormTestHarness;

#[test]
fn test_many_rows() {
    let harness = FormTestHarness::with_fields(&[]);
    for _ in 0..100 {
        assert!(harness.add_row());
    }

    assert_eq!(harness.state().tree.rows.len(), 101);
    assert_eq!(harness.rendered_grid().len(), 101);
    assert!(harness.state().validate().is_ok());
}

#[test]
fn test_whole_default_pool_placed_and_returned() {
    let harness = FormTestHarness::new();
    let names: Vec<String> = harness.state().available.iter().map(|f| f.name.clone()).collect();
    for _ in 0..4 {
        harness.add_row();
    }

    let mut placed = Vec::new();
    for (i, name) in names.iter().enumerate() {
        placed.push(harness.place(name, i % 5, 0));
    }
    assert!(harness.rendered_pool().is_empty());
    assert_eq!(harness.state().tree.field_count(), names.len());

    for id in &placed {
        harness.drag_to_pool(id);
    }
    assert_eq!(harness.rendered_pool(), names);
    assert!(harness.state().validate().is_ok());
}

#[test]
fn test_wide_row() {
    let harness = FormTestHarness::with_fields(&["A"]);
    let row_id = harness.row_id(0);
    for _ in 0..30 {
        harness.add_column(&row_id);
    }
    let a = harness.place("A", 0, 0);

    for column in 1..31 {
        harness.drag(&a, &harness.column_id(0, column));
        assert_eq!(harness.field_id(0, column, 0), a);
    }
    assert_eq!(harness.state().tree.field_count(), 1);
}

#[test]
fn test_rows_shuffled_repeatedly() {
    let harness = FormTestHarness::with_fields(&[]);
    for _ in 0..20 {
        harness.add_row();
    }
    let mut expected: Vec<String> = harness.state().tree.rows.iter().map(|r| r.id.clone()).collect();

    for _ in 0..20 {
        let last = harness.row_id(20);
        harness.drag(&last, &harness.row_id(0));
        let moved = expected.pop().expect("rows");
        expected.insert(0, moved);
    }

    let ids: Vec<String> = harness.state().tree.rows.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, expected);
}
