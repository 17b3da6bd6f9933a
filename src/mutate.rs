//! Pure structural operations on the form.
//!
//! Every function takes the current value by reference and returns the new
//! one; the input is never touched. An operation whose path does not resolve
//! (stale ids from an outdated drag event, a column that is already gone)
//! returns an unchanged copy instead of failing.
//!
//! The row/column floors hold after every call: a tree always has a row, and
//! a row always has a column. Whenever an operation would break one of them a
//! fresh empty container is synthesized on the spot.

use log::trace;

use crate::id::IdGenerator;
use crate::model::{Column, Field, FormState, FormTree, Identified, Row};

/// Where and how [`insert_field`] places a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertOptions<'a> {
    /// Keep the incoming id (a move) instead of minting a new one (a copy).
    pub preserve_id: bool,
    /// Insert right after this field; appends when absent or not found.
    pub after_field_id: Option<&'a str>,
}

impl<'a> InsertOptions<'a> {
    /// Options for relocating an existing field.
    pub fn moved() -> Self {
        Self {
            preserve_id: true,
            after_field_id: None,
        }
    }

    /// Options for placing a copy of a pool field.
    pub fn copied() -> Self {
        Self::default()
    }

    pub fn after(mut self, field_id: &'a str) -> Self {
        self.after_field_id = Some(field_id);
        self
    }
}

fn column_mut<'t>(tree: &'t mut FormTree, row_id: &str, column_id: &str) -> Option<&'t mut Column> {
    tree.rows
        .iter_mut()
        .find(|r| r.id == row_id)?
        .columns
        .iter_mut()
        .find(|c| c.id == column_id)
}

fn row_mut<'t>(tree: &'t mut FormTree, row_id: &str) -> Option<&'t mut Row> {
    tree.rows.iter_mut().find(|r| r.id == row_id)
}

/// Refill a row that lost its last column.
fn backfill_row(row: &mut Row, ids: &mut dyn IdGenerator) {
    if row.columns.is_empty() {
        trace!("row {} emptied, synthesizing a column", row.id);
        row.columns.push(Column::empty(ids));
    }
}

/// Move the element at `from` to `to`, shifting everything in between by one.
///
/// Indices out of range leave the list unchanged.
pub fn move_item<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = list.to_vec();
    if from < out.len() && to < out.len() && from != to {
        let item = out.remove(from);
        out.insert(to, item);
    }
    out
}

/// Move the element `active_id` to the position currently held by `over_id`.
///
/// No-op when either id is missing or both sit at the same index.
pub fn reorder_within_list<T>(list: &[T], active_id: &str, over_id: &str) -> Vec<T>
where
    T: Identified + Clone,
{
    let from = list.iter().position(|item| item.id() == active_id);
    let to = list.iter().position(|item| item.id() == over_id);
    match (from, to) {
        (Some(from), Some(to)) if from != to => move_item(list, from, to),
        _ => list.to_vec(),
    }
}

/// Remove a placed field, returning the new tree and the removed field.
pub fn take_field(
    tree: &FormTree,
    field_id: &str,
    row_id: &str,
    column_id: &str,
) -> (FormTree, Option<Field>) {
    let mut next = tree.clone();
    let taken = column_mut(&mut next, row_id, column_id).and_then(|col| {
        let index = col.field_index(field_id)?;
        Some(col.fields.remove(index))
    });
    (next, taken)
}

/// Remove a placed field. Unchanged if the row/column/field path is stale.
pub fn remove_field(tree: &FormTree, field_id: &str, row_id: &str, column_id: &str) -> FormTree {
    take_field(tree, field_id, row_id, column_id).0
}

/// Insert `field` into a column.
///
/// With `preserve_id` unset the inserted copy gets a fresh id. Unchanged if the
/// column cannot be found.
pub fn insert_field(
    tree: &FormTree,
    field: &Field,
    row_id: &str,
    column_id: &str,
    options: InsertOptions<'_>,
    ids: &mut dyn IdGenerator,
) -> FormTree {
    let mut next = tree.clone();
    let Some(col) = column_mut(&mut next, row_id, column_id) else {
        trace!("insert_field: column {column_id} not found in row {row_id}");
        return next;
    };

    let to_insert = if options.preserve_id {
        field.clone()
    } else {
        field.reminted(ids)
    };

    let anchor = options.after_field_id.and_then(|after| col.field_index(after));
    match anchor {
        Some(index) => col.fields.insert(index + 1, to_insert),
        None => col.fields.push(to_insert),
    }
    next
}

/// Move a placed field to another column, keeping its id.
///
/// The move only happens when both the source field and the target column
/// resolve, so a stale target never drops the field.
pub fn move_field(
    tree: &FormTree,
    field_id: &str,
    from: (&str, &str),
    to: (&str, &str),
    after_field_id: Option<&str>,
) -> FormTree {
    if tree.row(to.0).and_then(|r| r.column(to.1)).is_none() {
        trace!("move_field: target column {} not found", to.1);
        return tree.clone();
    }
    let (without, taken) = take_field(tree, field_id, from.0, from.1);
    let Some(field) = taken else {
        return tree.clone();
    };

    let mut options = InsertOptions::moved();
    options.after_field_id = after_field_id;
    // Ids are preserved, so the generator is never consulted.
    let mut no_ids = String::new;
    insert_field(&without, &field, to.0, to.1, options, &mut no_ids)
}

/// Reorder fields inside one column.
pub fn reorder_fields(
    tree: &FormTree,
    row_id: &str,
    column_id: &str,
    active_id: &str,
    over_id: &str,
) -> FormTree {
    let mut next = tree.clone();
    if let Some(col) = column_mut(&mut next, row_id, column_id) {
        col.fields = reorder_within_list(&col.fields, active_id, over_id);
    }
    next
}

/// Reorder columns inside one row.
pub fn reorder_columns(tree: &FormTree, row_id: &str, active_id: &str, over_id: &str) -> FormTree {
    let mut next = tree.clone();
    if let Some(row) = row_mut(&mut next, row_id) {
        row.columns = reorder_within_list(&row.columns, active_id, over_id);
    }
    next
}

/// Move row `active_id` to the index currently held by `over_id`.
pub fn reorder_rows(tree: &FormTree, active_id: &str, over_id: &str) -> FormTree {
    FormTree {
        rows: reorder_within_list(&tree.rows, active_id, over_id),
    }
}

/// Move a column from one row to another.
///
/// The column lands right after `after_column_id` when that is found in the
/// target row, otherwise at the end. The source row gets a fresh empty column
/// if the move emptied it. Nothing changes unless the column is in the source
/// row and the target row exists; moving within a single row is left to
/// [`reorder_columns`].
pub fn move_column_between_rows(
    tree: &FormTree,
    source_row_id: &str,
    target_row_id: &str,
    column_id: &str,
    after_column_id: Option<&str>,
    ids: &mut dyn IdGenerator,
) -> FormTree {
    if source_row_id == target_row_id || tree.row(target_row_id).is_none() {
        return tree.clone();
    }

    let mut next = tree.clone();
    let Some(source) = row_mut(&mut next, source_row_id) else {
        return tree.clone();
    };
    let Some(index) = source.column_index(column_id) else {
        trace!("move_column: column {column_id} not in row {source_row_id}");
        return tree.clone();
    };
    let column = source.columns.remove(index);
    backfill_row(source, ids);

    if let Some(target) = row_mut(&mut next, target_row_id) {
        let at = after_column_id
            .and_then(|after| target.column_index(after))
            .map_or(target.columns.len(), |i| i + 1);
        target.columns.insert(at, column);
    }
    next
}

/// Append a new row holding one empty column.
pub fn add_row(tree: &FormTree, ids: &mut dyn IdGenerator) -> FormTree {
    let mut next = tree.clone();
    next.rows.push(Row::empty(ids));
    next
}

/// Append an empty column to a row.
pub fn add_column(tree: &FormTree, row_id: &str, ids: &mut dyn IdGenerator) -> FormTree {
    let mut next = tree.clone();
    if let Some(row) = row_mut(&mut next, row_id) {
        row.columns.push(Column::empty(ids));
    }
    next
}

fn release_fields(available: &mut Vec<Field>, fields: Vec<Field>, ids: &mut dyn IdGenerator) {
    available.extend(fields.iter().map(|f| f.reminted(ids)));
}

/// Delete a column; its fields go back to the pool under new ids.
///
/// Deleting the last column of a row replaces it with a fresh empty one.
pub fn delete_column(
    state: &FormState,
    row_id: &str,
    column_id: &str,
    ids: &mut dyn IdGenerator,
) -> FormState {
    let mut next = state.clone();
    let Some(row) = row_mut(&mut next.tree, row_id) else {
        return next;
    };
    let Some(index) = row.column_index(column_id) else {
        return next;
    };
    let column = row.columns.remove(index);
    backfill_row(row, ids);
    release_fields(&mut next.available, column.fields, ids);
    next
}

/// Delete a row; every field in it goes back to the pool under a new id.
///
/// Deleting the last row resets the tree to one fresh row with one empty
/// column.
pub fn delete_row(state: &FormState, row_id: &str, ids: &mut dyn IdGenerator) -> FormState {
    let mut next = state.clone();
    let Some(index) = next.tree.row_index(row_id) else {
        return next;
    };
    let row = next.tree.rows.remove(index);
    for column in row.columns {
        release_fields(&mut next.available, column.fields, ids);
    }
    if next.tree.rows.is_empty() {
        trace!("last row deleted, resetting tree");
        next.tree = FormTree::new(ids);
    }
    next
}

/// Take a placed field out of the form and append it to the pool under a
/// new id.
pub fn return_field_to_pool(state: &FormState, field_id: &str, ids: &mut dyn IdGenerator) -> FormState {
    let path = state
        .tree
        .placed_fields()
        .find(|(_, _, f)| f.id == field_id)
        .map(|(row, col, _)| (row.id.clone(), col.id.clone()));
    let Some((row_id, column_id)) = path else {
        return state.clone();
    };

    let (tree, taken) = take_field(&state.tree, field_id, &row_id, &column_id);
    let mut available = state.available.clone();
    if let Some(field) = taken {
        available.push(field.reminted(ids));
    }
    FormState::new(tree, available)
}

/// Place a copy of a pool field into a column and drop the original from the
/// pool. Nothing changes if either the pool field or the column is missing.
pub fn place_from_pool(
    state: &FormState,
    field_id: &str,
    row_id: &str,
    column_id: &str,
    after_field_id: Option<&str>,
    ids: &mut dyn IdGenerator,
) -> FormState {
    let Some(index) = state.available.iter().position(|f| f.id == field_id) else {
        return state.clone();
    };
    if state.tree.row(row_id).and_then(|r| r.column(column_id)).is_none() {
        return state.clone();
    }

    let mut options = InsertOptions::copied();
    options.after_field_id = after_field_id;
    let tree = insert_field(&state.tree, &state.available[index], row_id, column_id, options, ids);

    let mut available = state.available.clone();
    available.remove(index);
    FormState::new(tree, available)
}
