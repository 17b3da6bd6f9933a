//! Resolve an id coming from the UI to the entity it names.
//!
//! Drag events only carry ids. [`locate`] turns such an id into a
//! [`Location`]: what kind of thing it is, where it lives, and a copy of its
//! data at the time of the lookup.

use crate::id::{parse_row_drop_zone, AVAILABLE_DROP_ZONE_ID};
use crate::model::{Column, Field, FormState, Row};

/// Result of resolving an id against a [`FormState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// A field waiting in the available pool.
    AvailableField { field: Field, index: usize },
    /// A field placed in the form.
    PlacedField {
        field: Field,
        row_id: String,
        column_id: String,
    },
    Column { column: Column, row_id: String },
    /// A row, addressed either by its own id or by its `row-<id>` drop zone.
    Row { row: Row, via_drop_zone: bool },
    /// The available fields panel itself.
    AvailableDropZone,
}

impl Location {
    /// Id of the located entity. The drop-zone alias of a row reports the row
    /// id; the pool panel reports its fixed id.
    pub fn id(&self) -> &str {
        match self {
            Location::AvailableField { field, .. } | Location::PlacedField { field, .. } => &field.id,
            Location::Column { column, .. } => &column.id,
            Location::Row { row, .. } => &row.id,
            Location::AvailableDropZone => AVAILABLE_DROP_ZONE_ID,
        }
    }

    /// Row this location belongs to, directly or through column/field
    /// ownership. `None` for anything in the available pool.
    pub fn row_id(&self) -> Option<&str> {
        match self {
            Location::Row { row, .. } => Some(&row.id),
            Location::Column { row_id, .. } | Location::PlacedField { row_id, .. } => Some(row_id),
            Location::AvailableField { .. } | Location::AvailableDropZone => None,
        }
    }

    /// Column this location belongs to, if it is a column or a placed field.
    pub fn column_id(&self) -> Option<&str> {
        match self {
            Location::Column { column, .. } => Some(&column.id),
            Location::PlacedField { column_id, .. } => Some(column_id),
            _ => None,
        }
    }

    pub fn is_row(&self) -> bool {
        matches!(self, Location::Row { .. })
    }

    pub fn is_row_drop_zone(&self) -> bool {
        matches!(self, Location::Row { via_drop_zone: true, .. })
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Location::Column { .. })
    }

    /// True for both placed and available fields.
    pub fn is_field(&self) -> bool {
        matches!(
            self,
            Location::PlacedField { .. } | Location::AvailableField { .. }
        )
    }

    /// Short label for log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Location::AvailableField { .. } => "available field",
            Location::PlacedField { .. } => "placed field",
            Location::Column { .. } => "column",
            Location::Row { via_drop_zone: false, .. } => "row",
            Location::Row { via_drop_zone: true, .. } => "row drop zone",
            Location::AvailableDropZone => "available drop zone",
        }
    }
}

/// Find what `id` refers to in `state`.
///
/// Rows are checked first, then columns, placed fields and pool fields. The
/// derived drop-zone ids are only considered when nothing carries `id` as its
/// own identifier.
pub fn locate(state: &FormState, id: &str) -> Option<Location> {
    let tree = &state.tree;

    if let Some(row) = tree.row(id) {
        return Some(Location::Row {
            row: row.clone(),
            via_drop_zone: false,
        });
    }

    for row in &tree.rows {
        if let Some(column) = row.column(id) {
            return Some(Location::Column {
                column: column.clone(),
                row_id: row.id.clone(),
            });
        }
    }

    if let Some((row, column, field)) = tree.placed_fields().find(|(_, _, f)| f.id == id) {
        return Some(Location::PlacedField {
            field: field.clone(),
            row_id: row.id.clone(),
            column_id: column.id.clone(),
        });
    }

    if let Some(index) = state.available.iter().position(|f| f.id == id) {
        return Some(Location::AvailableField {
            field: state.available[index].clone(),
            index,
        });
    }

    if let Some(row) = parse_row_drop_zone(id).and_then(|row_id| tree.row(row_id)) {
        return Some(Location::Row {
            row: row.clone(),
            via_drop_zone: true,
        });
    }

    if id == AVAILABLE_DROP_ZONE_ID {
        return Some(Location::AvailableDropZone);
    }

    None
}
