//! Form layout data: fields placed in columns, columns in rows, plus the pool of
//! fields not yet placed.
//!
//! All types are plain values. Mutations in [`crate::mutate`] take a reference
//! and return a new value, so a host can compare the old and new state to decide
//! whether anything needs re-rendering.

use std::collections::HashSet;

use crate::error::FormError;
use crate::id::{available_seed_id, parse_row_drop_zone, IdGenerator, AVAILABLE_DROP_ZONE_ID};

/// Anything addressable by an id inside the form.
pub trait Identified {
    fn id(&self) -> &str;
}

/// A named input placed in a column or waiting in the available pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub id: String,
    pub name: String,
    pub field_type: String,
}

impl Field {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Copy of this field under a freshly minted id.
    pub fn reminted(&self, ids: &mut dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            ..self.clone()
        }
    }
}

impl Identified for Field {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    pub fields: Vec<Field>,
}

impl Column {
    pub fn empty(ids: &mut dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            fields: Vec::new(),
        }
    }

    pub fn field_index(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field_id)
    }
}

impl Identified for Column {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub columns: Vec<Column>,
}

impl Row {
    /// A new row holding a single empty column.
    pub fn empty(ids: &mut dyn IdGenerator) -> Self {
        let id = ids.next_id();
        Self {
            id,
            columns: vec![Column::empty(ids)],
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }
}

impl Identified for Row {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The grid of rows. Always holds at least one row, each with at least one
/// column, as long as it is only changed through [`crate::mutate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormTree {
    pub rows: Vec<Row>,
}

impl FormTree {
    /// A tree with one row holding one empty column.
    pub fn new(ids: &mut dyn IdGenerator) -> Self {
        Self {
            rows: vec![Row::empty(ids)],
        }
    }

    pub fn row(&self, row_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == row_id)
    }

    pub fn row_index(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == row_id)
    }

    /// Row owning the given column.
    pub fn row_of_column(&self, column_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.column(column_id).is_some())
    }

    /// Every placed field with its row and column id, in layout order.
    pub fn placed_fields(&self) -> impl Iterator<Item = (&Row, &Column, &Field)> + '_ {
        self.rows.iter().flat_map(|row| {
            row.columns
                .iter()
                .flat_map(move |col| col.fields.iter().map(move |f| (row, col, f)))
        })
    }

    pub fn field_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| &r.columns)
            .map(|c| c.fields.len())
            .sum()
    }
}

/// Everything the UI renders: the form grid and the available pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub tree: FormTree,
    pub available: Vec<Field>,
}

impl FormState {
    pub fn new(tree: FormTree, available: Vec<Field>) -> Self {
        Self { tree, available }
    }

    /// An empty grid with the given names in the pool as `available-<index>`.
    pub fn with_seed_fields<I, S>(names: I, field_type: &str, ids: &mut dyn IdGenerator) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let available = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Field::new(available_seed_id(index), name, field_type))
            .collect();
        Self {
            tree: FormTree::new(ids),
            available,
        }
    }

    /// Placed plus available fields.
    pub fn field_count(&self) -> usize {
        self.tree.field_count() + self.available.len()
    }

    /// Check the structural invariants, returning the first violation.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.tree.rows.is_empty() {
            return Err(FormError::NoRows);
        }

        let mut seen = HashSet::new();
        let mut claim = |id: &str| -> Result<(), FormError> {
            if id == AVAILABLE_DROP_ZONE_ID || parse_row_drop_zone(id).is_some() {
                return Err(FormError::ReservedId { id: id.to_string() });
            }
            if !seen.insert(id.to_string()) {
                return Err(FormError::DuplicateId { id: id.to_string() });
            }
            Ok(())
        };

        for row in &self.tree.rows {
            if row.columns.is_empty() {
                return Err(FormError::EmptyRow { row_id: row.id.clone() });
            }
            claim(&row.id)?;
            for column in &row.columns {
                claim(&column.id)?;
                for field in &column.fields {
                    claim(&field.id)?;
                }
            }
        }
        for field in &self.available {
            claim(&field.id)?;
        }
        Ok(())
    }
}
