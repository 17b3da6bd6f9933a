//! Drag gesture resolution.
//!
//! A gesture is one drag session: `drag_start`, then either `drag_cancel` or
//! `drag_end`. Only `drag_end` changes the form. It locates both ids, runs the
//! ordered [`RULES`] table (first match wins) to pick a [`Transition`], and
//! applies that transition to produce the next [`FormState`].
//!
//! Rules are grouped by what is being dragged: row rules come first, then
//! column rules, then field rules. A dragged row therefore never reaches a
//! column or field rule.
//!
//! # Example
//!
//! ```ignore
//! use slint_form_builder::{GestureResolver, SequentialIdGenerator};
//!
//! let mut resolver = GestureResolver::new();
//! let mut ids = SequentialIdGenerator::new();
//!
//! resolver.drag_start(&state, "available-3");
//! let outcome = resolver.drag_end(&state, "available-3", Some(column_id), &mut ids);
//! state = outcome.state;
//! ```

use log::{debug, trace, warn};

use crate::id::{parse_row_drop_zone, IdGenerator, AVAILABLE_DROP_ZONE_ID};
use crate::locate::{locate, Location};
use crate::model::FormState;
use crate::mutate;

/// The structural change a finished gesture resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do; the form stays as it is.
    NoOp,
    /// Move row `active_row_id` to the position of `over_row_id`.
    ReorderRows {
        active_row_id: String,
        over_row_id: String,
    },
    ReorderColumns {
        row_id: String,
        active_column_id: String,
        over_column_id: String,
    },
    /// Move a column into another row, after `after_column_id` or at the end.
    MoveColumn {
        column_id: String,
        source_row_id: String,
        target_row_id: String,
        after_column_id: Option<String>,
    },
    ReorderFields {
        row_id: String,
        column_id: String,
        active_field_id: String,
        over_field_id: String,
    },
    /// Take a placed field out of the form and give it back to the pool.
    ReturnToPool {
        field_id: String,
        row_id: String,
        column_id: String,
    },
    /// Relocate a placed field, keeping its id.
    MoveField {
        field_id: String,
        from_row_id: String,
        from_column_id: String,
        to_row_id: String,
        to_column_id: String,
        after_field_id: Option<String>,
    },
    /// Copy a pool field into a column under a new id and drop the original.
    PlaceFromPool {
        field_id: String,
        row_id: String,
        column_id: String,
        after_field_id: Option<String>,
    },
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        matches!(self, Transition::NoOp)
    }
}

/// A classification rule: `Some` when it claims the (active, over) pair.
pub type Rule = fn(&Location, &Location) -> Option<Transition>;

/// Gesture rules in evaluation order.
pub const RULES: &[(&str, Rule)] = &[
    ("reorder rows", reorder_rows_rule),
    ("column onto row drop zone", column_onto_row_drop_zone),
    ("reorder columns", reorder_columns_rule),
    ("column onto column in other row", column_onto_other_row_column),
    ("column onto field in other row", column_onto_other_row_field),
    ("reorder fields", reorder_fields_rule),
    ("field onto pool", field_onto_pool),
    ("field onto field in other column", field_onto_other_column_field),
    ("field onto other column", field_onto_other_column),
    ("pool field onto field", pool_field_onto_field),
    ("pool field onto column", pool_field_onto_column),
];

/// A dragged row goes to the index of whatever row `over` belongs to. Any
/// other drop of a row (its own row, the pool) is swallowed here so no later
/// rule sees a row.
fn reorder_rows_rule(active: &Location, over: &Location) -> Option<Transition> {
    let Location::Row { row, .. } = active else {
        return None;
    };
    match over.row_id() {
        Some(over_row_id) if over_row_id != row.id => Some(Transition::ReorderRows {
            active_row_id: row.id.clone(),
            over_row_id: over_row_id.to_string(),
        }),
        _ => Some(Transition::NoOp),
    }
}

fn column_onto_row_drop_zone(active: &Location, over: &Location) -> Option<Transition> {
    let Location::Column { column, row_id } = active else {
        return None;
    };
    let Location::Row { row: target, via_drop_zone: true } = over else {
        return None;
    };
    (target.id != *row_id).then(|| Transition::MoveColumn {
        column_id: column.id.clone(),
        source_row_id: row_id.clone(),
        target_row_id: target.id.clone(),
        after_column_id: None,
    })
}

fn reorder_columns_rule(active: &Location, over: &Location) -> Option<Transition> {
    let (
        Location::Column { column, row_id },
        Location::Column { column: over_column, row_id: over_row_id },
    ) = (active, over)
    else {
        return None;
    };
    (row_id == over_row_id).then(|| Transition::ReorderColumns {
        row_id: row_id.clone(),
        active_column_id: column.id.clone(),
        over_column_id: over_column.id.clone(),
    })
}

fn column_onto_other_row_column(active: &Location, over: &Location) -> Option<Transition> {
    let (
        Location::Column { column, row_id },
        Location::Column { column: over_column, row_id: over_row_id },
    ) = (active, over)
    else {
        return None;
    };
    (row_id != over_row_id).then(|| Transition::MoveColumn {
        column_id: column.id.clone(),
        source_row_id: row_id.clone(),
        target_row_id: over_row_id.clone(),
        after_column_id: Some(over_column.id.clone()),
    })
}

fn column_onto_other_row_field(active: &Location, over: &Location) -> Option<Transition> {
    let (
        Location::Column { column, row_id },
        Location::PlacedField { row_id: over_row_id, column_id: over_column_id, .. },
    ) = (active, over)
    else {
        return None;
    };
    (row_id != over_row_id).then(|| Transition::MoveColumn {
        column_id: column.id.clone(),
        source_row_id: row_id.clone(),
        target_row_id: over_row_id.clone(),
        after_column_id: Some(over_column_id.clone()),
    })
}

fn reorder_fields_rule(active: &Location, over: &Location) -> Option<Transition> {
    let (
        Location::PlacedField { field, row_id, column_id },
        Location::PlacedField { field: over_field, column_id: over_column_id, .. },
    ) = (active, over)
    else {
        return None;
    };
    (column_id == over_column_id).then(|| Transition::ReorderFields {
        row_id: row_id.clone(),
        column_id: column_id.clone(),
        active_field_id: field.id.clone(),
        over_field_id: over_field.id.clone(),
    })
}

fn field_onto_pool(active: &Location, over: &Location) -> Option<Transition> {
    let (Location::PlacedField { field, row_id, column_id }, Location::AvailableDropZone) = (active, over) else {
        return None;
    };
    Some(Transition::ReturnToPool {
        field_id: field.id.clone(),
        row_id: row_id.clone(),
        column_id: column_id.clone(),
    })
}

fn field_onto_other_column_field(active: &Location, over: &Location) -> Option<Transition> {
    let (
        Location::PlacedField { field, row_id, column_id },
        Location::PlacedField { field: over_field, row_id: over_row_id, column_id: over_column_id },
    ) = (active, over)
    else {
        return None;
    };
    (column_id != over_column_id).then(|| Transition::MoveField {
        field_id: field.id.clone(),
        from_row_id: row_id.clone(),
        from_column_id: column_id.clone(),
        to_row_id: over_row_id.clone(),
        to_column_id: over_column_id.clone(),
        after_field_id: Some(over_field.id.clone()),
    })
}

fn field_onto_other_column(active: &Location, over: &Location) -> Option<Transition> {
    let (
        Location::PlacedField { field, row_id, column_id },
        Location::Column { column: target, row_id: target_row_id },
    ) = (active, over)
    else {
        return None;
    };
    (target.id != *column_id).then(|| Transition::MoveField {
        field_id: field.id.clone(),
        from_row_id: row_id.clone(),
        from_column_id: column_id.clone(),
        to_row_id: target_row_id.clone(),
        to_column_id: target.id.clone(),
        after_field_id: None,
    })
}

fn pool_field_onto_field(active: &Location, over: &Location) -> Option<Transition> {
    let (
        Location::AvailableField { field, .. },
        Location::PlacedField { field: over_field, row_id, column_id },
    ) = (active, over)
    else {
        return None;
    };
    Some(Transition::PlaceFromPool {
        field_id: field.id.clone(),
        row_id: row_id.clone(),
        column_id: column_id.clone(),
        after_field_id: Some(over_field.id.clone()),
    })
}

fn pool_field_onto_column(active: &Location, over: &Location) -> Option<Transition> {
    let (Location::AvailableField { field, .. }, Location::Column { column, row_id }) = (active, over) else {
        return None;
    };
    Some(Transition::PlaceFromPool {
        field_id: field.id.clone(),
        row_id: row_id.clone(),
        column_id: column.id.clone(),
        after_field_id: None,
    })
}

/// Run the rule table over two located ids.
pub fn classify_locations(active: &Location, over: &Location) -> Transition {
    for (name, rule) in RULES {
        if let Some(transition) = rule(active, over) {
            debug!(
                "gesture {} -> {}: rule '{}' gives {:?}",
                active.kind(),
                over.kind(),
                name,
                transition
            );
            return transition;
        }
    }
    trace!("gesture {} -> {}: no rule matched", active.kind(), over.kind());
    Transition::NoOp
}

/// Decide what dropping `active_id` onto `over_id` does to `state`.
///
/// Dropping onto nothing, onto itself, or with an id that no longer resolves
/// is a no-op.
pub fn classify(state: &FormState, active_id: &str, over_id: Option<&str>) -> Transition {
    let Some(over_id) = over_id else {
        trace!("drop of {active_id} over no target");
        return Transition::NoOp;
    };
    if active_id == over_id {
        return Transition::NoOp;
    }
    let (Some(active), Some(over)) = (locate(state, active_id), locate(state, over_id)) else {
        trace!("stale gesture {active_id} -> {over_id}");
        return Transition::NoOp;
    };
    classify_locations(&active, &over)
}

/// Apply a transition, returning the next state. `NoOp` returns an equal copy.
pub fn apply(state: &FormState, transition: &Transition, ids: &mut dyn IdGenerator) -> FormState {
    let tree = &state.tree;
    let with_tree = |tree| FormState::new(tree, state.available.clone());

    match transition {
        Transition::NoOp => state.clone(),
        Transition::ReorderRows { active_row_id, over_row_id } => {
            with_tree(mutate::reorder_rows(tree, active_row_id, over_row_id))
        }
        Transition::ReorderColumns { row_id, active_column_id, over_column_id } => {
            with_tree(mutate::reorder_columns(tree, row_id, active_column_id, over_column_id))
        }
        Transition::MoveColumn { column_id, source_row_id, target_row_id, after_column_id } => {
            with_tree(mutate::move_column_between_rows(
                tree,
                source_row_id,
                target_row_id,
                column_id,
                after_column_id.as_deref(),
                ids,
            ))
        }
        Transition::ReorderFields { row_id, column_id, active_field_id, over_field_id } => {
            with_tree(mutate::reorder_fields(tree, row_id, column_id, active_field_id, over_field_id))
        }
        Transition::ReturnToPool { field_id, row_id, column_id } => {
            let (tree, taken) = mutate::take_field(tree, field_id, row_id, column_id);
            let Some(field) = taken else {
                return state.clone();
            };
            let mut available = state.available.clone();
            available.push(field.reminted(ids));
            FormState::new(tree, available)
        }
        Transition::MoveField {
            field_id,
            from_row_id,
            from_column_id,
            to_row_id,
            to_column_id,
            after_field_id,
        } => with_tree(mutate::move_field(
            tree,
            field_id,
            (from_row_id, from_column_id),
            (to_row_id, to_column_id),
            after_field_id.as_deref(),
        )),
        Transition::PlaceFromPool { field_id, row_id, column_id, after_field_id } => {
            mutate::place_from_pool(state, field_id, row_id, column_id, after_field_id.as_deref(), ids)
        }
    }
}

/// The item currently being dragged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveDrag {
    pub active_id: String,
    /// Snapshot of the dragged entity taken at drag start, for drag overlays.
    pub preview: Option<Location>,
}

impl ActiveDrag {
    /// Whether the row `row_id` should light up while hovering `over_id`:
    /// another row is being dragged over the row itself or its drop zone.
    pub fn highlights_row(&self, row_id: &str, over_id: Option<&str>) -> bool {
        let dragging_row = matches!(self.preview, Some(Location::Row { .. }));
        let over_this_row = over_id
            .map(|over| over == row_id || parse_row_drop_zone(over) == Some(row_id))
            .unwrap_or(false);
        dragging_row && self.active_id != row_id && over_this_row
    }

    /// Whether the available panel should light up while hovering `over_id`:
    /// only fields, never rows or columns, are returned to the pool.
    pub fn highlights_pool(&self, over_id: Option<&str>) -> bool {
        self.preview.as_ref().is_some_and(Location::is_field) && over_id == Some(AVAILABLE_DROP_ZONE_ID)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// What a finished gesture did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropOutcome {
    pub transition: Transition,
    pub state: FormState,
}

impl DropOutcome {
    pub fn changed(&self) -> bool {
        !self.transition.is_noop()
    }
}

/// Two-state machine (Idle / Dragging) driving gesture resolution.
#[derive(Clone, Debug, Default)]
pub struct GestureResolver {
    drag: DragState,
}

impl GestureResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// The active drag, if any.
    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.drag {
            DragState::Dragging(active) => Some(active),
            DragState::Idle => None,
        }
    }

    /// Enter Dragging, capturing `active_id` and a preview snapshot.
    pub fn drag_start(&mut self, state: &FormState, active_id: &str) {
        if let DragState::Dragging(previous) = &self.drag {
            warn!(
                "drag start for {active_id} while {} is still being dragged",
                previous.active_id
            );
        }
        let preview = locate(state, active_id);
        debug!(
            "drag start {active_id} ({})",
            preview.as_ref().map_or("unknown", Location::kind)
        );
        self.drag = DragState::Dragging(ActiveDrag {
            active_id: active_id.to_string(),
            preview,
        });
    }

    /// Back to Idle without touching the form.
    pub fn drag_cancel(&mut self) {
        if let DragState::Dragging(active) = &self.drag {
            debug!("drag cancelled for {}", active.active_id);
        }
        self.drag = DragState::Idle;
    }

    /// Finish the gesture: back to Idle, and the form after the drop.
    pub fn drag_end(
        &mut self,
        state: &FormState,
        active_id: &str,
        over_id: Option<&str>,
        ids: &mut dyn IdGenerator,
    ) -> DropOutcome {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => warn!("drag end for {active_id} without a matching drag start"),
            DragState::Dragging(active) if active.active_id != active_id => warn!(
                "drag end for {active_id} but {} was started",
                active.active_id
            ),
            DragState::Dragging(_) => {}
        }

        let transition = classify(state, active_id, over_id);
        let state = apply(state, &transition, ids);
        DropOutcome { transition, state }
    }
}
