//! Test harness for a form builder wired the way a Slint window would wire it.
//!
//! Instead of a compiled window the harness binds plain `VecModel`s and drives
//! the controller through the same callbacks a UI would invoke.

#![allow(dead_code)]

use super::CallbackTracker;
use slint::{Model, SharedString, VecModel};
use slint_form_builder::{
    FormBuilderConfig, FormBuilderController, FormSession, FormState, SequentialIdGenerator,
    AVAILABLE_DROP_ZONE_ID, row_drop_zone_id,
};
use std::rc::Rc;

/// What the harness renders for one row: its id and the field names per column.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedRow {
    pub id: SharedString,
    pub columns: Vec<(SharedString, Vec<SharedString>)>,
}

pub struct FormTestHarness {
    pub ctrl: FormBuilderController,
    pub available: Rc<VecModel<SharedString>>,
    pub rows: Rc<VecModel<RenderedRow>>,
    pub tracker: CallbackTracker,
}

impl FormTestHarness {
    /// A harness whose pool holds the given field names.
    pub fn with_fields(names: &[&str]) -> Self {
        let session = FormSession::with_id_generator(
            &FormBuilderConfig::with_fields(names.iter().copied()),
            SequentialIdGenerator::new(),
        );
        Self::with_session(session)
    }

    /// A harness around the default configuration (27 seed fields).
    pub fn new() -> Self {
        Self::with_session(FormSession::with_id_generator(
            &FormBuilderConfig::default(),
            SequentialIdGenerator::new(),
        ))
    }

    pub fn with_session(session: FormSession) -> Self {
        let ctrl = FormBuilderController::with_session(session);
        let tracker = CallbackTracker::new();

        let available = Rc::new(VecModel::default());
        ctrl.bind_available_model(available.clone(), |f| SharedString::from(f.name.as_str()));

        let rows = Rc::new(VecModel::default());
        ctrl.bind_rows_model(rows.clone(), |row| RenderedRow {
            id: row.id.as_str().into(),
            columns: row
                .columns
                .iter()
                .map(|c| {
                    (
                        SharedString::from(c.id.as_str()),
                        c.fields.iter().map(|f| SharedString::from(f.name.as_str())).collect(),
                    )
                })
                .collect(),
        });

        Self { ctrl, available, rows, tracker }
    }

    pub fn state(&self) -> FormState {
        self.ctrl.state()
    }

    // === Simulated gestures ===

    /// Full drag: start on `active`, end over `over` (empty string for no target).
    pub fn drag(&self, active: &str, over: &str) {
        (self.ctrl.drag_started_callback())(active.into());
        self.tracker.drag_started.borrow_mut().push(active.to_string());
        let transition = self.ctrl.handle_drag_ended(active, over);
        self.tracker
            .drag_ended
            .borrow_mut()
            .push((active.to_string(), over.to_string(), transition));
    }

    pub fn drag_cancelled(&self, active: &str) {
        self.ctrl.handle_drag_started(active);
        (self.ctrl.drag_cancelled_callback())();
        *self.tracker.drag_cancelled.borrow_mut() += 1;
    }

    pub fn drag_to_pool(&self, active: &str) {
        self.drag(active, AVAILABLE_DROP_ZONE_ID);
    }

    pub fn drag_to_row(&self, active: &str, row_id: &str) {
        self.drag(active, &row_drop_zone_id(row_id));
    }

    pub fn add_row(&self) -> bool {
        let changed = self.ctrl.handle_add_row();
        if changed {
            *self.tracker.buttons_changed.borrow_mut() += 1;
        }
        changed
    }

    pub fn add_column(&self, row_id: &str) -> bool {
        let changed = self.ctrl.handle_add_column(row_id);
        if changed {
            *self.tracker.buttons_changed.borrow_mut() += 1;
        }
        changed
    }

    // === Lookups ===

    pub fn row_id(&self, index: usize) -> String {
        self.state().tree.rows[index].id.clone()
    }

    pub fn column_id(&self, row: usize, column: usize) -> String {
        self.state().tree.rows[row].columns[column].id.clone()
    }

    pub fn field_id(&self, row: usize, column: usize, field: usize) -> String {
        self.state().tree.rows[row].columns[column].fields[field].id.clone()
    }

    /// Id of the pool field with the given name.
    pub fn pool_id(&self, name: &str) -> String {
        self.state()
            .available
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.id.clone())
            .unwrap_or_else(|| panic!("{name} not in pool"))
    }

    /// Place the named pool field at the end of a column.
    pub fn place(&self, name: &str, row: usize, column: usize) -> String {
        let pool_id = self.pool_id(name);
        let column_id = self.column_id(row, column);
        self.drag(&pool_id, &column_id);
        let state = self.state();
        state.tree.rows[row].columns[column]
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.id.clone())
            .unwrap_or_else(|| panic!("{name} was not placed"))
    }

    // === Rendered model views ===

    pub fn rendered_pool(&self) -> Vec<String> {
        (0..self.available.row_count())
            .filter_map(|i| self.available.row_data(i))
            .map(|s| s.to_string())
            .collect()
    }

    /// Field names per column per row, as the bound rows model shows them.
    pub fn rendered_grid(&self) -> Vec<Vec<Vec<String>>> {
        (0..self.rows.row_count())
            .filter_map(|i| self.rows.row_data(i))
            .map(|row| {
                row.columns
                    .iter()
                    .map(|(_, fields)| fields.iter().map(|f| f.to_string()).collect())
                    .collect()
            })
            .collect()
    }
}
