//! High-level controller wiring a [`FormSession`] to a Slint window.
//!
//! The [`FormBuilderController`] owns the session, hands out ready-made
//! callbacks for the drag and button events of the UI, and keeps bound
//! `VecModel`s in sync with the form after every change.
//!
//! # Example
//!
//! ```ignore
//! use slint_form_builder::{FormBuilderController, FormBuilderConfig};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = FormBuilderController::new(&FormBuilderConfig::default());
//!
//!     // Models the UI renders from
//!     let available = Rc::new(VecModel::default());
//!     ctrl.bind_available_model(available.clone(), |f| FieldData {
//!         id: f.id.as_str().into(),
//!         name: f.name.as_str().into(),
//!     });
//!     window.set_available_fields(available.into());
//!
//!     let rows = Rc::new(VecModel::default());
//!     ctrl.bind_rows_model(rows.clone(), |row| RowData {
//!         id: row.id.as_str().into(),
//!         columns: columns_model(&row.columns, |c| ColumnData {
//!             id: c.id.as_str().into(),
//!             fields: fields_model(&c.fields, |f| f.name.as_str().into()),
//!         }),
//!     });
//!     window.set_rows(rows.into());
//!
//!     // Gesture events
//!     window.on_drag_started(ctrl.drag_started_callback());
//!     window.on_drag_over(ctrl.drag_over_callback());
//!     window.on_drag_ended(ctrl.drag_ended_callback());
//!     window.on_drag_cancelled(ctrl.drag_cancelled_callback());
//!
//!     // Buttons
//!     window.on_add_row(ctrl.add_row_callback());
//!     window.on_add_column(ctrl.add_column_callback());
//!     window.on_delete_row(ctrl.delete_row_callback());
//!     window.on_delete_column(ctrl.delete_column_callback());
//!     window.on_delete_field(ctrl.delete_field_callback());
//!
//!     window.on_row_highlighted(ctrl.row_highlighted_callback());
//!     window.run().unwrap();
//! }
//! ```

use crate::config::FormBuilderConfig;
use crate::gesture::Transition;
use crate::model::{Column, Field, FormState, Row};
use crate::session::FormSession;
use log::trace;
use slint::{Model, ModelRc, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Pushes the current form into one bound Slint model.
trait ModelSyncer {
    fn sync(&self, state: &FormState);
}

/// Projects the state into a list of `P` and mirrors it into a `VecModel`.
struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    project: F,
}

impl<P, F> ModelSyncer for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&FormState) -> Vec<P>,
{
    fn sync(&self, state: &FormState) {
        let items = (self.project)(state);
        let len = items.len();
        // Update existing rows or add new ones
        for (i, item) in items.into_iter().enumerate() {
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        // Remove excess rows
        while self.model.row_count() > len {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Build a Slint model of the fields of one column (or of the pool).
pub fn fields_model<P, F>(fields: &[Field], constructor: F) -> ModelRc<P>
where
    P: Clone + 'static,
    F: Fn(&Field) -> P,
{
    ModelRc::from(Rc::new(VecModel::from(
        fields.iter().map(constructor).collect::<Vec<_>>(),
    )))
}

/// Build a Slint model of the columns of one row.
pub fn columns_model<P, F>(columns: &[Column], constructor: F) -> ModelRc<P>
where
    P: Clone + 'static,
    F: Fn(&Column) -> P,
{
    ModelRc::from(Rc::new(VecModel::from(
        columns.iter().map(constructor).collect::<Vec<_>>(),
    )))
}

fn non_empty(id: &str) -> Option<&str> {
    (!id.is_empty()).then_some(id)
}

/// Controller that owns a form session and provides callback implementations.
///
/// Slint strings cannot be absent, so every callback taking a target id treats
/// an empty string as "no target".
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct FormBuilderController {
    session: Rc<RefCell<FormSession>>,
    over_id: Rc<RefCell<Option<String>>>,
    syncers: Rc<RefCell<Vec<Box<dyn ModelSyncer>>>>,
}

impl Default for FormBuilderController {
    fn default() -> Self {
        Self::new(&FormBuilderConfig::default())
    }
}

impl FormBuilderController {
    /// Create a controller with a fresh session seeded from `config`.
    pub fn new(config: &FormBuilderConfig) -> Self {
        Self::with_session(FormSession::new(config))
    }

    /// Create a controller around an existing session.
    pub fn with_session(session: FormSession) -> Self {
        Self {
            session: Rc::new(RefCell::new(session)),
            over_id: Rc::new(RefCell::new(None)),
            syncers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Get access to the underlying session.
    pub fn session(&self) -> Rc<RefCell<FormSession>> {
        self.session.clone()
    }

    /// Snapshot of the current form.
    pub fn state(&self) -> FormState {
        self.session.borrow().state().clone()
    }

    /// Id of the item being dragged (empty if none).
    pub fn dragged_id(&self) -> SharedString {
        self.session
            .borrow()
            .resolver()
            .active()
            .map(|a| SharedString::from(a.active_id.as_str()))
            .unwrap_or_default()
    }

    /// Id currently hovered during a drag (empty if none).
    pub fn over_id(&self) -> SharedString {
        self.over_id.borrow().as_deref().map(SharedString::from).unwrap_or_default()
    }

    // === Model binding ===

    /// Keep `model` filled with one `P` per available field.
    pub fn bind_available_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Field) -> P + 'static,
    {
        self.bind(model, move |state: &FormState| state.available.iter().map(&constructor).collect());
    }

    /// Keep `model` filled with one `P` per form row.
    pub fn bind_rows_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Row) -> P + 'static,
    {
        self.bind(model, move |state: &FormState| state.tree.rows.iter().map(&constructor).collect());
    }

    fn bind<P, F>(&self, model: Rc<VecModel<P>>, project: F)
    where
        P: Clone + 'static,
        F: Fn(&FormState) -> Vec<P> + 'static,
    {
        let syncer = ConcreteModelSyncer { model, project };
        syncer.sync(self.session.borrow().state());
        self.syncers.borrow_mut().push(Box::new(syncer));
    }

    /// Push the current form into every bound model.
    pub fn sync_models(&self) {
        let session = self.session.borrow();
        for syncer in self.syncers.borrow().iter() {
            syncer.sync(session.state());
        }
    }

    fn after_change(&self, changed: bool) -> bool {
        if changed {
            self.sync_models();
        }
        changed
    }

    // === Callback factories ===

    /// Returns a callback for `drag-started(active-id)`.
    pub fn drag_started_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |active_id| ctrl.handle_drag_started(&active_id)
    }

    /// Returns a callback for `drag-over(over-id)`.
    pub fn drag_over_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |over_id| ctrl.handle_drag_over(&over_id)
    }

    /// Returns a callback for `drag-ended(active-id, over-id)`.
    pub fn drag_ended_callback(&self) -> impl Fn(SharedString, SharedString) {
        let ctrl = self.clone();
        move |active_id, over_id| {
            ctrl.handle_drag_ended(&active_id, &over_id);
        }
    }

    /// Returns a callback for `drag-cancelled()`.
    pub fn drag_cancelled_callback(&self) -> impl Fn() {
        let ctrl = self.clone();
        move || ctrl.handle_drag_cancelled()
    }

    pub fn add_row_callback(&self) -> impl Fn() {
        let ctrl = self.clone();
        move || {
            ctrl.handle_add_row();
        }
    }

    pub fn add_column_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |row_id| {
            ctrl.handle_add_column(&row_id);
        }
    }

    pub fn delete_row_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |row_id| {
            ctrl.handle_delete_row(&row_id);
        }
    }

    pub fn delete_column_callback(&self) -> impl Fn(SharedString, SharedString) {
        let ctrl = self.clone();
        move |row_id, column_id| {
            ctrl.handle_delete_column(&row_id, &column_id);
        }
    }

    pub fn delete_field_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |field_id| {
            ctrl.handle_delete_field(&field_id);
        }
    }

    /// Returns a callback for a pure `row-highlighted(row-id) -> bool` function.
    pub fn row_highlighted_callback(&self) -> impl Fn(SharedString) -> bool {
        let ctrl = self.clone();
        move |row_id| ctrl.row_highlighted(&row_id)
    }

    /// Returns a callback for a pure `pool-highlighted() -> bool` function.
    pub fn pool_highlighted_callback(&self) -> impl Fn() -> bool {
        let ctrl = self.clone();
        move || ctrl.pool_highlighted()
    }

    // === Direct handlers ===

    pub fn handle_drag_started(&self, active_id: &str) {
        *self.over_id.borrow_mut() = None;
        self.session.borrow_mut().on_drag_start(active_id);
    }

    /// Track the hovered target. Only affects highlighting.
    pub fn handle_drag_over(&self, over_id: &str) {
        trace!("drag over '{over_id}'");
        *self.over_id.borrow_mut() = non_empty(over_id).map(str::to_string);
    }

    /// Finish the drag; returns the transition that was applied.
    pub fn handle_drag_ended(&self, active_id: &str, over_id: &str) -> Transition {
        *self.over_id.borrow_mut() = None;
        let transition = self
            .session
            .borrow_mut()
            .on_drag_end(active_id, non_empty(over_id));
        self.after_change(!transition.is_noop());
        transition
    }

    pub fn handle_drag_cancelled(&self) {
        *self.over_id.borrow_mut() = None;
        self.session.borrow_mut().on_drag_cancel();
    }

    pub fn handle_add_row(&self) -> bool {
        let changed = self.session.borrow_mut().add_row();
        self.after_change(changed)
    }

    pub fn handle_add_column(&self, row_id: &str) -> bool {
        let changed = self.session.borrow_mut().add_column(row_id);
        self.after_change(changed)
    }

    pub fn handle_delete_row(&self, row_id: &str) -> bool {
        let changed = self.session.borrow_mut().delete_row(row_id);
        self.after_change(changed)
    }

    pub fn handle_delete_column(&self, row_id: &str, column_id: &str) -> bool {
        let changed = self.session.borrow_mut().delete_column(row_id, column_id);
        self.after_change(changed)
    }

    pub fn handle_delete_field(&self, field_id: &str) -> bool {
        let changed = self.session.borrow_mut().delete_field(field_id);
        self.after_change(changed)
    }

    // === Highlighting ===

    /// True while another row is dragged over `row_id` or its drop zone.
    pub fn row_highlighted(&self, row_id: &str) -> bool {
        let over = self.over_id.borrow();
        self.session
            .borrow()
            .resolver()
            .active()
            .is_some_and(|active| active.highlights_row(row_id, over.as_deref()))
    }

    /// True while a field is dragged over the available panel.
    pub fn pool_highlighted(&self) -> bool {
        let over = self.over_id.borrow();
        self.session
            .borrow()
            .resolver()
            .active()
            .is_some_and(|active| active.highlights_pool(over.as_deref()))
    }
}
