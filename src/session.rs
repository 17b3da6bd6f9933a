//! The owner of a form being edited.
//!
//! [`FormSession`] holds the current [`FormState`], the gesture resolver and
//! the id generator. UI code talks to the session only: it forwards drag events
//! and button presses, and reads the state back to render it. Every handler
//! returns `true` when the state actually changed.

use log::debug;

use crate::config::FormBuilderConfig;
use crate::gesture::{DropOutcome, GestureResolver, Transition};
use crate::id::{IdGenerator, TimestampIdGenerator};
use crate::model::FormState;
use crate::mutate;

pub struct FormSession {
    state: FormState,
    resolver: GestureResolver,
    ids: Box<dyn IdGenerator>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(&FormBuilderConfig::default())
    }
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("state", &self.state)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl FormSession {
    /// A session seeded from `config`, minting ids with [`TimestampIdGenerator`].
    pub fn new(config: &FormBuilderConfig) -> Self {
        Self::with_id_generator(config, TimestampIdGenerator::new())
    }

    pub fn with_id_generator(config: &FormBuilderConfig, ids: impl IdGenerator + 'static) -> Self {
        let mut ids: Box<dyn IdGenerator> = Box::new(ids);
        let state = FormState::with_seed_fields(
            config.available_fields.iter().cloned(),
            &config.default_field_type,
            ids.as_mut(),
        );
        Self::from_state(state, ids)
    }

    /// Resume editing an existing state.
    pub fn from_state(state: FormState, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            state,
            resolver: GestureResolver::new(),
            ids,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn resolver(&self) -> &GestureResolver {
        &self.resolver
    }

    fn replace(&mut self, next: FormState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }

    // === Gesture events ===

    pub fn on_drag_start(&mut self, active_id: &str) {
        self.resolver.drag_start(&self.state, active_id);
    }

    pub fn on_drag_cancel(&mut self) {
        self.resolver.drag_cancel();
    }

    /// Finish a drag and adopt the resulting state.
    pub fn on_drag_end(&mut self, active_id: &str, over_id: Option<&str>) -> Transition {
        let DropOutcome { transition, state } =
            self.resolver
                .drag_end(&self.state, active_id, over_id, self.ids.as_mut());
        self.replace(state);
        transition
    }

    // === Buttons ===

    pub fn add_row(&mut self) -> bool {
        debug!("add row");
        let tree = mutate::add_row(&self.state.tree, self.ids.as_mut());
        let next = FormState::new(tree, self.state.available.clone());
        self.replace(next)
    }

    pub fn add_column(&mut self, row_id: &str) -> bool {
        debug!("add column to row {row_id}");
        let tree = mutate::add_column(&self.state.tree, row_id, self.ids.as_mut());
        let next = FormState::new(tree, self.state.available.clone());
        self.replace(next)
    }

    pub fn delete_row(&mut self, row_id: &str) -> bool {
        debug!("delete row {row_id}");
        let next = mutate::delete_row(&self.state, row_id, self.ids.as_mut());
        self.replace(next)
    }

    pub fn delete_column(&mut self, row_id: &str, column_id: &str) -> bool {
        debug!("delete column {column_id} from row {row_id}");
        let next = mutate::delete_column(&self.state, row_id, column_id, self.ids.as_mut());
        self.replace(next)
    }

    /// The delete button on a placed field: send it back to the pool.
    pub fn delete_field(&mut self, field_id: &str) -> bool {
        debug!("return field {field_id} to pool");
        let next = mutate::return_field_to_pool(&self.state, field_id, self.ids.as_mut());
        self.replace(next)
    }
}
