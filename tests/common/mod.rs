//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::cell::RefCell;
use std::rc::Rc;

use slint_form_builder::Transition;

/// Tracks callback invocations for testing.
///
/// Each field records calls to the corresponding callback with their arguments.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// (active_id,)
    pub drag_started: Rc<RefCell<Vec<String>>>,
    /// (active_id, over_id, resulting transition)
    pub drag_ended: Rc<RefCell<Vec<(String, String, Transition)>>>,
    /// Count of drag_cancelled calls
    pub drag_cancelled: Rc<RefCell<usize>>,
    /// Count of button presses that changed the form
    pub buttons_changed: Rc<RefCell<usize>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.drag_started.borrow_mut().clear();
        self.drag_ended.borrow_mut().clear();
        *self.drag_cancelled.borrow_mut() = 0;
        *self.buttons_changed.borrow_mut() = 0;
    }

    /// Transition produced by the most recent drag end.
    pub fn last_transition(&self) -> Option<Transition> {
        self.drag_ended.borrow().last().map(|(_, _, t)| t.clone())
    }
}
