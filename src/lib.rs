//! # Slint Form Builder Library
//!
//! A drag-and-drop form layout engine for Slint applications. Users arrange
//! named fields into a grid of rows and columns, pulling them from a panel of
//! available fields and dragging rows, columns and fields around.
//!
//! ## Features
//!
//! - **Gesture Resolution** - One ordered rule table decides what a drop means
//! - **Pure Mutations** - Every structural change returns a new state
//! - **Structural Invariants** - Always one row, always one column per row
//! - **Stable Identity** - Moves keep ids; copies into and out of the pool mint new ones
//! - **Slint Glue** - Callback factories and auto-synced `VecModel`s
//!
//! ## Core Pieces
//!
//! - [`FormState`] - The form grid plus the pool of available fields
//! - [`locate()`] - Resolve a drag id to a row, column, field or drop zone
//! - [`mutate`] - Pure structural operations
//! - [`GestureResolver`] - Idle/Dragging state machine and the drop rules
//! - [`FormSession`] - Owner of the state for one editor
//! - [`FormBuilderController`] - Slint callbacks and model syncing
//!
//! ## Drop-zone ids
//!
//! Besides the ids of rows, columns and fields, the UI uses two derived ids as
//! drop targets: `row-<rowId>` (drop a column into that row) and
//! [`AVAILABLE_DROP_ZONE_ID`] (give a field back to the pool).

pub mod id;
pub mod error;
pub mod model;
pub mod locate;
pub mod mutate;
pub mod gesture;
pub mod config;
pub mod session;
pub mod controller;

// Re-export types and functions
pub use id::{
    available_seed_id, row_drop_zone_id, IdGenerator, SequentialIdGenerator,
    TimestampIdGenerator, AVAILABLE_DROP_ZONE_ID, ROW_DROP_ZONE_PREFIX,
};
pub use error::{ConfigError, FormError};
pub use model::{Column, Field, FormState, FormTree, Identified, Row};
pub use locate::{locate, Location};
pub use mutate::InsertOptions;
pub use gesture::{
    apply, classify, ActiveDrag, DragState, DropOutcome, GestureResolver, Transition, RULES,
};
pub use config::FormBuilderConfig;
pub use session::FormSession;
pub use controller::{columns_model, fields_model, FormBuilderController};
