//! Reorder Engine - Drag-and-drop reordering for ordered editor collections
//!
//! This crate provides the state machine behind every reorderable list in the
//! workflow editor (node categories, node types within a category, the
//! node-group library and the sub-workflow library). It supports:
//!
//! - A single active drag session across all lists
//! - Before/after drop positions from pointer geometry
//! - Container-membership constraints for item drags
//! - Atomic commits that renumber the order key of the affected sequence
//!
//! # Architecture
//!
//! The engine is one state machine reused at two granularities:
//!
//! - `DragSessionTracker`: Which entity is being dragged, and from where
//! - `resolve_position`: Pure midpoint test against an injected rectangle
//! - `check_drop`: The constraint gate (self-drop, kind and container rules)
//! - `commit`: Remove/insert/renumber as a value transformation
//!
//! `ReorderEngine` coordinates the four and is the only mutation entry point.
//!
//! # Example
//!
//! ```ignore
//! use reorder_engine::{DragKind, DropCandidate, ReorderEngine, Rect};
//!
//! let mut engine = ReorderEngine::default();
//! let payload = engine.begin_drag(DragKind::Container, "c", None).unwrap();
//!
//! let rect = Rect::new(0.0, 100.0, 200.0, 40.0);
//! engine.drag_over(&DropCandidate::container("a"), 110.0, rect);
//!
//! engine.drop(&payload.encode()?, &categories, |reordered| categories = reordered);
//! ```

pub mod commit;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod gate;
pub mod input;
pub mod position;
pub mod session;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export key types
pub use commit::{
    commit, member_sequence, renumber, renumber_members, reorder_keys, sort_by_order, CommitOutcome,
    OrderedCollection, OrderedList,
};
pub use config::{ConfigError, ReorderConfig};
pub use engine::{DragOverOutcome, DropEffect, ReorderEngine, RowFeedback};
pub use error::{ReorderError, Result};
pub use events::{EventError, NullEventSink, ReorderEvent, ReorderEventSink, VecEventSink};
pub use gate::{check_drop, is_drop_allowed, DropCandidate, Rejection};
pub use input::{DragInput, InputOutcome};
pub use position::{resolve_against, resolve_position, GeometryProvider};
pub use session::{DragPayload, DragSession, DragSessionTracker, DropTarget};
pub use types::{
    ContainerEntity, DragKind, DropPosition, EntityId, ItemEntity, OrderBase, OrderedEntity, Rect,
    ReorderScope,
};
