//! Platform event wiring
//!
//! Maps raw drag/pointer events onto the engine operations so a view layer
//! only has to translate its own event type into a [`DragInput`].

use serde::{Deserialize, Serialize};

use crate::commit::OrderedCollection;
use crate::engine::{DragOverOutcome, ReorderEngine};
use crate::gate::DropCandidate;
use crate::position::GeometryProvider;
use crate::session::DragPayload;
use crate::types::{DragKind, EntityId};

/// A platform input event relevant to reordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DragInput {
    /// Pointer-down + drag-start on a draggable row
    #[serde(rename_all = "camelCase")]
    Start {
        kind: DragKind,
        dragged_id: EntityId,
        origin_container_id: Option<EntityId>,
    },
    /// Drag-over a candidate row
    #[serde(rename_all = "camelCase")]
    Over {
        candidate: DropCandidate,
        pointer_y: f64,
    },
    /// Drag-leave of a candidate row
    #[serde(rename_all = "camelCase")]
    Leave { target_id: EntityId },
    /// Drop, with the string payload read from the platform drag data
    Drop { payload: String },
    /// Drag-end (fires after drop, or alone when the drag was abandoned)
    End,
    /// Escape key pressed
    Escape,
    /// Pointer left the document
    PointerLeftDocument,
}

/// What handling an input did
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// A session started; attach the payload to the platform drag data
    Started(DragPayload),
    /// The drop indicator was (re)evaluated
    Hovered(DragOverOutcome),
    /// A reorder was committed
    Committed,
    /// The session or drop indicator was cleared without a commit
    Cleared,
    /// Nothing happened
    Ignored,
}

impl ReorderEngine {
    /// Route a platform event to the matching operation
    ///
    /// `collection` is read only on drop; `on_commit` is called at most once
    /// with the replacement collection.
    pub fn handle<C, G, F>(
        &mut self,
        input: DragInput,
        collection: &C,
        geometry: &G,
        on_commit: F,
    ) -> InputOutcome
    where
        C: OrderedCollection,
        G: GeometryProvider,
        F: FnOnce(C),
    {
        match input {
            DragInput::Start {
                kind,
                dragged_id,
                origin_container_id,
            } => self
                .begin_drag(kind, &dragged_id, origin_container_id.as_deref())
                .map_or(InputOutcome::Ignored, InputOutcome::Started),
            DragInput::Over {
                candidate,
                pointer_y,
            } => InputOutcome::Hovered(self.drag_over_measured(&candidate, pointer_y, geometry)),
            DragInput::Leave { target_id } => {
                if self.drag_leave(&target_id) {
                    InputOutcome::Cleared
                } else {
                    InputOutcome::Ignored
                }
            }
            DragInput::Drop { payload } => {
                if self.drop(&payload, collection, on_commit) {
                    InputOutcome::Committed
                } else {
                    InputOutcome::Cleared
                }
            }
            DragInput::Escape if !self.config().escape_cancels => InputOutcome::Ignored,
            DragInput::End | DragInput::Escape | DragInput::PointerLeftDocument => {
                if self.end_drag() {
                    InputOutcome::Cleared
                } else {
                    InputOutcome::Ignored
                }
            }
        }
    }
}
