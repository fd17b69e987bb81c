//! Event types for reorder feedback
//!
//! Events are sent from the engine to the view layer (or any consumer)
//! to report drag progress, drop-indicator changes and commits.

use serde::{Deserialize, Serialize};

use crate::gate::Rejection;
use crate::types::{DragKind, DropPosition, EntityId, ReorderScope};

/// Trait for sending reorder events
///
/// This abstracts over the transport mechanism (frontend channel, mpsc, etc.)
/// so the engine does not depend on any particular view layer.
pub trait ReorderEventSink: Send + Sync {
    /// Send an event
    ///
    /// Returns an error if the event could not be delivered (e.g., channel closed)
    fn send(&self, event: ReorderEvent) -> Result<(), EventError>;
}

/// Error when sending events fails
#[derive(Debug, Clone, thiserror::Error)]
#[error("Event error: {message}")]
pub struct EventError {
    pub message: String,
}

/// Events emitted while a gesture is in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReorderEvent {
    /// A drag session started
    #[serde(rename_all = "camelCase")]
    DragStarted {
        kind: DragKind,
        dragged_id: EntityId,
        origin_container_id: Option<EntityId>,
    },

    /// The drop indicator moved to a new target or side
    #[serde(rename_all = "camelCase")]
    DropTargetChanged {
        target_id: EntityId,
        position: DropPosition,
    },

    /// The drop indicator was removed
    DropTargetCleared,

    /// A drop was refused
    DropRejected { reason: Rejection },

    /// A reorder was committed
    #[serde(rename_all = "camelCase")]
    Committed {
        scope: ReorderScope,
        dragged_id: EntityId,
        sequence: Vec<EntityId>,
    },

    /// The drag session ended, with or without a commit
    DragEnded { committed: bool },
}

/// A no-op event sink that discards all events
pub struct NullEventSink;

impl ReorderEventSink for NullEventSink {
    fn send(&self, _event: ReorderEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: std::sync::Mutex<Vec<ReorderEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<ReorderEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReorderEventSink for VecEventSink {
    fn send(&self, event: ReorderEvent) -> Result<(), EventError> {
        self.events
            .lock()
            .map_err(|_| EventError {
                message: "Event buffer poisoned".to_string(),
            })?
            .push(event);
        Ok(())
    }
}
