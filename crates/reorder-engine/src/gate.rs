//! Constraint gate for drop candidates
//!
//! Decides whether the active session may drop on a hovered candidate.
//! Rules are evaluated in order; the first failing rule is reported.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::DragSession;
use crate::types::{DragKind, EntityId};

/// A hovered row that could receive the drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropCandidate {
    pub kind: DragKind,
    pub target_id: EntityId,
    /// Container the hovered item belongs to (item candidates only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<EntityId>,
}

impl DropCandidate {
    pub fn container(target_id: impl Into<String>) -> Self {
        Self {
            kind: DragKind::Container,
            target_id: target_id.into(),
            container_id: None,
        }
    }

    pub fn item(target_id: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self {
            kind: DragKind::Item,
            target_id: target_id.into(),
            container_id: Some(container_id.into()),
        }
    }
}

/// Why a drop was refused
///
/// These are routine outcomes of fast or ambiguous pointer gestures,
/// never user-facing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    #[error("no drag in progress")]
    NoSession,
    #[error("entity dropped on itself")]
    SelfDrop,
    #[error("container and item drags do not mix")]
    KindMismatch,
    #[error("items cannot move across containers")]
    ContainerMismatch,
    #[error("drag payload did not originate from the active session")]
    ForeignPayload,
    #[error("drop target no longer exists")]
    TargetVanished,
}

/// Evaluate the drop rules for `candidate`
pub fn check_drop(session: Option<&DragSession>, candidate: &DropCandidate) -> Result<(), Rejection> {
    let Some(session) = session else {
        return Err(Rejection::NoSession);
    };

    if session.dragged_id == candidate.target_id {
        return Err(Rejection::SelfDrop);
    }

    if session.kind != candidate.kind {
        return Err(Rejection::KindMismatch);
    }

    if session.kind == DragKind::Item {
        match (&session.origin_container_id, &candidate.container_id) {
            (Some(origin), Some(hovered)) if origin == hovered => {}
            _ => return Err(Rejection::ContainerMismatch),
        }
    }

    Ok(())
}

/// Boolean form of [`check_drop`]
pub fn is_drop_allowed(session: Option<&DragSession>, candidate: &DropCandidate) -> bool {
    check_drop(session, candidate).is_ok()
}
