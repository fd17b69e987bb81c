//! Drag session tracking
//!
//! Holds the one active drag (if any) and the current drop target.
//! Both are interaction-transient: created on drag-start, replaced on
//! drag-over and destroyed on drop, drag-end or cancellation.

use serde::{Deserialize, Serialize};

use crate::constants::payload;
use crate::error::Result;
use crate::types::{DragKind, DropPosition, EntityId, ReorderScope};

/// The ephemeral record of an in-progress reordering gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSession {
    pub kind: DragKind,
    pub dragged_id: EntityId,
    /// Set only for item drags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_container_id: Option<EntityId>,
}

impl DragSession {
    /// A container-level drag
    pub fn container(dragged_id: impl Into<String>) -> Self {
        Self {
            kind: DragKind::Container,
            dragged_id: dragged_id.into(),
            origin_container_id: None,
        }
    }

    /// An item-level drag within `container_id`
    pub fn item(dragged_id: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self {
            kind: DragKind::Item,
            dragged_id: dragged_id.into(),
            origin_container_id: Some(container_id.into()),
        }
    }

    /// The sequence a commit of this session rewrites
    pub fn scope(&self) -> Option<ReorderScope> {
        match (self.kind, &self.origin_container_id) {
            (DragKind::Container, _) => Some(ReorderScope::Containers),
            (DragKind::Item, Some(container)) => Some(ReorderScope::Members(container.clone())),
            (DragKind::Item, None) => None,
        }
    }
}

/// The currently hovered candidate position for a pending reorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    pub target_id: EntityId,
    pub position: DropPosition,
    /// Hovered container, for item-level targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<EntityId>,
}

impl DropTarget {
    pub fn new(target_id: impl Into<String>, position: DropPosition) -> Self {
        Self {
            target_id: target_id.into(),
            position,
            container_id: None,
        }
    }

    pub fn in_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    /// Whether two targets would render the same indicator
    fn same_indicator(&self, other: &DropTarget) -> bool {
        self.target_id == other.target_id && self.position == other.position
    }
}

/// Payload written to the platform drag data on drag-start
///
/// The drop handler receives the platform event rather than in-memory state,
/// so it decodes this payload and compares it against the tracked session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub kind: DragKind,
    pub dragged_id: EntityId,
}

impl DragPayload {
    /// Format under which the payload is set on the platform drag data
    pub const MIME_TYPE: &'static str = payload::MIME_TYPE;

    /// Encode as the string stored on the data transfer
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a data-transfer string
    ///
    /// Returns `None` for anything that did not originate from this engine.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    fn matches(&self, session: &DragSession) -> bool {
        self.kind == session.kind && self.dragged_id == session.dragged_id
    }
}

impl From<&DragSession> for DragPayload {
    fn from(session: &DragSession) -> Self {
        Self {
            kind: session.kind,
            dragged_id: session.dragged_id.clone(),
        }
    }
}

/// Tracks the single active drag session and its drop target
#[derive(Debug, Default)]
pub struct DragSessionTracker {
    session: Option<DragSession>,
    drop_target: Option<DropTarget>,
}

impl DragSessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session
    ///
    /// Returns the payload to attach to the platform drag data, or `None`
    /// if another session is already active (the request is ignored).
    pub fn begin(&mut self, session: DragSession) -> Option<DragPayload> {
        if let Some(active) = &self.session {
            log::debug!(
                "Ignoring drag of '{}': '{}' is already being dragged",
                session.dragged_id,
                active.dragged_id
            );
            return None;
        }

        let payload = DragPayload::from(&session);
        self.drop_target = None;
        self.session = Some(session);
        Some(payload)
    }

    /// Clear the session and any drop target
    ///
    /// Always safe to call. Returns whether there was anything to clear.
    pub fn end(&mut self) -> bool {
        let had_state = self.session.is_some() || self.drop_target.is_some();
        self.session = None;
        self.drop_target = None;
        had_state
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.drop_target.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Replace the drop target wholesale
    ///
    /// Returns `true` only if the visible indicator changed (target id,
    /// position, or presence). A target is never stored without a session.
    pub fn replace_drop_target(&mut self, target: Option<DropTarget>) -> bool {
        let target = target.filter(|_| self.session.is_some());
        let changed = match (&self.drop_target, &target) {
            (None, None) => false,
            (Some(old), Some(new)) => !old.same_indicator(new),
            _ => true,
        };
        self.drop_target = target;
        changed
    }

    /// Cross-check a platform payload against the tracked session
    pub fn verify_payload(&self, raw: &str) -> bool {
        match (&self.session, DragPayload::decode(raw)) {
            (Some(session), Some(payload)) => payload.matches(session),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_end() {
        let mut tracker = DragSessionTracker::new();
        assert!(!tracker.is_active());

        let payload = tracker.begin(DragSession::container("a")).unwrap();
        assert_eq!(payload.dragged_id, "a");
        assert_eq!(payload.kind, DragKind::Container);
        assert!(tracker.is_active());

        assert!(tracker.end());
        assert!(!tracker.is_active());
        // Idempotent
        assert!(!tracker.end());
    }

    #[test]
    fn test_second_begin_is_ignored() {
        let mut tracker = DragSessionTracker::new();
        tracker.begin(DragSession::container("a")).unwrap();

        assert!(tracker.begin(DragSession::item("x", "k")).is_none());
        assert_eq!(tracker.session().unwrap().dragged_id, "a");
    }

    #[test]
    fn test_replace_drop_target_reports_changes() {
        let mut tracker = DragSessionTracker::new();
        tracker.begin(DragSession::container("a")).unwrap();

        assert!(tracker.replace_drop_target(Some(DropTarget::new("b", DropPosition::Before))));
        assert!(!tracker.replace_drop_target(Some(DropTarget::new("b", DropPosition::Before))));
        assert!(tracker.replace_drop_target(Some(DropTarget::new("b", DropPosition::After))));
        assert!(tracker.replace_drop_target(Some(DropTarget::new("c", DropPosition::After))));
        assert!(tracker.replace_drop_target(None));
        assert!(!tracker.replace_drop_target(None));
    }

    #[test]
    fn test_drop_target_requires_session() {
        let mut tracker = DragSessionTracker::new();
        assert!(!tracker.replace_drop_target(Some(DropTarget::new("b", DropPosition::Before))));
        assert!(tracker.drop_target().is_none());
    }

    #[test]
    fn test_end_clears_drop_target() {
        let mut tracker = DragSessionTracker::new();
        tracker.begin(DragSession::container("a")).unwrap();
        tracker.replace_drop_target(Some(DropTarget::new("b", DropPosition::After)));

        tracker.end();
        assert!(tracker.drop_target().is_none());
    }

    #[test]
    fn test_verify_payload() {
        let mut tracker = DragSessionTracker::new();
        let payload = tracker.begin(DragSession::item("x", "k")).unwrap();
        let raw = payload.encode().unwrap();

        assert!(tracker.verify_payload(&raw));

        let other = DragPayload {
            kind: DragKind::Item,
            dragged_id: "y".to_string(),
        };
        assert!(!tracker.verify_payload(&other.encode().unwrap()));

        let wrong_kind = DragPayload {
            kind: DragKind::Container,
            dragged_id: "x".to_string(),
        };
        assert!(!tracker.verify_payload(&wrong_kind.encode().unwrap()));

        // Plain text from an unrelated drag source
        assert!(!tracker.verify_payload("x"));
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = DragPayload::from(&DragSession::item("x", "k"));
        let raw = payload.encode().unwrap();
        assert_eq!(raw, r#"{"kind":"item","draggedId":"x"}"#);
        assert_eq!(DragPayload::decode(&raw), Some(payload));
        assert_eq!(DragPayload::MIME_TYPE, "application/x-reorder-entity");
    }

    #[test]
    fn test_verify_payload_without_session() {
        let tracker = DragSessionTracker::new();
        let raw = DragPayload::from(&DragSession::container("a")).encode().unwrap();
        assert!(!tracker.verify_payload(&raw));
    }

    #[test]
    fn test_session_scope() {
        assert_eq!(DragSession::container("a").scope(), Some(ReorderScope::Containers));
        assert_eq!(
            DragSession::item("x", "k").scope(),
            Some(ReorderScope::Members("k".to_string()))
        );
    }
}
