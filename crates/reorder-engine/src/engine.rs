//! Reorder engine
//!
//! Coordinates the session tracker, position resolver, constraint gate and
//! committer. One engine instance is shared by every reorderable list that
//! must respect the single-active-drag rule, and is the only entry point
//! through which drag state changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::commit::{commit, CommitOutcome, OrderedCollection};
use crate::config::ReorderConfig;
use crate::events::{ReorderEvent, ReorderEventSink};
use crate::gate::{check_drop, DropCandidate, Rejection};
use crate::position::{resolve_position, GeometryProvider};
use crate::session::{DragPayload, DragSession, DragSessionTracker, DropTarget};
use crate::types::{DragKind, DropPosition, Rect};

/// Platform drop effect / cursor feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropEffect {
    Move,
    #[default]
    None,
}

/// Visual state of one rendered row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFeedback {
    /// The row is the one being dragged (rendered with reduced opacity)
    pub dragging: bool,
    /// Border to draw on the row, if it is the current drop target
    pub drop_indicator: Option<DropPosition>,
}

/// Result of a drag-over evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOverOutcome {
    /// Drop effect to report back to the platform
    pub effect: DropEffect,
    /// Whether the drop indicator changed (a re-render is needed)
    pub changed: bool,
}

/// The reordering state machine
pub struct ReorderEngine {
    tracker: DragSessionTracker,
    config: ReorderConfig,
    sink: Option<Arc<dyn ReorderEventSink>>,
}

impl Default for ReorderEngine {
    fn default() -> Self {
        Self::new(ReorderConfig::default())
    }
}

impl ReorderEngine {
    pub fn new(config: ReorderConfig) -> Self {
        Self {
            tracker: DragSessionTracker::new(),
            config,
            sink: None,
        }
    }

    /// Forward events to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn ReorderEventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.tracker.session()
    }

    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.tracker.drop_target()
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_active()
    }

    // =========================================================================
    // Drag session
    // =========================================================================

    /// Start dragging `dragged_id`
    ///
    /// Item drags must name their origin container. Returns the payload to
    /// attach to the platform drag data, or `None` if the request is ignored
    /// (another drag is active, or an item drag has no container).
    pub fn begin_drag(
        &mut self,
        kind: DragKind,
        dragged_id: &str,
        origin_container_id: Option<&str>,
    ) -> Option<DragPayload> {
        let session = match (kind, origin_container_id) {
            (DragKind::Container, _) => DragSession::container(dragged_id),
            (DragKind::Item, Some(container)) => DragSession::item(dragged_id, container),
            (DragKind::Item, None) => {
                log::debug!("Ignoring item drag of '{}' without a container", dragged_id);
                return None;
            }
        };

        let payload = self.tracker.begin(session.clone())?;
        self.emit(ReorderEvent::DragStarted {
            kind: session.kind,
            dragged_id: session.dragged_id,
            origin_container_id: session.origin_container_id,
        });
        Some(payload)
    }

    /// End the active drag without committing
    ///
    /// Idempotent. Drag-end, Escape and leaving the document all land here.
    pub fn end_drag(&mut self) -> bool {
        let ended = self.tracker.end();
        if ended {
            self.emit(ReorderEvent::DragEnded { committed: false });
        }
        ended
    }

    // =========================================================================
    // Hover
    // =========================================================================

    /// Evaluate a drag-over of `candidate` whose row occupies `rect`
    ///
    /// A disallowed candidate clears the drop indicator and reports
    /// `DropEffect::None`. The outcome is `changed` only when the target id
    /// or side differs from the previous drop target.
    pub fn drag_over(
        &mut self,
        candidate: &DropCandidate,
        pointer_y: f64,
        rect: Rect,
    ) -> DragOverOutcome {
        if let Err(reason) = check_drop(self.tracker.session(), candidate) {
            log::trace!("Drop on '{}' not allowed: {}", candidate.target_id, reason);
            return self.clear_drop_target();
        }

        let mut target = DropTarget::new(
            candidate.target_id.clone(),
            resolve_position(pointer_y, rect),
        );
        target.container_id = candidate.container_id.clone();

        let changed = self.tracker.replace_drop_target(Some(target.clone()));
        if changed {
            self.emit(ReorderEvent::DropTargetChanged {
                target_id: target.target_id,
                position: target.position,
            });
        }

        DragOverOutcome {
            effect: DropEffect::Move,
            changed,
        }
    }

    /// [`drag_over`](Self::drag_over), measuring the candidate through `geometry`
    ///
    /// A candidate without a rectangle is treated as not droppable.
    pub fn drag_over_measured(
        &mut self,
        candidate: &DropCandidate,
        pointer_y: f64,
        geometry: &impl GeometryProvider,
    ) -> DragOverOutcome {
        match geometry.rect_of(&candidate.target_id) {
            Some(rect) => self.drag_over(candidate, pointer_y, rect),
            None => self.clear_drop_target(),
        }
    }

    /// The pointer left `target_id` without dropping
    pub fn drag_leave(&mut self, target_id: &str) -> bool {
        let is_current = self
            .tracker
            .drop_target()
            .is_some_and(|t| t.target_id == target_id);
        is_current && self.clear_drop_target().changed
    }

    /// Remove the drop indicator, e.g. when the pointer hovers a row the
    /// caller already knows cannot receive the drop
    pub fn clear_drop_target(&mut self) -> DragOverOutcome {
        let changed = self.tracker.replace_drop_target(None);
        if changed {
            self.emit(ReorderEvent::DropTargetCleared);
        }
        DragOverOutcome {
            effect: DropEffect::None,
            changed,
        }
    }

    // =========================================================================
    // Drop
    // =========================================================================

    /// Handle a drop carrying the platform payload `raw_payload`
    ///
    /// On success `on_commit` receives the reordered replacement collection.
    /// The session is cleared whether or not anything was committed.
    /// Returns whether a commit happened.
    pub fn drop<C, F>(&mut self, raw_payload: &str, collection: &C, on_commit: F) -> bool
    where
        C: OrderedCollection,
        F: FnOnce(C),
    {
        let committed = match self.resolve_drop(raw_payload, collection) {
            Ok(Some(reordered)) => {
                on_commit(reordered);
                true
            }
            Ok(None) => false,
            Err(reason) => {
                log::debug!("Drop ignored: {}", reason);
                self.emit(ReorderEvent::DropRejected { reason });
                false
            }
        };

        if self.tracker.end() {
            self.emit(ReorderEvent::DragEnded { committed });
        }
        committed
    }

    /// Verify, gate and commit; `Ok(None)` when there is nothing to drop on
    fn resolve_drop<C: OrderedCollection>(
        &self,
        raw_payload: &str,
        collection: &C,
    ) -> Result<Option<C>, Rejection> {
        let Some(session) = self.tracker.session() else {
            return Err(Rejection::NoSession);
        };
        if !self.tracker.verify_payload(raw_payload) {
            return Err(Rejection::ForeignPayload);
        }
        let Some(target) = self.tracker.drop_target() else {
            return Ok(None);
        };

        let candidate = DropCandidate {
            kind: session.kind,
            target_id: target.target_id.clone(),
            container_id: target.container_id.clone(),
        };
        check_drop(Some(session), &candidate)?;

        match commit(session, target, collection, self.config.order_base) {
            CommitOutcome::Applied { collection, moved } => {
                if let Some(scope) = session.scope() {
                    let sequence = collection.sequence(&scope).unwrap_or_default();
                    log::debug!(
                        "Committed '{}' {:?} '{}' (moved: {})",
                        session.dragged_id,
                        target.position,
                        target.target_id,
                        moved
                    );
                    let event = ReorderEvent::Committed {
                        scope,
                        dragged_id: session.dragged_id.clone(),
                        sequence,
                    };
                    self.emit(event);
                }
                Ok(Some(collection))
            }
            CommitOutcome::Aborted { reason, .. } => Err(reason),
        }
    }

    // =========================================================================
    // Feedback
    // =========================================================================

    /// Visual state for the row showing `id`
    ///
    /// Rows are identified by id alone; a container and an item sharing an
    /// id are told apart by `kind`.
    pub fn row_feedback(&self, kind: DragKind, id: &str) -> RowFeedback {
        let dragging = self
            .tracker
            .session()
            .is_some_and(|s| s.kind == kind && s.dragged_id == id);
        let drop_indicator = match (self.tracker.session(), self.tracker.drop_target()) {
            (Some(session), Some(target)) if session.kind == kind && target.target_id == id => {
                Some(target.position)
            }
            _ => None,
        };
        RowFeedback {
            dragging,
            drop_indicator,
        }
    }

    /// Cursor feedback for the current state
    pub fn cursor(&self) -> DropEffect {
        if self.tracker.drop_target().is_some() {
            DropEffect::Move
        } else {
            DropEffect::None
        }
    }

    fn emit(&self, event: ReorderEvent) {
        if !self.config.emit_events {
            return;
        }
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.send(event) {
                log::warn!("Failed to deliver reorder event: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::VecEventSink;
    use crate::test_support::{abc, entry, init_logging, keys, shelves};
    use crate::types::OrderBase;

    /// Rows stacked 40px tall starting at y = 100
    fn rect_at(row: usize) -> Rect {
        Rect::new(0.0, 100.0 + 40.0 * row as f64, 200.0, 40.0)
    }

    fn payload(engine: &ReorderEngine) -> String {
        DragPayload::from(engine.session().unwrap()).encode().unwrap()
    }

    #[test]
    fn test_scenario_drag_category_before_first() {
        init_logging();
        let mut engine = ReorderEngine::default();
        let mut categories = abc();

        let raw = engine
            .begin_drag(DragKind::Container, "C", None)
            .unwrap()
            .encode()
            .unwrap();

        // Pointer above A's midpoint
        let outcome = engine.drag_over(&DropCandidate::container("A"), 105.0, rect_at(0));
        assert_eq!(outcome.effect, DropEffect::Move);
        assert!(outcome.changed);

        let snapshot = categories.clone();
        assert!(engine.drop(&raw, &snapshot, |reordered| categories = reordered));

        assert_eq!(
            categories.items(),
            &[entry("C", 1), entry("A", 2), entry("B", 3)]
        );
        assert!(!engine.is_dragging());
        assert!(engine.drop_target().is_none());
    }

    #[test]
    fn test_scenario_drag_item_after_last() {
        let mut engine = ReorderEngine::default();
        let mut collection = shelves();

        engine.begin_drag(DragKind::Item, "x", Some("K")).unwrap();
        engine.drag_over(&DropCandidate::item("z", "K"), 205.0, rect_at(2));
        assert_eq!(engine.drop_target().unwrap().position, DropPosition::After);

        let raw = payload(&engine);
        let snapshot = collection.clone();
        assert!(engine.drop(&raw, &snapshot, |reordered| collection = reordered));

        assert_eq!(collection.0[0].members, keys(&["y", "z", "x"]));
    }

    #[test]
    fn test_redundant_drag_over_does_not_report_change() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "C", None).unwrap();

        let candidate = DropCandidate::container("A");
        assert!(engine.drag_over(&candidate, 101.0, rect_at(0)).changed);
        assert!(!engine.drag_over(&candidate, 105.0, rect_at(0)).changed);
        assert!(!engine.drag_over(&candidate, 119.9, rect_at(0)).changed);
        // Crossing the midpoint flips the side
        assert!(engine.drag_over(&candidate, 120.0, rect_at(0)).changed);
    }

    #[test]
    fn test_disallowed_hover_clears_indicator() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Item, "x", Some("K")).unwrap();

        engine.drag_over(&DropCandidate::item("y", "K"), 145.0, rect_at(1));
        assert_eq!(
            engine.row_feedback(DragKind::Item, "y").drop_indicator,
            Some(DropPosition::Before)
        );

        // Hover an item of another container
        let outcome = engine.drag_over(&DropCandidate::item("p", "L"), 105.0, rect_at(0));
        assert_eq!(outcome.effect, DropEffect::None);
        assert!(outcome.changed);
        assert!(engine.drop_target().is_none());
        assert_eq!(engine.row_feedback(DragKind::Item, "y"), RowFeedback::default());
        assert_eq!(engine.row_feedback(DragKind::Item, "p"), RowFeedback::default());
        assert_eq!(engine.cursor(), DropEffect::None);
    }

    #[test]
    fn test_container_drag_over_items_has_no_effect() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "K", None).unwrap();

        let outcome = engine.drag_over(&DropCandidate::item("y", "L"), 105.0, rect_at(0));
        assert_eq!(outcome.effect, DropEffect::None);
        assert!(!outcome.changed);
        assert!(engine.drop_target().is_none());
    }

    #[test]
    fn test_self_hover_produces_no_target() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "A", None).unwrap();

        let outcome = engine.drag_over(&DropCandidate::container("A"), 105.0, rect_at(0));
        assert_eq!(outcome.effect, DropEffect::None);
        assert!(engine.drop_target().is_none());
    }

    #[test]
    fn test_self_drop_leaves_collection_identical() {
        let mut engine = ReorderEngine::default();
        let categories = abc();

        engine.begin_drag(DragKind::Container, "B", None).unwrap();
        engine.drag_over(&DropCandidate::container("B"), 150.0, rect_at(1));
        let raw = payload(&engine);

        let mut committed = None;
        assert!(!engine.drop(&raw, &categories, |c| committed = Some(c)));
        assert!(committed.is_none());
        assert_eq!(categories, abc());
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_cross_container_drop_changes_nothing() {
        let mut engine = ReorderEngine::default();
        let collection = shelves();

        engine.begin_drag(DragKind::Item, "x", Some("K")).unwrap();
        engine.drag_over(&DropCandidate::item("q", "L"), 105.0, rect_at(0));
        let raw = payload(&engine);

        let mut committed = None;
        assert!(!engine.drop(&raw, &collection, |c| committed = Some(c)));
        assert!(committed.is_none());
        assert_eq!(collection, shelves());
    }

    #[test]
    fn test_foreign_payload_is_rejected() {
        let sink = Arc::new(VecEventSink::new());
        let mut engine = ReorderEngine::default().with_sink(sink.clone());
        let categories = abc();

        engine.begin_drag(DragKind::Container, "C", None).unwrap();
        engine.drag_over(&DropCandidate::container("A"), 105.0, rect_at(0));

        let foreign = DragPayload::from(&DragSession::container("B")).encode().unwrap();
        let mut committed = false;
        assert!(!engine.drop(&foreign, &categories, |_| committed = true));
        assert!(!committed);
        assert!(!engine.is_dragging());

        assert!(sink.events().contains(&ReorderEvent::DropRejected {
            reason: Rejection::ForeignPayload
        }));
    }

    #[test]
    fn test_vanished_target_aborts_drop() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "C", None).unwrap();
        engine.drag_over(&DropCandidate::container("A"), 105.0, rect_at(0));
        let raw = payload(&engine);

        // A was removed by an unrelated action before the drop
        let mut categories = abc();
        categories.remove("A", OrderBase::OneBased);
        let before = categories.clone();

        let mut committed = false;
        assert!(!engine.drop(&raw, &categories, |_| committed = true));
        assert!(!committed);
        assert_eq!(categories, before);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_drop_without_target_ends_session() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "C", None).unwrap();
        let raw = payload(&engine);

        let mut committed = false;
        assert!(!engine.drop(&raw, &abc(), |_| committed = true));
        assert!(!committed);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_cancel_after_hovering_leaves_no_residue() {
        let mut engine = ReorderEngine::default();
        let categories = abc();

        engine.begin_drag(DragKind::Container, "B", None).unwrap();
        engine.drag_over(&DropCandidate::container("A"), 105.0, rect_at(0));
        engine.drag_over(&DropCandidate::container("C"), 195.0, rect_at(2));
        engine.drag_over(&DropCandidate::container("A"), 135.0, rect_at(0));

        assert!(engine.end_drag());
        assert!(engine.session().is_none());
        assert!(engine.drop_target().is_none());
        assert_eq!(categories, abc());

        // Idempotent
        assert!(!engine.end_drag());
    }

    #[test]
    fn test_single_active_session() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "A", None).unwrap();

        assert!(engine.begin_drag(DragKind::Item, "x", Some("K")).is_none());
        assert!(engine.begin_drag(DragKind::Container, "B", None).is_none());
        assert_eq!(engine.session().unwrap().dragged_id, "A");
    }

    #[test]
    fn test_item_drag_requires_container() {
        let mut engine = ReorderEngine::default();
        assert!(engine.begin_drag(DragKind::Item, "x", None).is_none());
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_drag_leave_clears_only_current_target() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "C", None).unwrap();
        engine.drag_over(&DropCandidate::container("A"), 105.0, rect_at(0));

        assert!(!engine.drag_leave("B"));
        assert!(engine.drop_target().is_some());

        assert!(engine.drag_leave("A"));
        assert!(engine.drop_target().is_none());
        assert!(engine.is_dragging());
    }

    #[test]
    fn test_drag_over_measured_without_rect() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "C", None).unwrap();
        engine.drag_over(&DropCandidate::container("A"), 105.0, rect_at(0));

        let geometry = |_: &str| -> Option<Rect> { None };
        let outcome = engine.drag_over_measured(&DropCandidate::container("B"), 105.0, &geometry);
        assert_eq!(outcome.effect, DropEffect::None);
        assert!(engine.drop_target().is_none());
    }

    #[test]
    fn test_row_feedback_marks_dragged_row() {
        let mut engine = ReorderEngine::default();
        engine.begin_drag(DragKind::Container, "C", None).unwrap();
        engine.drag_over(&DropCandidate::container("A"), 135.0, rect_at(0));

        assert!(engine.row_feedback(DragKind::Container, "C").dragging);
        assert!(!engine.row_feedback(DragKind::Item, "C").dragging);
        assert_eq!(
            engine.row_feedback(DragKind::Container, "A").drop_indicator,
            Some(DropPosition::After)
        );
        assert_eq!(engine.cursor(), DropEffect::Move);
    }

    #[test]
    fn test_zero_based_renumbering() {
        let config = ReorderConfig::default().with_order_base(OrderBase::ZeroBased);
        let mut engine = ReorderEngine::new(config);
        let mut categories = abc();

        engine.begin_drag(DragKind::Container, "A", None).unwrap();
        engine.drag_over(&DropCandidate::container("C"), 205.0, rect_at(2));
        let raw = payload(&engine);
        let snapshot = categories.clone();
        engine.drop(&raw, &snapshot, |c| categories = c);

        assert_eq!(
            categories.items(),
            &[entry("B", 0), entry("C", 1), entry("A", 2)]
        );
    }

    #[test]
    fn test_events_for_committed_gesture() {
        let sink = Arc::new(VecEventSink::new());
        let mut engine = ReorderEngine::default().with_sink(sink.clone());

        engine.begin_drag(DragKind::Container, "C", None).unwrap();
        engine.drag_over(&DropCandidate::container("A"), 105.0, rect_at(0));
        engine.drag_over(&DropCandidate::container("A"), 106.0, rect_at(0));
        let raw = payload(&engine);
        engine.drop(&raw, &abc(), |_| {});

        assert_eq!(
            sink.events(),
            vec![
                ReorderEvent::DragStarted {
                    kind: DragKind::Container,
                    dragged_id: "C".to_string(),
                    origin_container_id: None,
                },
                ReorderEvent::DropTargetChanged {
                    target_id: "A".to_string(),
                    position: DropPosition::Before,
                },
                ReorderEvent::Committed {
                    scope: crate::types::ReorderScope::Containers,
                    dragged_id: "C".to_string(),
                    sequence: keys(&["C", "A", "B"]),
                },
                ReorderEvent::DragEnded { committed: true },
            ]
        );
    }

    #[test]
    fn test_events_can_be_disabled() {
        let sink = Arc::new(VecEventSink::new());
        let config = ReorderConfig {
            emit_events: false,
            ..ReorderConfig::default()
        };
        let mut engine = ReorderEngine::new(config).with_sink(sink.clone());

        engine.begin_drag(DragKind::Container, "C", None).unwrap();
        engine.end_drag();
        assert!(sink.events().is_empty());
    }
}
