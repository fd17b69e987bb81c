//! Drop position resolution
//!
//! Classifies a hovered row as a `Before` or `After` drop from the pointer's
//! vertical coordinate. Vertical lists only.

use std::collections::HashMap;

use crate::types::{DropPosition, EntityId, Rect};

/// Measures the current on-screen rectangle of an entity's row
///
/// This is the injected rendering capability; the resolver itself never
/// touches a rendering surface.
pub trait GeometryProvider {
    fn rect_of(&self, id: &str) -> Option<Rect>;
}

impl GeometryProvider for HashMap<EntityId, Rect> {
    fn rect_of(&self, id: &str) -> Option<Rect> {
        self.get(id).copied()
    }
}

impl<F> GeometryProvider for F
where
    F: Fn(&str) -> Option<Rect>,
{
    fn rect_of(&self, id: &str) -> Option<Rect> {
        self(id)
    }
}

/// Classify a drop against `rect`
///
/// `Before` when the pointer is strictly above the vertical midpoint;
/// a pointer exactly on the midpoint resolves to `After`.
pub fn resolve_position(pointer_y: f64, rect: Rect) -> DropPosition {
    if pointer_y < rect.mid_y() {
        DropPosition::Before
    } else {
        DropPosition::After
    }
}

/// Measure `target_id` and classify the drop
///
/// Returns `None` if the target has no rectangle (not rendered).
pub fn resolve_against(
    geometry: &impl GeometryProvider,
    target_id: &str,
    pointer_y: f64,
) -> Option<DropPosition> {
    geometry
        .rect_of(target_id)
        .map(|rect| resolve_position(pointer_y, rect))
}
