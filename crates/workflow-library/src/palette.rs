//! Library palette
//!
//! Owns the node catalog, the group library and the sub-workflow library
//! together with the one [`ReorderEngine`] they share, so a drag started in
//! any list blocks drags in all the others until it ends.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use reorder_engine::{
    DragKind, DragOverOutcome, DragPayload, DropCandidate, OrderedCollection, Rect,
    ReorderConfig, ReorderEngine, ReorderEventSink, RowFeedback,
};

use crate::catalog::NodeCatalog;
use crate::groups::NodeGroupLibrary;
use crate::workflows::SubWorkflowLibrary;

/// The reorderable lists shown in the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteList {
    Categories,
    /// Node types within one category
    NodeTypes,
    Groups,
    Workflows,
}

impl PaletteList {
    pub fn drag_kind(&self) -> DragKind {
        match self {
            PaletteList::NodeTypes => DragKind::Item,
            PaletteList::Categories | PaletteList::Groups | PaletteList::Workflows => {
                DragKind::Container
            }
        }
    }
}

pub struct LibraryPalette {
    catalog: NodeCatalog,
    groups: NodeGroupLibrary,
    workflows: SubWorkflowLibrary,
    engine: ReorderEngine,
    /// List the active drag started in
    active_list: Option<PaletteList>,
}

impl LibraryPalette {
    /// Create a palette around the three collections
    ///
    /// Every collection is renumbered to `config.order_base`, so commits and
    /// add/remove write keys from the same base.
    pub fn new(
        mut catalog: NodeCatalog,
        mut groups: NodeGroupLibrary,
        mut workflows: SubWorkflowLibrary,
        config: ReorderConfig,
    ) -> Self {
        catalog.set_order_base(config.order_base);
        groups.set_order_base(config.order_base);
        workflows.set_order_base(config.order_base);

        Self {
            catalog,
            groups,
            workflows,
            engine: ReorderEngine::new(config),
            active_list: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn ReorderEventSink>) -> Self {
        self.engine = self.engine.with_sink(sink);
        self
    }

    pub fn catalog(&self) -> &NodeCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut NodeCatalog {
        &mut self.catalog
    }

    pub fn groups(&self) -> &NodeGroupLibrary {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut NodeGroupLibrary {
        &mut self.groups
    }

    pub fn workflows(&self) -> &SubWorkflowLibrary {
        &self.workflows
    }

    pub fn workflows_mut(&mut self) -> &mut SubWorkflowLibrary {
        &mut self.workflows
    }

    pub fn engine(&self) -> &ReorderEngine {
        &self.engine
    }

    pub fn active_list(&self) -> Option<PaletteList> {
        self.active_list
    }

    /// Start dragging row `id` of `list`
    ///
    /// Node type drags take the node type's category as their origin.
    /// Returns `None` if another drag is active or the row is unknown.
    pub fn begin_drag(&mut self, list: PaletteList, id: &str) -> Option<DragPayload> {
        let payload = match list {
            PaletteList::NodeTypes => {
                let category = self.catalog.container_of(id)?;
                self.engine.begin_drag(DragKind::Item, id, Some(&category))
            }
            _ => self.engine.begin_drag(DragKind::Container, id, None),
        }?;
        self.active_list = Some(list);
        Some(payload)
    }

    /// The pointer is over row `id` of `list`, whose bounds are `rect`
    ///
    /// Rows of a list other than the one the drag started in never accept
    /// the drop, even when the drag kinds agree.
    pub fn hover(&mut self, list: PaletteList, id: &str, pointer_y: f64, rect: Rect) -> DragOverOutcome {
        if self.active_list != Some(list) {
            return self.engine.clear_drop_target();
        }

        let candidate = match list {
            PaletteList::NodeTypes => match self.catalog.container_of(id) {
                Some(category) => DropCandidate::item(id, category),
                None => return self.engine.clear_drop_target(),
            },
            _ => DropCandidate::container(id),
        };
        self.engine.drag_over(&candidate, pointer_y, rect)
    }

    /// The pointer left row `id` of `list`
    ///
    /// Leaving a row of another list never touches the drop target.
    pub fn leave(&mut self, list: PaletteList, id: &str) -> bool {
        if self.active_list != Some(list) {
            return false;
        }
        self.engine.drag_leave(id)
    }

    /// Drop the active drag, committing into the list it started in
    pub fn drop(&mut self, raw_payload: &str) -> bool {
        let Some(list) = self.active_list.take() else {
            self.engine.end_drag();
            return false;
        };

        match list {
            PaletteList::Categories | PaletteList::NodeTypes => {
                drop_into(&mut self.engine, raw_payload, &mut self.catalog)
            }
            PaletteList::Groups => drop_into(&mut self.engine, raw_payload, &mut self.groups),
            PaletteList::Workflows => drop_into(&mut self.engine, raw_payload, &mut self.workflows),
        }
    }

    /// Cancel the active drag
    pub fn end_drag(&mut self) -> bool {
        self.active_list = None;
        self.engine.end_drag()
    }

    pub fn row_feedback(&self, list: PaletteList, id: &str) -> RowFeedback {
        if self.active_list == Some(list) {
            self.engine.row_feedback(list.drag_kind(), id)
        } else {
            RowFeedback::default()
        }
    }
}

fn drop_into<C: OrderedCollection>(
    engine: &mut ReorderEngine,
    raw_payload: &str,
    collection: &mut C,
) -> bool {
    let mut reordered = None;
    let committed = engine.drop(raw_payload, collection, |c| reordered = Some(c));
    if let Some(c) = reordered {
        *collection = c;
    }
    committed
}
