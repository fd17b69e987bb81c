//! Sub-workflow library
//!
//! Workflows that can be embedded in another workflow, listed in a
//! user-defined order.

use serde::{Deserialize, Serialize};

use reorder_engine::{
    EntityId, OrderBase, OrderedCollection, OrderedEntity, OrderedList, ReorderScope,
};

use crate::error::Result;

/// Metadata about a sub-workflow (for listing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowLibraryEntry {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub node_count: usize,
    #[serde(default)]
    pub order: u32,
}

impl WorkflowLibraryEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            node_count: 0,
            order: 0,
        }
    }
}

impl OrderedEntity for WorkflowLibraryEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

/// Ordered list of sub-workflows available for embedding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubWorkflowLibrary {
    workflows: OrderedList<WorkflowLibraryEntry>,
    #[serde(default)]
    order_base: OrderBase,
}

impl SubWorkflowLibrary {
    pub fn new(order_base: OrderBase) -> Self {
        Self {
            workflows: OrderedList::default(),
            order_base,
        }
    }

    /// Add a workflow at the end of the list
    pub fn add(&mut self, entry: WorkflowLibraryEntry) -> Result<()> {
        self.workflows.push(entry, self.order_base)?;
        Ok(())
    }

    pub fn order_base(&self) -> OrderBase {
        self.order_base
    }

    /// Switch the order base and renumber every workflow
    pub fn set_order_base(&mut self, order_base: OrderBase) {
        self.order_base = order_base;
        self.workflows.renumber(order_base);
    }

    /// Remove a workflow; the rest close ranks
    pub fn remove(&mut self, id: &str) -> Option<WorkflowLibraryEntry> {
        let removed = self.workflows.remove(id, self.order_base);
        if removed.is_some() {
            log::debug!("Removed sub-workflow '{}' from library", id);
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&WorkflowLibraryEntry> {
        self.workflows.get(id)
    }

    /// List all workflows in display order
    pub fn list(&self) -> &[WorkflowLibraryEntry] {
        self.workflows.items()
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

impl OrderedCollection for SubWorkflowLibrary {
    fn sequence(&self, scope: &ReorderScope) -> Option<Vec<EntityId>> {
        self.workflows.sequence(scope)
    }

    fn container_of(&self, _item_id: &str) -> Option<EntityId> {
        None
    }

    fn apply_sequence(&mut self, scope: &ReorderScope, keys: &[EntityId], base: OrderBase) {
        self.workflows.apply_sequence(scope, keys, base);
    }
}
