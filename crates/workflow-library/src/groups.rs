//! Node group library
//!
//! Saved node groups the user can drop into a graph. The library list is
//! user-orderable by dragging.

use serde::{Deserialize, Serialize};

use reorder_engine::{
    EntityId, OrderBase, OrderedCollection, OrderedEntity, OrderedList, ReorderScope,
};

use crate::error::Result;

/// A saved node group as listed in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLibraryEntry {
    /// Unique identifier for this group
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional color for visual distinction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Number of nodes inside the group
    #[serde(default)]
    pub node_count: usize,
    /// Position in the library
    #[serde(default)]
    pub order: u32,
}

impl GroupLibraryEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            color: None,
            node_count: 0,
            order: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }
}

impl OrderedEntity for GroupLibraryEntry {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroupLibrary {
    entries: OrderedList<GroupLibraryEntry>,
    #[serde(default)]
    order_base: OrderBase,
}

impl NodeGroupLibrary {
    pub fn new(order_base: OrderBase) -> Self {
        Self {
            entries: OrderedList::default(),
            order_base,
        }
    }

    /// Load entries that already carry order keys
    pub fn from_entries(entries: Vec<GroupLibraryEntry>, order_base: OrderBase) -> Result<Self> {
        Ok(Self {
            entries: OrderedList::new(entries)?,
            order_base,
        })
    }

    /// Add a group at the end of the library
    pub fn add(&mut self, entry: GroupLibraryEntry) -> Result<()> {
        log::debug!("Adding group '{}' to library", entry.id);
        self.entries.push(entry, self.order_base)?;
        Ok(())
    }

    pub fn order_base(&self) -> OrderBase {
        self.order_base
    }

    /// Switch the order base and renumber every entry
    pub fn set_order_base(&mut self, order_base: OrderBase) {
        self.order_base = order_base;
        self.entries.renumber(order_base);
    }

    pub fn remove(&mut self, id: &str) -> Option<GroupLibraryEntry> {
        self.entries.remove(id, self.order_base)
    }

    pub fn get(&self, id: &str) -> Option<&GroupLibraryEntry> {
        self.entries.get(id)
    }

    /// Entries in display order
    pub fn entries(&self) -> &[GroupLibraryEntry] {
        self.entries.items()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NodeGroupLibrary {
    fn default() -> Self {
        Self::new(OrderBase::default())
    }
}

impl OrderedCollection for NodeGroupLibrary {
    fn sequence(&self, scope: &ReorderScope) -> Option<Vec<EntityId>> {
        self.entries.sequence(scope)
    }

    fn container_of(&self, _item_id: &str) -> Option<EntityId> {
        None
    }

    fn apply_sequence(&mut self, scope: &ReorderScope, keys: &[EntityId], base: OrderBase) {
        self.entries.apply_sequence(scope, keys, base);
    }
}
