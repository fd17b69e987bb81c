//! Node catalog - categories and the node types listed under them
//!
//! The node palette shows every node type grouped by category. Users can
//! reorder the categories, and reorder node types within a category, but a
//! node type never changes category by dragging.

use serde::{Deserialize, Serialize};

use reorder_engine::{
    member_sequence, renumber_members, ContainerEntity, EntityId, ItemEntity, OrderBase,
    OrderedCollection, OrderedEntity, OrderedList, ReorderScope,
};

use crate::error::{LibraryError, Result};

/// Category of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Input nodes (user input, file input, etc.)
    Input,
    /// Output nodes (display, export, etc.)
    Output,
    /// Processing nodes (LLM, vision, RAG, etc.)
    Processing,
    /// Control flow nodes (conditionals, loops, etc.)
    Control,
    /// Tool nodes (function calls, integrations)
    Tool,
}

impl NodeCategory {
    /// Default palette order
    pub const ALL: [NodeCategory; 5] = [
        NodeCategory::Input,
        NodeCategory::Processing,
        NodeCategory::Control,
        NodeCategory::Tool,
        NodeCategory::Output,
    ];

    /// Stable id used as the category's entity id
    pub fn id(&self) -> &'static str {
        match self {
            NodeCategory::Input => "input",
            NodeCategory::Output => "output",
            NodeCategory::Processing => "processing",
            NodeCategory::Control => "control",
            NodeCategory::Tool => "tool",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeCategory::Input => "Input",
            NodeCategory::Output => "Output",
            NodeCategory::Processing => "Processing",
            NodeCategory::Control => "Control",
            NodeCategory::Tool => "Tools",
        }
    }
}

/// Palette-facing description of a node type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDefinition {
    /// Unique type identifier (e.g., "llm-inference")
    pub node_type: String,
    /// Category for grouping in the palette
    pub category: NodeCategory,
    /// Human-readable label
    pub label: String,
    /// Description of what the node does
    pub description: String,
}

impl NodeTypeDefinition {
    pub fn new(
        node_type: impl Into<String>,
        category: NodeCategory,
        label: impl Into<String>,
    ) -> Self {
        Self {
            node_type: node_type.into(),
            category,
            label: label.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A category row in the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub id: EntityId,
    pub label: String,
    /// Position among categories
    pub order: u32,
    /// Node types in display order
    pub node_types: Vec<EntityId>,
}

impl CategoryEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            order: 0,
            node_types: Vec::new(),
        }
    }
}

impl OrderedEntity for CategoryEntry {
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

impl ContainerEntity for CategoryEntry {
    fn member_ids(&self) -> &[EntityId] {
        &self.node_types
    }

    fn member_ids_mut(&mut self) -> &mut Vec<EntityId> {
        &mut self.node_types
    }
}

/// A node type row in the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeEntry {
    pub node_type: EntityId,
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub category_id: EntityId,
    /// Position within the category
    pub order: u32,
}

impl OrderedEntity for NodeTypeEntry {
    fn id(&self) -> &str {
        &self.node_type
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl ItemEntity for NodeTypeEntry {
    fn container_id(&self) -> &str {
        &self.category_id
    }
}

/// All categories and node types shown in the palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCatalog {
    categories: OrderedList<CategoryEntry>,
    node_types: Vec<NodeTypeEntry>,
    #[serde(default)]
    order_base: OrderBase,
}

impl NodeCatalog {
    /// Create an empty catalog
    pub fn new(order_base: OrderBase) -> Self {
        Self {
            categories: OrderedList::default(),
            node_types: Vec::new(),
            order_base,
        }
    }

    /// Build the default catalog from node definitions
    ///
    /// Categories follow [`NodeCategory::ALL`] and only appear if they hold at
    /// least one node type. Node types keep their definition order.
    pub fn from_definitions(definitions: &[NodeTypeDefinition], order_base: OrderBase) -> Result<Self> {
        let mut catalog = Self::new(order_base);

        for category in NodeCategory::ALL {
            for definition in definitions.iter().filter(|d| d.category == category) {
                catalog.add_node_type(definition.clone())?;
            }
        }

        Ok(catalog)
    }

    /// Register a node type at the end of its category
    ///
    /// The category is created (at the end of the palette) if needed.
    pub fn add_node_type(&mut self, definition: NodeTypeDefinition) -> Result<()> {
        if self.node_type(&definition.node_type).is_some() {
            return Err(LibraryError::DuplicateNodeType(definition.node_type));
        }

        let category_id = definition.category.id();
        if self.categories.get(category_id).is_none() {
            self.categories.push(
                CategoryEntry::new(category_id, definition.category.label()),
                self.order_base,
            )?;
        }

        let Some(category) = self.categories.get_mut(category_id) else {
            return Err(reorder_engine::ReorderError::not_found(category_id).into());
        };
        let order = self.order_base.order_at(category.node_types.len());
        category.node_types.push(definition.node_type.clone());

        self.node_types.push(NodeTypeEntry {
            node_type: definition.node_type,
            label: definition.label,
            description: definition.description,
            category_id: category_id.to_string(),
            order,
        });
        Ok(())
    }

    /// Remove a node type and close the gap in its category
    pub fn remove_node_type(&mut self, node_type: &str) -> Option<NodeTypeEntry> {
        let ix = self.node_types.iter().position(|n| n.node_type == node_type)?;
        let removed = self.node_types.remove(ix);

        if let Some(category) = self.categories.get_mut(&removed.category_id) {
            category.node_types.retain(|id| id != node_type);
            let members = category.node_types.clone();
            renumber_members(&mut self.node_types, &removed.category_id, &members, self.order_base);
        }

        Some(removed)
    }

    pub fn order_base(&self) -> OrderBase {
        self.order_base
    }

    /// Switch the order base and renumber every category and node type
    pub fn set_order_base(&mut self, order_base: OrderBase) {
        self.order_base = order_base;
        self.categories.renumber(order_base);
        for category in self.categories.items() {
            renumber_members(&mut self.node_types, &category.id, &category.node_types, order_base);
        }
    }

    /// Categories in display order
    pub fn categories_in_order(&self) -> &[CategoryEntry] {
        self.categories.items()
    }

    pub fn category(&self, id: &str) -> Option<&CategoryEntry> {
        self.categories.get(id)
    }

    pub fn node_type(&self, node_type: &str) -> Option<&NodeTypeEntry> {
        self.node_types.iter().find(|n| n.node_type == node_type)
    }

    /// Node types of `category_id` in display order
    pub fn node_types_in(&self, category_id: &str) -> Vec<&NodeTypeEntry> {
        let Some(category) = self.categories.get(category_id) else {
            return Vec::new();
        };
        category
            .node_types
            .iter()
            .filter_map(|id| self.node_type(id))
            .collect()
    }

    /// Whether every category's member list agrees with its node types' order keys
    pub fn is_consistent(&self) -> bool {
        self.categories
            .items()
            .iter()
            .all(|c| member_sequence(&self.node_types, &c.id) == c.node_types)
    }
}

impl OrderedCollection for NodeCatalog {
    fn sequence(&self, scope: &ReorderScope) -> Option<Vec<EntityId>> {
        match scope {
            ReorderScope::Containers => self.categories.sequence(scope),
            ReorderScope::Members(category_id) => self
                .categories
                .get(category_id)
                .map(|c| c.member_ids().to_vec()),
        }
    }

    fn container_of(&self, item_id: &str) -> Option<EntityId> {
        self.node_type(item_id).map(|n| n.category_id.clone())
    }

    fn apply_sequence(&mut self, scope: &ReorderScope, keys: &[EntityId], base: OrderBase) {
        match scope {
            ReorderScope::Containers => self.categories.apply_sequence(scope, keys, base),
            ReorderScope::Members(category_id) => {
                let Some(category) = self.categories.get_mut(category_id) else {
                    return;
                };
                *category.member_ids_mut() = keys.to_vec();
                renumber_members(&mut self.node_types, category_id, keys, base);
            }
        }
    }
}
