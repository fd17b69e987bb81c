//! Core types for reorderable collections
//!
//! These types describe what can be dragged, where it can land,
//! and how the order key is written back.

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity within its collection scope
pub type EntityId = String;

/// Granularity of a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    /// A container moving among its siblings (e.g. a category)
    Container,
    /// An item moving within its container (e.g. a node type in a category)
    Item,
}

/// Where the dragged entity lands relative to the hovered target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPosition {
    /// Land in front of the target (pointer above its midpoint)
    Before,
    /// Land behind the target (pointer on or below its midpoint)
    After,
}

/// Bounding rectangle of a rendered row, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Vertical midpoint
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Offset used when renumbering the order key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBase {
    ZeroBased,
    #[default]
    OneBased,
}

impl OrderBase {
    /// Order value for the entity at `index` in the new sequence
    ///
    /// Saturates at `u32::MAX` for indices beyond the key range.
    pub fn order_at(self, index: usize) -> u32 {
        let offset = match self {
            OrderBase::ZeroBased => 0,
            OrderBase::OneBased => 1,
        };
        u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_add(offset)
    }
}

/// The sequence a commit rewrites
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "containerId", rename_all = "camelCase")]
pub enum ReorderScope {
    /// The flat list of containers
    Containers,
    /// The members of one container
    Members(EntityId),
}

/// Any entity participating in reordering
pub trait OrderedEntity {
    /// Stable identifier within the collection scope
    fn id(&self) -> &str;

    /// Current order key
    fn order(&self) -> u32;

    /// Overwrite the order key
    fn set_order(&mut self, order: u32);
}

/// An entity that belongs to exactly one container
pub trait ItemEntity: OrderedEntity {
    /// Id of the owning container
    fn container_id(&self) -> &str;
}

/// An entity that owns an ordered sequence of item ids
///
/// `member_ids` order is the display order of the members and is independent
/// of the container's own `order` among its siblings.
pub trait ContainerEntity: OrderedEntity {
    fn member_ids(&self) -> &[EntityId];

    fn member_ids_mut(&mut self) -> &mut Vec<EntityId>;

    fn contains_member(&self, item_id: &str) -> bool {
        self.member_ids().iter().any(|m| m == item_id)
    }
}
