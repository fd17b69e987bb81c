//! Shared fixtures for unit tests

use serde::{Deserialize, Serialize};

use crate::commit::{OrderedCollection, OrderedList};
use crate::types::{ContainerEntity, EntityId, OrderBase, OrderedEntity, ReorderScope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub order: u32,
}

impl OrderedEntity for Entry {
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

pub fn entry(id: &str, order: u32) -> Entry {
    Entry {
        id: id.to_string(),
        order,
    }
}

/// `[A(1), B(2), C(3)]`
pub fn abc() -> OrderedList<Entry> {
    OrderedList::new(vec![entry("A", 1), entry("B", 2), entry("C", 3)]).unwrap()
}

pub fn keys(ids: &[&str]) -> Vec<EntityId> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// A container owning item ids
#[derive(Debug, Clone, PartialEq)]
pub struct Shelf {
    pub id: String,
    pub order: u32,
    pub members: Vec<EntityId>,
}

impl OrderedEntity for Shelf {
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

impl ContainerEntity for Shelf {
    fn member_ids(&self) -> &[EntityId] {
        &self.members
    }
    fn member_ids_mut(&mut self) -> &mut Vec<EntityId> {
        &mut self.members
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shelves(pub Vec<Shelf>);

impl OrderedCollection for Shelves {
    fn sequence(&self, scope: &ReorderScope) -> Option<Vec<EntityId>> {
        match scope {
            ReorderScope::Containers => Some(self.0.iter().map(|s| s.id.clone()).collect()),
            ReorderScope::Members(k) => self.0.iter().find(|s| &s.id == k).map(|s| s.members.clone()),
        }
    }

    fn container_of(&self, item_id: &str) -> Option<EntityId> {
        self.0
            .iter()
            .find(|s| s.contains_member(item_id))
            .map(|s| s.id.clone())
    }

    fn apply_sequence(&mut self, scope: &ReorderScope, keys: &[EntityId], _base: OrderBase) {
        if let ReorderScope::Members(k) = scope {
            if let Some(shelf) = self.0.iter_mut().find(|s| &s.id == k) {
                *shelf.member_ids_mut() = keys.to_vec();
            }
        }
    }
}

/// `K: [x, y, z]`, `L: [p, q]`
pub fn shelves() -> Shelves {
    Shelves(vec![
        Shelf {
            id: "K".to_string(),
            order: 1,
            members: keys(&["x", "y", "z"]),
        },
        Shelf {
            id: "L".to_string(),
            order: 2,
            members: keys(&["p", "q"]),
        },
    ])
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
