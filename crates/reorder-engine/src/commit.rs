//! Reorder commits
//!
//! A commit is a value transformation: the input collection is cloned,
//! the governing sequence is rewritten and every entity in it is renumbered.
//! Readers of the original collection never see a partial reorder.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ReorderError, Result};
use crate::gate::Rejection;
use crate::session::{DragSession, DropTarget};
use crate::types::{DropPosition, EntityId, ItemEntity, OrderBase, OrderedEntity, ReorderScope};

/// A collection the engine can reorder
///
/// Implemented once per call site. The engine only reads through this trait
/// and only writes to clones.
pub trait OrderedCollection: Clone {
    /// Current key order of the sequence governed by `scope`
    ///
    /// `None` if the scope does not exist (e.g. an unknown container).
    fn sequence(&self, scope: &ReorderScope) -> Option<Vec<EntityId>>;

    /// Container the item currently belongs to
    fn container_of(&self, item_id: &str) -> Option<EntityId>;

    /// Rewrite the sequence governed by `scope` to `keys` and renumber it
    fn apply_sequence(&mut self, scope: &ReorderScope, keys: &[EntityId], base: OrderBase);
}

/// Result of a commit attempt
#[derive(Debug, Clone)]
pub enum CommitOutcome<C> {
    /// The sequence was rewritten and renumbered
    Applied {
        collection: C,
        /// Whether the dragged entity actually changed position
        moved: bool,
    },
    /// The commit was abandoned; `collection` is the unchanged input
    Aborted { collection: C, reason: Rejection },
}

impl<C> CommitOutcome<C> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn collection(&self) -> &C {
        match self {
            Self::Applied { collection, .. } | Self::Aborted { collection, .. } => collection,
        }
    }

    pub fn into_collection(self) -> C {
        match self {
            Self::Applied { collection, .. } | Self::Aborted { collection, .. } => collection,
        }
    }
}

/// Move `dragged_id` next to `target_id` within `keys`
///
/// The target index is located after the dragged key is removed, then the
/// dragged key is inserted at that index (`Before`) or one past it (`After`).
/// Returns `None` if either key is missing.
pub fn reorder_keys(
    keys: &[EntityId],
    dragged_id: &str,
    target_id: &str,
    position: DropPosition,
) -> Option<Vec<EntityId>> {
    let from_ix = keys.iter().position(|k| k == dragged_id)?;

    let mut next = keys.to_vec();
    let dragged = next.remove(from_ix);

    let target_ix = next.iter().position(|k| k == target_id)?;
    let insert_ix = match position {
        DropPosition::Before => target_ix,
        DropPosition::After => target_ix + 1,
    };

    next.insert(insert_ix, dragged);
    Some(next)
}

/// Assign every entity its positional order, overwriting prior values
pub fn renumber<T: OrderedEntity>(entities: &mut [T], base: OrderBase) {
    for (ix, entity) in entities.iter_mut().enumerate() {
        entity.set_order(base.order_at(ix));
    }
}

/// Stable sort by order key; ties keep their current relative position
pub fn sort_by_order<T: OrderedEntity>(entities: &mut [T]) {
    entities.sort_by_key(|e| e.order());
}

/// Ids of the items in `container_id`, in order-key order
pub fn member_sequence<I: ItemEntity>(items: &[I], container_id: &str) -> Vec<EntityId> {
    let mut members: Vec<&I> = items
        .iter()
        .filter(|i| i.container_id() == container_id)
        .collect();
    members.sort_by_key(|i| i.order());
    members.into_iter().map(|i| i.id().to_string()).collect()
}

/// Renumber the items of `container_id` to follow `keys`
///
/// Items of other containers are left untouched. Members missing from
/// `keys` are numbered after the listed ones, keeping their relative order.
pub fn renumber_members<I: ItemEntity>(
    items: &mut [I],
    container_id: &str,
    keys: &[EntityId],
    base: OrderBase,
) {
    let mut trailing: Vec<usize> = Vec::new();
    for (ix, item) in items.iter().enumerate() {
        if item.container_id() == container_id && !keys.iter().any(|k| k == item.id()) {
            trailing.push(ix);
        }
    }
    trailing.sort_by_key(|&ix| items[ix].order());

    for item in items.iter_mut() {
        if item.container_id() != container_id {
            continue;
        }
        if let Some(pos) = keys.iter().position(|k| k == item.id()) {
            item.set_order(base.order_at(pos));
        }
    }
    for (offset, ix) in trailing.into_iter().enumerate() {
        items[ix].set_order(base.order_at(keys.len() + offset));
    }
}

/// Apply a resolved gesture to `collection`
///
/// Never mutates the input. Aborts (returning an unchanged clone) when the
/// session has no scope, the dragged item left its origin container, or
/// either entity is no longer in the governing sequence.
pub fn commit<C: OrderedCollection>(
    session: &DragSession,
    drop_target: &DropTarget,
    collection: &C,
    base: OrderBase,
) -> CommitOutcome<C> {
    let abort = |reason: Rejection| {
        log::debug!(
            "Commit of '{}' onto '{}' aborted: {}",
            session.dragged_id,
            drop_target.target_id,
            reason
        );
        CommitOutcome::Aborted {
            collection: collection.clone(),
            reason,
        }
    };

    let Some(scope) = session.scope() else {
        return abort(Rejection::ContainerMismatch);
    };

    if let ReorderScope::Members(origin) = &scope {
        let still_member =
            collection.container_of(&session.dragged_id).as_deref() == Some(origin.as_str());
        let same_target_scope = drop_target
            .container_id
            .as_ref()
            .map_or(true, |hovered| hovered == origin);
        if !still_member || !same_target_scope {
            return abort(Rejection::ContainerMismatch);
        }
    }

    let Some(keys) = collection.sequence(&scope) else {
        return abort(Rejection::TargetVanished);
    };

    let Some(next) = reorder_keys(
        &keys,
        &session.dragged_id,
        &drop_target.target_id,
        drop_target.position,
    ) else {
        return abort(Rejection::TargetVanished);
    };

    let moved = next != keys;
    let mut reordered = collection.clone();
    reordered.apply_sequence(&scope, &next, base);

    CommitOutcome::Applied {
        collection: reordered,
        moved,
    }
}

/// A flat, order-keyed list of entities
///
/// The ready-made collection for container-level reordering. Items are
/// kept sorted by their order key. Serialized as a plain array; loading goes
/// through [`OrderedList::new`], so unsorted input is sorted and duplicate
/// ids are refused.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList<T> {
    items: Vec<T>,
}

impl<T: Serialize> Serialize for OrderedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for OrderedList<T>
where
    T: OrderedEntity + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::new(items).map_err(serde::de::Error::custom)
    }
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: OrderedEntity> OrderedList<T> {
    /// Build a list, sorting by the existing order keys
    ///
    /// Fails if two entities share an id.
    pub fn new(mut items: Vec<T>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(ReorderError::DuplicateId(item.id().to_string()));
            }
        }
        sort_by_order(&mut items);
        Ok(Self { items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().map(|i| i.id().to_string()).collect()
    }

    /// Append an entity after the current last one
    ///
    /// The whole list is renumbered, so loaded gaps or oversized keys are
    /// normalized too.
    pub fn push(&mut self, item: T, base: OrderBase) -> Result<()> {
        if self.get(item.id()).is_some() {
            return Err(ReorderError::DuplicateId(item.id().to_string()));
        }
        self.items.push(item);
        renumber(&mut self.items, base);
        Ok(())
    }

    /// Renumber every entity in its current position
    pub fn renumber(&mut self, base: OrderBase) {
        renumber(&mut self.items, base);
    }

    /// Remove an entity and close the gap it leaves
    pub fn remove(&mut self, id: &str, base: OrderBase) -> Option<T> {
        let ix = self.items.iter().position(|i| i.id() == id)?;
        let removed = self.items.remove(ix);
        renumber(&mut self.items, base);
        Some(removed)
    }
}

impl<T: OrderedEntity + Clone> OrderedCollection for OrderedList<T> {
    fn sequence(&self, scope: &ReorderScope) -> Option<Vec<EntityId>> {
        match scope {
            ReorderScope::Containers => Some(self.ids()),
            ReorderScope::Members(_) => None,
        }
    }

    fn container_of(&self, _item_id: &str) -> Option<EntityId> {
        None
    }

    fn apply_sequence(&mut self, scope: &ReorderScope, keys: &[EntityId], base: OrderBase) {
        if *scope != ReorderScope::Containers {
            return;
        }

        let mut remaining = std::mem::take(&mut self.items);
        let mut reordered = Vec::with_capacity(remaining.len());
        for key in keys {
            if let Some(ix) = remaining.iter().position(|i| i.id() == key) {
                reordered.push(remaining.remove(ix));
            }
        }
        reordered.append(&mut remaining);

        renumber(&mut reordered, base);
        self.items = reordered;
    }
}
