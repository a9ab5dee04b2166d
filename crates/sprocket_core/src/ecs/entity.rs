//! Entity handles and slot bookkeeping
//!
//! Entities are lightweight handles (4 bytes). All component data lives in
//! pools inside the registry; an `Entity` never owns anything.

use crate::ecs::Signature;
use std::collections::VecDeque;
use std::fmt;

/// Raw entity identifier.
pub type EntityId = u32;

/// Entity handle (identity only)
///
/// Ids are unique among live entities. A freed id goes back to the
/// allocator and may be handed out again by a later `create_entity`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: EntityId,
}

impl Entity {
    pub(crate) const fn new(id: EntityId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.id as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}", self.id)
    }
}

/// Lifecycle of a registry slot.
///
/// `Pending -> Active -> PendingKill -> Freed`. Pending entities are
/// invisible to systems until the next `Registry::update`; entities marked
/// for destruction keep their components until that same flush.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntityState {
    Pending,
    Active,
    PendingKill,
    Freed,
}

impl EntityState {
    /// Whether the slot still refers to a live entity.
    #[inline]
    pub fn is_alive(self) -> bool {
        !matches!(self, EntityState::Freed)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EntitySlot {
    pub(crate) state: EntityState,
    pub(crate) signature: Signature,
    /// Set once the entity has been flushed into system membership.
    pub(crate) activated: bool,
}

/// Hands out entity ids and tracks per-slot state and signatures.
///
/// Freed ids are recycled in the order they were released.
#[derive(Debug, Default)]
pub(crate) struct EntityAllocator {
    slots: Vec<EntitySlot>,
    free_ids: VecDeque<EntityId>,
    live: usize,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh or recycled id. The slot starts `Pending` with an
    /// empty signature.
    pub fn alloc(&mut self) -> Entity {
        self.live += 1;
        if let Some(id) = self.free_ids.pop_front() {
            let slot = &mut self.slots[id as usize];
            slot.state = EntityState::Pending;
            slot.signature.reset();
            slot.activated = false;
            return Entity::new(id);
        }

        let id = self.slots.len() as EntityId;
        self.slots.push(EntitySlot {
            state: EntityState::Pending,
            signature: Signature::empty(),
            activated: false,
        });
        Entity::new(id)
    }

    /// Release a slot for reuse. Returns false if it was already free.
    pub fn free(&mut self, entity: Entity) -> bool {
        let Some(slot) = self.slots.get_mut(entity.index()) else {
            return false;
        };
        if !slot.state.is_alive() {
            return false;
        }
        slot.state = EntityState::Freed;
        slot.signature.reset();
        slot.activated = false;
        self.free_ids.push_back(entity.id());
        self.live -= 1;
        true
    }

    /// Live slot for `entity`, or `None` if it was never allocated or has
    /// been freed.
    pub fn get(&self, entity: Entity) -> Option<&EntitySlot> {
        self.slots
            .get(entity.index())
            .filter(|slot| slot.state.is_alive())
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut EntitySlot> {
        self.slots
            .get_mut(entity.index())
            .filter(|slot| slot.state.is_alive())
    }

    pub fn state(&self, entity: Entity) -> Option<EntityState> {
        self.slots.get(entity.index()).map(|slot| slot.state)
    }

    /// Entities that are not freed, in id order.
    pub fn iter_alive(&self) -> impl Iterator<Item = (Entity, &EntitySlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.state.is_alive())
            .map(|(id, slot)| (Entity::new(id as EntityId), slot))
    }

    pub fn live(&self) -> usize {
        self.live
    }
}
