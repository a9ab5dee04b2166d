// system.rs - System trait, matched entity sets and the per-pass view
//
// A system declares the component types it needs once, per type. The
// registry keeps the set of entities matching that declaration up to date
// and hands it to the system together with component access when the
// application runs the system.

use crate::ecs::entity::EntityAllocator;
use crate::ecs::{
    Commands, Component, ComponentSet, ComponentStorage, EcsError, Entity, Signature,
};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// A unit of per-frame logic over every entity carrying `Requires`.
///
/// `Context` is whatever external state the pass needs: a delta time, a
/// render surface, an event bus. Structural changes (spawning, killing,
/// adding or removing components) go through [`SystemView::commands`] and
/// take effect at the next `Registry::update`.
///
/// ```ignore
/// struct MovementSystem;
///
/// impl System for MovementSystem {
///     type Requires = (Transform, RigidBody);
///     type Context<'c> = f64;
///
///     fn run(&mut self, mut view: SystemView<'_>, dt: f64) -> Result<(), EcsError> {
///         for &entity in view.entities() {
///             let velocity = view.get::<RigidBody>(entity)?.velocity;
///             view.get_mut::<Transform>(entity)?.position += velocity * dt as f32;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait System: 'static {
    type Requires: ComponentSet;

    type Context<'c>;

    fn run(&mut self, view: SystemView<'_>, ctx: Self::Context<'_>) -> Result<(), EcsError>;

    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

/// Dense set of entities with O(1) insert and remove.
///
/// Iteration follows insertion order until a removal swaps the last entry
/// into the vacated position.
#[derive(Debug, Default, Clone)]
pub struct EntitySet {
    dense: Vec<Entity>,
    position: HashMap<Entity, usize>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the entity was already present.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.position.contains_key(&entity) {
            return false;
        }
        self.position.insert(entity, self.dense.len());
        self.dense.push(entity);
        true
    }

    /// Returns false if the entity was not present.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(index) = self.position.remove(&entity) else {
            return false;
        };
        self.dense.swap_remove(index);
        if let Some(&moved) = self.dense.get(index) {
            self.position.insert(moved, index);
        }
        true
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.position.contains_key(&entity)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.dense
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.dense.iter().copied()
    }
}

/// Borrowed access handed to a system for the duration of one pass.
///
/// Component values can be read and written in place. Component and entity
/// existence cannot change here; use [`SystemView::commands`].
pub struct SystemView<'w> {
    entities: &'w [Entity],
    allocator: &'w EntityAllocator,
    components: &'w mut ComponentStorage,
    commands: &'w mut Commands,
}

impl<'w> SystemView<'w> {
    pub(crate) fn new(
        entities: &'w [Entity],
        allocator: &'w EntityAllocator,
        components: &'w mut ComponentStorage,
        commands: &'w mut Commands,
    ) -> Self {
        Self {
            entities,
            allocator,
            components,
            commands,
        }
    }

    /// Entities currently matching the system's signature.
    pub fn entities(&self) -> &'w [Entity] {
        self.entities
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.components.get::<T>(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.components.get_mut::<T>(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> Result<bool, EcsError> {
        let slot = self
            .allocator
            .get(entity)
            .ok_or(EcsError::EntityNotFound { entity })?;
        Ok(self
            .components
            .types()
            .id_of::<T>()
            .is_some_and(|id| slot.signature.contains(id)))
    }

    /// Deferred structural changes, applied at the next `Registry::update`.
    pub fn commands(&mut self) -> &mut Commands {
        self.commands
    }
}

pub(crate) struct SystemSlot {
    pub(crate) name: &'static str,
    pub(crate) signature: Signature,
    pub(crate) entities: EntitySet,
    pub(crate) instance: Box<dyn Any>,
}

/// Registered systems in registration order.
#[derive(Default)]
pub(crate) struct Systems {
    slots: Vec<SystemSlot>,
    index: HashMap<TypeId, usize>,
}

impl Systems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns the replaced instance, if any.
    pub fn insert<S: System>(&mut self, slot: SystemSlot) -> Option<Box<dyn Any>> {
        let type_id = TypeId::of::<S>();
        if let Some(&index) = self.index.get(&type_id) {
            let old = std::mem::replace(&mut self.slots[index], slot);
            return Some(old.instance);
        }
        self.index.insert(type_id, self.slots.len());
        self.slots.push(slot);
        None
    }

    pub fn remove<S: System>(&mut self) -> Option<SystemSlot> {
        let index = self.index.remove(&TypeId::of::<S>())?;
        let slot = self.slots.remove(index);
        for position in self.index.values_mut() {
            if *position > index {
                *position -= 1;
            }
        }
        Some(slot)
    }

    pub fn slot<S: System>(&self) -> Result<&SystemSlot, EcsError> {
        self.index
            .get(&TypeId::of::<S>())
            .map(|&index| &self.slots[index])
            .ok_or(EcsError::SystemNotRegistered {
                system: type_name::<S>(),
            })
    }

    pub fn slot_mut<S: System>(&mut self) -> Result<&mut SystemSlot, EcsError> {
        match self.index.get(&TypeId::of::<S>()) {
            Some(&index) => Ok(&mut self.slots[index]),
            None => Err(EcsError::SystemNotRegistered {
                system: type_name::<S>(),
            }),
        }
    }

    pub fn contains<S: System>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<S>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemSlot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SystemSlot> {
        self.slots.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_set_swap_removes() {
        let mut set = EntitySet::new();
        for id in 0..4 {
            assert!(set.insert(Entity::new(id)));
        }
        assert!(!set.insert(Entity::new(2)));

        assert!(set.remove(Entity::new(0)));
        assert!(!set.remove(Entity::new(0)));
        assert_eq!(set.len(), 3);
        assert_eq!(set.as_slice()[0], Entity::new(3));
        assert!(set.contains(Entity::new(1)));

        // Position map stays consistent after the swap.
        assert!(set.remove(Entity::new(3)));
        let ids: Vec<_> = set.iter().map(|e| e.id()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&1) && ids.contains(&2));
    }
}
