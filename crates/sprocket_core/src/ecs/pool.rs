use crate::ecs::{Component, Entity};
use std::any::{type_name, Any};
use std::collections::HashMap;

/// Densely packed storage for one component type.
///
/// Values live in a contiguous `Vec<T>` with no gaps. Two index maps tie
/// dense slots to entities; removal swaps the last slot into the hole and
/// patches both maps, so insert, remove and lookup are all O(1).
pub struct Pool<T> {
    data: Vec<T>,
    slot_of: HashMap<Entity, usize>,
    entity_at: Vec<Entity>,
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            slot_of: HashMap::new(),
            entity_at: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slot_of.contains_key(&entity)
    }

    /// Store `value` for `entity`. An existing value is replaced in place
    /// and returned.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(&slot) = self.slot_of.get(&entity) {
            return Some(std::mem::replace(&mut self.data[slot], value));
        }
        let slot = self.data.len();
        self.data.push(value);
        self.entity_at.push(entity);
        self.slot_of.insert(entity, slot);
        None
    }

    /// Remove the value for `entity` via swap-remove.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slot_of.remove(&entity)?;
        let value = self.data.swap_remove(slot);
        self.entity_at.swap_remove(slot);
        if let Some(&moved) = self.entity_at.get(slot) {
            self.slot_of.insert(moved, slot);
        }
        Some(value)
    }

    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot_of.get(&entity).map(|&slot| &self.data[slot])
    }

    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = *self.slot_of.get(&entity)?;
        Some(&mut self.data[slot])
    }

    /// Dense values in slot order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Owning entity of each dense slot.
    pub fn entities(&self) -> &[Entity] {
        &self.entity_at
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entity_at.iter().copied().zip(self.data.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entity_at.iter().copied().zip(self.data.iter_mut())
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a pool, so the registry can hold pools of
/// different component types side by side.
pub trait ErasedPool {
    /// Drop the entity's value, if any. Returns whether one was removed.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    fn contains(&self, entity: Entity) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn component_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedPool for Pool<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn contains(&self, entity: Entity) -> bool {
        Pool::contains(self, entity)
    }

    fn len(&self) -> usize {
        Pool::len(self)
    }

    fn component_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
