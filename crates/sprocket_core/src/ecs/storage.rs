// storage.rs - Per-type component pools behind one lookup
//
// Pools are indexed by ComponentId. A type may be registered (for example
// by a system's requirements) before any entity has added it; its pool is
// created on first insert.

use crate::ecs::{
    Component, ComponentId, ComponentTypes, EcsError, Entity, ErasedPool, Pool, Signature,
};
use std::any::type_name;

#[derive(Default)]
pub struct ComponentStorage {
    types: ComponentTypes,
    pools: Vec<Option<Box<dyn ErasedPool>>>,
}

impl ComponentStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> &ComponentTypes {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut ComponentTypes {
        &mut self.types
    }

    /// Id of `T` or `UnknownComponentType`.
    pub fn id_of<T: Component>(&self) -> Result<ComponentId, EcsError> {
        self.types
            .id_of::<T>()
            .ok_or(EcsError::UnknownComponentType {
                component: type_name::<T>(),
            })
    }

    /// Store `value` for `entity`, creating `T`'s pool on first use.
    /// Returns the component id and any value it replaced.
    pub fn insert<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<(ComponentId, Option<T>), EcsError> {
        let id = self.types.register::<T>()?;
        let replaced = self.pool_or_create::<T>(id).insert(entity, value);
        Ok((id, replaced))
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        let id = self.id_of::<T>()?;
        self.typed_pool_mut::<T>(id)
            .and_then(|pool| pool.remove(entity))
            .ok_or(EcsError::ComponentNotPresent {
                entity,
                component: type_name::<T>(),
            })
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        let id = self.id_of::<T>()?;
        self.typed_pool::<T>(id)
            .and_then(|pool| pool.get(entity))
            .ok_or(EcsError::ComponentNotPresent {
                entity,
                component: type_name::<T>(),
            })
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        let id = self.id_of::<T>()?;
        self.typed_pool_mut::<T>(id)
            .and_then(|pool| pool.get_mut(entity))
            .ok_or(EcsError::ComponentNotPresent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Pool for `T`. A registered type with no values yet yields `None`.
    pub fn pool<T: Component>(&self) -> Result<Option<&Pool<T>>, EcsError> {
        let id = self.id_of::<T>()?;
        Ok(self.typed_pool::<T>(id))
    }

    /// Number of `T` values stored.
    pub fn len_of<T: Component>(&self) -> Result<usize, EcsError> {
        Ok(self.pool::<T>()?.map_or(0, Pool::len))
    }

    /// Drop every component named by `signature` for `entity`.
    pub fn remove_all(&mut self, entity: Entity, signature: Signature) -> usize {
        let mut removed = 0;
        for id in signature.iter() {
            if let Some(Some(pool)) = self.pools.get_mut(id as usize) {
                if pool.remove_entity(entity) {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Pool sizes keyed by component name, in id order.
    pub fn pool_sizes(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.pools
            .iter()
            .flatten()
            .map(|pool| (pool.component_name(), pool.len()))
    }

    fn pool_or_create<T: Component>(&mut self, id: ComponentId) -> &mut Pool<T> {
        let index = id as usize;
        if self.pools.len() <= index {
            self.pools.resize_with(index + 1, || None);
        }
        self.pools[index]
            .get_or_insert_with(|| Box::new(Pool::<T>::new()))
            .as_any_mut()
            .downcast_mut::<Pool<T>>()
            .unwrap_or_else(|| unreachable!("pool {id} holds a different component type"))
    }

    fn typed_pool<T: Component>(&self, id: ComponentId) -> Option<&Pool<T>> {
        self.pools
            .get(id as usize)?
            .as_ref()?
            .as_any()
            .downcast_ref::<Pool<T>>()
    }

    fn typed_pool_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut Pool<T>> {
        self.pools
            .get_mut(id as usize)?
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<Pool<T>>()
    }
}
