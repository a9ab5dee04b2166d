// registry.rs - Entity lifecycle, components, systems and the frame flush

use crate::ecs::entity::{EntityAllocator, EntitySlot};
use crate::ecs::system::{SystemSlot, Systems};
use crate::ecs::{
    Commands, Component, ComponentId, ComponentSet, ComponentStorage, EcsError, Entity,
    EntitySet, EntityState, Signature, System, SystemView,
};
use std::any::type_name;

/// What a call to [`Registry::update`] did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    /// Deferred commands applied.
    pub commands: usize,
    /// Entities that became visible to systems.
    pub added: usize,
    /// Entities destroyed and released for reuse.
    pub killed: usize,
}

/// The ECS orchestrator.
///
/// Owns every pool and every system. Entity creation and destruction are
/// queued and applied by [`Registry::update`], the single synchronization
/// point, which the application calls once per frame. Component changes
/// update signatures immediately.
pub struct Registry {
    entities: EntityAllocator,
    components: ComponentStorage,
    systems: Systems,
    commands: Commands,
    entities_to_add: Vec<Entity>,
    entities_to_kill: Vec<Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            components: ComponentStorage::new(),
            systems: Systems::new(),
            commands: Commands::new(),
            entities_to_add: Vec::new(),
            entities_to_kill: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Entity lifecycle
    // ------------------------------------------------------------------

    /// Allocate an entity. It is invisible to systems until the next
    /// [`Registry::update`].
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.alloc();
        self.entities_to_add.push(entity);
        tracing::trace!(entity = entity.id(), "entity created");
        entity
    }

    /// Mark an entity for destruction at the next [`Registry::update`].
    ///
    /// Its components stay readable until then. Killing an entity twice is
    /// a no-op.
    pub fn kill_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        let slot = self.slot_mut(entity)?;
        if slot.state == EntityState::PendingKill {
            return Ok(());
        }
        slot.state = EntityState::PendingKill;
        self.entities_to_kill.push(entity);
        tracing::trace!(entity = entity.id(), "entity marked for destruction");
        Ok(())
    }

    /// Apply deferred commands, then activate queued entities, then destroy
    /// entities marked for death.
    ///
    /// Commands queued while this runs wait for the next call. A failing
    /// command is logged and the flush continues; the first failure is
    /// returned once the queues have been drained.
    pub fn update(&mut self) -> Result<FlushReport, EcsError> {
        let mut report = FlushReport::default();
        let mut first_error = None;

        for command in self.commands.take() {
            report.commands += 1;
            if let Err(err) = command(self) {
                tracing::error!(error = %err, "deferred command failed");
                first_error.get_or_insert(err);
            }
        }

        for entity in std::mem::take(&mut self.entities_to_add) {
            let Some(slot) = self.entities.get_mut(entity) else {
                continue;
            };
            if slot.state == EntityState::Pending {
                slot.state = EntityState::Active;
            }
            slot.activated = true;
            let signature = slot.signature;
            self.add_to_systems(entity, signature);
            report.added += 1;
        }

        for entity in std::mem::take(&mut self.entities_to_kill) {
            let Some(slot) = self.entities.get(entity) else {
                continue;
            };
            let signature = slot.signature;
            self.remove_from_systems(entity);
            self.components.remove_all(entity, signature);
            self.entities.free(entity);
            report.killed += 1;
        }

        if report != FlushReport::default() {
            tracing::trace!(
                commands = report.commands,
                added = report.added,
                killed = report.killed,
                "registry flushed"
            );
        }

        match first_error {
            Some(err) => Err(EcsError::CommandFailed {
                source: Box::new(err),
            }),
            None => Ok(report),
        }
    }

    /// Whether the entity has not been freed.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.get(entity).is_some()
    }

    /// Lifecycle state; `None` for ids that were never allocated.
    pub fn entity_state(&self, entity: Entity) -> Option<EntityState> {
        self.entities.state(entity)
    }

    /// Live (not freed) entities, including pending ones.
    pub fn entity_count(&self) -> usize {
        self.entities.live()
    }

    pub fn signature(&self, entity: Entity) -> Result<Signature, EcsError> {
        Ok(self.slot(entity)?.signature)
    }

    /// Chaining helper bound to one entity.
    pub fn entity_mut(&mut self, entity: Entity) -> Result<EntityMut<'_>, EcsError> {
        self.slot(entity)?;
        Ok(EntityMut {
            registry: self,
            entity,
        })
    }

    /// Deferred queue, flushed at the start of the next [`Registry::update`].
    pub fn commands(&mut self) -> &mut Commands {
        &mut self.commands
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Register `T` ahead of first use.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentId, EcsError> {
        self.components.types_mut().register::<T>()
    }

    pub fn component_id<T: Component>(&self) -> Option<ComponentId> {
        self.components.types().id_of::<T>()
    }

    /// Attach `value` to `entity`, replacing any existing `T`.
    ///
    /// The signature bit is set before this returns. Entities already
    /// visible to systems have their membership re-evaluated right away;
    /// pending entities join systems at the next [`Registry::update`].
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<(), EcsError> {
        self.slot(entity)?;
        let (id, replaced) = self.components.insert(entity, value)?;
        if replaced.is_some() {
            tracing::trace!(
                entity = entity.id(),
                component = type_name::<T>(),
                "component replaced"
            );
        }

        let slot = self.slot_mut(entity)?;
        slot.signature.set(id);
        let (activated, signature) = (slot.activated, slot.signature);
        if activated {
            self.refresh_membership(entity, signature);
        }
        Ok(())
    }

    /// Detach and return `entity`'s `T`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        self.slot(entity)?;
        let id = self.components.id_of::<T>()?;
        let value = self.components.remove::<T>(entity)?;

        let slot = self.slot_mut(entity)?;
        slot.signature.clear(id);
        let (activated, signature) = (slot.activated, slot.signature);
        if activated {
            self.refresh_membership(entity, signature);
        }
        Ok(value)
    }

    /// Signature bit test. Types never registered are simply absent.
    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool, EcsError> {
        let signature = self.slot(entity)?.signature;
        Ok(self
            .component_id::<T>()
            .is_some_and(|id| signature.contains(id)))
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.slot(entity)?;
        self.components.get::<T>(entity)
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.slot(entity)?;
        self.components.get_mut::<T>(entity)
    }

    /// Number of live `T` values.
    pub fn pool_len<T: Component>(&self) -> Result<usize, EcsError> {
        self.components.len_of::<T>()
    }

    pub fn components(&self) -> &ComponentStorage {
        &self.components
    }

    // ------------------------------------------------------------------
    // Systems
    // ------------------------------------------------------------------

    /// Register `system`, recording `S::Requires` as its signature.
    ///
    /// The matched set is seeded from every entity already visible to
    /// systems. Adding a type that is already registered replaces the
    /// instance.
    pub fn add_system<S: System>(&mut self, system: S) -> Result<(), EcsError> {
        let signature = S::Requires::signature(self.components.types_mut())?;
        let name = system.name();

        let mut entities = EntitySet::new();
        for (entity, slot) in self.entities.iter_alive() {
            if slot.activated && slot.signature.contains_all(signature) {
                entities.insert(entity);
            }
        }

        let slot = SystemSlot {
            name,
            signature,
            entities,
            instance: Box::new(system),
        };
        if self.systems.insert::<S>(slot).is_some() {
            tracing::warn!(system = name, "system replaced");
        } else {
            tracing::debug!(
                system = name,
                requires = ?S::Requires::names(),
                %signature,
                "system registered"
            );
        }
        Ok(())
    }

    /// Unregister `S` and hand back the instance.
    pub fn remove_system<S: System>(&mut self) -> Result<S, EcsError> {
        let slot = self.systems.remove::<S>().ok_or(EcsError::SystemNotRegistered {
            system: type_name::<S>(),
        })?;
        tracing::debug!(system = slot.name, "system removed");
        slot.instance
            .downcast::<S>()
            .map(|boxed| *boxed)
            .map_err(|_| EcsError::SystemNotRegistered {
                system: type_name::<S>(),
            })
    }

    pub fn get_system<S: System>(&self) -> Result<&S, EcsError> {
        self.systems
            .slot::<S>()?
            .instance
            .downcast_ref::<S>()
            .ok_or(EcsError::SystemNotRegistered {
                system: type_name::<S>(),
            })
    }

    pub fn get_system_mut<S: System>(&mut self) -> Result<&mut S, EcsError> {
        self.systems
            .slot_mut::<S>()?
            .instance
            .downcast_mut::<S>()
            .ok_or(EcsError::SystemNotRegistered {
                system: type_name::<S>(),
            })
    }

    pub fn has_system<S: System>(&self) -> bool {
        self.systems.contains::<S>()
    }

    /// Entities currently matched by `S`.
    pub fn system_entities<S: System>(&self) -> Result<&[Entity], EcsError> {
        Ok(self.systems.slot::<S>()?.entities.as_slice())
    }

    pub fn system_signature<S: System>(&self) -> Result<Signature, EcsError> {
        Ok(self.systems.slot::<S>()?.signature)
    }

    /// Registered system names in registration order.
    pub fn system_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(|slot| slot.name)
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Run one pass of `S` over its matched entities.
    pub fn run_system<S: System>(&mut self, ctx: S::Context<'_>) -> Result<(), EcsError> {
        let slot = self.systems.slot_mut::<S>()?;
        let SystemSlot {
            instance, entities, ..
        } = slot;
        let system = instance
            .downcast_mut::<S>()
            .ok_or(EcsError::SystemNotRegistered {
                system: type_name::<S>(),
            })?;
        let view = SystemView::new(
            entities.as_slice(),
            &self.entities,
            &mut self.components,
            &mut self.commands,
        );
        system.run(view, ctx)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn slot(&self, entity: Entity) -> Result<&EntitySlot, EcsError> {
        self.entities
            .get(entity)
            .ok_or(EcsError::EntityNotFound { entity })
    }

    fn slot_mut(&mut self, entity: Entity) -> Result<&mut EntitySlot, EcsError> {
        self.entities
            .get_mut(entity)
            .ok_or(EcsError::EntityNotFound { entity })
    }

    fn add_to_systems(&mut self, entity: Entity, signature: Signature) {
        for system in self.systems.iter_mut() {
            if signature.contains_all(system.signature) {
                system.entities.insert(entity);
            }
        }
    }

    fn remove_from_systems(&mut self, entity: Entity) {
        for system in self.systems.iter_mut() {
            system.entities.remove(entity);
        }
    }

    fn refresh_membership(&mut self, entity: Entity, signature: Signature) {
        for system in self.systems.iter_mut() {
            if signature.contains_all(system.signature) {
                system.entities.insert(entity);
            } else {
                system.entities.remove(entity);
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// A registry borrow bound to one entity, for chained setup.
///
/// ```ignore
/// let tank = registry.create_entity();
/// registry
///     .entity_mut(tank)?
///     .with(Transform::default())?
///     .with(RigidBody::new(10.0, 20.0))?;
/// ```
pub struct EntityMut<'r> {
    registry: &'r mut Registry,
    entity: Entity,
}

impl<'r> EntityMut<'r> {
    pub fn id(&self) -> Entity {
        self.entity
    }

    pub fn with<T: Component>(self, value: T) -> Result<Self, EcsError> {
        self.registry.add_component(self.entity, value)?;
        Ok(self)
    }

    pub fn remove<T: Component>(&mut self) -> Result<T, EcsError> {
        self.registry.remove_component::<T>(self.entity)
    }

    pub fn has<T: Component>(&self) -> Result<bool, EcsError> {
        self.registry.has_component::<T>(self.entity)
    }

    pub fn get<T: Component>(&self) -> Result<&T, EcsError> {
        self.registry.get_component::<T>(self.entity)
    }

    pub fn get_mut<T: Component>(&mut self) -> Result<&mut T, EcsError> {
        self.registry.get_component_mut::<T>(self.entity)
    }

    pub fn kill(self) -> Result<(), EcsError> {
        self.registry.kill_entity(self.entity)
    }
}
