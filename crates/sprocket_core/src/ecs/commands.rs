// commands.rs - Deferred structural mutation
//
// Requests made while a system pass holds borrows into the registry are
// buffered here and applied at the start of `Registry::update`, in the
// order they were pushed.

use crate::ecs::{Component, EcsError, Entity, Registry, System};
use std::fmt;

type Command = Box<dyn FnOnce(&mut Registry) -> Result<(), EcsError>>;

#[derive(Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary registry mutation.
    pub fn push<F>(&mut self, command: F)
    where
        F: FnOnce(&mut Registry) -> Result<(), EcsError> + 'static,
    {
        self.queue.push(Box::new(command));
    }

    /// Create an entity at flush time and let `build` attach its components.
    pub fn spawn<F>(&mut self, build: F)
    where
        F: FnOnce(&mut Registry, Entity) -> Result<(), EcsError> + 'static,
    {
        self.push(move |registry| {
            let entity = registry.create_entity();
            build(registry, entity)
        });
    }

    pub fn kill(&mut self, entity: Entity) {
        self.push(move |registry| registry.kill_entity(entity));
    }

    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) {
        self.push(move |registry| registry.add_component(entity, value));
    }

    /// The removed value is dropped.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) {
        self.push(move |registry| registry.remove_component::<T>(entity).map(drop));
    }

    pub fn add_system<S: System>(&mut self, system: S) {
        self.push(move |registry| registry.add_system(system));
    }

    pub fn remove_system<S: System>(&mut self) {
        self.push(|registry| registry.remove_system::<S>().map(drop));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.queue)
    }
}

impl fmt::Debug for Commands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commands")
            .field("pending", &self.queue.len())
            .finish()
    }
}
