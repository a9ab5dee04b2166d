//! Typed event bus
//!
//! Systems emit plain values during a frame; the application (or a later
//! system) reads or drains them. Nothing is delivered synchronously, so an
//! emitter never re-enters the registry.

use crate::ecs::Entity;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Marker for event payloads.
pub trait Event: 'static {}

/// Two entities whose colliders overlap this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

impl Event for CollisionEvent {}

#[derive(Default)]
pub struct EventBus {
    queues: HashMap<TypeId, Box<dyn Any>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit<E: Event>(&mut self, event: E) {
        self.queue_mut::<E>().push(event);
    }

    /// Events of type `E` emitted since the last drain, oldest first.
    pub fn read<E: Event>(&self) -> &[E] {
        self.queues
            .get(&TypeId::of::<E>())
            .and_then(|queue| queue.downcast_ref::<Vec<E>>())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Take every pending `E`.
    pub fn drain<E: Event>(&mut self) -> Vec<E> {
        self.queues
            .get_mut(&TypeId::of::<E>())
            .and_then(|queue| queue.downcast_mut::<Vec<E>>())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn len<E: Event>(&self) -> usize {
        self.read::<E>().len()
    }

    /// Drop pending events of every type.
    pub fn clear(&mut self) {
        self.queues.clear();
    }

    fn queue_mut<E: Event>(&mut self) -> &mut Vec<E> {
        self.queues
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<E>::new()))
            .downcast_mut::<Vec<E>>()
            .unwrap_or_else(|| unreachable!("event queue keyed by the wrong type"))
    }
}
