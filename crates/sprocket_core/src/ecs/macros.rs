// macros.rs - Spawning helpers

/// Create an entity and attach each component in order.
///
/// Evaluates to `Result<Entity, EcsError>`. Components after a failing one
/// are not attached; the entity itself still exists and is queued for
/// activation as usual.
///
/// # Example
/// ```ignore
/// let tank = spawn!(registry,
///     Transform::new(Vec2::new(32.0, 32.0), Vec2::splat(2.0), 0.0),
///     RigidBody::new(10.0, 20.0),
/// )?;
/// ```
#[macro_export]
macro_rules! spawn {
    ($registry:expr $(, $component:expr)+ $(,)?) => {{
        let registry: &mut $crate::ecs::Registry = &mut $registry;
        let entity = registry.create_entity();
        let mut result: ::core::result::Result<$crate::ecs::Entity, $crate::ecs::EcsError> =
            Ok(entity);
        $(
            if result.is_ok() {
                if let Err(err) = registry.add_component(entity, $component) {
                    result = Err(err);
                }
            }
        )+
        result
    }};
}
