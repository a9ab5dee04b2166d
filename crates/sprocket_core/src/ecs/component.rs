// component.rs - Component type registration
//
// Components are identified by small sequential u32 ids, assigned the first
// time a Rust type is used with a registry. The table lives inside the
// registry, so two registries never share ids.

use crate::ecs::{EcsError, Signature, MAX_COMPONENTS};
use std::any::{type_name, TypeId};
use std::collections::HashMap;

pub type ComponentId = u32;

/// Marker for types that can be stored as components.
///
/// Implemented for every `'static` type; a component is plain data with no
/// reference back into the registry.
pub trait Component: 'static {}

impl<T: 'static> Component for T {}

/// Type -> id table shared by pools and signatures.
#[derive(Debug, Default)]
pub struct ComponentTypes {
    ids: HashMap<TypeId, ComponentId>,
    names: Vec<&'static str>,
}

impl ComponentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `T`, if it has been registered.
    #[inline]
    pub fn id_of<T: Component>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Return the id of `T`, assigning the next free one on first use.
    pub fn register<T: Component>(&mut self) -> Result<ComponentId, EcsError> {
        self.register_with(TypeId::of::<T>(), type_name::<T>())
            .map(|(id, _)| id)
    }

    /// Register a type by its raw identity. The flag is true when the id
    /// was assigned by this call.
    pub(crate) fn register_with(
        &mut self,
        type_id: TypeId,
        name: &'static str,
    ) -> Result<(ComponentId, bool), EcsError> {
        if let Some(&id) = self.ids.get(&type_id) {
            return Ok((id, false));
        }
        if self.names.len() >= MAX_COMPONENTS {
            return Err(EcsError::SignatureCapacityExceeded {
                max: MAX_COMPONENTS,
                component: name,
            });
        }

        let id = self.names.len() as ComponentId;
        self.ids.insert(type_id, id);
        self.names.push(name);
        tracing::debug!(component = name, id, "registered component type");
        Ok((id, true))
    }

    pub fn name(&self, id: ComponentId) -> Option<&'static str> {
        self.names.get(id as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A static set of component types, used by systems to declare what they
/// require.
///
/// Implemented for `()` and for tuples of up to eight component types.
pub trait ComponentSet: 'static {
    /// Registered ids for each member type, in declaration order.
    fn ids(types: &mut ComponentTypes) -> Result<Vec<ComponentId>, EcsError>;

    /// Signature with one bit per member type.
    fn signature(types: &mut ComponentTypes) -> Result<Signature, EcsError> {
        Ok(Self::ids(types)?.into_iter().collect())
    }

    fn names() -> Vec<&'static str>;
}

impl ComponentSet for () {
    fn ids(_types: &mut ComponentTypes) -> Result<Vec<ComponentId>, EcsError> {
        Ok(Vec::new())
    }

    fn names() -> Vec<&'static str> {
        Vec::new()
    }
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: Component),+> ComponentSet for ($($T,)+) {
            fn ids(types: &mut ComponentTypes) -> Result<Vec<ComponentId>, EcsError> {
                Ok(vec![$(types.register::<$T>()?),+])
            }

            fn names() -> Vec<&'static str> {
                vec![$(type_name::<$T>()),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    struct Position;
    struct Velocity;

    #[test]
    fn ids_are_sequential_and_stable() {
        let mut types = ComponentTypes::new();
        assert_eq!(types.register::<Position>().unwrap(), 0);
        assert_eq!(types.register::<Velocity>().unwrap(), 1);
        assert_eq!(types.register::<Position>().unwrap(), 0);
        assert_eq!(types.id_of::<Velocity>(), Some(1));
        assert_eq!(types.id_of::<u8>(), None);
        assert_eq!(types.len(), 2);
        assert!(types.name(0).unwrap().ends_with("Position"));
    }

    #[test]
    fn tuple_sets_build_signatures() {
        let mut types = ComponentTypes::new();
        let sig = <(Position, Velocity)>::signature(&mut types).unwrap();
        assert_eq!(sig.len(), 2);
        assert!(sig.contains(0) && sig.contains(1));
        assert!(<()>::signature(&mut types).unwrap().is_empty());
    }

    #[test]
    fn capacity_is_enforced() {
        // Give each marker a distinct type via const generics.
        struct Marker<const N: usize>;

        let mut types = ComponentTypes::new();
        macro_rules! register_all {
            ($($n:literal)*) => { $( types.register::<Marker<$n>>().unwrap(); )* };
        }
        register_all!(0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15
                      16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31);
        assert_eq!(types.len(), MAX_COMPONENTS);

        let err = types.register::<Marker<32>>().unwrap_err();
        assert!(matches!(
            err,
            EcsError::SignatureCapacityExceeded { max: MAX_COMPONENTS, .. }
        ));
        // Already-registered types still resolve.
        assert_eq!(types.register::<Marker<0>>().unwrap(), 0);
    }
}
