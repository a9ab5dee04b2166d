// signature.rs - Fixed-width component bitmask
//
// One bit per registered component type. An entity's signature says which
// components it owns; a system's signature says which it requires.

use crate::ecs::ComponentId;
use std::fmt;

/// Maximum number of distinct component types per registry.
pub const MAX_COMPONENTS: usize = 32;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature(u32);

impl Signature {
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub fn set(&mut self, id: ComponentId) {
        debug_assert!((id as usize) < MAX_COMPONENTS, "component id {id} out of range");
        self.0 |= 1 << id;
    }

    #[inline]
    pub fn clear(&mut self, id: ComponentId) {
        debug_assert!((id as usize) < MAX_COMPONENTS, "component id {id} out of range");
        self.0 &= !(1 << id);
    }

    #[inline]
    pub fn contains(self, id: ComponentId) -> bool {
        (id as usize) < MAX_COMPONENTS && self.0 & (1 << id) != 0
    }

    /// Superset test: every bit of `required` is also set here.
    #[inline]
    pub fn contains_all(self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of set bits.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Set component ids, ascending.
    pub fn iter(self) -> impl Iterator<Item = ComponentId> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let id = bits.trailing_zeros();
            bits &= bits - 1;
            Some(id as ComponentId)
        })
    }
}

impl FromIterator<ComponentId> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentId>>(iter: I) -> Self {
        let mut signature = Signature::empty();
        for id in iter {
            signature.set(id);
        }
        signature
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = MAX_COMPONENTS)
    }
}
