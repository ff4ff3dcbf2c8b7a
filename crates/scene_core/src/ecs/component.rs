//! Component trait and the component type registry

use super::BitSet;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Upcast helper so trait objects can be downcast to their concrete type
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert a boxed value into `Box<dyn Any>`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Marker trait for data attached to an entity
pub trait Component: AsAny {}

/// Opaque handle for a registered component type.
///
/// The wrapped value is the bit index used in entity signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentType(u32);

impl ComponentType {
    /// Bit index of this type in a signature
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Registration table mapping component types to stable bit indices.
///
/// Indices are handed out in registration order and never reused.
#[derive(Debug, Default)]
pub struct ComponentTypeManager {
    indices: HashMap<TypeId, ComponentType>,
    names: Vec<&'static str>,
}

impl ComponentTypeManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle for `C`, registering it on first use
    pub fn register<C: Component>(&mut self) -> ComponentType {
        if let Some(&handle) = self.indices.get(&TypeId::of::<C>()) {
            return handle;
        }

        let handle = ComponentType(u32::try_from(self.names.len()).unwrap_or(u32::MAX));
        self.indices.insert(TypeId::of::<C>(), handle);
        self.names.push(short_type_name(std::any::type_name::<C>()));
        log::trace!("Registered component type {} as index {}", self.names[handle.index()], handle.index());
        handle
    }

    /// Get the handle for `C` without registering it
    pub fn index_for<C: Component>(&self) -> Option<ComponentType> {
        self.indices.get(&TypeId::of::<C>()).copied()
    }

    /// Readable name of a registered type
    pub fn name(&self, component_type: ComponentType) -> Option<&'static str> {
        self.names.get(component_type.index()).copied()
    }

    /// Registered types whose bits are set in `bits`
    pub fn types_from_bits<'a>(&'a self, bits: &'a BitSet) -> impl Iterator<Item = ComponentType> + 'a {
        bits.iter()
            .filter(|&index| index < self.names.len())
            .filter_map(|index| u32::try_from(index).ok().map(ComponentType))
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    // Generic parameters would make rsplit pick a segment inside the brackets
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}
