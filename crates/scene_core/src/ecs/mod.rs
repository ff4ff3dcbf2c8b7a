//! Entity-Component-System implementation
//!
//! Entities carry a component signature ([`BitSet`]) maintained against a
//! [`ComponentTypeManager`]. [`Matcher`]s route entities to
//! [`EntitySystem`]s, and the [`EntityList`] batches additions and removals
//! so a frame always iterates a stable set of live entities.

pub mod bitset;
pub mod component;
pub mod entity;
pub mod entity_list;
pub mod matcher;
pub mod processor;
pub mod scene;

#[cfg(test)]
mod tests;

pub use bitset::BitSet;
pub use component::{AsAny, Component, ComponentType, ComponentTypeManager};
pub use entity::{Entity, EntityBehaviour, EntityId, EntityStore, SceneId, Tag};
pub use entity_list::{EntityContext, EntityList, EntityState};
pub use matcher::{Matcher, MatcherDisplay};
pub use processor::{EntityProcessor, EntityProcessorList, EntitySystem};
pub use scene::{Scene, SceneStats};
