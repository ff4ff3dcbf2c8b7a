//! # Scene
//!
//! Owner of everything an entity needs at runtime: the entity store, the
//! deferred [`EntityList`], the registered entity systems, the component
//! type registry, the frame timer and the optional quadtree broad-phase.
//!
//! A frame is driven by [`Scene::update`]:
//!
//! 1. advance the timer,
//! 2. flush queued additions and removals,
//! 3. run the entity systems,
//! 4. update entities whose interval is due.

use super::{
    Component, ComponentType, ComponentTypeManager, Entity, EntityBehaviour, EntityId, EntityList,
    EntityProcessor, EntityProcessorList, EntityState, EntityStore, EntitySystem, SceneId, Tag,
};
use crate::core::config::SceneConfig;
use crate::foundation::math::Rectangle;
use crate::foundation::time::Timer;
use crate::spatial::{QuadTreeSpatialQuery, SpatialError, SpatialQuery};

/// Per-frame statistics for a scene
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Live entities
    pub entity_count: usize,

    /// Entities in the store, managed or not
    pub stored_count: usize,

    /// Registered entity systems
    pub system_count: usize,

    /// Entities tracked by the broad-phase
    pub spatial_count: usize,

    /// Frames simulated so far
    pub frame_count: u64,
}

/// A self-contained world of entities
pub struct Scene {
    config: SceneConfig,
    store: EntityStore,
    entities: EntityList,
    processors: EntityProcessorList,
    types: ComponentTypeManager,
    timer: Timer,
    spatial: Option<QuadTreeSpatialQuery>,
}

impl Scene {
    /// Create a scene; fails when the configured broad-phase bounds are invalid
    pub fn new(id: SceneId, config: SceneConfig) -> Result<Self, SpatialError> {
        let spatial = if config.spatial.enabled {
            Some(QuadTreeSpatialQuery::new(
                config.spatial.world_bounds,
                config.spatial.quadtree.clone(),
            )?)
        } else {
            None
        };

        log::info!(
            "Created scene '{}' ({:?}), broad-phase {}",
            config.name,
            id,
            if spatial.is_some() { "enabled" } else { "disabled" }
        );

        Ok(Self {
            config,
            store: EntityStore::new(),
            entities: EntityList::new(id),
            processors: EntityProcessorList::new(),
            types: ComponentTypeManager::new(),
            timer: Timer::new(),
            spatial,
        })
    }

    /// Scene id stamped on live entities
    pub const fn id(&self) -> SceneId {
        self.entities.scene()
    }

    /// Configuration the scene was built with
    pub const fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Live entity list
    pub const fn entities(&self) -> &EntityList {
        &self.entities
    }

    /// Every entity owned by the scene, including pending and removed ones
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Component type registry
    pub const fn types(&self) -> &ComponentTypeManager {
        &self.types
    }

    /// Frame timer
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Broad-phase, when enabled
    pub const fn spatial(&self) -> Option<&QuadTreeSpatialQuery> {
        self.spatial.as_ref()
    }

    /// Look up an entity
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.store.get(id)
    }

    /// Look up an entity mutably.
    ///
    /// Use the scene methods to change tags, update order or components so
    /// the indices stay consistent.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.store.get_mut(id)
    }

    /// Lifecycle state of an entity relative to this scene
    pub fn state_of(&self, id: EntityId) -> EntityState {
        self.entities.state_of(id)
    }

    /// Handle for `C`, registering it on first use
    pub fn component_type<C: Component>(&mut self) -> ComponentType {
        self.types.register::<C>()
    }

    /// Register an entity system
    pub fn add_system(&mut self, system: impl EntitySystem + 'static) -> usize {
        self.processors.add_system(Box::new(system))
    }

    /// Entities matched by the system at `index`
    pub fn system_entities(&self, index: usize) -> &[EntityId] {
        self.processors.entities_of(index)
    }

    /// Create an empty entity and queue it for addition
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        self.add_entity(Entity::new(name))
    }

    /// Take ownership of an entity and queue it for addition
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = self.store.insert(entity);
        self.entities.add(id);
        id
    }

    /// Queue an entity for removal, keeping it in the store
    pub fn remove_entity(&mut self, id: EntityId) {
        self.entities.remove(id);
        if let Some(spatial) = self.spatial.as_mut() {
            spatial.remove(id);
        }
    }

    /// Mark an entity destroyed and queue it for removal.
    ///
    /// The entity is dropped from the store at the next flush.
    pub fn destroy_entity(&mut self, id: EntityId) {
        let Some(entity) = self.store.get_mut(id) else {
            return;
        };
        entity.mark_destroyed();
        self.remove_entity(id);
    }

    /// Attach a component, re-routing the entity if it is live
    pub fn add_component<C: Component>(&mut self, id: EntityId, component: C) -> Option<ComponentType> {
        let entity = self.store.get_mut(id)?;
        let component_type = entity.add_component(&mut self.types, component);
        self.signature_changed(id);
        Some(component_type)
    }

    /// Detach the first component of type `C`, re-routing the entity if it is live
    pub fn remove_component<C: Component>(&mut self, id: EntityId) -> Option<C> {
        let component = self.store.get_mut(id)?.remove_component::<C>()?;
        self.signature_changed(id);
        Some(component)
    }

    fn signature_changed(&mut self, id: EntityId) {
        if !self.config.entity_systems_enabled {
            return;
        }
        if let Some(entity) = self.store.get(id).filter(|entity| entity.scene().is_some()) {
            self.processors.on_entity_changed(id, entity);
        }
    }

    /// Change an entity's tag, moving it between tag lists if it is live
    pub fn set_tag(&mut self, id: EntityId, tag: Tag) {
        let Some(entity) = self.store.get_mut(id) else {
            return;
        };
        let old_tag = entity.tag();
        entity.set_tag(tag);
        self.entities.retag(id, old_tag, tag);
    }

    /// Change an entity's update order; the live list is re-sorted at the next flush
    pub fn set_update_order(&mut self, id: EntityId, update_order: i32) {
        let Some(entity) = self.store.get_mut(id) else {
            return;
        };
        if entity.update_order() == update_order {
            return;
        }
        entity.set_update_order(update_order);

        if entity.scene().is_some() {
            let tag = entity.tag();
            self.entities.mark_entity_list_unsorted();
            self.entities.mark_tag_unsorted(tag);
        }
    }

    /// Track or move an entity in the broad-phase; no-op when it is disabled
    pub fn set_bounds(&mut self, id: EntityId, bounds: Rectangle) {
        if let Some(spatial) = self.spatial.as_mut() {
            spatial.update(id, bounds);
        }
    }

    /// Entities whose broad-phase bounds overlap `area`
    pub fn query_rect(&self, area: Rectangle) -> Vec<EntityId> {
        self.spatial
            .as_ref()
            .map_or_else(Vec::new, |spatial| spatial.query_rect(area))
    }

    /// Entities whose broad-phase bounds overlap those of `id`
    pub fn query_nearby(&self, id: EntityId) -> Vec<EntityId> {
        self.spatial
            .as_ref()
            .map_or_else(Vec::new, |spatial| spatial.query_nearby(id))
    }

    /// Run one frame
    pub fn update(&mut self, delta_time: f32) {
        self.timer.advance(delta_time);
        self.update_lists();

        if self.config.entity_systems_enabled {
            self.processors.update(&mut self.store);
        }

        self.entities.update(&mut self.store, &self.timer);
    }

    /// Apply queued additions and removals now
    pub fn update_lists(&mut self) {
        let processor = if self.config.entity_systems_enabled {
            Some(&mut self.processors as &mut dyn EntityProcessor)
        } else {
            None
        };
        self.entities.update_lists(&mut self.store, processor);
        self.purge_destroyed();
    }

    /// Tear the scene down: flush, destroy every live entity and drop them
    pub fn end(&mut self) {
        let processor = if self.config.entity_systems_enabled {
            Some(&mut self.processors as &mut dyn EntityProcessor)
        } else {
            None
        };
        self.entities.remove_all_entities(&mut self.store, processor);
        self.processors.clear_entities();
        self.purge_destroyed();

        if let Some(spatial) = self.spatial.as_mut() {
            spatial.clear();
        }
        log::info!("Ended scene '{}', {} entities left in store", self.config.name, self.store.len());
    }

    fn purge_destroyed(&mut self) {
        let before = self.store.len();
        self.store
            .retain(|_, entity| !(entity.is_destroyed() && entity.scene().is_none()));

        let purged = before - self.store.len();
        if purged > 0 {
            log::trace!("Dropped {} destroyed entities from scene '{}'", purged, self.config.name);
        }
    }

    /// First entity named `name`, including pending additions
    pub fn find_entity(&self, name: &str) -> Option<EntityId> {
        self.entities.find_entity(&self.store, name)
    }

    /// Entities carrying `tag`, including pending additions
    pub fn entities_with_tag(&self, tag: Tag) -> Vec<EntityId> {
        self.entities.entities_with_tag(&self.store, tag)
    }

    /// Entities whose behaviour is a `B`, including pending additions
    pub fn entities_of_type<B: EntityBehaviour>(&self) -> Vec<EntityId> {
        self.entities.entities_of_type::<B>(&self.store)
    }

    /// First `C` on an enabled entity, including pending additions
    pub fn find_component_of_type<C: Component>(&self) -> Option<&C> {
        self.entities.find_component_of_type::<C>(&self.store)
    }

    /// Every `C` on enabled entities, including pending additions
    pub fn find_components_of_type<C: Component>(&self) -> Vec<&C> {
        self.entities.find_components_of_type::<C>(&self.store)
    }

    /// Snapshot of the scene counters
    pub fn stats(&self) -> SceneStats {
        SceneStats {
            entity_count: self.entities.len(),
            stored_count: self.store.len(),
            system_count: self.processors.len(),
            spatial_count: self.spatial.as_ref().map_or(0, |spatial| spatial.entity_count()),
            frame_count: self.timer.frame_count(),
        }
    }
}
