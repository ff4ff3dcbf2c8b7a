//! # Entity List
//!
//! Authoritative, deferred-mutation collection of the live entities of a
//! scene. Additions and removals requested during a frame are queued and
//! applied together by [`EntityList::update_lists`], so entity callbacks can
//! iterate the live list without it changing underneath them.
//!
//! ## Lifecycle
//!
//! ```text
//! Unmanaged -> PendingAdd -> Live -> PendingRemove -> Unmanaged
//!                  |                                    ^
//!                  +----- removed in the same frame ----+
//! ```
//!
//! [`EntityList::remove_all_entities`] additionally forces every live entity
//! straight back to unmanaged, marking it destroyed.

use super::{Component, Entity, EntityBehaviour, EntityId, EntityProcessor, EntityStore, SceneId, Tag};
use crate::foundation::time::Timer;
use std::collections::HashMap;

/// Where an entity currently sits relative to an [`EntityList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Not tracked by the list
    Unmanaged,
    /// Queued for addition at the next flush
    PendingAdd,
    /// Part of the live list
    Live,
    /// Live, but queued for removal at the next flush
    PendingRemove,
}

#[derive(Debug, Clone, Copy)]
enum Hook {
    Added,
    Removed,
    Update,
}

/// Read-only view handed to entity behaviours during callbacks.
///
/// The behaviour receiving the callback is detached from its entity while
/// the call runs, so behaviour-type queries such as
/// [`EntityList::entities_of_type`] do not report the calling entity.
/// Name, tag and component queries are unaffected.
pub struct EntityContext<'a> {
    id: EntityId,
    list: &'a EntityList,
    store: &'a EntityStore,
}

impl<'a> EntityContext<'a> {
    /// Id of the entity receiving the callback
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// The entity receiving the callback
    pub fn entity(&self) -> Option<&'a Entity> {
        self.store.get(self.id)
    }

    /// The list the entity belongs to
    pub const fn list(&self) -> &'a EntityList {
        self.list
    }

    /// All entities of the scene
    pub const fn store(&self) -> &'a EntityStore {
        self.store
    }

    /// Look up a sibling by name, including entities added this frame
    pub fn find_entity(&self, name: &str) -> Option<EntityId> {
        self.list.find_entity(self.store, name)
    }

    /// Entities carrying `tag`, including entities added this frame
    pub fn entities_with_tag(&self, tag: Tag) -> Vec<EntityId> {
        self.list.entities_with_tag(self.store, tag)
    }
}

/// Live entities of a scene plus the queued additions and removals
#[derive(Debug)]
pub struct EntityList {
    /// Scene stamped on entities while they are live
    scene: SceneId,

    /// Live entities, sorted by entity order after each flush
    entities: Vec<EntityId>,

    /// Entities added this frame, applied together at the next flush
    entities_to_add: Vec<EntityId>,

    /// Entities removed this frame, applied together at the next flush
    entities_to_remove: Vec<EntityId>,

    /// Double buffer swapped with the queues during a flush
    temp_entity_list: Vec<EntityId>,

    /// Set when the live list must be sorted at the next flush
    is_entity_list_unsorted: bool,

    /// Live entities grouped by tag
    entity_dict: HashMap<Tag, Vec<EntityId>>,

    /// Tags whose lists must be sorted at the next flush
    unsorted_tags: Vec<Tag>,
}

impl EntityList {
    /// Create an empty list for `scene`
    pub fn new(scene: SceneId) -> Self {
        Self {
            scene,
            entities: Vec::new(),
            entities_to_add: Vec::new(),
            entities_to_remove: Vec::new(),
            temp_entity_list: Vec::new(),
            is_entity_list_unsorted: false,
            entity_dict: HashMap::new(),
            unsorted_tags: Vec::new(),
        }
    }

    /// Scene this list belongs to
    pub const fn scene(&self) -> SceneId {
        self.scene
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no entity is live
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entity at `index` in sort order
    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.entities.get(index).copied()
    }

    /// Live entities in sort order
    pub fn as_slice(&self) -> &[EntityId] {
        &self.entities
    }

    /// Iterate over live entities in sort order
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }

    /// Force the live list to be re-sorted at the next flush
    pub fn mark_entity_list_unsorted(&mut self) {
        self.is_entity_list_unsorted = true;
    }

    /// Force the list for `tag` to be re-sorted at the next flush
    pub fn mark_tag_unsorted(&mut self, tag: Tag) {
        self.unsorted_tags.push(tag);
    }

    /// Queue an entity for addition; lifecycle callbacks run at the next flush
    pub fn add(&mut self, id: EntityId) {
        match self.state_of(id) {
            EntityState::PendingAdd => {
                log::warn!("Entity {:?} is already queued for addition", id);
            }
            EntityState::Live => {
                log::warn!("Entity {:?} is already live in scene {:?}", id, self.scene);
            }
            EntityState::Unmanaged | EntityState::PendingRemove => self.entities_to_add.push(id),
        }
    }

    /// Queue an entity for removal; lifecycle callbacks run at the next flush.
    ///
    /// Removing an entity that is only queued for addition cancels the
    /// addition instead.
    pub fn remove(&mut self, id: EntityId) {
        let already_removed = self.entities_to_remove.contains(&id);
        if already_removed && cfg!(debug_assertions) {
            log::warn!("You are trying to remove an entity ({:?}) that you already removed", id);
        }

        // guard against adding and then removing an entity in the same frame
        if let Some(index) = self.entities_to_add.iter().position(|&pending| pending == id) {
            self.entities_to_add.remove(index);
            return;
        }

        if !already_removed {
            self.entities_to_remove.push(id);
        }
    }

    /// Current lifecycle state of `id`
    pub fn state_of(&self, id: EntityId) -> EntityState {
        if self.entities_to_add.contains(&id) {
            EntityState::PendingAdd
        } else if self.entities_to_remove.contains(&id) {
            EntityState::PendingRemove
        } else if self.entities.contains(&id) {
            EntityState::Live
        } else {
            EntityState::Unmanaged
        }
    }

    /// True when `id` is live or queued for addition
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(&id) || self.entities_to_add.contains(&id)
    }

    /// Move a live entity between tag lists after its tag changed
    pub fn retag(&mut self, id: EntityId, old_tag: Tag, new_tag: Tag) {
        if old_tag == new_tag || !self.entities.contains(&id) {
            return;
        }
        self.remove_from_tag_list(id, old_tag);
        self.add_to_tag_list(id, new_tag);
    }

    fn add_to_tag_list(&mut self, id: EntityId, tag: Tag) {
        let list = self.entity_dict.entry(tag).or_default();
        debug_assert!(!list.contains(&id), "Entity tag list already contains this entity: {id:?}");

        list.push(id);
        self.unsorted_tags.push(tag);
    }

    fn remove_from_tag_list(&mut self, id: EntityId, tag: Tag) {
        if let Some(list) = self.entity_dict.get_mut(&tag) {
            list.retain(|&tagged| tagged != id);
        }
    }

    /// Run a behaviour hook with a read-only view of the scene.
    ///
    /// The behaviour is taken out of the entity for the duration of the call
    /// so the store can be shared with it.
    fn invoke(&self, store: &mut EntityStore, id: EntityId, hook: Hook) {
        let Some(mut behaviour) = store.get_mut(id).and_then(Entity::take_behaviour) else {
            return;
        };

        {
            let context = EntityContext { id, list: self, store };
            let behaviour: &mut dyn EntityBehaviour = &mut *behaviour;
            match hook {
                Hook::Added => behaviour.on_added_to_scene(&context),
                Hook::Removed => behaviour.on_removed_from_scene(&context),
                Hook::Update => behaviour.update(&context),
            }
        }

        if let Some(entity) = store.get_mut(id) {
            entity.restore_behaviour(behaviour);
        }
    }

    /// Per-frame tick: update every enabled live entity whose interval is due
    pub fn update(&self, store: &mut EntityStore, timer: &Timer) {
        for &id in &self.entities {
            let due = store
                .get(id)
                .is_some_and(|entity| entity.is_enabled() && timer.is_due(entity.update_interval()));

            if due {
                self.invoke(store, id, Hook::Update);
            }
        }
    }

    /// Apply all queued removals and additions.
    ///
    /// Removals are processed first. Every addition is linked into the live
    /// list and the tag index before any `on_added_to_scene` callback fires,
    /// so callbacks can see siblings added in the same batch. Sorting of the
    /// live list and of touched tag lists happens last.
    pub fn update_lists(&mut self, store: &mut EntityStore, mut processor: Option<&mut dyn EntityProcessor>) {
        let mut removed = 0;
        let mut added = 0;

        // handle removals
        if !self.entities_to_remove.is_empty() {
            std::mem::swap(&mut self.entities_to_remove, &mut self.temp_entity_list);
            let batch = std::mem::take(&mut self.temp_entity_list);

            for &id in &batch {
                let Some(tag) = store.get(id).map(Entity::tag) else {
                    log::warn!("Skipping removal of entity {:?}: it no longer exists", id);
                    continue;
                };
                let Some(index) = self.entities.iter().position(|&live| live == id) else {
                    log::warn!("Skipping removal of entity {:?}: it is not live in scene {:?}", id, self.scene);
                    continue;
                };

                self.remove_from_tag_list(id, tag);
                self.entities.remove(index);
                self.invoke(store, id, Hook::Removed);

                if let Some(entity) = store.get_mut(id) {
                    entity.set_scene(None);
                }
                if let (Some(processor), Some(entity)) = (processor.as_deref_mut(), store.get(id)) {
                    processor.on_entity_removed(id, entity);
                }
                removed += 1;
            }

            self.temp_entity_list = batch;
            self.temp_entity_list.clear();
        }

        // handle additions
        if !self.entities_to_add.is_empty() {
            std::mem::swap(&mut self.entities_to_add, &mut self.temp_entity_list);
            let mut batch = std::mem::take(&mut self.temp_entity_list);
            batch.retain(|&id| store.contains(id));

            for &id in &batch {
                let Some(entity) = store.get_mut(id) else {
                    continue;
                };
                entity.set_scene(Some(self.scene));
                let tag = entity.tag();

                self.entities.push(id);
                self.add_to_tag_list(id, tag);

                if let (Some(processor), Some(entity)) = (processor.as_deref_mut(), store.get(id)) {
                    processor.on_entity_added(id, entity);
                }
                added += 1;
            }

            // now that all entities are linked in, run the added callbacks
            for &id in &batch {
                self.invoke(store, id, Hook::Added);
            }

            self.temp_entity_list = batch;
            self.temp_entity_list.clear();
            self.is_entity_list_unsorted = true;
        }

        if self.is_entity_list_unsorted {
            self.entities.sort_by(|&a, &b| store.compare(a, b));
            self.is_entity_list_unsorted = false;
        }

        // sort our tag lists if needed
        if !self.unsorted_tags.is_empty() {
            let mut tags = std::mem::take(&mut self.unsorted_tags);
            tags.sort_unstable();
            tags.dedup();
            for tag in &tags {
                if let Some(list) = self.entity_dict.get_mut(tag) {
                    list.sort_by(|&a, &b| store.compare(a, b));
                }
            }
            tags.clear();
            self.unsorted_tags = tags;
        }

        if removed > 0 || added > 0 {
            log::debug!(
                "Scene {:?} entity list flushed: {} removed, {} added, {} live",
                self.scene,
                removed,
                added,
                self.entities.len()
            );
        }
    }

    /// Remove every entity, destroying the live ones.
    ///
    /// Pending additions are discarded. One flush still runs so removals
    /// queued before a scene switch are processed normally; every remaining
    /// live entity is then marked destroyed, receives its removed callback and
    /// loses its scene reference.
    pub fn remove_all_entities(&mut self, store: &mut EntityStore, processor: Option<&mut dyn EntityProcessor>) {
        self.unsorted_tags.clear();
        self.entities_to_add.clear();
        self.is_entity_list_unsorted = false;

        self.update_lists(store, processor);

        for &id in &self.entities {
            if let Some(entity) = store.get_mut(id) {
                entity.mark_destroyed();
            }
            self.invoke(store, id, Hook::Removed);
            if let Some(entity) = store.get_mut(id) {
                entity.set_scene(None);
            }
        }

        log::debug!("Scene {:?} destroyed {} live entities", self.scene, self.entities.len());
        self.entities.clear();
        self.entity_dict.clear();
    }

    fn managed(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().chain(&self.entities_to_add).copied()
    }

    /// First entity named `name`, checking live entities before pending ones
    pub fn find_entity(&self, store: &EntityStore, name: &str) -> Option<EntityId> {
        self.managed()
            .find(|&id| store.get(id).is_some_and(|entity| entity.name() == name))
    }

    /// Append every entity with `tag` to `out`, including pending additions
    pub fn entities_with_tag_into(&self, store: &EntityStore, tag: Tag, out: &mut Vec<EntityId>) {
        if let Some(list) = self.entity_dict.get(&tag) {
            out.extend_from_slice(list);
        }
        out.extend(
            self.entities_to_add
                .iter()
                .copied()
                .filter(|&id| store.get(id).is_some_and(|entity| entity.tag() == tag)),
        );
    }

    /// Every entity with `tag`, including pending additions
    pub fn entities_with_tag(&self, store: &EntityStore, tag: Tag) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.entities_with_tag_into(store, tag, &mut out);
        out
    }

    /// Append every entity whose behaviour is a `B` to `out`
    pub fn entities_of_type_into<B: EntityBehaviour>(&self, store: &EntityStore, out: &mut Vec<EntityId>) {
        out.extend(
            self.managed()
                .filter(|&id| store.get(id).is_some_and(Entity::has_behaviour::<B>)),
        );
    }

    /// Every entity whose behaviour is a `B`.
    ///
    /// Called from a behaviour callback, the calling entity is left out.
    pub fn entities_of_type<B: EntityBehaviour>(&self, store: &EntityStore) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.entities_of_type_into::<B>(store, &mut out);
        out
    }

    /// First component of type `C` on an enabled entity
    pub fn find_component_of_type<'s, C: Component>(&self, store: &'s EntityStore) -> Option<&'s C> {
        self.managed()
            .filter_map(|id| store.get(id))
            .filter(|entity| entity.is_enabled())
            .find_map(Entity::get_component::<C>)
    }

    /// Append every component of type `C` on enabled entities to `out`
    pub fn find_components_of_type_into<'s, C: Component>(&self, store: &'s EntityStore, out: &mut Vec<&'s C>) {
        for entity in self.managed().filter_map(|id| store.get(id)) {
            if entity.is_enabled() {
                entity.get_components(out);
            }
        }
    }

    /// Every component of type `C` on enabled entities
    pub fn find_components_of_type<'s, C: Component>(&self, store: &'s EntityStore) -> Vec<&'s C> {
        let mut out = Vec::new();
        self.find_components_of_type_into(store, &mut out);
        out
    }
}
