//! Entity processors and matcher-routed systems
//!
//! The entity list reports lifecycle changes through [`EntityProcessor`].
//! [`EntityProcessorList`] is the processor used by scenes: it forwards each
//! entity to every registered [`EntitySystem`] whose [`Matcher`] is
//! interested in the entity's signature.

use super::{Entity, EntityId, EntityStore, Matcher};

/// Receiver of entity lifecycle notifications
pub trait EntityProcessor {
    /// An entity became live
    fn on_entity_added(&mut self, id: EntityId, entity: &Entity);

    /// An entity left the live list
    fn on_entity_removed(&mut self, id: EntityId, entity: &Entity);

    /// The component signature of a live entity changed
    fn on_entity_changed(&mut self, _id: EntityId, _entity: &Entity) {}
}

/// System processing every entity matched by its [`Matcher`]
pub trait EntitySystem {
    /// Name used in log output
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Signature filter selecting this system's entities
    fn matcher(&self) -> &Matcher;

    /// An entity started matching
    fn on_added(&mut self, _id: EntityId) {}

    /// An entity stopped matching or left the scene
    fn on_removed(&mut self, _id: EntityId) {}

    /// Run once per frame over the matched entities
    fn process(&mut self, entities: &[EntityId], store: &mut EntityStore);
}

struct SystemSlot {
    system: Box<dyn EntitySystem>,
    entities: Vec<EntityId>,
}

impl SystemSlot {
    fn track(&mut self, id: EntityId) {
        if !self.entities.contains(&id) {
            self.entities.push(id);
            self.system.on_added(id);
        }
    }

    fn untrack(&mut self, id: EntityId) {
        if let Some(index) = self.entities.iter().position(|&tracked| tracked == id) {
            self.entities.remove(index);
            self.system.on_removed(id);
        }
    }
}

/// Registered systems with the entities each one currently matches
#[derive(Default)]
pub struct EntityProcessorList {
    systems: Vec<SystemSlot>,
}

impl EntityProcessorList {
    /// Create an empty processor list
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system and return its index.
    ///
    /// Entities that are already live are not routed retroactively; register
    /// systems before adding entities.
    pub fn add_system(&mut self, system: Box<dyn EntitySystem>) -> usize {
        log::debug!("Registered entity system {}", system.name());
        self.systems.push(SystemSlot {
            system,
            entities: Vec::new(),
        });
        self.systems.len() - 1
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// True when no system is registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Entities currently matched by the system at `index`
    pub fn entities_of(&self, index: usize) -> &[EntityId] {
        self.systems.get(index).map_or(&[], |slot| slot.entities.as_slice())
    }

    /// Run every system over its matched entities
    pub fn update(&mut self, store: &mut EntityStore) {
        for slot in &mut self.systems {
            slot.system.process(&slot.entities, store);
        }
    }

    /// Forget all matched entities without notifying the systems
    pub fn clear_entities(&mut self) {
        for slot in &mut self.systems {
            slot.entities.clear();
        }
    }
}

impl EntityProcessor for EntityProcessorList {
    fn on_entity_added(&mut self, id: EntityId, entity: &Entity) {
        for slot in &mut self.systems {
            if slot.system.matcher().is_interested_in(entity) {
                slot.track(id);
            }
        }
    }

    fn on_entity_removed(&mut self, id: EntityId, _entity: &Entity) {
        for slot in &mut self.systems {
            slot.untrack(id);
        }
    }

    fn on_entity_changed(&mut self, id: EntityId, entity: &Entity) {
        for slot in &mut self.systems {
            if slot.system.matcher().is_interested_in(entity) {
                slot.track(id);
            } else {
                slot.untrack(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Component, ComponentTypeManager};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Position(i32);
    impl Component for Position {}

    struct Frozen;
    impl Component for Frozen {}

    struct Mover {
        matcher: Matcher,
        events: Rc<RefCell<Vec<&'static str>>>,
    }

    impl EntitySystem for Mover {
        fn matcher(&self) -> &Matcher {
            &self.matcher
        }

        fn on_added(&mut self, _id: EntityId) {
            self.events.borrow_mut().push("added");
        }

        fn on_removed(&mut self, _id: EntityId) {
            self.events.borrow_mut().push("removed");
        }

        fn process(&mut self, entities: &[EntityId], store: &mut EntityStore) {
            for &id in entities {
                if let Some(position) = store.get_mut(id).and_then(Entity::get_component_mut::<Position>) {
                    position.0 += 1;
                }
            }
        }
    }

    fn setup() -> (EntityProcessorList, ComponentTypeManager, Rc<RefCell<Vec<&'static str>>>) {
        let mut types = ComponentTypeManager::new();
        let position = types.register::<Position>();
        let frozen = types.register::<Frozen>();
        let events = Rc::new(RefCell::new(Vec::new()));

        let mut processors = EntityProcessorList::new();
        processors.add_system(Box::new(Mover {
            matcher: Matcher::empty().all(&[position]).exclude(&[frozen]),
            events: Rc::clone(&events),
        }));
        (processors, types, events)
    }

    #[test]
    fn test_routes_by_matcher() {
        let (mut processors, mut types, events) = setup();
        let mut store = EntityStore::new();

        let mut moving = Entity::new("moving");
        moving.add_component(&mut types, Position(0));
        let moving = store.insert(moving);
        let idle = store.insert(Entity::new("idle"));

        processors.on_entity_added(moving, store.get(moving).unwrap());
        processors.on_entity_added(idle, store.get(idle).unwrap());
        assert_eq!(processors.entities_of(0), &[moving]);

        processors.update(&mut store);
        assert_eq!(store.get(moving).unwrap().get_component::<Position>().unwrap().0, 1);

        processors.on_entity_removed(moving, store.get(moving).unwrap());
        assert!(processors.entities_of(0).is_empty());
        assert_eq!(*events.borrow(), vec!["added", "removed"]);
    }

    #[test]
    fn test_signature_change_reroutes() {
        let (mut processors, mut types, events) = setup();
        let mut store = EntityStore::new();

        let mut entity = Entity::new("entity");
        entity.add_component(&mut types, Position(0));
        let id = store.insert(entity);
        processors.on_entity_added(id, store.get(id).unwrap());

        store.get_mut(id).unwrap().add_component(&mut types, Frozen);
        processors.on_entity_changed(id, store.get(id).unwrap());
        assert!(processors.entities_of(0).is_empty());

        store.get_mut(id).unwrap().remove_component::<Frozen>();
        processors.on_entity_changed(id, store.get(id).unwrap());
        assert_eq!(processors.entities_of(0), &[id]);
        assert_eq!(*events.borrow(), vec!["added", "removed", "added"]);
    }

    #[test]
    fn test_unknown_system_index_is_empty() {
        let processors = EntityProcessorList::new();
        assert!(processors.is_empty());
        assert!(processors.entities_of(3).is_empty());
    }
}
