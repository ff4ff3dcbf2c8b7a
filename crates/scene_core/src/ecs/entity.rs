//! Entity records and the entity store
//!
//! An [`Entity`] carries the data the entity list consumes: a name, a tag, an
//! enabled flag, an update interval, an update order, a component signature,
//! the attached components and an optional behaviour receiving lifecycle
//! callbacks. Entities live in an [`EntityStore`] and are referenced by
//! [`EntityId`] everywhere else.

use super::{AsAny, BitSet, Component, ComponentType, ComponentTypeManager, EntityContext};
use slotmap::{new_key_type, SlotMap};
use std::cmp::Ordering;
use std::fmt;

new_key_type! {
    /// Stable handle of an entity inside an [`EntityStore`]
    pub struct EntityId;
}

/// Integer tag used for grouped lookup
pub type Tag = i32;

/// Identifier of the scene an entity is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(pub u32);

/// Per-entity game logic hooks.
///
/// The context passed to every hook is a read-only view of the entity list
/// and the store, so a hook can look up siblings but cannot restructure the
/// scene while it is being flushed.
pub trait EntityBehaviour: AsAny {
    /// Called once the entity and every entity added in the same flush are live
    fn on_added_to_scene(&mut self, _context: &EntityContext<'_>) {}

    /// Called after the entity has been unlinked from the scene
    fn on_removed_from_scene(&mut self, _context: &EntityContext<'_>) {}

    /// Called on frames matching the entity's update interval
    fn update(&mut self, _context: &EntityContext<'_>) {}
}

/// Scene object: identity data, component signature and attached components
pub struct Entity {
    name: String,
    serial: u64,
    tag: Tag,
    enabled: bool,
    update_interval: u32,
    update_order: i32,
    component_bits: BitSet,
    components: Vec<(ComponentType, Box<dyn Component>)>,
    behaviour: Option<Box<dyn EntityBehaviour>>,
    scene: Option<SceneId>,
    destroyed: bool,
}

impl Entity {
    /// Create an enabled entity that updates every frame
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serial: 0,
            tag: 0,
            enabled: true,
            update_interval: 1,
            update_order: 0,
            component_bits: BitSet::new(),
            components: Vec::new(),
            behaviour: None,
            scene: None,
            destroyed: false,
        }
    }

    /// Set the tag before the entity is added to a scene
    #[must_use]
    pub const fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    /// Set the update order before the entity is added to a scene
    #[must_use]
    pub const fn with_update_order(mut self, update_order: i32) -> Self {
        self.update_order = update_order;
        self
    }

    /// Update only every `interval` frames
    #[must_use]
    pub fn with_update_interval(mut self, interval: u32) -> Self {
        self.set_update_interval(interval);
        self
    }

    /// Attach a behaviour
    #[must_use]
    pub fn with_behaviour(mut self, behaviour: impl EntityBehaviour) -> Self {
        self.behaviour = Some(Box::new(behaviour));
        self
    }

    /// Entity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Creation sequence number assigned by the store
    pub const fn serial(&self) -> u64 {
        self.serial
    }

    /// Tag used by the tag index
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    pub(crate) fn set_tag(&mut self, tag: Tag) {
        self.tag = tag;
    }

    /// Whether the entity takes part in updates and component queries
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the entity
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of frames between updates (at least 1)
    pub const fn update_interval(&self) -> u32 {
        self.update_interval
    }

    /// Set the number of frames between updates; zero is treated as one
    pub fn set_update_interval(&mut self, interval: u32) {
        self.update_interval = interval.max(1);
    }

    /// Primary sort key of the live list
    pub const fn update_order(&self) -> i32 {
        self.update_order
    }

    pub(crate) fn set_update_order(&mut self, update_order: i32) {
        self.update_order = update_order;
    }

    /// Total order used to sort live entities: update order, then creation order
    pub const fn sort_key(&self) -> (i32, u64) {
        (self.update_order, self.serial)
    }

    /// Scene the entity is currently live in
    pub const fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub(crate) fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }

    /// True once the entity has been force-destroyed
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    /// Component signature
    pub const fn component_bits(&self) -> &BitSet {
        &self.component_bits
    }

    /// Attach a component, registering its type on first use
    pub fn add_component<C: Component>(&mut self, types: &mut ComponentTypeManager, component: C) -> ComponentType {
        let component_type = types.register::<C>();
        self.component_bits.set(component_type.index());
        self.components.push((component_type, Box::new(component)));
        component_type
    }

    /// Detach the first component of type `C`.
    ///
    /// The signature bit is cleared once no component of that type remains.
    pub fn remove_component<C: Component>(&mut self) -> Option<C> {
        let position = self
            .components
            .iter()
            .position(|(_, component)| (**component).as_any().is::<C>())?;
        let (component_type, component) = self.components.remove(position);

        if !self.components.iter().any(|(t, _)| *t == component_type) {
            self.component_bits.clear(component_type.index());
        }

        component.into_any().downcast::<C>().ok().map(|boxed| *boxed)
    }

    /// First component of type `C`
    pub fn get_component<C: Component>(&self) -> Option<&C> {
        self.components
            .iter()
            .find_map(|(_, component)| (**component).as_any().downcast_ref::<C>())
    }

    /// First component of type `C`, mutably
    pub fn get_component_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components
            .iter_mut()
            .find_map(|(_, component)| (**component).as_any_mut().downcast_mut::<C>())
    }

    /// Append every component of type `C` to `out`
    pub fn get_components<'a, C: Component>(&'a self, out: &mut Vec<&'a C>) {
        out.extend(
            self.components
                .iter()
                .filter_map(|(_, component)| (**component).as_any().downcast_ref::<C>()),
        );
    }

    /// True when a component of type `C` is attached
    pub fn has_component<C: Component>(&self) -> bool {
        self.get_component::<C>().is_some()
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// True when the attached behaviour is a `B`
    pub fn has_behaviour<B: EntityBehaviour>(&self) -> bool {
        self.behaviour
            .as_deref()
            .is_some_and(|behaviour| behaviour.as_any().is::<B>())
    }

    /// The attached behaviour, if it is a `B`
    pub fn behaviour<B: EntityBehaviour>(&self) -> Option<&B> {
        self.behaviour.as_deref()?.as_any().downcast_ref::<B>()
    }

    /// The attached behaviour mutably, if it is a `B`
    pub fn behaviour_mut<B: EntityBehaviour>(&mut self) -> Option<&mut B> {
        self.behaviour.as_deref_mut()?.as_any_mut().downcast_mut::<B>()
    }

    pub(crate) fn take_behaviour(&mut self) -> Option<Box<dyn EntityBehaviour>> {
        self.behaviour.take()
    }

    pub(crate) fn restore_behaviour(&mut self, behaviour: Box<dyn EntityBehaviour>) {
        self.behaviour = Some(behaviour);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("serial", &self.serial)
            .field("tag", &self.tag)
            .field("enabled", &self.enabled)
            .field("update_interval", &self.update_interval)
            .field("update_order", &self.update_order)
            .field("component_bits", &self.component_bits)
            .field("scene", &self.scene)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

/// Owning storage for every entity of a scene, live or not
#[derive(Default)]
pub struct EntityStore {
    entities: SlotMap<EntityId, Entity>,
    next_serial: u64,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an entity and assign its creation serial
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        entity.serial = self.next_serial;
        self.next_serial += 1;
        self.entities.insert(entity)
    }

    /// Remove an entity from storage entirely
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    /// Get an entity
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Get an entity mutably
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// True when `id` refers to a stored entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when the store is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over all stored entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// Keep only the entities for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId, &mut Entity) -> bool) {
        self.entities.retain(|id, entity| keep(id, entity));
    }

    /// Compare two entities by their sort key; missing entities sort last
    pub fn compare(&self, a: EntityId, b: EntityId) -> Ordering {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.sort_key().cmp(&b.sort_key()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    struct Armor;
    impl Component for Armor {}

    struct Patrol;
    impl EntityBehaviour for Patrol {}

    #[test]
    fn test_components_update_signature() {
        let mut types = ComponentTypeManager::new();
        let mut entity = Entity::new("knight");

        let health = entity.add_component(&mut types, Health(10));
        entity.add_component(&mut types, Health(5));
        let armor = entity.add_component(&mut types, Armor);

        assert!(entity.component_bits().get(health.index()));
        assert!(entity.component_bits().get(armor.index()));
        assert_eq!(entity.get_component::<Health>(), Some(&Health(10)));

        let mut all = Vec::new();
        entity.get_components::<Health>(&mut all);
        assert_eq!(all, vec![&Health(10), &Health(5)]);

        assert_eq!(entity.remove_component::<Health>(), Some(Health(10)));
        assert!(entity.component_bits().get(health.index()));
        assert_eq!(entity.remove_component::<Health>(), Some(Health(5)));
        assert!(!entity.component_bits().get(health.index()));
        assert_eq!(entity.remove_component::<Health>(), None);
        assert_eq!(entity.component_count(), 1);
    }

    #[test]
    fn test_get_component_mut() {
        let mut types = ComponentTypeManager::new();
        let mut entity = Entity::new("knight");
        entity.add_component(&mut types, Health(1));

        if let Some(health) = entity.get_component_mut::<Health>() {
            health.0 = 42;
        }
        assert_eq!(entity.get_component::<Health>(), Some(&Health(42)));
    }

    #[test]
    fn test_behaviour_downcast() {
        let entity = Entity::new("guard").with_behaviour(Patrol);
        assert!(entity.has_behaviour::<Patrol>());
        assert!(entity.behaviour::<Patrol>().is_some());
        assert!(!Entity::new("rock").has_behaviour::<Patrol>());
    }

    #[test]
    fn test_store_assigns_serials_in_creation_order() {
        let mut store = EntityStore::new();
        let a = store.insert(Entity::new("a").with_update_order(1));
        let b = store.insert(Entity::new("b"));
        let c = store.insert(Entity::new("c"));

        assert_eq!(store.get(a).map(Entity::serial), Some(0));
        assert_eq!(store.get(c).map(Entity::serial), Some(2));
        assert_eq!(store.compare(b, c), Ordering::Less);
        assert_eq!(store.compare(a, b), Ordering::Greater);
    }

    #[test]
    fn test_update_interval_is_at_least_one() {
        let entity = Entity::new("slow").with_update_interval(0);
        assert_eq!(entity.update_interval(), 1);
    }
}
