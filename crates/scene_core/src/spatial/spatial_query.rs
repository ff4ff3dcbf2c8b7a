//! Abstract spatial query interface for broad-phase collision detection
//!
//! Physics or culling code hands in entity bounds and gets back the entities
//! whose bounds overlap an area. Exact shape tests happen elsewhere; this
//! layer only culls pairs that cannot possibly touch.

use super::{QuadTree, QuadTreeConfig, QuadTreeKey, QuadTreeStorable, SpatialError};
use crate::ecs::EntityId;
use crate::foundation::math::Rectangle;
use std::collections::HashMap;

/// Abstract interface for spatial partitioning used in broad-phase tests
pub trait SpatialQuery {
    /// Insert an entity with its bounds, replacing any previous bounds
    fn insert(&mut self, entity: EntityId, bounds: Rectangle);

    /// Remove an entity; returns `false` if it was not tracked
    fn remove(&mut self, entity: EntityId) -> bool;

    /// Update an entity's bounds, inserting it if needed
    fn update(&mut self, entity: EntityId, bounds: Rectangle);

    /// Entities whose bounds overlap or lie inside `area`
    fn query_rect(&self, area: Rectangle) -> Vec<EntityId>;

    /// Other entities whose bounds overlap those of `entity`
    fn query_nearby(&self, entity: EntityId) -> Vec<EntityId> {
        self.get_bounds(entity).map_or_else(Vec::new, |bounds| {
            let mut nearby = self.query_rect(bounds);
            nearby.retain(|&other| other != entity);
            nearby
        })
    }

    /// Current bounds of a tracked entity
    fn get_bounds(&self, entity: EntityId) -> Option<Rectangle>;

    /// Forget every entity
    fn clear(&mut self);

    /// Number of tracked entities
    fn entity_count(&self) -> usize;
}

/// Entity bounds as stored in the quadtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialEntry {
    /// Entity the bounds belong to
    pub entity: EntityId,

    /// World-space bounds
    pub bounds: Rectangle,
}

impl QuadTreeStorable for SpatialEntry {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

/// Quadtree-based implementation of [`SpatialQuery`]
#[derive(Debug, Clone)]
pub struct QuadTreeSpatialQuery {
    tree: QuadTree<SpatialEntry>,
    keys: HashMap<EntityId, QuadTreeKey>,
}

impl QuadTreeSpatialQuery {
    /// Create a broad-phase covering `world_bounds`
    pub fn new(world_bounds: Rectangle, config: QuadTreeConfig) -> Result<Self, SpatialError> {
        Ok(Self {
            tree: QuadTree::with_config(world_bounds, config)?,
            keys: HashMap::new(),
        })
    }

    /// Underlying quadtree, for debug drawing and statistics
    pub const fn quadtree(&self) -> &QuadTree<SpatialEntry> {
        &self.tree
    }
}

impl SpatialQuery for QuadTreeSpatialQuery {
    fn insert(&mut self, entity: EntityId, bounds: Rectangle) {
        self.update(entity, bounds);
    }

    fn remove(&mut self, entity: EntityId) -> bool {
        self.keys
            .remove(&entity)
            .and_then(|key| self.tree.delete(key, true))
            .is_some()
    }

    fn update(&mut self, entity: EntityId, bounds: Rectangle) {
        if let Some(&key) = self.keys.get(&entity) {
            self.tree.update(key, |entry| entry.bounds = bounds);
        } else {
            let key = self.tree.insert(SpatialEntry { entity, bounds });
            self.keys.insert(entity, key);
        }
    }

    fn query_rect(&self, area: Rectangle) -> Vec<EntityId> {
        self.tree
            .get_objects(area)
            .into_iter()
            .map(|entry| entry.entity)
            .collect()
    }

    fn get_bounds(&self, entity: EntityId) -> Option<Rectangle> {
        let key = self.keys.get(&entity)?;
        self.tree.get(*key).map(|entry| entry.bounds)
    }

    fn clear(&mut self) {
        self.tree.clear();
        self.keys.clear();
    }

    fn entity_count(&self) -> usize {
        self.keys.len()
    }
}
