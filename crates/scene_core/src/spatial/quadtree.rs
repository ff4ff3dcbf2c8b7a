//! Quadtree spatial partitioning structure
//!
//! Divides a 2D integer region into hierarchical quadrants for fast
//! rectangle queries. A leaf subdivides into four children once it would hold
//! more than `max_objects_per_node` objects; objects that straddle a quadrant
//! boundary stay in the smallest node that fully contains them.
//!
//! Nodes live in a [`FreeList`] arena and refer to each other by [`NodeId`];
//! objects live in a [`SlotMap`] and remember the node that owns them, so
//! deletes and moves start from the owner instead of searching the tree.
//!
//! Objects whose bounds leave the root rectangle are kept at the root rather
//! than rejected, so moving objects may temporarily leave the world.

use crate::foundation::collections::{FreeList, SlotMap};
use crate::foundation::math::Rectangle;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    /// Handle to an object stored in a [`QuadTree`]
    pub struct QuadTreeKey;
}

/// Anything with an axis-aligned bounding rectangle
pub trait QuadTreeStorable {
    /// Current bounds of the object
    fn bounds(&self) -> Rectangle;
}

impl QuadTreeStorable for Rectangle {
    fn bounds(&self) -> Rectangle {
        *self
    }
}

/// Errors raised when building a quadtree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpatialError {
    /// The root rectangle has no area
    #[error("Quadtree bounds must have a positive area, got {0:?}")]
    InvalidBounds(Rectangle),

    /// A node must be able to hold at least one object
    #[error("max_objects_per_node must be at least 1")]
    InvalidCapacity,
}

/// Configuration for quadtree behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadTreeConfig {
    /// Objects a leaf holds before it subdivides
    pub max_objects_per_node: usize,

    /// Nodes narrower or shorter than this never subdivide
    pub min_node_size: i32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_objects_per_node: 2,
            min_node_size: 2,
        }
    }
}

/// Index of a node in the quadtree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Single node in the quadtree hierarchy
#[derive(Debug, Clone)]
pub struct QuadTreeNode {
    rect: Rectangle,
    parent: Option<NodeId>,
    children: Option<[NodeId; 4]>,
    objects: Vec<QuadTreeKey>,
}

impl QuadTreeNode {
    const fn new(rect: Rectangle, parent: Option<NodeId>) -> Self {
        Self {
            rect,
            parent,
            children: None,
            objects: Vec::new(),
        }
    }

    /// Area covered by this node
    pub const fn rect(&self) -> Rectangle {
        self.rect
    }

    /// Parent node, `None` for the root
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in top-left, top-right, bottom-left, bottom-right order
    pub const fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    /// Objects held directly by this node
    pub fn objects(&self) -> &[QuadTreeKey] {
        &self.objects
    }

    /// Check if this node is a leaf (has no children)
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[derive(Debug, Clone)]
struct QuadTreeObject<T> {
    data: T,
    owner: Option<NodeId>,
}

/// Region quadtree over objects with integer bounds
#[derive(Debug, Clone)]
pub struct QuadTree<T: QuadTreeStorable> {
    config: QuadTreeConfig,
    nodes: FreeList<QuadTreeNode>,
    root: NodeId,
    objects: SlotMap<QuadTreeKey, QuadTreeObject<T>>,
}

/// Objects are reported when they overlap the search area or lie inside it.
/// Zero-area objects only satisfy the second test.
fn hits(search: &Rectangle, bounds: &Rectangle) -> bool {
    search.intersects(bounds) || search.contains(bounds)
}

impl<T: QuadTreeStorable> QuadTree<T> {
    /// Create a tree covering `bounds` with the default configuration
    pub fn new(bounds: Rectangle) -> Result<Self, SpatialError> {
        Self::with_config(bounds, QuadTreeConfig::default())
    }

    /// Create a tree covering `bounds`
    pub fn with_config(bounds: Rectangle, config: QuadTreeConfig) -> Result<Self, SpatialError> {
        if bounds.is_empty() {
            return Err(SpatialError::InvalidBounds(bounds));
        }
        if config.max_objects_per_node == 0 {
            return Err(SpatialError::InvalidCapacity);
        }

        let mut nodes = FreeList::new();
        let root = NodeId(nodes.insert(QuadTreeNode::new(bounds, None)));
        Ok(Self {
            config,
            nodes,
            root,
            objects: SlotMap::with_key(),
        })
    }

    /// Configuration this tree was built with
    pub const fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Area covered by the root
    pub fn bounds(&self) -> Rectangle {
        self.nodes[self.root.0].rect
    }

    /// Root node id
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&QuadTreeNode> {
        self.nodes.get(id.0)
    }

    /// Number of nodes currently allocated, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when no object is stored
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Count objects by walking the tree from the root
    pub fn count(&self) -> usize {
        self.count_in(self.root)
    }

    /// Count objects held by `node` and all of its descendants
    pub fn count_in(&self, node: NodeId) -> usize {
        let Some(node) = self.nodes.get(node.0) else {
            return 0;
        };
        let below: usize = node
            .children
            .map_or(0, |children| children.iter().map(|&child| self.count_in(child)).sum());
        node.objects.len() + below
    }

    /// True when `node` has no children and holds no objects
    pub fn is_empty_leaf(&self, node: NodeId) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|node| node.children.is_none() && node.objects.is_empty())
    }

    /// Get a stored object
    pub fn get(&self, key: QuadTreeKey) -> Option<&T> {
        self.objects.get(key).map(|object| &object.data)
    }

    /// Get a stored object mutably.
    ///
    /// Call [`QuadTree::move_object`] afterwards if its bounds changed, or use
    /// [`QuadTree::update`] which does both.
    pub fn get_mut(&mut self, key: QuadTreeKey) -> Option<&mut T> {
        self.objects.get_mut(key).map(|object| &mut object.data)
    }

    /// Node currently holding `key`
    pub fn owner_of(&self, key: QuadTreeKey) -> Option<NodeId> {
        self.objects.get(key)?.owner
    }

    /// Iterate over every stored object
    pub fn iter(&self) -> impl Iterator<Item = (QuadTreeKey, &T)> {
        self.objects.iter().map(|(key, object)| (key, &object.data))
    }

    /// Insert an object and return its key
    pub fn insert(&mut self, item: T) -> QuadTreeKey {
        let key = self.objects.insert(QuadTreeObject { data: item, owner: None });
        self.insert_at(self.root, key);
        key
    }

    /// Delete an object, optionally collapsing subtrees left empty
    pub fn delete(&mut self, key: QuadTreeKey, clean: bool) -> Option<T> {
        let object = self.objects.remove(key)?;
        if let Some(owner) = object.owner {
            self.detach(owner, key);
            if clean {
                self.clean_upwards(owner);
            }
        }
        Some(object.data)
    }

    /// Re-home an object after its bounds changed.
    ///
    /// Returns `false` when the key is unknown.
    pub fn move_object(&mut self, key: QuadTreeKey) -> bool {
        let Some(object) = self.objects.get(key) else {
            return false;
        };
        let start = object.owner.unwrap_or(self.root);
        self.relocate(start, key);
        true
    }

    /// Mutate an object in place and re-home it
    pub fn update(&mut self, key: QuadTreeKey, f: impl FnOnce(&mut T)) -> bool {
        let Some(object) = self.objects.get_mut(key) else {
            return false;
        };
        f(&mut object.data);
        self.move_object(key)
    }

    /// Remove every object, leaving the root as an empty leaf
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        self.nodes.clear();
        self.objects.clear();
        self.root = NodeId(self.nodes.insert(QuadTreeNode::new(bounds, None)));
    }

    /// Objects whose bounds overlap or lie inside `search`
    pub fn get_objects(&self, search: Rectangle) -> Vec<&T> {
        let mut results = Vec::new();
        self.get_objects_into(search, &mut results);
        results
    }

    /// Append the objects whose bounds overlap or lie inside `search` to `results`
    pub fn get_objects_into<'a>(&'a self, search: Rectangle, results: &mut Vec<&'a T>) {
        // Root objects may lie outside the root rectangle, test them one by one
        let root = &self.nodes[self.root.0];
        self.collect_hits(root, &search, results);

        if let Some(children) = root.children {
            for child in children {
                self.collect(child, &search, results);
            }
        }
    }

    fn collect<'a>(&'a self, node: NodeId, search: &Rectangle, results: &mut Vec<&'a T>) {
        let node = &self.nodes[node.0];

        if search.contains(&node.rect) {
            self.collect_all(node, results);
        } else if search.touches(&node.rect) {
            // edge contact is enough: zero-area objects on the shared edge still hit
            self.collect_hits(node, search, results);
            if let Some(children) = node.children {
                for child in children {
                    self.collect(child, search, results);
                }
            }
        }
    }

    fn collect_hits<'a>(&'a self, node: &QuadTreeNode, search: &Rectangle, results: &mut Vec<&'a T>) {
        for &key in &node.objects {
            let data = &self.objects[key].data;
            if hits(search, &data.bounds()) {
                results.push(data);
            }
        }
    }

    fn collect_all<'a>(&'a self, node: &QuadTreeNode, results: &mut Vec<&'a T>) {
        results.extend(node.objects.iter().map(|&key| &self.objects[key].data));
        if let Some(children) = node.children {
            for child in children {
                self.collect_all(&self.nodes[child.0], results);
            }
        }
    }

    fn add_to_node(&mut self, node: NodeId, key: QuadTreeKey) {
        self.nodes[node.0].objects.push(key);
        self.objects[key].owner = Some(node);
    }

    fn detach(&mut self, node: NodeId, key: QuadTreeKey) {
        let objects = &mut self.nodes[node.0].objects;
        if let Some(index) = objects.iter().position(|&held| held == key) {
            objects.swap_remove(index);
        }
    }

    fn can_subdivide(&self, rect: &Rectangle) -> bool {
        rect.width >= self.config.min_node_size && rect.height >= self.config.min_node_size
    }

    fn insert_at(&mut self, node: NodeId, key: QuadTreeKey) {
        let bounds = self.objects[key].data.bounds();
        let (rect, parent, has_children, held) = {
            let node = &self.nodes[node.0];
            (node.rect, node.parent, node.children.is_some(), node.objects.len())
        };

        if !rect.contains(&bounds) {
            debug_assert!(parent.is_none(), "object {bounds:?} routed to non-root node {rect:?} that cannot hold it");
            // outside the world: keep it at the root
            if parent.is_none() {
                self.add_to_node(node, key);
            }
            return;
        }

        if !has_children && (held < self.config.max_objects_per_node || !self.can_subdivide(&rect)) {
            self.add_to_node(node, key);
            return;
        }

        if !has_children {
            self.subdivide(node);
        }

        let destination = self.destination(node, &bounds);
        if destination == node {
            self.add_to_node(node, key);
        } else {
            self.insert_at(destination, key);
        }
    }

    fn subdivide(&mut self, node: NodeId) {
        let rect = self.nodes[node.0].rect;
        let children = rect
            .quadrants()
            .map(|quadrant| NodeId(self.nodes.insert(QuadTreeNode::new(quadrant, Some(node)))));
        self.nodes[node.0].children = Some(children);
        log::trace!("Subdivided quadtree node {:?} at {:?}", node, rect);

        // push down everything that fits entirely inside one child
        let held = std::mem::take(&mut self.nodes[node.0].objects);
        for key in held {
            let bounds = self.objects[key].data.bounds();
            let destination = self.destination(node, &bounds);
            if destination == node {
                self.nodes[node.0].objects.push(key);
            } else {
                self.insert_at(destination, key);
            }
        }
    }

    /// Child of `node` that fully contains `bounds`, or `node` itself
    fn destination(&self, node: NodeId, bounds: &Rectangle) -> NodeId {
        self.nodes[node.0]
            .children
            .and_then(|children| {
                children
                    .into_iter()
                    .find(|child| self.nodes[child.0].rect.contains(bounds))
            })
            .unwrap_or(node)
    }

    fn relocate(&mut self, start: NodeId, key: QuadTreeKey) {
        let bounds = self.objects[key].data.bounds();
        let owner = self.objects[key].owner;
        let mut current = start;

        loop {
            let node = &self.nodes[current.0];

            if node.rect.contains(&bounds) {
                if node.children.is_some() {
                    let destination = self.destination(current, &bounds);
                    if owner != Some(destination) {
                        // no cleaning until the insert is done, it could drop the destination
                        if let Some(former) = owner {
                            self.detach(former, key);
                        }
                        self.insert_at(destination, key);
                        if let Some(former) = owner {
                            self.clean_upwards(former);
                        }
                    }
                }
                return;
            }

            match node.parent {
                Some(parent) => current = parent,
                None => {
                    // left the world entirely, park it at the root
                    if owner != Some(current) {
                        if let Some(former) = owner {
                            self.detach(former, key);
                        }
                        self.add_to_node(current, key);
                        if let Some(former) = owner {
                            self.clean_upwards(former);
                        }
                    }
                    return;
                }
            }
        }
    }

    fn clean_upwards(&mut self, start: NodeId) {
        let mut current = Some(start);

        while let Some(id) = current {
            let Some(node) = self.nodes.get(id.0) else {
                return;
            };
            let (parent, children) = (node.parent, node.children);

            let Some(children) = children else {
                // one of four leaves that may all be empty now
                current = parent.filter(|_| self.nodes[id.0].objects.is_empty());
                continue;
            };

            if !children.iter().all(|&child| self.is_empty_leaf(child)) {
                return;
            }
            for child in children {
                self.nodes.remove(child.0);
            }
            self.nodes[id.0].children = None;
            log::trace!("Collapsed quadtree node {:?}", id);

            current = parent.filter(|_| self.nodes[id.0].objects.is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> QuadTree<Rectangle> {
        QuadTree::new(Rectangle::new(0, 0, 100, 100)).unwrap()
    }

    fn sorted(objects: Vec<&Rectangle>) -> Vec<Rectangle> {
        let mut objects: Vec<Rectangle> = objects.into_iter().copied().collect();
        objects.sort_by_key(|rect| (rect.x, rect.y, rect.width, rect.height));
        objects
    }

    #[test]
    fn test_rejects_degenerate_bounds() {
        assert_eq!(
            QuadTree::<Rectangle>::new(Rectangle::new(0, 0, 0, 10)).unwrap_err(),
            SpatialError::InvalidBounds(Rectangle::new(0, 0, 0, 10))
        );
        let config = QuadTreeConfig {
            max_objects_per_node: 0,
            ..QuadTreeConfig::default()
        };
        assert_eq!(
            QuadTree::<Rectangle>::with_config(Rectangle::new(0, 0, 10, 10), config).unwrap_err(),
            SpatialError::InvalidCapacity
        );
    }

    #[test]
    fn test_third_object_subdivides() {
        let mut tree = tree();
        let a = tree.insert(Rectangle::new(5, 5, 10, 10));
        let b = tree.insert(Rectangle::new(60, 5, 10, 10));
        assert!(tree.node(tree.root()).unwrap().is_leaf());

        let c = tree.insert(Rectangle::new(5, 60, 10, 10));
        let root = tree.node(tree.root()).unwrap();
        let [tl, tr, bl, _] = root.children().unwrap();

        assert!(root.objects().is_empty());
        assert_eq!(tree.owner_of(a), Some(tl));
        assert_eq!(tree.owner_of(b), Some(tr));
        assert_eq!(tree.owner_of(c), Some(bl));
        assert_eq!(tree.count(), 3);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_straddling_object_stays_in_parent() {
        let mut tree = tree();
        tree.insert(Rectangle::new(5, 5, 10, 10));
        tree.insert(Rectangle::new(60, 5, 10, 10));
        let middle = tree.insert(Rectangle::new(45, 45, 10, 10));

        assert_eq!(tree.owner_of(middle), Some(tree.root()));
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn test_insert_then_delete_restores_empty_leaf() {
        let mut tree = tree();
        let keys: Vec<_> = [
            Rectangle::new(1, 1, 2, 2),
            Rectangle::new(4, 4, 2, 2),
            Rectangle::new(7, 7, 2, 2),
            Rectangle::new(1, 7, 2, 2),
        ]
        .into_iter()
        .map(|rect| tree.insert(rect))
        .collect();
        assert!(tree.node_count() > 1);

        for key in keys {
            assert!(tree.delete(key, true).is_some());
        }

        assert!(tree.is_empty_leaf(tree.root()));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.count(), 0);
    }

    #[test]
    fn test_delete_without_clean_keeps_children() {
        let mut tree = tree();
        let a = tree.insert(Rectangle::new(5, 5, 10, 10));
        tree.insert(Rectangle::new(60, 5, 10, 10));
        tree.insert(Rectangle::new(5, 60, 10, 10));

        assert_eq!(tree.delete(a, false), Some(Rectangle::new(5, 5, 10, 10)));
        assert_eq!(tree.delete(a, false), None);
        assert!(!tree.node(tree.root()).unwrap().is_leaf());
        assert_eq!(tree.count(), 2);
    }

    #[test]
    fn test_query_is_partition_invariant() {
        let objects = [
            Rectangle::new(2, 2, 5, 5),
            Rectangle::new(70, 10, 8, 8),
            Rectangle::new(45, 45, 10, 10),
            Rectangle::new(10, 80, 3, 3),
            Rectangle::new(88, 88, 6, 6),
            Rectangle::new(30, 30, 0, 0),
            Rectangle::new(50, 50, 0, 0),
        ];
        let searches = [
            Rectangle::new(0, 0, 50, 50),
            Rectangle::new(50, 50, 10, 10),
            Rectangle::new(30, 30, 0, 0),
            Rectangle::new(40, 40, 20, 20),
            Rectangle::new(-10, -10, 200, 200),
            Rectangle::new(60, 0, 40, 100),
            Rectangle::new(200, 200, 5, 5),
        ];

        let mut flat = QuadTree::with_config(
            Rectangle::new(0, 0, 100, 100),
            QuadTreeConfig {
                max_objects_per_node: 64,
                ..QuadTreeConfig::default()
            },
        )
        .unwrap();
        let mut deep = tree();
        for rect in objects {
            flat.insert(rect);
            deep.insert(rect);
        }
        assert!(flat.node(flat.root()).unwrap().is_leaf());
        assert!(!deep.node(deep.root()).unwrap().is_leaf());

        for search in searches {
            assert_eq!(sorted(flat.get_objects(search)), sorted(deep.get_objects(search)), "{search:?}");
        }
    }

    #[test]
    fn test_query_filters_partial_overlap() {
        let mut tree = tree();
        tree.insert(Rectangle::new(5, 5, 10, 10));
        tree.insert(Rectangle::new(60, 5, 10, 10));
        tree.insert(Rectangle::new(5, 60, 10, 10));

        let found = tree.get_objects(Rectangle::new(0, 0, 20, 20));
        assert_eq!(found, vec![&Rectangle::new(5, 5, 10, 10)]);
        assert!(tree.get_objects(Rectangle::new(30, 30, 5, 5)).is_empty());
    }

    #[test]
    fn test_move_reowns_and_collapses() {
        let mut tree = tree();
        let a = tree.insert(Rectangle::new(5, 5, 10, 10));
        let b = tree.insert(Rectangle::new(10, 10, 5, 5));
        let c = tree.insert(Rectangle::new(20, 20, 5, 5));
        let [tl, tr, ..] = tree.node(tree.root()).unwrap().children().unwrap();
        assert_eq!(tree.count_in(tl), 3);

        tree.delete(b, true);
        tree.delete(c, true);
        assert_eq!(tree.count_in(tl), 1);

        assert!(tree.update(a, |rect| rect.x = 70));
        assert_eq!(tree.owner_of(a), Some(tr));
        assert_eq!(tree.count(), 1);
        assert!(tree.is_empty_leaf(tl));
    }

    #[test]
    fn test_move_up_then_down_into_sibling() {
        let mut tree = tree();
        let a = tree.insert(Rectangle::new(5, 5, 10, 10));
        tree.insert(Rectangle::new(60, 5, 10, 10));
        tree.insert(Rectangle::new(5, 60, 10, 10));
        let [_, _, _, br] = tree.node(tree.root()).unwrap().children().unwrap();

        tree.get_mut(a).unwrap().x = 70;
        tree.get_mut(a).unwrap().y = 70;
        assert!(tree.move_object(a));

        assert_eq!(tree.owner_of(a), Some(br));
        assert_eq!(tree.count(), 3);
        assert_eq!(tree.get_objects(Rectangle::new(50, 50, 50, 50)), vec![&Rectangle::new(70, 70, 10, 10)]);
    }

    #[test]
    fn test_out_of_bounds_objects_stay_at_root() {
        let mut tree = tree();
        let outside = tree.insert(Rectangle::new(150, 150, 10, 10));
        let straddling = tree.insert(Rectangle::new(95, 95, 10, 10));
        for i in 0..4 {
            tree.insert(Rectangle::new(5 + i * 10, 5, 5, 5));
        }

        assert_eq!(tree.owner_of(outside), Some(tree.root()));
        assert_eq!(tree.owner_of(straddling), Some(tree.root()));
        assert_eq!(tree.count(), 6);

        assert_eq!(tree.get_objects(Rectangle::new(140, 140, 30, 30)), vec![&Rectangle::new(150, 150, 10, 10)]);
        // a search covering the root must still test root objects individually
        assert_eq!(tree.get_objects(Rectangle::new(0, 0, 100, 100)).len(), 5);
    }

    #[test]
    fn test_moving_out_of_world_parks_at_root() {
        let mut tree = tree();
        let a = tree.insert(Rectangle::new(5, 5, 10, 10));
        tree.insert(Rectangle::new(60, 5, 10, 10));
        tree.insert(Rectangle::new(5, 60, 10, 10));

        tree.update(a, |rect| rect.x = -50);
        assert_eq!(tree.owner_of(a), Some(tree.root()));

        tree.update(a, |rect| rect.x = 5);
        assert_ne!(tree.owner_of(a), Some(tree.root()));
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn test_odd_size_leaves_slack() {
        let mut tree = QuadTree::new(Rectangle::new(0, 0, 11, 11)).unwrap();
        tree.insert(Rectangle::new(0, 0, 2, 2));
        tree.insert(Rectangle::new(6, 0, 2, 2));
        let edge = tree.insert(Rectangle::new(10, 10, 1, 1));

        let [_, _, _, br] = tree.node(tree.root()).unwrap().children().unwrap();
        assert_eq!(tree.node(br).unwrap().rect(), Rectangle::new(5, 5, 5, 5));
        // the trailing pixel belongs to no quadrant
        assert_eq!(tree.owner_of(edge), Some(tree.root()));
    }

    #[test]
    fn test_clear_resets_to_empty_leaf() {
        let mut tree = tree();
        for i in 0..10 {
            tree.insert(Rectangle::new(i * 9, i * 9, 4, 4));
        }
        tree.clear();

        assert!(tree.is_empty());
        assert!(tree.is_empty_leaf(tree.root()));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.bounds(), Rectangle::new(0, 0, 100, 100));
    }

    #[test]
    fn test_identical_points_do_not_subdivide_forever() {
        let mut tree = tree();
        for _ in 0..8 {
            tree.insert(Rectangle::new(3, 3, 0, 0));
        }
        assert_eq!(tree.count(), 8);
        assert_eq!(tree.get_objects(Rectangle::new(0, 0, 10, 10)).len(), 8);
    }
}
