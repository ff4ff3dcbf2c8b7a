//! Spatial partitioning data structures
//!
//! Provides the quadtree used for broad-phase collision detection and
//! culling in 2D space, plus the [`SpatialQuery`] facade scenes talk to.

mod quadtree;
mod spatial_query;

pub use quadtree::{NodeId, QuadTree, QuadTreeConfig, QuadTreeKey, QuadTreeNode, QuadTreeStorable, SpatialError};
pub use spatial_query::{QuadTreeSpatialQuery, SpatialEntry, SpatialQuery};
