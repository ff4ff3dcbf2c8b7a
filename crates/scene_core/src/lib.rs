//! # Scene Core
//!
//! The scene layer of a 2D game engine: entities with component signatures,
//! matcher-routed entity systems, a deferred entity list and a quadtree
//! broad-phase.
//!
//! ## Features
//!
//! - **Component signatures**: growable bit sets indexed by registered component types
//! - **Matchers**: all-of / none-of / any-of routing of entities to systems
//! - **Deferred entity list**: additions and removals applied once per frame
//! - **Quadtree broad-phase**: rectangle queries over moving objects
//! - **Config files**: scene settings loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_core::prelude::*;
//!
//! struct Position(i32, i32);
//! impl Component for Position {}
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SceneConfig::load_or_default("scene.toml")?;
//!     let mut scene = Scene::new(SceneId(0), config)?;
//!
//!     let player = scene.create_entity("player");
//!     scene.add_component(player, Position(0, 0));
//!     scene.set_bounds(player, Rectangle::new(0, 0, 16, 16));
//!
//!     scene.update(1.0 / 60.0);
//!     let _nearby = scene.query_rect(Rectangle::new(0, 0, 64, 64));
//!     scene.end();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod config;
pub mod core;
pub mod ecs;
pub mod foundation;
pub mod spatial;

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{SceneConfig, SpatialConfig},
        ecs::{
            Component, ComponentType, Entity, EntityBehaviour, EntityContext, EntityId, EntityState,
            EntityStore, EntitySystem, Matcher, Scene, SceneId, Tag,
        },
        foundation::{
            math::{Rectangle, Vec2},
            time::Timer,
        },
        spatial::{QuadTree, QuadTreeConfig, QuadTreeKey, QuadTreeStorable, SpatialError, SpatialQuery},
    };
}
