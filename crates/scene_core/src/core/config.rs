//! # Scene Configuration
//!
//! Configuration structures for the scene core: entity-system routing and the
//! optional quadtree broad-phase. All types are serializable so they can be
//! loaded from TOML or RON through the [`Config`] trait.
//!
//! ```toml
//! name = "level_1"
//! entity_systems_enabled = true
//!
//! [spatial]
//! enabled = true
//! world_bounds = { x = 0, y = 0, width = 2048, height = 2048 }
//!
//! [spatial.quadtree]
//! max_objects_per_node = 2
//! ```

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::Rectangle;
use crate::spatial::QuadTreeConfig;

/// # Scene Configuration
///
/// Controls how a [`crate::ecs::Scene`] routes entities and whether it keeps
/// a spatial index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene name, used in log output
    pub name: String,

    /// Route added/removed entities to the registered entity systems
    pub entity_systems_enabled: bool,

    /// Broad-phase settings
    pub spatial: SpatialConfig,
}

impl SceneConfig {
    /// Create a configuration with the given scene name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Enable or disable entity-system routing
    #[must_use]
    pub const fn with_entity_systems(mut self, enabled: bool) -> Self {
        self.entity_systems_enabled = enabled;
        self
    }

    /// Set the broad-phase configuration
    #[must_use]
    pub fn with_spatial(mut self, spatial: SpatialConfig) -> Self {
        self.spatial = spatial;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "scene".to_string(),
            entity_systems_enabled: true,
            spatial: SpatialConfig::default(),
        }
    }
}

impl Config for SceneConfig {}

/// # Spatial Configuration
///
/// World bounds and quadtree tuning for the scene broad-phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Whether the scene builds a broad-phase index at all
    pub enabled: bool,

    /// Area covered by the quadtree root
    pub world_bounds: Rectangle,

    /// Quadtree tuning
    pub quadtree: QuadTreeConfig,
}

impl SpatialConfig {
    /// Create an enabled configuration covering `world_bounds`
    pub fn new(world_bounds: Rectangle) -> Self {
        Self {
            enabled: true,
            world_bounds,
            quadtree: QuadTreeConfig::default(),
        }
    }
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            world_bounds: Rectangle::new(0, 0, 1024, 1024),
            quadtree: QuadTreeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SceneConfig = toml::from_str("name = \"arena\"").unwrap();
        assert_eq!(config.name, "arena");
        assert!(config.entity_systems_enabled);
        assert!(!config.spatial.enabled);
        assert_eq!(config.spatial.quadtree.max_objects_per_node, 2);
    }

    #[test]
    fn test_nested_toml() {
        let source = r#"
            name = "level_1"
            entity_systems_enabled = false

            [spatial]
            enabled = true
            world_bounds = { x = -64, y = -64, width = 128, height = 128 }

            [spatial.quadtree]
            max_objects_per_node = 4
        "#;
        let config: SceneConfig = toml::from_str(source).unwrap();

        assert!(!config.entity_systems_enabled);
        assert!(config.spatial.enabled);
        assert_eq!(config.spatial.world_bounds, Rectangle::new(-64, -64, 128, 128));
        assert_eq!(config.spatial.quadtree.max_objects_per_node, 4);
    }

    #[test]
    fn test_save_and_load_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = SceneConfig::new("saved")
            .with_entity_systems(false)
            .with_spatial(SpatialConfig::new(Rectangle::new(0, 0, 512, 256)));

        for file_name in ["scene.toml", "scene.ron"] {
            let path = dir.path().join(file_name);
            config.save_to_file(&path).unwrap();
            let loaded = SceneConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let result = SceneConfig::default().save_to_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = SceneConfig::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, SceneConfig::default());
    }
}
