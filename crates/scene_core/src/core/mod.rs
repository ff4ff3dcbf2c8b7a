//! Core configuration types shared by the scene and spatial modules

pub mod config;

pub use config::{SceneConfig, SpatialConfig};
