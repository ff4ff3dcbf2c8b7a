//! Cross-module scenarios for the entity list, scenes and systems

mod entity_lifecycle;
