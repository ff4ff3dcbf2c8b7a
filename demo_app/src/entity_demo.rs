//! Entity Lifecycle Demo
//!
//! Runs a headless asteroid field through a scene:
//! - Asteroids and ships with position/velocity components
//! - A movement system routed by matcher (sleeping asteroids are skipped)
//! - Asteroids destroyed and respawned every few frames
//! - Broad-phase queries around the player ship
//!
//! Pass a `.toml` or `.ron` scene config path as the first argument to
//! override the built-in settings.

use rand::Rng;
use scene_core::ecs::EntityStore;
use scene_core::prelude::*;

// World settings
const WORLD_SIZE: i32 = 1024;
const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: u32 = 240;

// Entity counts
const NUM_ASTEROIDS: usize = 40;
const RESPAWN_EVERY: u32 = 30;
const RESPAWN_COUNT: usize = 5;

// Sizes and speeds
const ASTEROID_SIZE: i32 = 24;
const SHIP_SIZE: i32 = 16;
const MAX_SPEED: i32 = 4;
const SCAN_RADIUS: i32 = 96;

const TAG_ASTEROID: Tag = 1;
const TAG_SHIP: Tag = 2;

#[derive(Debug, Clone, Copy)]
struct Position {
    x: i32,
    y: i32,
}
impl Component for Position {}

#[derive(Debug, Clone, Copy)]
struct Velocity {
    dx: i32,
    dy: i32,
}
impl Component for Velocity {}

struct Sleeping;
impl Component for Sleeping {}

/// Moves every awake entity and wraps it around the world edges
struct MovementSystem {
    matcher: Matcher,
}

impl EntitySystem for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    fn process(&mut self, entities: &[EntityId], store: &mut EntityStore) {
        for &id in entities {
            let Some(entity) = store.get_mut(id) else {
                continue;
            };
            let Some(&Velocity { dx, dy }) = entity.get_component::<Velocity>() else {
                continue;
            };
            if let Some(position) = entity.get_component_mut::<Position>() {
                position.x = (position.x + dx).rem_euclid(WORLD_SIZE);
                position.y = (position.y + dy).rem_euclid(WORLD_SIZE);
            }
        }
    }
}

/// Ship logic: reports how many asteroids share the scene when it arrives
struct Ship;

impl EntityBehaviour for Ship {
    fn on_added_to_scene(&mut self, context: &EntityContext<'_>) {
        let asteroids = context.entities_with_tag(TAG_ASTEROID).len();
        log::info!("Ship entered the field with {} asteroids around", asteroids);
    }

    fn on_removed_from_scene(&mut self, _context: &EntityContext<'_>) {
        log::info!("Ship left the field");
    }
}

fn spawn_asteroid(scene: &mut Scene, rng: &mut impl Rng, index: usize) -> EntityId {
    let id = scene.add_entity(Entity::new(format!("asteroid_{index}")).with_tag(TAG_ASTEROID));
    let position = Position {
        x: rng.gen_range(0..WORLD_SIZE),
        y: rng.gen_range(0..WORLD_SIZE),
    };
    scene.add_component(id, position);
    scene.add_component(
        id,
        Velocity {
            dx: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
            dy: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
        },
    );
    if rng.gen_bool(0.2) {
        scene.add_component(id, Sleeping);
    }
    scene.set_bounds(id, Rectangle::new(position.x, position.y, ASTEROID_SIZE, ASTEROID_SIZE));
    id
}

fn load_config() -> Result<SceneConfig, ConfigError> {
    let default = SceneConfig::new("asteroid_field").with_spatial(SpatialConfig {
        enabled: true,
        world_bounds: Rectangle::new(0, 0, WORLD_SIZE, WORLD_SIZE),
        ..SpatialConfig::default()
    });

    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene config from {}", path);
            SceneConfig::load_from_file(path)
        }
        None => Ok(default),
    }
}

/// Push every entity's position into the broad-phase
fn sync_bounds(scene: &mut Scene) {
    let updates: Vec<(EntityId, Rectangle)> = scene
        .entities()
        .iter()
        .filter_map(|id| {
            let entity = scene.entity(id)?;
            let position = entity.get_component::<Position>()?;
            let size = if entity.tag() == TAG_SHIP { SHIP_SIZE } else { ASTEROID_SIZE };
            Some((id, Rectangle::new(position.x, position.y, size, size)))
        })
        .collect();

    for (id, bounds) in updates {
        scene.set_bounds(id, bounds);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    scene_core::foundation::logging::init_with_default("info");

    println!("=== Entity Lifecycle Demo ===");
    println!();

    let config = load_config()?;
    let mut scene = Scene::new(SceneId(0), config)?;
    let mut rng = rand::thread_rng();

    let position = scene.component_type::<Position>();
    let velocity = scene.component_type::<Velocity>();
    let sleeping = scene.component_type::<Sleeping>();
    let matcher = Matcher::empty().all(&[position, velocity]).exclude(&[sleeping]);
    log::debug!("Movement system uses {}", matcher.display(scene.types()));
    scene.add_system(MovementSystem { matcher });

    let mut asteroids: Vec<EntityId> = (0..NUM_ASTEROIDS)
        .map(|i| spawn_asteroid(&mut scene, &mut rng, i))
        .collect();

    let ship = scene.add_entity(Entity::new("player").with_tag(TAG_SHIP).with_update_order(-1).with_behaviour(Ship));
    scene.add_component(ship, Position { x: WORLD_SIZE / 2, y: WORLD_SIZE / 2 });
    scene.add_component(ship, Velocity { dx: 2, dy: 1 });

    let mut spawned = NUM_ASTEROIDS;
    for frame in 1..=FRAMES {
        scene.update(FRAME_TIME);
        sync_bounds(&mut scene);

        if frame % RESPAWN_EVERY == 0 {
            for _ in 0..RESPAWN_COUNT.min(asteroids.len()) {
                let index = rng.gen_range(0..asteroids.len());
                scene.destroy_entity(asteroids.swap_remove(index));
            }
            for _ in 0..RESPAWN_COUNT {
                asteroids.push(spawn_asteroid(&mut scene, &mut rng, spawned));
                spawned += 1;
            }

            let nearby = scene
                .entity(ship)
                .and_then(|entity| entity.get_component::<Position>())
                .map(|p| Rectangle::new(p.x - SCAN_RADIUS, p.y - SCAN_RADIUS, SCAN_RADIUS * 2, SCAN_RADIUS * 2))
                .map_or(0, |area| scene.query_rect(area).len());
            let stats = scene.stats();
            log::info!(
                "Frame {}: {} live, {} stored, {} tracked, {} near the ship",
                stats.frame_count,
                stats.entity_count,
                stats.stored_count,
                stats.spatial_count,
                nearby
            );
        }
    }

    println!();
    println!("Asteroids ever spawned: {spawned}");
    println!("Awake movers: {}", scene.system_entities(0).len());
    println!("Average FPS (simulated): {:.1}", scene.timer().average_fps());

    scene.end();
    Ok(())
}
