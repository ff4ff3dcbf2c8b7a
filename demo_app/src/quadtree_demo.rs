//! Quadtree Demo
//!
//! Drives a quadtree with drifting rocks and prints how it reacts:
//! - Rocks bounce around the world, a few drift off the edge
//! - Every frame each rock is relocated after moving
//! - Periodic window queries are checked against a brute-force scan
//! - Node counts show subdivision and collapse as density changes

use rand::Rng;
use scene_core::foundation::math::Offset;
use scene_core::prelude::*;
use thiserror::Error;

// Quadtree settings
const WORLD: Rectangle = Rectangle::new(0, 0, 512, 512);
const MAX_OBJECTS_PER_NODE: usize = 2;

// Rock settings
const NUM_ROCKS: usize = 64;
const ROCK_SIZE: i32 = 12;
const MAX_SPEED: i32 = 6;
const ESCAPE_CHANCE: f64 = 0.05;

// Simulation
const FRAMES: u32 = 300;
const REPORT_EVERY: u32 = 50;
const WINDOW: Rectangle = Rectangle::new(128, 128, 192, 160);

#[derive(Debug, Error)]
enum DemoError {
    #[error("quadtree setup failed: {0}")]
    Spatial(#[from] SpatialError),

    #[error("query mismatch at frame {frame}: tree found {tree}, scan found {scan}")]
    QueryMismatch { frame: u32, tree: usize, scan: usize },
}

#[derive(Debug, Clone, Copy)]
struct Rock {
    bounds: Rectangle,
    velocity: Offset,
    escapes: bool,
}

impl QuadTreeStorable for Rock {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

impl Rock {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            bounds: Rectangle::new(
                rng.gen_range(0..WORLD.width - ROCK_SIZE),
                rng.gen_range(0..WORLD.height - ROCK_SIZE),
                ROCK_SIZE,
                ROCK_SIZE,
            ),
            velocity: Offset::new(rng.gen_range(-MAX_SPEED..=MAX_SPEED), rng.gen_range(-MAX_SPEED..=MAX_SPEED)),
            escapes: rng.gen_bool(ESCAPE_CHANCE),
        }
    }

    /// Move one step, bouncing off the world edges unless this rock escapes
    fn step(&mut self) {
        self.bounds.offset(self.velocity);
        if self.escapes {
            return;
        }
        if self.bounds.left() < WORLD.left() || self.bounds.right() > WORLD.right() {
            self.velocity.x = -self.velocity.x;
            self.bounds.x = self.bounds.x.clamp(WORLD.left(), WORLD.right() - ROCK_SIZE);
        }
        if self.bounds.top() < WORLD.top() || self.bounds.bottom() > WORLD.bottom() {
            self.velocity.y = -self.velocity.y;
            self.bounds.y = self.bounds.y.clamp(WORLD.top(), WORLD.bottom() - ROCK_SIZE);
        }
    }
}

fn main() -> Result<(), DemoError> {
    scene_core::foundation::logging::init_with_default("info");

    println!("=== Quadtree Demo ===");
    println!("World {WORLD:?}, {NUM_ROCKS} rocks, query window {WINDOW:?}");
    println!();

    let config = QuadTreeConfig {
        max_objects_per_node: MAX_OBJECTS_PER_NODE,
        ..QuadTreeConfig::default()
    };
    let mut tree = QuadTree::with_config(WORLD, config)?;
    let mut rng = rand::thread_rng();

    let keys: Vec<QuadTreeKey> = (0..NUM_ROCKS).map(|_| tree.insert(Rock::random(&mut rng))).collect();
    log::info!("Inserted {} rocks into {} nodes", tree.count(), tree.node_count());

    let mut timer = Timer::new();
    for frame in 1..=FRAMES {
        timer.advance(1.0 / 60.0);
        for &key in &keys {
            tree.update(key, Rock::step);
        }

        if timer.is_due(REPORT_EVERY) {
            let mut found = Vec::new();
            tree.get_objects_into(WINDOW, &mut found);
            let scan = tree
                .iter()
                .filter(|(_, rock)| rock.bounds.intersects(&WINDOW) || WINDOW.contains(&rock.bounds))
                .count();
            if found.len() != scan {
                return Err(DemoError::QueryMismatch {
                    frame,
                    tree: found.len(),
                    scan,
                });
            }

            let at_root = tree.node(tree.root()).map_or(0, |root| root.objects().len());
            log::info!(
                "Frame {}: {} nodes, {} rocks in window, {} held at the root",
                frame,
                tree.node_count(),
                found.len(),
                at_root
            );
        }
    }

    for key in keys.into_iter().step_by(2) {
        tree.delete(key, true);
    }
    println!("After deleting half the rocks: {} rocks in {} nodes", tree.count(), tree.node_count());

    tree.clear();
    println!("After clear: {} rocks in {} nodes", tree.count(), tree.node_count());
    Ok(())
}
