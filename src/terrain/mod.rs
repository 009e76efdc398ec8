//! Procedural forest: ground grid, scattered trees and falling snow
//!
//! [`TerrainGenerator::generate`] runs once per session. Afterwards only the
//! snow pool changes, through [`TerrainGenerator::update`].

pub mod forest;
pub mod ground;
pub mod snow;

pub use forest::{scatter_trees, ScatterParams, Tree, TreeKind};
pub use ground::{GroundMesh, MIN_GROUND_RADIUS};
pub use snow::{SnowField, Snowflake};

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use crate::core::config::TerrainConfig;
use crate::noise::NoiseField;
use crate::world::World;

/// ChaCha stream per generation phase
const TREE_STREAM: u64 = 1;
const SNOW_STREAM: u64 = 2;

#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: TerrainConfig,
    seed: u64,
    noise: NoiseField,
    center: Vec3,
    radius: f32,
    ground: GroundMesh,
    trees: Vec<Tree>,
    snow: Option<SnowField>,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig, seed: u64) -> Self {
        Self {
            center: config.center,
            radius: config.radius,
            config,
            seed,
            noise: NoiseField::new(seed),
            ground: GroundMesh::default(),
            trees: Vec::new(),
            snow: None,
        }
    }

    /// Change the seed for subsequent generation
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.noise.seed(seed);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Build ground, trees and snow around `center`
    ///
    /// Adds the ground collider to `world`. Calling this again replaces
    /// everything this generator produced before (the old ground collider
    /// stays in `world`).
    pub fn generate(&mut self, world: &mut World, center: Vec3, radius: f32) {
        let radius = if radius >= MIN_GROUND_RADIUS {
            radius
        } else {
            warn!(radius, min = MIN_GROUND_RADIUS, "Forest radius too small, clamping");
            MIN_GROUND_RADIUS
        };
        info!(
            x = center.x,
            y = center.y,
            z = center.z,
            radius,
            seed = self.seed,
            "Generating forest"
        );
        self.center = center;
        self.radius = radius;

        self.generate_ground(world);
        self.scatter_trees(self.config.tree_density, self.config.exclusion_radius);
        self.generate_snow(center);
    }

    fn generate_ground(&mut self, world: &mut World) {
        self.ground = GroundMesh::build(&self.noise, self.center, self.radius, &self.config);
        world.add_collider(self.ground.collider());
        debug!(
            vertices = self.ground.vertices().len(),
            triangles = self.ground.triangle_count(),
            "Ground grid built"
        );
    }

    /// Rejection-sample trees over the current disc
    ///
    /// Trees are seated on the ground grid when one has been built.
    pub fn scatter_trees(&mut self, density: f32, exclusion_radius: f32) -> &[Tree] {
        let params = ScatterParams {
            center: self.center,
            radius: self.radius,
            density,
            exclusion_radius,
            min_spacing: self.config.min_tree_spacing,
            attempts_per_tree: self.config.attempts_per_tree,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(TREE_STREAM);

        let mut trees = scatter_trees(&params, &mut rng);
        for tree in &mut trees {
            tree.position.y = self.ground.height_at(tree.position.x, tree.position.z);
        }

        info!(
            placed = trees.len(),
            target = params.target_count(),
            "Generated trees"
        );
        self.trees = trees;
        &self.trees
    }

    fn generate_snow(&mut self, anchor: Vec3) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(SNOW_STREAM);

        let snow = SnowField::new(
            self.config.snow_count,
            self.config.snow_area_radius,
            self.config.snow_ceiling,
            anchor,
            rng,
        );
        info!(flakes = snow.len(), "Generated snow particles");
        self.snow = Some(snow);
    }

    /// Advance the snow around `anchor` (usually the player)
    pub fn update(&mut self, dt: f32, anchor: Vec3) {
        if let Some(snow) = self.snow.as_mut() {
            let recycled = snow.update(dt, anchor, &self.ground);
            trace!(recycled, "Snow step");
        }
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn snowflakes(&self) -> &[Snowflake] {
        match &self.snow {
            Some(snow) => snow.flakes(),
            None => &[],
        }
    }

    pub fn ground(&self) -> &GroundMesh {
        &self.ground
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }
}
