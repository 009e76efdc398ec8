//! Session configuration with documented constants
//!
//! Every tuned number used by generation, interaction and movement is
//! collected here. Values can be overridden from a TOML file; any field the
//! file leaves out keeps its default.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::error::{FrostError, Result};

/// Top-level configuration handed to a [`crate::simulation::Session`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub terrain: TerrainConfig,
    pub structure: StructureConfig,
    pub interaction: InteractionConfig,
    pub physics: PhysicsConfig,
}

/// Forest, ground and snow parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Center of the generated forest (world units)
    pub center: Vec3,

    /// Half-size of the ground square and radius of the tree disc
    pub radius: f32,

    /// Trees per square unit. The target count is `floor(pi * r^2 * density)`.
    pub tree_density: f32,

    /// Trees are never placed closer than this to `center`
    ///
    /// Keeps a clearing around the house.
    pub exclusion_radius: f32,

    /// Minimum horizontal distance between any two trees
    pub min_tree_spacing: f32,

    /// Rejection sampling gives up after `target * attempts_per_tree` draws
    pub attempts_per_tree: usize,

    /// Ground grid cells per side. Vertices per side = resolution + 1.
    pub grid_resolution: usize,

    /// World-to-noise coordinate scale for ground height
    pub noise_scale: f32,

    /// Multiplier applied to the [-1, 1] octave noise to get ground height
    pub height_scale: f32,

    pub octaves: u32,
    pub persistence: f32,

    /// Size of the recycled snow particle pool
    pub snow_count: usize,

    /// Half-size of the square around the player that keeps snow alive
    pub snow_area_radius: f32,

    /// Height at which recycled flakes re-enter
    pub snow_ceiling: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 200.0,
            tree_density: 0.02,
            exclusion_radius: 15.0,
            min_tree_spacing: 2.0,
            attempts_per_tree: 10,
            grid_resolution: 100,
            noise_scale: 0.01,
            height_scale: 0.5,
            octaves: 4,
            persistence: 0.5,
            snow_count: 5000,
            snow_area_radius: 50.0,
            snow_ceiling: 50.0,
        }
    }
}

/// House placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Offset applied to every authored room, door, item and collider
    pub origin: Vec3,

    /// Player feet position relative to `origin` at session start
    pub player_start: Vec3,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            // Middle of the master bedroom
            player_start: Vec3::new(2.5, 0.0, 1.5),
        }
    }
}

/// Interaction reach and door behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Reach used when searching for the focused interactable
    pub max_distance: f32,

    /// Minimum `dot(forward, to_target)` for a target to count as looked at
    ///
    /// 0.7 is roughly a 45 degree half-angle cone.
    pub view_cone_dot: f32,

    pub door_interact_distance: f32,
    pub item_interact_distance: f32,
    pub prop_interact_distance: f32,

    /// Door swing in degrees
    pub door_open_angle: f32,

    /// Door swing speed in degrees per second
    pub door_open_speed: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            max_distance: 2.5,
            view_cone_dot: 0.7,
            door_interact_distance: 2.5,
            item_interact_distance: 2.0,
            prop_interact_distance: 2.0,
            door_open_angle: 90.0,
            door_open_speed: 120.0,
        }
    }
}

/// Fixed-step movement parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Constant integration step (seconds)
    pub fixed_timestep: f32,

    /// Frame deltas above this are clamped before entering the accumulator
    pub max_frame_delta: f32,

    /// Downward acceleration (units / s^2)
    pub gravity: f32,

    /// Radius of the player's collision sphere
    pub player_radius: f32,

    /// Camera height above the player's feet
    pub eye_height: f32,

    /// Upward velocity applied by a jump
    pub jump_speed: f32,

    /// Horizontal walking speed (units / s)
    pub walk_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_frame_delta: 0.1,
            gravity: 9.81,
            player_radius: 0.3,
            eye_height: 1.7,
            jump_speed: 5.0,
            walk_speed: 3.0,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from TOML text and validate the result
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let t = &self.terrain;
        if t.radius <= 0.0 {
            return Err(invalid(format!("terrain.radius ({}) must be positive", t.radius)));
        }
        if t.tree_density < 0.0 {
            return Err(invalid(format!(
                "terrain.tree_density ({}) must not be negative",
                t.tree_density
            )));
        }
        if t.min_tree_spacing <= 0.0 {
            return Err(invalid("terrain.min_tree_spacing must be positive".into()));
        }
        if t.grid_resolution == 0 {
            return Err(invalid("terrain.grid_resolution must be at least 1".into()));
        }
        if t.octaves == 0 {
            return Err(invalid("terrain.octaves must be at least 1".into()));
        }
        if t.snow_area_radius <= 0.0 || t.snow_ceiling <= 0.0 {
            return Err(invalid("snow area radius and ceiling must be positive".into()));
        }

        let i = &self.interaction;
        if !(-1.0..=1.0).contains(&i.view_cone_dot) {
            return Err(invalid(format!(
                "interaction.view_cone_dot ({}) must lie in [-1, 1]",
                i.view_cone_dot
            )));
        }
        if i.door_open_speed <= 0.0 {
            return Err(invalid("interaction.door_open_speed must be positive".into()));
        }

        let p = &self.physics;
        if p.fixed_timestep <= 0.0 {
            return Err(invalid("physics.fixed_timestep must be positive".into()));
        }
        if p.max_frame_delta < p.fixed_timestep {
            return Err(invalid(format!(
                "physics.max_frame_delta ({}) should be >= fixed_timestep ({})",
                p.max_frame_delta, p.fixed_timestep
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> FrostError {
    FrostError::InvalidConfig(message)
}
