//! One explorable session: world, generators, player and inventory

use glam::Vec3;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::config::SessionConfig;
use crate::core::error::Result;
use crate::core::types::{Collider, InteractableId};
use crate::interact::{Interactable, InteractionEvent, Inventory};
use crate::simulation::clock::FixedTimestep;
use crate::simulation::interaction::process_interaction;
use crate::simulation::player::PlayerBody;
use crate::structure::{Floor, StructureGenerator, StructureStats};
use crate::terrain::{GroundMesh, Snowflake, TerrainGenerator, Tree};
use crate::world::World;

/// What the input layer hands over each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Camera forward; zero disables the view cone
    pub look: Vec3,
    /// Desired walking direction on the XZ plane; zero to stand still
    pub movement: Vec3,
    pub interact: bool,
    pub jump: bool,
}

impl FrameInput {
    pub fn idle(dt: f32, look: Vec3) -> Self {
        Self {
            dt,
            look,
            movement: Vec3::ZERO,
            interact: false,
            jump: false,
        }
    }
}

/// Result of [`Session::tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub fixed_steps: u32,
    /// Leftover fraction of a fixed step, for render interpolation
    pub alpha: f32,
    pub focus: Option<InteractableId>,
    pub prompt: String,
    pub event: Option<InteractionEvent>,
}

/// Snapshot counts for logs and the walk report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub frames: u64,
    pub trees: usize,
    pub snowflakes: usize,
    pub colliders: usize,
    pub interactables: usize,
    pub doors_open: usize,
    pub items_collected: usize,
    pub inventory: Vec<(String, u32)>,
    pub player_position: [f32; 3],
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    seed: u64,
    world: World,
    structure: StructureGenerator,
    terrain: TerrainGenerator,
    player: PlayerBody,
    inventory: Inventory,
    clock: FixedTimestep,
    prompt: String,
    frames: u64,
}

impl Session {
    /// Build the world: house first, then the forest around it
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        info!(seed, "Starting session");

        let mut world = World::new();

        let mut structure = StructureGenerator::new(config.interaction.clone());
        let stats: StructureStats = structure.generate(&mut world, config.structure.origin);

        let mut terrain = TerrainGenerator::new(config.terrain.clone(), seed);
        terrain.generate(&mut world, config.terrain.center, config.terrain.radius);

        let start = config.structure.origin + config.structure.player_start;
        let player = PlayerBody::new(start, &config.physics);
        let clock = FixedTimestep::new(config.physics.fixed_timestep, config.physics.max_frame_delta);

        info!(
            doors = stats.doors,
            items = stats.items,
            trees = terrain.trees().len(),
            "Session ready"
        );

        Ok(Self {
            config,
            seed,
            world,
            structure,
            terrain,
            player,
            inventory: Inventory::default(),
            clock,
            prompt: String::new(),
            frames: 0,
        })
    }

    /// Advance one frame
    ///
    /// Movement runs at the fixed step; door, item and snow animation run
    /// once at the clamped frame delta.
    pub fn tick(&mut self, input: FrameInput) -> TickReport {
        let frame_dt = self.clock.frame_delta(input.dt);
        let steps = self.clock.advance(input.dt);

        if input.jump {
            self.player.jump();
        }
        for _ in 0..steps {
            self.player.set_move_direction(input.movement);
            self.player.step(&self.world, self.clock.step());
        }

        self.world.update(frame_dt);
        self.terrain.update(frame_dt, self.player.eye_position());

        let frame = process_interaction(
            &mut self.world,
            self.player.eye_position(),
            input.look,
            input.interact,
            &self.config.interaction,
        );
        if let Some(event) = &frame.event {
            self.apply_event(event);
        }

        self.prompt = frame.prompt.clone();
        self.frames += 1;

        TickReport {
            fixed_steps: steps,
            alpha: self.clock.alpha(),
            focus: frame.focus,
            prompt: frame.prompt,
            event: frame.event,
        }
    }

    fn apply_event(&mut self, event: &InteractionEvent) {
        if let InteractionEvent::ItemCollected {
            item_id, quantity, ..
        } = event
        {
            if let Err(err) = self.inventory.add_item(item_id, *quantity) {
                warn!(%item_id, %err, "Collected item did not fit in inventory");
            }
        }
    }

    /// Unlock a door with whatever keys the player carries
    pub fn try_unlock(&mut self, door: InteractableId) -> bool {
        self.world.unlock_door_with(door, &self.inventory)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn trees(&self) -> &[Tree] {
        self.terrain.trees()
    }

    pub fn snowflakes(&self) -> &[Snowflake] {
        self.terrain.snowflakes()
    }

    pub fn ground(&self) -> &GroundMesh {
        self.terrain.ground()
    }

    pub fn floors(&self) -> &[Floor] {
        self.structure.floors()
    }

    pub fn colliders(&self) -> &[Collider] {
        self.world.colliders()
    }

    pub fn interactables(&self) -> impl Iterator<Item = (InteractableId, &Interactable)> {
        self.world.interactables()
    }

    /// Prompt from the last tick, empty when nothing is focused
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerBody {
        &mut self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn summary(&self) -> SessionSummary {
        let position = self.player.position;
        SessionSummary {
            seed: self.seed,
            frames: self.frames,
            trees: self.trees().len(),
            snowflakes: self.snowflakes().len(),
            colliders: self.colliders().len(),
            interactables: self.world.interactable_count(),
            doors_open: self.world.doors().filter(|(_, door)| door.is_open()).count(),
            items_collected: self
                .world
                .items()
                .filter(|(_, item)| item.is_collected())
                .count(),
            inventory: self
                .inventory
                .slots()
                .iter()
                .filter(|slot| !slot.is_empty())
                .map(|slot| (slot.item_id.clone(), slot.quantity))
                .collect(),
            player_position: position.to_array(),
        }
    }
}
