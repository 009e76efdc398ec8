//! Endless snow: a fixed pool of flakes recycled around an anchor

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::terrain::ground::GroundMesh;

/// Degrees per second every flake spins
pub const SNOW_SPIN_RATE: f32 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snowflake {
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub opacity: f32,
    pub rotation: f32,
}

/// Fixed-size flake pool. Flakes are never destroyed, only respawned.
#[derive(Debug, Clone)]
pub struct SnowField {
    flakes: Vec<Snowflake>,
    area_radius: f32,
    ceiling: f32,
    rng: ChaCha8Rng,
}

impl SnowField {
    /// Fill the pool around `anchor`, heights spread from 0 up to `ceiling`
    pub fn new(count: usize, area_radius: f32, ceiling: f32, anchor: Vec3, mut rng: ChaCha8Rng) -> Self {
        let area_radius = area_radius.abs();
        let flakes = (0..count)
            .map(|_| {
                let height = rng.gen_range(0.0..=ceiling.max(0.0));
                spawn_flake(&mut rng, anchor, area_radius, height)
            })
            .collect();

        Self {
            flakes,
            area_radius,
            ceiling,
            rng,
        }
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn area_radius(&self) -> f32 {
        self.area_radius
    }

    /// Move every flake and respawn the ones that landed or drifted away
    ///
    /// Landed flakes restart at the ceiling; flakes outside the square of
    /// half-width `area_radius` around `anchor` restart at a random height
    /// inside it. Returns how many were recycled.
    pub fn update(&mut self, dt: f32, anchor: Vec3, ground: &GroundMesh) -> usize {
        let mut recycled = 0;

        for flake in &mut self.flakes {
            flake.position += flake.velocity * dt;
            flake.rotation = (flake.rotation + SNOW_SPIN_RATE * dt) % 360.0;

            if flake.position.y < ground.height_at(flake.position.x, flake.position.z) {
                *flake = spawn_flake(&mut self.rng, anchor, self.area_radius, self.ceiling);
                recycled += 1;
                continue;
            }

            let drift = flake.position - anchor;
            if drift.x.abs() > self.area_radius || drift.z.abs() > self.area_radius {
                let height = self.rng.gen_range(0.0..=self.ceiling.max(0.0));
                *flake = spawn_flake(&mut self.rng, anchor, self.area_radius, height);
                recycled += 1;
            }
        }

        recycled
    }
}

fn spawn_flake(rng: &mut ChaCha8Rng, anchor: Vec3, area_radius: f32, height: f32) -> Snowflake {
    let offset_x = rng.gen_range(-area_radius..=area_radius);
    let offset_z = rng.gen_range(-area_radius..=area_radius);

    Snowflake {
        position: Vec3::new(anchor.x + offset_x, height, anchor.z + offset_z),
        velocity: Vec3::new(
            rng.gen_range(-0.5..0.5),
            -rng.gen_range(0.5..2.0),
            rng.gen_range(-0.5..0.5),
        ),
        size: rng.gen_range(0.02..0.08),
        opacity: rng.gen_range(0.5..1.0),
        rotation: rng.gen_range(0.0..360.0),
    }
}
