//! Kinematic player body integrated at the fixed step

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::config::PhysicsConfig;
use crate::world::World;

/// Contacts whose normal points at least this far up count as ground
const GROUND_NORMAL_Y: f32 = 0.7;

/// Sphere-on-feet body driven by a desired walking direction
///
/// `position` is the feet; the collision sphere sits `radius` above it and
/// the camera `eye_height` above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
    radius: f32,
    eye_height: f32,
    gravity: f32,
    walk_speed: f32,
    jump_speed: f32,
}

impl PlayerBody {
    pub fn new(position: Vec3, physics: &PhysicsConfig) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
            radius: physics.player_radius,
            eye_height: physics.eye_height,
            gravity: physics.gravity,
            walk_speed: physics.walk_speed,
            jump_speed: physics.jump_speed,
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.eye_height, 0.0)
    }

    pub fn sphere_center(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.radius, 0.0)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Set horizontal velocity from a direction on the XZ plane
    pub fn set_move_direction(&mut self, direction: Vec3) {
        let flat = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        self.velocity.x = flat.x * self.walk_speed;
        self.velocity.z = flat.z * self.walk_speed;
    }

    /// Leave the ground. Ignored while airborne.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = self.jump_speed;
        self.grounded = false;
        true
    }

    /// One fixed integration step with a single collision contact
    pub fn step(&mut self, world: &World, dt: f32) {
        self.velocity.y -= self.gravity * dt;
        self.position += self.velocity * dt;
        self.grounded = false;

        let Some(contact) = world.check_collision_all(self.sphere_center(), self.radius) else {
            return;
        };

        self.position += contact.normal * contact.penetration(self.radius);

        // Drop the velocity component pushing into the surface
        let into = self.velocity.dot(contact.normal);
        if into < 0.0 {
            self.velocity -= contact.normal * into;
        }

        if contact.normal.y >= GROUND_NORMAL_Y {
            self.grounded = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Collider, SurfaceTag};

    const DT: f32 = 1.0 / 60.0;

    fn floor_world() -> World {
        let mut world = World::new();
        world.add_collider(Collider::new(
            Vec3::new(-10.0, -0.1, -10.0),
            Vec3::new(10.0, 0.0, 10.0),
            SurfaceTag::Floor,
        ));
        world
    }

    #[test]
    fn test_falls_and_lands() {
        let world = floor_world();
        let mut body = PlayerBody::new(Vec3::new(0.0, 2.0, 0.0), &PhysicsConfig::default());
        for _ in 0..120 {
            body.step(&world, DT);
        }
        assert!(body.grounded);
        assert!(body.position.y.abs() < 0.05, "y = {}", body.position.y);
        assert!(body.velocity.y.abs() < 0.5);
    }

    #[test]
    fn test_free_fall_without_colliders() {
        let world = World::new();
        let mut body = PlayerBody::new(Vec3::ZERO, &PhysicsConfig::default());
        body.step(&world, 0.5);
        assert!(!body.grounded);
        assert!(body.position.y < 0.0);
    }

    #[test]
    fn test_wall_stops_walking() {
        let mut world = floor_world();
        world.add_collider(Collider::new(
            Vec3::new(1.0, 0.0, -5.0),
            Vec3::new(1.1, 3.0, 5.0),
            SurfaceTag::Wall,
        ));
        let mut body = PlayerBody::new(Vec3::ZERO, &PhysicsConfig::default());
        body.set_move_direction(Vec3::X);
        for _ in 0..180 {
            body.step(&world, DT);
        }
        assert!(body.position.x < 1.0, "walked through wall: {}", body.position.x);
    }

    #[test]
    fn test_jump_requires_ground() {
        let world = floor_world();
        let mut body = PlayerBody::new(Vec3::new(0.0, 3.0, 0.0), &PhysicsConfig::default());
        assert!(!body.jump());
        for _ in 0..180 {
            body.step(&world, DT);
        }
        assert!(body.jump());
        body.step(&world, DT);
        assert!(body.position.y > 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_eye_above_feet() {
        let body = PlayerBody::new(Vec3::new(1.0, 0.0, 2.0), &PhysicsConfig::default());
        assert_eq!(body.eye_position(), Vec3::new(1.0, 1.7, 2.0));
    }
}
