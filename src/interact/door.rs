//! Swinging doors with a lock

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::{Aabb, Collider, SurfaceTag};
use crate::interact::base::{
    Interact, InteractableBase, InteractableType, InteractionEvent, DEFAULT_INTERACT_DISTANCE,
};
use crate::interact::inventory::Inventory;

pub const DOOR_WIDTH: f32 = 1.0;
pub const DOOR_HEIGHT: f32 = 2.2;
pub const DOOR_DEPTH: f32 = 0.1;

/// Angle (degrees) within which a swinging door snaps to its target
pub const SNAP_ANGLE: f32 = 1.0;

/// Slowest swing (degrees per second) a door accepts
pub const MIN_OPEN_SPEED: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoorState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
    Locked,
}

/// A hinged door
///
/// `interact` starts a swing; `update` animates it. The collision box is
/// rebuilt from the rotated door edge on every update so it follows the
/// swing.
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    base: InteractableBase,
    name: String,
    state: DoorState,
    /// Degrees, 0 = closed
    current_angle: f32,
    open_angle: f32,
    /// Degrees per second
    open_speed: f32,
    open_outward: bool,
    required_key: Option<String>,
}

impl Door {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        let mut door = Self {
            base: InteractableBase::new(position, DEFAULT_INTERACT_DISTANCE),
            name: name.into(),
            state: DoorState::Closed,
            current_angle: 0.0,
            open_angle: 90.0,
            open_speed: 120.0,
            open_outward: true,
            required_key: None,
        };
        door.rebuild_bounds();
        door
    }

    pub fn with_open_angle(mut self, degrees: f32) -> Self {
        self.open_angle = degrees.abs();
        self
    }

    /// Swing speed, never slower than [`MIN_OPEN_SPEED`]
    pub fn with_open_speed(mut self, degrees_per_second: f32) -> Self {
        self.open_speed = degrees_per_second.abs().max(MIN_OPEN_SPEED);
        self
    }

    pub fn with_open_outward(mut self, outward: bool) -> Self {
        self.open_outward = outward;
        self
    }

    pub fn with_interact_distance(mut self, distance: f32) -> Self {
        self.base.interact_distance = distance;
        self
    }

    /// Lock the door behind `key_id`
    pub fn locked_with(mut self, key_id: impl Into<String>) -> Self {
        self.required_key = Some(key_id.into());
        self.state = DoorState::Locked;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    pub fn required_key(&self) -> Option<&str> {
        self.required_key.as_deref()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DoorState::Open | DoorState::Opening)
    }

    pub fn is_locked(&self) -> bool {
        self.state == DoorState::Locked
    }

    /// Force the door locked, whatever it was doing
    pub fn lock(&mut self) {
        self.state = DoorState::Locked;
    }

    /// Locked -> Closed. No effect in any other state.
    pub fn unlock(&mut self) {
        if self.state == DoorState::Locked {
            self.state = DoorState::Closed;
        }
    }

    pub fn set_locked(&mut self, locked: bool) {
        if locked {
            self.lock();
        } else {
            self.unlock();
        }
    }

    /// Unlock when `inventory` holds the required key
    ///
    /// Doors locked without a key id only open through [`Door::unlock`].
    pub fn unlock_with(&mut self, inventory: &Inventory) -> bool {
        if self.state != DoorState::Locked {
            return false;
        }
        match &self.required_key {
            Some(key) if inventory.has_item(key) => {
                self.unlock();
                true
            }
            _ => false,
        }
    }

    fn signed_open_angle(&self) -> f32 {
        if self.open_outward {
            self.open_angle
        } else {
            -self.open_angle
        }
    }

    /// Angle the door is currently swinging toward. Locked doors hold.
    pub fn target_angle(&self) -> f32 {
        match self.state {
            DoorState::Opening | DoorState::Open => self.signed_open_angle(),
            DoorState::Closing | DoorState::Closed => 0.0,
            DoorState::Locked => self.current_angle,
        }
    }

    fn step_animation(&mut self, dt: f32) {
        let target = self.target_angle();
        let remaining = target - self.current_angle;

        // Never step past the target, so the angle moves monotonically
        let step = (self.open_speed * dt.max(0.0)).min(remaining.abs());
        self.current_angle += remaining.signum() * step;

        if (self.current_angle - target).abs() < SNAP_ANGLE {
            self.current_angle = target;
            match self.state {
                DoorState::Opening => self.state = DoorState::Open,
                DoorState::Closing => self.state = DoorState::Closed,
                _ => {}
            }
        }
    }

    /// Collision box of the door leaf at its current angle
    fn rebuild_bounds(&mut self) {
        let radians = self.current_angle.to_radians();
        let half_width = DOOR_WIDTH * 0.5;
        let pivot = self.base.position;
        let edge = Vec3::new(radians.sin() * half_width, 0.0, radians.cos() * half_width);

        let a = pivot - edge;
        let b = pivot + edge;
        let half_depth = DOOR_DEPTH * 0.5;
        let half_height = DOOR_HEIGHT * 0.5;

        self.base.bounds = Aabb::from_corners(
            Vec3::new(a.x.min(b.x) - half_depth, pivot.y - half_height, a.z.min(b.z) - half_depth),
            Vec3::new(a.x.max(b.x) + half_depth, pivot.y + half_height, a.z.max(b.z) + half_depth),
        );
    }

    pub fn collider(&self) -> Collider {
        Collider {
            bounds: self.base.bounds,
            tag: SurfaceTag::Door,
        }
    }
}

impl Interact for Door {
    fn base(&self) -> &InteractableBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InteractableBase {
        &mut self.base
    }

    fn interactable_type(&self) -> InteractableType {
        InteractableType::Door
    }

    fn can_interact(&self) -> bool {
        !matches!(
            self.state,
            DoorState::Locked | DoorState::Opening | DoorState::Closing
        )
    }

    fn interact(&mut self) -> Option<InteractionEvent> {
        if !self.can_interact() {
            return None;
        }

        match self.state {
            DoorState::Closed => {
                self.state = DoorState::Opening;
                Some(InteractionEvent::DoorOpening {
                    door: self.name.clone(),
                })
            }
            DoorState::Open => {
                self.state = DoorState::Closing;
                Some(InteractionEvent::DoorClosing {
                    door: self.name.clone(),
                })
            }
            _ => None,
        }
    }

    fn interaction_text(&self) -> String {
        match self.state {
            DoorState::Closed => "Press [E] to open door".to_string(),
            DoorState::Open => "Press [E] to close door".to_string(),
            DoorState::Locked => "Door is locked".to_string(),
            DoorState::Opening | DoorState::Closing => String::new(),
        }
    }

    fn update(&mut self, dt: f32) {
        self.step_animation(dt);
        self.rebuild_bounds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run_until_settled(door: &mut Door) -> usize {
        let mut ticks = 0;
        while matches!(door.state(), DoorState::Opening | DoorState::Closing) {
            door.update(DT);
            ticks += 1;
            assert!(ticks < 10_000, "door never settled");
        }
        ticks
    }

    #[test]
    fn test_door_starts_closed() {
        let door = Door::new("front", Vec3::ZERO);
        assert_eq!(door.state(), DoorState::Closed);
        assert_eq!(door.current_angle(), 0.0);
        assert!(door.can_interact());
        assert_eq!(door.interaction_text(), "Press [E] to open door");
    }

    #[test]
    fn test_full_open_close_cycle() {
        let mut door = Door::new("front", Vec3::ZERO);

        let event = door.interact();
        assert_eq!(
            event,
            Some(InteractionEvent::DoorOpening {
                door: "front".into()
            })
        );
        assert_eq!(door.state(), DoorState::Opening);

        let mut last = door.current_angle();
        while door.state() == DoorState::Opening {
            assert!(!door.can_interact());
            assert!(door.interact().is_none());
            door.update(DT);
            assert!(door.current_angle() >= last, "angle must not move backwards");
            last = door.current_angle();
        }
        assert_eq!(door.state(), DoorState::Open);
        assert_eq!(door.current_angle(), 90.0);
        assert!(door.can_interact());

        door.interact();
        assert_eq!(door.state(), DoorState::Closing);
        run_until_settled(&mut door);
        assert_eq!(door.state(), DoorState::Closed);
        assert_eq!(door.current_angle(), 0.0);
    }

    #[test]
    fn test_zero_speed_door_still_opens() {
        let mut door = Door::new("front", Vec3::ZERO).with_open_speed(0.0);
        door.interact();
        run_until_settled(&mut door);
        assert_eq!(door.state(), DoorState::Open);
        assert!(door.can_interact());
    }

    #[test]
    fn test_large_steps_do_not_overshoot() {
        let mut door = Door::new("front", Vec3::ZERO).with_open_speed(400.0);
        door.interact();
        for _ in 0..5 {
            door.update(0.1);
            assert!(door.current_angle() <= 90.0);
        }
        assert_eq!(door.state(), DoorState::Open);
    }

    #[test]
    fn test_inward_door_swings_negative() {
        let mut door = Door::new("closet", Vec3::ZERO).with_open_outward(false);
        door.interact();
        run_until_settled(&mut door);
        assert_eq!(door.current_angle(), -90.0);
    }

    #[test]
    fn test_lock_overrides_and_unlock_restores_closed() {
        let mut door = Door::new("cellar", Vec3::ZERO);
        door.lock();
        assert!(!door.can_interact());
        assert!(door.interact().is_none());
        assert_eq!(door.interaction_text(), "Door is locked");

        door.unlock();
        assert_eq!(door.state(), DoorState::Closed);
        assert!(door.can_interact());
    }

    #[test]
    fn test_unlock_only_from_locked() {
        let mut door = Door::new("front", Vec3::ZERO);
        door.interact();
        door.unlock();
        assert_eq!(door.state(), DoorState::Opening);
    }

    #[test]
    fn test_lock_mid_swing_holds_angle() {
        let mut door = Door::new("front", Vec3::ZERO);
        door.interact();
        door.update(0.25);
        let held = door.current_angle();
        door.lock();
        door.update(0.25);
        assert_eq!(door.current_angle(), held);

        // Unlocked doors settle back shut
        door.unlock();
        for _ in 0..120 {
            door.update(DT);
        }
        assert_eq!(door.current_angle(), 0.0);
        assert_eq!(door.state(), DoorState::Closed);
    }

    #[test]
    fn test_unlock_with_key() {
        let mut door = Door::new("back", Vec3::ZERO).locked_with("key_rusty_01");
        let mut inventory = Inventory::new(4);
        assert!(!door.unlock_with(&inventory));
        assert!(door.is_locked());

        inventory.add_item("key_rusty_01", 1).unwrap();
        assert!(door.unlock_with(&inventory));
        assert_eq!(door.state(), DoorState::Closed);
    }

    #[test]
    fn test_bounds_follow_swing() {
        let mut door = Door::new("front", Vec3::new(0.0, 1.1, 0.0));
        let closed = door.bounds();
        // Closed leaf spans Z
        assert!((closed.size().z - (DOOR_WIDTH + DOOR_DEPTH)).abs() < 1e-4);
        assert!((closed.size().x - DOOR_DEPTH).abs() < 1e-4);
        assert!((closed.min.y - 0.0).abs() < 1e-4);

        door.interact();
        run_until_settled(&mut door);
        let open = door.bounds();
        // Open leaf spans X
        assert!((open.size().x - (DOOR_WIDTH + DOOR_DEPTH)).abs() < 1e-4);
        assert!((open.size().z - DOOR_DEPTH).abs() < 1e-4);
    }
}
