//! Linear-scan spatial queries over the world

use glam::Vec3;

use crate::core::types::{Aabb, Collider, Contact, InteractableId, RayHit};
use crate::interact::{in_view_cone, Interact, VIEW_CONE_DOT};
use crate::world::World;

impl World {
    /// Closest usable interactable within `max_distance` and the view cone
    ///
    /// A zero `dir` disables the cone. Equidistant candidates resolve to the
    /// one inserted first.
    pub fn nearest_interactable(
        &self,
        pos: Vec3,
        dir: Vec3,
        max_distance: f32,
    ) -> Option<InteractableId> {
        self.nearest_interactable_in_cone(pos, dir, max_distance, VIEW_CONE_DOT)
    }

    pub fn nearest_interactable_in_cone(
        &self,
        pos: Vec3,
        dir: Vec3,
        max_distance: f32,
        min_dot: f32,
    ) -> Option<InteractableId> {
        let mut best: Option<(InteractableId, f32)> = None;

        for (id, entity) in self.interactables() {
            if !entity.is_active() || !entity.can_interact() {
                continue;
            }

            let distance = pos.distance(entity.position());
            if distance > max_distance {
                continue;
            }
            if !in_view_cone(pos, dir, entity.position(), min_dot) {
                continue;
            }

            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((id, distance));
            }
        }

        best.map(|(id, _)| id)
    }

    /// Nearest static collider touching a sphere at `pos`
    ///
    /// Reports one contact only; overlapping colliders are not resolved
    /// against each other.
    pub fn check_collision(&self, pos: Vec3, radius: f32) -> Option<Contact> {
        nearest_contact(self.colliders().iter(), pos, radius)
    }

    /// Like [`World::check_collision`], also testing the current door leaves
    pub fn check_collision_all(&self, pos: Vec3, radius: f32) -> Option<Contact> {
        let doors = self.door_colliders();
        nearest_contact(self.colliders().iter().chain(doors.iter()), pos, radius)
    }

    /// First collider hit by a ray, up to `max_distance`
    ///
    /// `dir` need not be normalized; a zero direction never hits.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = dir.try_normalize()?;
        let mut best: Option<(&Collider, f32)> = None;
        let mut best_distance = max_distance;

        for collider in self.colliders() {
            let Some((t_near, t_far)) = collider.bounds.ray_intersect(origin, dir) else {
                continue;
            };
            if t_near > 0.0 && t_near <= t_far && t_near < best_distance {
                best_distance = t_near;
                best = Some((collider, t_near));
            }
        }

        best.map(|(collider, t)| RayHit {
            point: origin + dir * t,
            distance: t,
            tag: collider.tag.clone(),
        })
    }
}

fn nearest_contact<'a>(
    colliders: impl Iterator<Item = &'a Collider>,
    pos: Vec3,
    radius: f32,
) -> Option<Contact> {
    let mut best: Option<Contact> = None;
    let reach = Aabb::from_center_half_extents(pos, Vec3::splat(radius));

    for collider in colliders {
        if !collider.bounds.intersects(&reach) {
            continue;
        }
        let closest = collider.bounds.closest_point(pos);
        let distance = pos.distance(closest);
        if distance >= radius {
            continue;
        }
        if best.as_ref().is_some_and(|contact| contact.distance <= distance) {
            continue;
        }

        // Center inside the box: push straight up
        let normal = (pos - closest).try_normalize().unwrap_or(Vec3::Y);
        best = Some(Contact {
            point: closest,
            normal,
            distance,
            tag: collider.tag.clone(),
        });
    }

    best
}
