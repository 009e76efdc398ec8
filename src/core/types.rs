//! Core type definitions used throughout the codebase

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable handle into the world's interactable arena
///
/// Handles are never reused within a session, so a handle held after its
/// entity was removed simply resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractableId(pub u32);

impl InteractableId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Axis-aligned bounding box
///
/// Constructors keep `min <= max` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from any two opposite corners
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build a box from its center and half extents
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        let half = half.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Point inside (or on) the box closest to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Slab test. Returns `(t_near, t_far)` along `dir` when the infinite line
    /// through `origin` crosses the box.
    ///
    /// Axes where `dir` is zero are treated as parallel: the ray misses unless
    /// `origin` already lies between that axis' slabs.
    pub fn ray_intersect(&self, origin: Vec3, dir: Vec3) -> Option<(f32, f32)> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_near = t_near.max(t1);
            t_far = t_far.min(t2);
            if t_near > t_far {
                return None;
            }
        }

        Some((t_near, t_far))
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5))
    }
}

/// Surface kind a collider represents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceTag {
    Ground,
    Floor,
    Wall,
    Door,
    Custom(String),
}

impl SurfaceTag {
    pub fn as_str(&self) -> &str {
        match self {
            SurfaceTag::Ground => "ground",
            SurfaceTag::Floor => "floor",
            SurfaceTag::Wall => "wall",
            SurfaceTag::Door => "door",
            SurfaceTag::Custom(tag) => tag,
        }
    }
}

impl std::fmt::Display for SurfaceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static axis-aligned collision box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub bounds: Aabb,
    pub tag: SurfaceTag,
}

impl Collider {
    pub fn new(a: Vec3, b: Vec3, tag: SurfaceTag) -> Self {
        Self {
            bounds: Aabb::from_corners(a, b),
            tag,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.bounds.min
    }

    pub fn max(&self) -> Vec3 {
        self.bounds.max
    }
}

/// Sphere-vs-box contact
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Closest point on the collider to the sphere center
    pub point: Vec3,
    /// Unit vector pointing from the collider toward the sphere center
    pub normal: Vec3,
    /// Distance from sphere center to `point`
    pub distance: f32,
    pub tag: SurfaceTag,
}

impl Contact {
    /// How far the sphere of `radius` sinks into the collider
    pub fn penetration(&self, radius: f32) -> f32 {
        (radius - self.distance).max(0.0)
    }
}

/// Ray-vs-box hit
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub tag: SurfaceTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_corners_orders_components() {
        let b = Aabb::from_corners(Vec3::new(2.0, -1.0, 5.0), Vec3::new(-2.0, 3.0, 1.0));
        assert_eq!(b.min, Vec3::new(-2.0, -1.0, 1.0));
        assert_eq!(b.max, Vec3::new(2.0, 3.0, 5.0));
    }

    #[test]
    fn test_aabb_closest_point_clamps() {
        let b = Aabb::from_corners(Vec3::ZERO, Vec3::ONE);
        assert_eq!(b.closest_point(Vec3::new(2.0, 0.5, -1.0)), Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(b.closest_point(Vec3::splat(0.25)), Vec3::splat(0.25));
    }

    #[test]
    fn test_ray_intersect_axis_aligned() {
        let b = Aabb::from_corners(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0));
        let (near, far) = b.ray_intersect(Vec3::ZERO, Vec3::X).unwrap();
        assert!((near - 4.0).abs() < 1e-5);
        assert!((far - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_intersect_parallel_miss() {
        let b = Aabb::from_corners(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0));
        assert!(b.ray_intersect(Vec3::new(0.0, 5.0, 0.0), Vec3::X).is_none());
    }

    #[test]
    fn test_aabb_intersects_and_contains() {
        let a = Aabb::from_corners(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb::from_corners(Vec3::splat(1.0), Vec3::splat(3.0));
        let c = Aabb::from_corners(Vec3::splat(5.0), Vec3::splat(6.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains(Vec3::splat(2.0)));
        assert!(!a.contains(Vec3::splat(2.1)));
    }

    #[test]
    fn test_surface_tag_strings() {
        assert_eq!(SurfaceTag::Ground.as_str(), "ground");
        assert_eq!(SurfaceTag::Custom("stairs".into()).to_string(), "stairs");
    }
}
