//! Tree scattering by rejection sampling

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::spatial::SparseHashGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    Pine,
    Oak,
    Dead,
}

impl TreeKind {
    const ALL: [TreeKind; 3] = [TreeKind::Pine, TreeKind::Oak, TreeKind::Dead];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub position: Vec3,
    pub height: f32,
    pub trunk_radius: f32,
    pub canopy_radius: f32,
    pub kind: TreeKind,
    /// Degrees around Y
    pub rotation: f32,
}

/// Inputs to [`scatter_trees`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterParams {
    pub center: Vec3,
    pub radius: f32,
    pub density: f32,
    /// No tree closer than this to `center`
    pub exclusion_radius: f32,
    /// No two trees closer than this to each other
    pub min_spacing: f32,
    /// Attempt budget per target tree
    pub attempts_per_tree: usize,
}

impl ScatterParams {
    /// Upper bound on accepted trees: `floor(pi * radius^2 * density)`
    pub fn target_count(&self) -> usize {
        let area = PI * self.radius * self.radius;
        (area * self.density).max(0.0).floor() as usize
    }

    pub fn max_attempts(&self) -> usize {
        self.target_count().saturating_mul(self.attempts_per_tree)
    }
}

/// Place trees inside the disc around `params.center`
///
/// Stops at the target count or when the attempt budget runs out, so a
/// crowded disc just yields fewer trees. Trees sit at `center.y`.
pub fn scatter_trees(params: &ScatterParams, rng: &mut ChaCha8Rng) -> Vec<Tree> {
    let target = params.target_count();
    let max_attempts = params.max_attempts();
    let center = Vec2::new(params.center.x, params.center.z);

    let mut trees = Vec::with_capacity(target);
    let mut spacing = SparseHashGrid::new(params.min_spacing);
    let mut attempts = 0;

    while trees.len() < target && attempts < max_attempts {
        attempts += 1;

        // Uniform over the disc area
        let r = params.radius * rng.gen::<f32>().sqrt();
        let theta = rng.gen_range(0.0..(2.0 * PI));
        let offset = Vec2::new(theta.cos(), theta.sin()) * r;
        let pos = center + offset;

        if offset.length() < params.exclusion_radius {
            continue;
        }
        if spacing.any_within(pos, params.min_spacing) {
            continue;
        }

        spacing.insert(pos);
        let height = rng.gen_range(5.0..15.0);
        trees.push(Tree {
            position: Vec3::new(pos.x, params.center.y, pos.y),
            height,
            trunk_radius: rng.gen_range(0.1..0.3),
            canopy_radius: height * 0.3,
            kind: TreeKind::ALL[rng.gen_range(0..TreeKind::ALL.len())],
            rotation: rng.gen_range(0.0..360.0),
        });
    }

    trees
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn params(radius: f32, density: f32) -> ScatterParams {
        ScatterParams {
            center: Vec3::ZERO,
            radius,
            density,
            exclusion_radius: 15.0,
            min_spacing: 2.0,
            attempts_per_tree: 10,
        }
    }

    fn assert_invariants(p: &ScatterParams, trees: &[Tree]) {
        assert!(trees.len() <= p.target_count());
        for (i, tree) in trees.iter().enumerate() {
            let flat = Vec2::new(tree.position.x - p.center.x, tree.position.z - p.center.z);
            assert!(flat.length() >= p.exclusion_radius);
            assert!(flat.length() <= p.radius + 1e-3);
            assert!((5.0..15.0).contains(&tree.height));
            assert!((0.1..0.3).contains(&tree.trunk_radius));
            for other in &trees[i + 1..] {
                let d = Vec2::new(
                    tree.position.x - other.position.x,
                    tree.position.z - other.position.z,
                );
                assert!(d.length() >= p.min_spacing);
            }
        }
    }

    #[test]
    fn test_target_count_formula() {
        assert_eq!(params(200.0, 0.02).target_count(), 2513);
        assert_eq!(params(200.0, 0.02).max_attempts(), 25_130);
        assert_eq!(params(10.0, 0.0).target_count(), 0);
    }

    #[test]
    fn test_scatter_invariants() {
        let p = params(60.0, 0.05);
        let trees = scatter_trees(&p, &mut ChaCha8Rng::seed_from_u64(42));
        assert!(!trees.is_empty());
        assert_invariants(&p, &trees);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let p = params(50.0, 0.03);
        let a = scatter_trees(&p, &mut ChaCha8Rng::seed_from_u64(7));
        let b = scatter_trees(&p, &mut ChaCha8Rng::seed_from_u64(7));
        let c = scatter_trees(&p, &mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_disc_inside_exclusion_yields_nothing() {
        let p = params(10.0, 0.5);
        let trees = scatter_trees(&p, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(trees.is_empty());
    }

    #[test]
    fn test_crowded_disc_degrades_softly() {
        // Far more trees requested than the spacing allows
        let p = ScatterParams {
            exclusion_radius: 0.0,
            ..params(5.0, 5.0)
        };
        let trees = scatter_trees(&p, &mut ChaCha8Rng::seed_from_u64(3));
        assert!(trees.len() < p.target_count());
        assert_invariants(&p, &trees);
    }

    #[test]
    fn test_canopy_scales_with_height() {
        let p = params(40.0, 0.05);
        for tree in scatter_trees(&p, &mut ChaCha8Rng::seed_from_u64(9)) {
            assert!((tree.canopy_radius - tree.height * 0.3).abs() < 1e-5);
            assert!((0.0..360.0).contains(&tree.rotation));
        }
    }
}
