//! Integration tests for procedural generation: noise, forest and house

use frostwood::core::config::{InteractionConfig, TerrainConfig};
use frostwood::core::SurfaceTag;
use frostwood::interact::{DoorState, Interact};
use frostwood::noise::NoiseField;
use frostwood::structure::StructureGenerator;
use frostwood::terrain::{scatter_trees, ScatterParams, TerrainGenerator};
use frostwood::World;
use glam::{Vec2, Vec3};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ========================================
// Noise
// ========================================

#[test]
fn test_noise_identical_across_instances() {
    let a = NoiseField::new(1234);
    let b = NoiseField::new(1234);
    for i in 0..50 {
        let (x, y, z) = (i as f32 * 0.37, i as f32 * -1.13, i as f32 * 0.71);
        assert_eq!(a.noise3(x, y, z), b.noise3(x, y, z));
        assert_eq!(a.noise2(x, y), b.noise2(x, y));
        assert_eq!(a.noise1(x), b.noise1(x));
    }
}

#[test]
fn test_single_octave_equals_base_noise() {
    let noise = NoiseField::new(9);
    for persistence in [0.1, 0.5, 0.9] {
        let (x, y) = (3.3, -7.1);
        assert_eq!(noise.octave2(x, y, 1, persistence), noise.noise2(x, y));
    }
}

// ========================================
// Forest
// ========================================

#[test]
fn test_reference_forest_caps_at_target() {
    let params = ScatterParams {
        center: Vec3::ZERO,
        radius: 200.0,
        density: 0.02,
        exclusion_radius: 15.0,
        min_spacing: 2.0,
        attempts_per_tree: 10,
    };
    assert_eq!(params.target_count(), 2513);

    let trees = scatter_trees(&params, &mut ChaCha8Rng::seed_from_u64(42));
    assert!(trees.len() <= 2513);
    assert!(!trees.is_empty());
    for tree in &trees {
        assert!(Vec2::new(tree.position.x, tree.position.z).length() >= 15.0);
    }
}

#[test]
fn test_terrain_generator_is_deterministic() {
    let config = TerrainConfig {
        radius: 60.0,
        snow_count: 100,
        ..TerrainConfig::default()
    };

    let mut world_a = World::new();
    let mut a = TerrainGenerator::new(config.clone(), 77);
    a.generate(&mut world_a, Vec3::ZERO, 60.0);

    let mut world_b = World::new();
    let mut b = TerrainGenerator::new(config, 77);
    b.generate(&mut world_b, Vec3::ZERO, 60.0);

    assert_eq!(a.trees(), b.trees());
    assert_eq!(a.snowflakes(), b.snowflakes());
    assert_eq!(a.ground().vertices(), b.ground().vertices());
}

#[test]
fn test_snow_pool_survives_long_run() {
    let config = TerrainConfig {
        radius: 30.0,
        grid_resolution: 10,
        snow_count: 256,
        snow_area_radius: 8.0,
        ..TerrainConfig::default()
    };
    let mut world = World::new();
    let mut terrain = TerrainGenerator::new(config, 3);
    terrain.generate(&mut world, Vec3::ZERO, 30.0);

    let mut anchor = Vec3::ZERO;
    for _ in 0..600 {
        anchor += Vec3::new(0.05, 0.0, 0.02);
        terrain.update(1.0 / 60.0, anchor);
    }

    assert_eq!(terrain.snowflakes().len(), 256);
    for flake in terrain.snowflakes() {
        // One frame of drift at most past the capture square
        assert!((flake.position.x - anchor.x).abs() <= 8.0 + 0.1);
        assert!((flake.position.z - anchor.z).abs() <= 8.0 + 0.1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_scatter_respects_spacing(
        seed in any::<u64>(),
        radius in 20.0f32..60.0,
        density in 0.0f32..0.2,
        exclusion in 0.0f32..15.0,
    ) {
        let params = ScatterParams {
            center: Vec3::new(5.0, 0.0, -3.0),
            radius,
            density,
            exclusion_radius: exclusion,
            min_spacing: 2.0,
            attempts_per_tree: 10,
        };
        let trees = scatter_trees(&params, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert!(trees.len() <= params.target_count());

        for (i, tree) in trees.iter().enumerate() {
            let from_center = Vec2::new(tree.position.x - 5.0, tree.position.z + 3.0);
            prop_assert!(from_center.length() >= exclusion - 1e-3);
            for other in &trees[i + 1..] {
                let gap = Vec2::new(
                    tree.position.x - other.position.x,
                    tree.position.z - other.position.z,
                );
                prop_assert!(gap.length() >= 2.0);
            }
        }
    }
}

// ========================================
// House
// ========================================

#[test]
fn test_house_and_forest_share_world() {
    let mut world = World::new();
    let mut house = StructureGenerator::new(InteractionConfig::default());
    let stats = house.generate(&mut world, Vec3::ZERO);

    let mut terrain = TerrainGenerator::new(
        TerrainConfig {
            radius: 50.0,
            snow_count: 10,
            ..TerrainConfig::default()
        },
        1,
    );
    terrain.generate(&mut world, Vec3::ZERO, 50.0);

    assert_eq!(world.colliders().len(), stats.colliders + 1);
    assert_eq!(
        world.colliders().last().map(|c| c.tag.clone()),
        Some(SurfaceTag::Ground)
    );

    // The house clearing stays free of trees
    for tree in terrain.trees() {
        assert!(Vec2::new(tree.position.x, tree.position.z).length() >= 15.0);
    }
}

#[test]
fn test_every_house_door_works() {
    let mut world = World::new();
    StructureGenerator::new(InteractionConfig::default()).generate(&mut world, Vec3::ZERO);

    let ids: Vec<_> = world.door_ids().to_vec();
    for id in ids {
        let locked = world.door(id).map(|door| door.is_locked()).unwrap_or(false);
        let event = world.interact(id);
        assert_eq!(event.is_some(), !locked);
    }
    for _ in 0..120 {
        world.update(1.0 / 60.0);
    }
    let open = world
        .doors()
        .filter(|(_, door)| door.state() == DoorState::Open)
        .count();
    assert_eq!(open, 10);
    assert!(world.doors().all(|(_, door)| !door.is_highlighted()));
}
