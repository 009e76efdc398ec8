//! Seeded gradient noise field

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Permutation-table gradient noise
///
/// The table holds a seeded shuffle of `0..=255` repeated twice, so corner
/// hashes of the form `perm[perm[x] + y] + 1` never need a wrap check.
/// Two fields built from the same seed produce identical output.
#[derive(Debug, Clone)]
pub struct NoiseField {
    seed: u64,
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        let mut field = Self {
            seed,
            perm: [0; 512],
        };
        field.seed(seed);
        field
    }

    /// Rebuild the permutation table from `seed`
    pub fn seed(&mut self, seed: u64) {
        let mut table: Vec<u8> = (0..=255u8).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        table.shuffle(&mut rng);

        self.perm[..256].copy_from_slice(&table);
        self.perm[256..].copy_from_slice(&table);
        self.seed = seed;
    }

    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    fn p(&self, index: usize) -> usize {
        self.perm[index] as usize
    }

    /// 1D noise in [-1, 1]
    pub fn noise1(&self, x: f32) -> f32 {
        let xi = lattice(x);
        let x = x - x.floor();
        let u = fade(x);

        lerp(u, grad1(self.p(xi), x), grad1(self.p(xi + 1), x - 1.0)).clamp(-1.0, 1.0)
    }

    /// 2D noise in [-1, 1]
    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        let xi = lattice(x);
        let yi = lattice(y);
        let x = x - x.floor();
        let y = y - y.floor();
        let u = fade(x);
        let v = fade(y);

        let a = self.p(xi) + yi;
        let b = self.p(xi + 1) + yi;

        lerp(
            v,
            lerp(u, grad2(self.p(a), x, y), grad2(self.p(b), x - 1.0, y)),
            lerp(
                u,
                grad2(self.p(a + 1), x, y - 1.0),
                grad2(self.p(b + 1), x - 1.0, y - 1.0),
            ),
        )
        .clamp(-1.0, 1.0)
    }

    /// 3D noise in [-1, 1]
    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        let xi = lattice(x);
        let yi = lattice(y);
        let zi = lattice(z);
        let x = x - x.floor();
        let y = y - y.floor();
        let z = z - z.floor();
        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        // Lattice gradients can overshoot the unit range by a hair in 3D
        lerp(
            w,
            lerp(
                v,
                lerp(u, grad3(self.p(aa), x, y, z), grad3(self.p(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad3(self.p(ab), x, y - 1.0, z),
                    grad3(self.p(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad3(self.p(aa + 1), x, y, z - 1.0),
                    grad3(self.p(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad3(self.p(ab + 1), x, y - 1.0, z - 1.0),
                    grad3(self.p(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
        .clamp(-1.0, 1.0)
    }

    /// Fractal sum of 1D noise, normalized back into [-1, 1]
    pub fn octave1(&self, x: f32, octaves: u32, persistence: f32) -> f32 {
        fractal(octaves, persistence, |f| self.noise1(x * f))
    }

    /// Fractal sum of 2D noise, normalized back into [-1, 1]
    pub fn octave2(&self, x: f32, y: f32, octaves: u32, persistence: f32) -> f32 {
        fractal(octaves, persistence, |f| self.noise2(x * f, y * f))
    }

    /// Fractal sum of 3D noise, normalized back into [-1, 1]
    pub fn octave3(&self, x: f32, y: f32, z: f32, octaves: u32, persistence: f32) -> f32 {
        fractal(octaves, persistence, |f| self.noise3(x * f, y * f, z * f))
    }

    pub fn noise01_1(&self, x: f32) -> f32 {
        self.noise1(x) * 0.5 + 0.5
    }

    pub fn noise01_2(&self, x: f32, y: f32) -> f32 {
        self.noise2(x, y) * 0.5 + 0.5
    }

    pub fn noise01_3(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise3(x, y, z) * 0.5 + 0.5
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Sum `sample(2^i) * persistence^i` over the octaves, divided by the total
/// amplitude. Zero octaves yield 0.
fn fractal(octaves: u32, persistence: f32, sample: impl Fn(f32) -> f32) -> f32 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += sample(frequency) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }

    if max_value == 0.0 {
        0.0
    } else {
        total / max_value
    }
}

#[inline]
fn lattice(coord: f32) -> usize {
    (coord.floor() as i32 & 255) as usize
}

/// 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn grad1(hash: usize, x: f32) -> f32 {
    if hash & 1 == 0 {
        x
    } else {
        -x
    }
}

#[inline]
fn grad2(hash: usize, x: f32, y: f32) -> f32 {
    let h = hash & 3;
    let (u, v) = if h < 2 { (x, y) } else { (y, x) };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[inline]
fn grad3(hash: usize, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let w = if h < 4 {
        z
    } else if h < 8 {
        y
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u })
        + (if h & 2 == 0 { v } else { -v })
        + (if h & 4 == 0 { w } else { -w })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_seed_same_table() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        assert_eq!(a.perm, b.perm);
        assert_eq!(a.noise3(1.3, 7.7, -2.1), b.noise3(1.3, 7.7, -2.1));
    }

    #[test]
    fn test_different_seed_different_table() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        assert_ne!(a.perm, b.perm);
    }

    #[test]
    fn test_table_is_permutation_duplicated() {
        let field = NoiseField::new(7);
        let mut seen = [false; 256];
        for &v in &field.perm[..256] {
            assert!(!seen[v as usize], "value {} repeated", v);
            seen[v as usize] = true;
        }
        assert_eq!(field.perm[..256], field.perm[256..]);
    }

    #[test]
    fn test_reseed_matches_fresh_field() {
        let mut field = NoiseField::new(5);
        field.seed(99);
        assert_eq!(field.perm, NoiseField::new(99).perm);
        assert_eq!(field.current_seed(), 99);
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let field = NoiseField::new(3);
        assert_eq!(field.noise1(4.0), 0.0);
        assert_eq!(field.noise2(2.0, -3.0), 0.0);
        assert_eq!(field.noise3(1.0, 2.0, 3.0), 0.0);
    }

    #[test]
    fn test_single_octave_equals_base_noise() {
        let field = NoiseField::new(11);
        for &p in &[0.0, 0.25, 0.5, 0.9] {
            assert_eq!(field.octave1(3.3, 1, p), field.noise1(3.3));
            assert_eq!(field.octave2(3.3, -1.7, 1, p), field.noise2(3.3, -1.7));
            assert_eq!(field.octave3(3.3, -1.7, 0.4, 1, p), field.noise3(3.3, -1.7, 0.4));
        }
    }

    #[test]
    fn test_zero_octaves_is_zero() {
        let field = NoiseField::new(11);
        assert_eq!(field.octave2(1.5, 2.5, 0, 0.5), 0.0);
    }

    #[test]
    fn test_noise01_shifts_range() {
        let field = NoiseField::new(8);
        let raw = field.noise2(0.37, 0.81);
        assert!((field.noise01_2(0.37, 0.81) - (raw * 0.5 + 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_noise_varies_between_cells() {
        let field = NoiseField::new(42);
        let samples: Vec<f32> = (0..16).map(|i| field.noise2(i as f32 + 0.5, 0.5)).collect();
        assert!(samples.iter().any(|&s| s.abs() > 1e-3));
    }

    proptest! {
        #[test]
        fn prop_noise_in_unit_range(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            z in -500.0f32..500.0,
            seed in any::<u64>(),
        ) {
            let field = NoiseField::new(seed);
            prop_assert!((-1.0..=1.0).contains(&field.noise1(x)));
            prop_assert!((-1.0..=1.0).contains(&field.noise2(x, y)));
            prop_assert!((-1.0..=1.0).contains(&field.noise3(x, y, z)));
            prop_assert!((-1.0..=1.0).contains(&field.octave2(x, y, 4, 0.5)));
            prop_assert!((0.0..=1.0).contains(&field.noise01_3(x, y, z)));
        }

        #[test]
        fn prop_independent_fields_agree(x in -100.0f32..100.0, y in -100.0f32..100.0, seed in any::<u64>()) {
            let a = NoiseField::new(seed);
            let b = NoiseField::new(seed);
            prop_assert_eq!(a.octave2(x, y, 4, 0.5), b.octave2(x, y, 4, 0.5));
        }
    }
}
