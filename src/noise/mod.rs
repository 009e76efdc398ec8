//! Deterministic gradient noise
//!
//! A single seeded permutation table drives 1D, 2D and 3D noise plus their
//! fractal (octave) sums. Ground height is the main consumer.

pub mod field;

pub use field::NoiseField;
