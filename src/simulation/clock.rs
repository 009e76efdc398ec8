//! Fixed-timestep accumulator

/// Splits variable frame deltas into constant integration steps
///
/// Frame deltas are clamped to `max_frame_delta` first, so a long stall
/// produces a bounded number of steps instead of a spiral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    max_frame_delta: f32,
    accumulator: f32,
    total_steps: u64,
}

impl FixedTimestep {
    pub fn new(step: f32, max_frame_delta: f32) -> Self {
        Self {
            step,
            max_frame_delta,
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Clamp a raw frame delta into `[0, max_frame_delta]`
    pub fn frame_delta(&self, dt: f32) -> f32 {
        if dt.is_nan() {
            return 0.0;
        }
        dt.clamp(0.0, self.max_frame_delta)
    }

    /// Feed one frame, returning how many fixed steps to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += self.frame_delta(dt);

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        self.total_steps += u64::from(steps);
        steps
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Fraction of a step left in the accumulator, for interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.total_steps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_accumulate_across_frames() {
        let mut clock = FixedTimestep::new(0.25, 1.0);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 1);
        assert!((clock.alpha() - 0.2).abs() < 1e-4);
        assert_eq!(clock.total_steps(), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FixedTimestep::new(1.0 / 60.0, 0.1);
        // A 5 second stall only yields 0.1 s worth of steps
        let steps = clock.advance(5.0);
        assert!((5..=6).contains(&steps));
    }

    #[test]
    fn test_negative_and_nan_deltas_ignored() {
        let mut clock = FixedTimestep::new(0.1, 0.5);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut clock = FixedTimestep::new(0.1, 0.5);
        clock.advance(0.35);
        clock.reset();
        assert_eq!(clock.alpha(), 0.0);
        assert_eq!(clock.total_steps(), 0);
    }
}
