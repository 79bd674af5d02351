//! Velocity mapping for step patterns.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Options for [`velocities`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityOptions {
    /// Nominal velocity for a regular hit.
    pub base: f64,
    /// Uniform jitter half-width around `base`.
    pub spread: f64,
    /// Probability that a hit is softened into a ghost hit.
    pub ghost_chance: f64,
    /// Lower bound of the ghost velocity range.
    pub ghost_min: f64,
    /// Upper bound of the ghost velocity range.
    pub ghost_max: f64,
}

impl Default for VelocityOptions {
    fn default() -> Self {
        Self {
            base: 0.9,
            spread: 0.1,
            ghost_chance: 0.0,
            ghost_min: 0.15,
            ghost_max: 0.35,
        }
    }
}

impl VelocityOptions {
    /// Clamp all fields into [0, 1] and order the ghost range.
    pub fn coerced(self) -> Self {
        let ghost_min = self.ghost_min.clamp(0.0, 1.0);
        let ghost_max = self.ghost_max.clamp(0.0, 1.0);
        let (ghost_min, ghost_max) = if ghost_min <= ghost_max {
            (ghost_min, ghost_max)
        } else {
            (ghost_max, ghost_min)
        };
        Self {
            base: self.base.clamp(0.0, 1.0),
            spread: self.spread.clamp(0.0, 1.0),
            ghost_chance: self.ghost_chance.clamp(0.0, 1.0),
            ghost_min,
            ghost_max,
        }
    }
}

/// Map a step pattern to per-step velocities in [0, 1].
///
/// Rests always map to 0. A hit becomes a ghost hit with probability
/// `ghost_chance`, drawing a velocity uniformly from the ghost range;
/// otherwise it gets `base` plus uniform jitter in `[-spread, spread]`,
/// clamped to [0, 1]. Ghost hits only ever soften existing hits; the
/// chance never turns a rest into a sound.
pub fn velocities<R: Rng>(
    pattern: &[bool],
    options: &VelocityOptions,
    rng: &mut R,
) -> Vec<f64> {
    let opts = options.coerced();

    pattern
        .iter()
        .map(|&hit| {
            if !hit {
                return 0.0;
            }
            if opts.ghost_chance > 0.0 && rng.gen::<f64>() < opts.ghost_chance {
                return opts.ghost_min + rng.gen::<f64>() * (opts.ghost_max - opts.ghost_min);
            }
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * opts.spread;
            (opts.base + jitter).clamp(0.0, 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepweave_core::create_rng;

    #[test]
    fn test_rests_are_silent() {
        let mut rng = create_rng(1);
        let vels = velocities(&[false, true, false, true], &VelocityOptions::default(), &mut rng);
        assert_eq!(vels.len(), 4);
        assert_eq!(vels[0], 0.0);
        assert_eq!(vels[2], 0.0);
        assert!(vels[1] > 0.0);
        assert!(vels[3] > 0.0);
    }

    #[test]
    fn test_range_clamped() {
        let mut rng = create_rng(7);
        let options = VelocityOptions {
            base: 0.95,
            spread: 0.5,
            ..VelocityOptions::default()
        };
        let pattern = vec![true; 256];
        for v in velocities(&pattern, &options, &mut rng) {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_no_jitter_yields_base() {
        let mut rng = create_rng(3);
        let options = VelocityOptions {
            base: 0.6,
            spread: 0.0,
            ..VelocityOptions::default()
        };
        let vels = velocities(&[true, true, true], &options, &mut rng);
        assert!(vels.iter().all(|&v| (v - 0.6).abs() < 1e-12));
    }

    #[test]
    fn test_ghost_hits_within_range() {
        let mut rng = create_rng(11);
        let options = VelocityOptions {
            ghost_chance: 1.0,
            ghost_min: 0.15,
            ghost_max: 0.35,
            ..VelocityOptions::default()
        };
        let pattern = vec![true; 64];
        for v in velocities(&pattern, &options, &mut rng) {
            assert!((0.15..=0.35).contains(&v), "ghost velocity {v} out of range");
        }
    }

    #[test]
    fn test_ghosts_never_wake_rests() {
        let mut rng = create_rng(5);
        let options = VelocityOptions {
            ghost_chance: 1.0,
            ..VelocityOptions::default()
        };
        let pattern = vec![false; 64];
        assert!(velocities(&pattern, &options, &mut rng)
            .iter()
            .all(|&v| v == 0.0));
    }

    #[test]
    fn test_seeded_determinism() {
        let pattern = vec![true, false, true, true, false, true];
        let options = VelocityOptions {
            ghost_chance: 0.3,
            ..VelocityOptions::default()
        };
        let a = velocities(&pattern, &options, &mut create_rng(42));
        let b = velocities(&pattern, &options, &mut create_rng(42));
        assert_eq!(a, b);

        let c = velocities(&pattern, &options, &mut create_rng(43));
        assert_ne!(a, c);
    }

    #[test]
    fn test_coercion_orders_ghost_range() {
        let options = VelocityOptions {
            ghost_min: 0.8,
            ghost_max: 0.2,
            ..VelocityOptions::default()
        }
        .coerced();
        assert!(options.ghost_min <= options.ghost_max);
    }
}
