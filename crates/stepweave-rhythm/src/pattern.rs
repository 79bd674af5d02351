//! Step pattern construction.
//!
//! A step pattern is a fixed-length sequence of hits (`true`) and rests
//! (`false`). The generator distributes a pulse count across the steps as
//! evenly as possible, the classic Euclidean rhythm family (tresillo and
//! cinquillo fall out of it).

use serde::{Deserialize, Serialize};
use stepweave_core::wrap_index;

/// Validated parameters for [`euclidean_pattern`].
///
/// Out-of-range inputs are coerced rather than rejected: a degenerate
/// pattern is always preferable to a failure mid-performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuclidParams {
    /// Total number of slots (at least 1).
    pub steps: usize,
    /// Number of hits to distribute (at most `steps`).
    pub pulses: usize,
    /// Rotation applied after generation (positive = right).
    pub rotation: i64,
}

impl EuclidParams {
    /// Build coerced parameters: `steps` is clamped to at least 1 and
    /// `pulses` into `[0, steps]`.
    pub fn new(steps: i64, pulses: i64, rotation: i64) -> Self {
        let steps = steps.max(1) as usize;
        let pulses = pulses.clamp(0, steps as i64) as usize;
        Self {
            steps,
            pulses,
            rotation,
        }
    }
}

impl Default for EuclidParams {
    fn default() -> Self {
        Self {
            steps: 16,
            pulses: 4,
            rotation: 0,
        }
    }
}

/// Cyclically rotate a sequence by `amount` positions (positive = right).
///
/// The amount is reduced modulo the length, so negative and oversized
/// rotations wrap. Always returns a new vector; rotating by 0 (mod len)
/// returns an equal-valued copy.
///
/// # Examples
/// ```
/// use stepweave_rhythm::rotate;
///
/// assert_eq!(rotate(&[1, 2, 3, 4, 5], 2), vec![4, 5, 1, 2, 3]);
/// assert_eq!(rotate(&[1, 2, 3], -1), vec![2, 3, 1]);
/// assert_eq!(rotate::<i32>(&[], 7), Vec::<i32>::new());
/// ```
pub fn rotate<T: Clone>(values: &[T], amount: i64) -> Vec<T> {
    if values.is_empty() {
        return Vec::new();
    }
    let len = values.len();
    let shift = wrap_index(amount, len);
    if shift == 0 {
        return values.to_vec();
    }
    let split = len - shift;
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(&values[split..]);
    out.extend_from_slice(&values[..split]);
    out
}

/// Generate a Euclidean step pattern with the bucket method.
///
/// A running accumulator starts at `steps - pulses` and gains `pulses` per
/// slot; every time it reaches `steps` it overflows, and the overflowing
/// slot becomes a hit. Seeding the accumulator this way lands the first hit
/// on slot 0 and yields the maximally even (Bjorklund-equivalent) spacing
/// without the recursive algorithm. Zero pulses produce all rests. The
/// rotation from `params` is applied afterwards.
///
/// # Examples
/// ```
/// use stepweave_rhythm::{euclidean_pattern, EuclidParams};
///
/// let p = euclidean_pattern(&EuclidParams::new(8, 3, 0));
/// let bits: Vec<u8> = p.iter().map(|&hit| hit as u8).collect();
/// assert_eq!(bits, vec![1, 0, 0, 1, 0, 0, 1, 0]);
/// ```
pub fn euclidean_pattern(params: &EuclidParams) -> Vec<bool> {
    let mut out = vec![false; params.steps];
    if params.pulses == 0 {
        return out;
    }

    let mut bucket = params.steps - params.pulses;
    for slot in out.iter_mut() {
        bucket += params.pulses;
        if bucket >= params.steps {
            bucket -= params.steps;
            *slot = true;
        }
    }

    if params.rotation != 0 {
        rotate(&out, params.rotation)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bits(pattern: &[bool]) -> Vec<u8> {
        pattern.iter().map(|&hit| hit as u8).collect()
    }

    #[test]
    fn test_rotate_right() {
        assert_eq!(rotate(&[1, 2, 3, 4, 5], 2), vec![4, 5, 1, 2, 3]);
    }

    #[test]
    fn test_rotate_identity() {
        let xs = [1, 2, 3, 4];
        assert_eq!(rotate(&xs, 0), xs.to_vec());
        assert_eq!(rotate(&xs, 4), xs.to_vec());
        assert_eq!(rotate(&xs, -4), xs.to_vec());
    }

    #[test]
    fn test_rotate_negative_wraps() {
        assert_eq!(rotate(&[1, 2, 3, 4, 5], -2), rotate(&[1, 2, 3, 4, 5], 3));
    }

    #[test]
    fn test_rotate_empty() {
        assert_eq!(rotate::<u8>(&[], 0), Vec::<u8>::new());
        assert_eq!(rotate::<u8>(&[], 99), Vec::<u8>::new());
        assert_eq!(rotate::<u8>(&[], -99), Vec::<u8>::new());
    }

    #[test]
    fn test_euclid_8_3() {
        let p = euclidean_pattern(&EuclidParams::new(8, 3, 0));
        assert_eq!(bits(&p), vec![1, 0, 0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_euclid_16_4_four_on_floor() {
        let p = euclidean_pattern(&EuclidParams::new(16, 4, 0));
        let expected: Vec<u8> = (0..16).map(|i| u8::from(i % 4 == 0)).collect();
        assert_eq!(bits(&p), expected);
    }

    #[test]
    fn test_euclid_pulse_count_invariant() {
        for steps in 1..=32i64 {
            for pulses in 0..=steps {
                let p = euclidean_pattern(&EuclidParams::new(steps, pulses, 0));
                assert_eq!(p.len(), steps as usize);
                assert_eq!(
                    p.iter().filter(|&&hit| hit).count(),
                    pulses as usize,
                    "steps={steps} pulses={pulses}"
                );
            }
        }
    }

    #[test]
    fn test_euclid_zero_pulses() {
        let p = euclidean_pattern(&EuclidParams::new(8, 0, 0));
        assert!(p.iter().all(|&hit| !hit));
    }

    #[test]
    fn test_euclid_full_pulses() {
        let p = euclidean_pattern(&EuclidParams::new(8, 8, 0));
        assert!(p.iter().all(|&hit| hit));
    }

    #[test]
    fn test_euclid_coercion() {
        // Zero/negative steps coerce to 1, pulses clamp to steps.
        let p = euclidean_pattern(&EuclidParams::new(0, 5, 0));
        assert_eq!(p.len(), 1);
        assert!(p[0]);

        let p = euclidean_pattern(&EuclidParams::new(4, 9, 0));
        assert_eq!(p.iter().filter(|&&hit| hit).count(), 4);

        let p = euclidean_pattern(&EuclidParams::new(4, -3, 0));
        assert!(p.iter().all(|&hit| !hit));
    }

    #[test]
    fn test_euclid_rotation_applied() {
        let base = euclidean_pattern(&EuclidParams::new(8, 3, 0));
        let rotated = euclidean_pattern(&EuclidParams::new(8, 3, 2));
        assert_eq!(rotated, rotate(&base, 2));
    }

    #[test]
    fn test_euclid_deterministic() {
        let params = EuclidParams::new(16, 7, 3);
        assert_eq!(euclidean_pattern(&params), euclidean_pattern(&params));
    }
}
