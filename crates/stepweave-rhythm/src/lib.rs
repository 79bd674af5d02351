//! stepweave rhythm generator.
//!
//! This crate produces binary step patterns and maps them onto velocity and
//! note lanes for a step sequencer:
//!
//! - **Patterns**: maximally even Euclidean distributions with rotation
//!   ([`euclidean_pattern`], [`rotate`]).
//! - **Velocities**: per-hit dynamics with jitter and ghost hits
//!   ([`velocities`]).
//! - **Notes**: walking or randomly sampling a note pool per hit
//!   ([`notes`]), with note-name and scale helpers for building pools.
//!
//! All randomness comes from a caller-supplied RNG (see
//! `stepweave_core::create_rng`), so every lane is reproducible from a seed.
//!
//! # Example
//!
//! ```
//! use stepweave_rhythm::{euclidean_pattern, velocities, EuclidParams, VelocityOptions};
//!
//! let pattern = euclidean_pattern(&EuclidParams::new(8, 3, 0));
//! assert_eq!(pattern.iter().filter(|&&hit| hit).count(), 3);
//!
//! let mut rng = stepweave_core::create_rng(42);
//! let vels = velocities(&pattern, &VelocityOptions::default(), &mut rng);
//! assert_eq!(vels.len(), 8);
//! ```

pub mod note;
pub mod pattern;
pub mod scale;
pub mod sequence;
pub mod velocity;

pub use note::{midi_to_note_name, note_name_to_midi};
pub use pattern::{euclidean_pattern, rotate, EuclidParams};
pub use scale::{note_pool, Scale};
pub use sequence::{notes, NoteOptions};
pub use velocity::{velocities, VelocityOptions};

/// Crate version for frontend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
