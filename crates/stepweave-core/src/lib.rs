//! stepweave shared foundation.
//!
//! Every generator in the workspace draws its randomness from a seeded PCG32
//! created here, so that a pattern is reproducible from a single `u32` seed.
//! Independent random streams (one per instrument lane) are derived from a
//! base seed with BLAKE3 rather than by reusing the generator.
//!
//! The [`index`] module holds the signed-index wrapping used by pattern
//! rotation and automaton column sampling.

pub mod index;
pub mod rng;

pub use index::wrap_index;
pub use rng::{create_rng, derive_stream_seed};

/// Crate version for frontend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
