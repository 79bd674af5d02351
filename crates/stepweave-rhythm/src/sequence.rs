//! Note sequence mapping for step patterns.

use rand::Rng;
use serde::{Deserialize, Serialize};
use stepweave_core::wrap_index;

/// Options for [`notes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteOptions {
    /// Walk the pool sequentially (`true`) or pick randomly per hit.
    pub cycle: bool,
    /// Starting pool index for cycle mode, wrapped into range.
    pub start_index: i64,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            cycle: true,
            start_index: 0,
        }
    }
}

/// Map a step pattern onto a pool of note names.
///
/// Rests map to `None`. In cycle mode each hit takes the next pool entry,
/// starting at `start_index mod pool_len`; rests do not advance the cursor.
/// Otherwise each hit picks a uniformly random pool entry. An empty pool
/// falls back to a single `"C2"`.
pub fn notes<R: Rng>(
    pattern: &[bool],
    pool: &[String],
    options: &NoteOptions,
    rng: &mut R,
) -> Vec<Option<String>> {
    let fallback = ["C2".to_string()];
    let pool: &[String] = if pool.is_empty() { &fallback } else { pool };
    let mut cursor = wrap_index(options.start_index, pool.len());

    pattern
        .iter()
        .map(|&hit| {
            if !hit {
                return None;
            }
            if options.cycle {
                let note = pool[cursor % pool.len()].clone();
                cursor += 1;
                Some(note)
            } else {
                Some(pool[rng.gen_range(0..pool.len())].clone())
            }
        })
        .collect()
}
