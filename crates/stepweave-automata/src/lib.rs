//! Elementary cellular automaton engine.
//!
//! Evolves a 1-D binary row under one of Wolfram's 256 elementary rules and
//! reduces the evolution to step-sequencer material: the full matrix
//! (rows = time, columns = space) via [`evolve_matrix`], or a 1-D step
//! pattern via [`column_pattern`], which ORs a set of sampled columns per
//! row.
//!
//! # Example
//!
//! ```
//! use stepweave_automata::{column_pattern, AutomatonConfig};
//!
//! let config = AutomatonConfig::default(); // rule 30, 16x16, center seed
//! let mut rng = stepweave_core::create_rng(42);
//! let pattern = column_pattern(&config, &[], &mut rng);
//! assert_eq!(pattern.len(), 16);
//! ```

use rand::Rng;
use stepweave_core::wrap_index;

/// Rule table for an elementary cellular automaton.
///
/// Standard Wolfram numbering: bit `v` of the rule number is the next state
/// for the neighborhood whose 3-bit value is `v` (left bit 2, center bit 1,
/// right bit 0). Reading the 8-bit representation MSB first gives the next
/// states for `111, 110, 101, 100, 011, 010, 001, 000` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    rule: u8,
    table: [bool; 8],
}

impl RuleTable {
    /// Build the table for a rule number.
    pub fn new(rule: u8) -> Self {
        let mut table = [false; 8];
        for (value, next) in table.iter_mut().enumerate() {
            *next = (rule >> value) & 1 == 1;
        }
        Self { rule, table }
    }

    /// The rule number.
    pub fn rule(&self) -> u8 {
        self.rule
    }

    /// Next state for a (left, center, right) neighborhood.
    pub fn next(&self, left: bool, center: bool, right: bool) -> bool {
        let value = (left as usize) << 2 | (center as usize) << 1 | (right as usize);
        self.table[value]
    }
}

/// Seed row shape for the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// A single live cell at the middle column (`width / 2`).
    Center,
    /// Each column live with probability 0.5, drawn from the injected RNG.
    Random,
    /// Live cells at the given column indices, wrapped into range.
    Columns(Vec<i64>),
    /// A single live cell at one index, wrapped into range.
    Index(i64),
}

/// Edge policy for neighborhood lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Neighbors wrap around modulo the width.
    #[default]
    Wrap,
    /// The nearest edge column value is reused.
    Clamp,
}

impl std::str::FromStr for Boundary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wrap" => Ok(Boundary::Wrap),
            "clamp" => Ok(Boundary::Clamp),
            other => Err(format!("unknown boundary: {other}")),
        }
    }
}

/// Automaton configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonConfig {
    /// Wolfram rule number.
    pub rule: u8,
    /// Number of generations (matrix rows), at least 1.
    pub steps: usize,
    /// Number of cells per row, at least 1.
    pub width: usize,
    /// Seed row shape.
    pub seed: Seed,
    /// Edge policy.
    pub boundary: Boundary,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            rule: 30,
            steps: 16,
            width: 16,
            seed: Seed::Center,
            boundary: Boundary::Wrap,
        }
    }
}

impl AutomatonConfig {
    /// Build a coerced config from unchecked numeric inputs: `rule` is
    /// clamped to 0-255, `steps` and `width` to at least 1.
    pub fn coerced(rule: i64, steps: i64, width: i64, seed: Seed, boundary: Boundary) -> Self {
        Self {
            rule: rule.clamp(0, 255) as u8,
            steps: steps.max(1) as usize,
            width: width.max(1) as usize,
            seed,
            boundary,
        }
    }
}

/// Build the seed row for a config.
fn seed_row<R: Rng>(config: &AutomatonConfig, rng: &mut R) -> Vec<bool> {
    let width = config.width;
    let mut row = vec![false; width];

    match &config.seed {
        Seed::Center => {
            row[width / 2] = true;
        }
        Seed::Random => {
            for cell in row.iter_mut() {
                *cell = rng.gen_bool(0.5);
            }
        }
        Seed::Columns(indices) => {
            for &index in indices {
                row[wrap_index(index, width)] = true;
            }
        }
        Seed::Index(index) => {
            row[wrap_index(*index, width)] = true;
        }
    }

    row
}

/// Read a cell with the boundary policy applied.
fn cell_at(row: &[bool], index: i64, boundary: Boundary) -> bool {
    match boundary {
        Boundary::Wrap => row[wrap_index(index, row.len())],
        Boundary::Clamp => {
            let clamped = index.clamp(0, row.len() as i64 - 1) as usize;
            row[clamped]
        }
    }
}

/// Evolve the automaton and return the full matrix.
///
/// Row 0 is exactly the seed row; row `r` is the rule lookup over the
/// (left, center, right) neighborhoods of row `r - 1`. Deterministic unless
/// the seed is [`Seed::Random`], which draws from the injected RNG.
pub fn evolve_matrix<R: Rng>(config: &AutomatonConfig, rng: &mut R) -> Vec<Vec<bool>> {
    let table = RuleTable::new(config.rule);
    let width = config.width;

    let mut rows = Vec::with_capacity(config.steps);
    rows.push(seed_row(config, rng));

    for r in 1..config.steps {
        let prev = &rows[r - 1];
        let mut next = vec![false; width];
        for (c, cell) in next.iter_mut().enumerate() {
            let left = cell_at(prev, c as i64 - 1, config.boundary);
            let center = prev[c];
            let right = cell_at(prev, c as i64 + 1, config.boundary);
            *cell = table.next(left, center, right);
        }
        rows.push(next);
    }

    rows
}

/// Reduce the automaton to a 1-D step pattern by sampling columns.
///
/// Each output step is 1 if any of the sampled columns is live in that row.
/// An empty `columns` slice samples the center column. Column indices wrap
/// into range. Output length always equals `config.steps`.
pub fn column_pattern<R: Rng>(
    config: &AutomatonConfig,
    columns: &[i64],
    rng: &mut R,
) -> Vec<bool> {
    let matrix = evolve_matrix(config, rng);
    let width = config.width;

    let sampled: Vec<usize> = if columns.is_empty() {
        vec![width / 2]
    } else {
        columns.iter().map(|&c| wrap_index(c, width)).collect()
    };

    matrix
        .iter()
        .map(|row| sampled.iter().any(|&c| row[c]))
        .collect()
}
