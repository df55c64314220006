//! Genetic-algorithm minimizer for `g(x, y) = x³ + 2y⁴ + 1` over 6-bit chromosomes.
//!
//! Each [`Individual`] is a 6-bit chromosome. The first three bits encode `x` and the
//! last three encode `y` (most significant bit first), so both coordinates range over
//! `0..=7`. Lower fitness is better; the unique global optimum is `000000` with fitness
//! `1.0`.
//!
//! # How a Run Works
//!
//! 1. **Initialization** - A [`Population`] of [`POPULATION_SIZE`] random individuals
//! 2. **Evaluation** - [`fitness::evaluate`] scores every individual
//! 3. **Selection** - [`selection::compute_probabilities`] assigns inverse-fitness
//!    probabilities and [`selection::select`] spins the roulette wheel
//! 4. **Reproduction** - [`reproduction::next_generation`] applies single-point
//!    crossover and per-bit mutation
//! 5. **Termination** - The [`Evolution`] driver stops once the optimum is found or
//!    after [`MAX_GENERATIONS`] generations
//!
//! # Example
//!
//! ```
//! use bitmin_engine::{Evolution, RunSeed};
//!
//! let seed: RunSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut evolution = Evolution::with_seed(seed);
//! let outcome = evolution.run(|report| println!("{report}")).unwrap();
//! assert!(outcome.record().generation <= bitmin_engine::MAX_GENERATIONS);
//! ```
//!
//! All randomness flows through an injected [`rand::Rng`], so runs built from the same
//! [`RunSeed`] are reproducible.

pub use self::{
    evolution::{BestRecord, Evolution, EvolutionError, Outcome},
    individual::{Individual, InvalidChromosomeError},
    population::Population,
    report::{FitnessStats, GenerationReport, ScoredIndividual},
    reproduction::{MutationRate, MutationRateOutOfRangeError},
    seed::{ParseSeedError, RunSeed},
    selection::{InvalidFitnessError, Probabilities},
};

pub mod evolution;
pub mod fitness;
pub mod individual;
pub mod population;
pub mod report;
pub mod reproduction;
pub mod seed;
pub mod selection;

/// Number of individuals in every generation.
pub const POPULATION_SIZE: usize = 4;

/// Number of bits in a chromosome: three for `x`, three for `y`.
pub const CHROMOSOME_LENGTH: usize = 6;

/// Number of leading chromosome bits that encode `x`.
pub const X_BITS: usize = 3;

/// Per-bit flip probability used by the default [`MutationRate`].
pub const MUTATION_RATE: f64 = 0.05;

/// Hard cap on evaluation cycles.
pub const MAX_GENERATIONS: usize = 15;

/// Fitness of the known global minimum, reached only at `x = 0, y = 0`.
pub const GLOBAL_OPTIMUM_FITNESS: f64 = 1.0;

// Reproduction fills the next generation two children at a time.
const _: () = assert!(POPULATION_SIZE % 2 == 0);
const _: () = assert!(X_BITS < CHROMOSOME_LENGTH);
