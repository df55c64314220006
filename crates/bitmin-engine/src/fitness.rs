//! Objective function `g(x, y) = x³ + 2y⁴ + 1`.
//!
//! Fitness is minimized: lower is better. Over the decoded domain `x, y ∈ 0..=7` the
//! value is always at least [`GLOBAL_OPTIMUM_FITNESS`](crate::GLOBAL_OPTIMUM_FITNESS),
//! reached only by [`Individual::OPTIMUM`].

use crate::{GLOBAL_OPTIMUM_FITNESS, Individual};

/// Computes the fitness of an individual.
///
/// ```
/// use bitmin_engine::{Individual, fitness};
///
/// let individual: Individual = "001010".parse().unwrap();
/// // x = 1, y = 2: 1 + 2 * 16 + 1
/// assert_eq!(fitness::evaluate(&individual), 34.0);
/// ```
#[must_use]
pub fn evaluate(individual: &Individual) -> f64 {
    let (x, y) = individual.decode();
    f64::from(x.pow(3) + 2 * y.pow(4) + 1)
}

/// Returns `true` if `fitness` is exactly the known global minimum.
#[must_use]
#[expect(clippy::float_cmp)]
pub fn is_global_optimum(fitness: f64) -> bool {
    fitness == GLOBAL_OPTIMUM_FITNESS
}
