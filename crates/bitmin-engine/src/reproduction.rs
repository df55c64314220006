//! Single-point crossover and bit-flip mutation.
//!
//! [`next_generation`] combines the operators: it repeatedly selects two parents by
//! roulette, recombines them with [`crossover`], mutates both children with
//! [`mutate`] and appends them in order. The children fully replace the previous
//! generation (no elitism).

use arrayvec::ArrayVec;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution as _};

use crate::{
    CHROMOSOME_LENGTH, Individual, MUTATION_RATE, POPULATION_SIZE, Population,
    selection::{self, Probabilities},
};

/// Per-bit flip probability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRate {
    rate: f64,
    trial: Bernoulli,
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("mutation rate must be within [0, 1], got {rate}")]
pub struct MutationRateOutOfRangeError {
    pub rate: f64,
}

impl MutationRate {
    pub fn new(rate: f64) -> Result<Self, MutationRateOutOfRangeError> {
        let trial = Bernoulli::new(rate).map_err(|_| MutationRateOutOfRangeError { rate })?;
        Ok(Self { rate, trial })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.rate
    }
}

impl Default for MutationRate {
    fn default() -> Self {
        Self::new(MUTATION_RATE).expect("MUTATION_RATE is within [0, 1]")
    }
}

/// Recombines two parents at a crossover point drawn uniformly from
/// `1..CHROMOSOME_LENGTH`, so both children carry material from both parents.
pub fn crossover<R>(a: &Individual, b: &Individual, rng: &mut R) -> (Individual, Individual)
where
    R: Rng + ?Sized,
{
    let point = rng.random_range(1..CHROMOSOME_LENGTH);
    tracing::debug!(point, "single-point crossover");
    crossover_at(a, b, point)
}

/// Recombines two parents at a fixed crossover point.
///
/// The first child takes `a`'s bits before `point` and `b`'s bits from `point` on;
/// the second child is the complementary recombination.
///
/// ```
/// use bitmin_engine::{Individual, reproduction};
///
/// let a: Individual = "000000".parse().unwrap();
/// let b: Individual = "111111".parse().unwrap();
/// let (c1, c2) = reproduction::crossover_at(&a, &b, 2);
/// assert_eq!(c1.to_string(), "001111");
/// assert_eq!(c2.to_string(), "110000");
/// ```
///
/// # Panics
///
/// Panics if `point` is not within `1..CHROMOSOME_LENGTH`.
#[must_use]
pub fn crossover_at(a: &Individual, b: &Individual, point: usize) -> (Individual, Individual) {
    assert!(
        (1..CHROMOSOME_LENGTH).contains(&point),
        "crossover point {point} out of range"
    );
    let mut first = *a.genes();
    let mut second = *b.genes();
    first[point..].copy_from_slice(&b.genes()[point..]);
    second[point..].copy_from_slice(&a.genes()[point..]);
    (Individual::from_genes(first), Individual::from_genes(second))
}

/// Flips each bit independently with probability `rate`.
pub fn mutate<R>(individual: &Individual, rate: &MutationRate, rng: &mut R) -> Individual
where
    R: Rng + ?Sized,
{
    let genes = individual
        .genes()
        .map(|bit| if rate.trial.sample(rng) { !bit } else { bit });
    Individual::from_genes(genes)
}

/// Builds the next generation from the current one.
pub fn next_generation<R>(
    population: &Population,
    probabilities: &Probabilities,
    rate: &MutationRate,
    rng: &mut R,
) -> Population
where
    R: Rng + ?Sized,
{
    let mut children = ArrayVec::<Individual, POPULATION_SIZE>::new();
    while !children.is_full() {
        let p1 = selection::select(population, probabilities, rng);
        let p2 = selection::select(population, probabilities, rng);
        let (c1, c2) = crossover(p1, p2, rng);
        children.push(mutate(&c1, rate, rng));
        children.push(mutate(&c2, rate, rng));
    }
    let individuals = children
        .into_inner()
        .expect("population size is even, so children fill it exactly");
    Population::new(individuals)
}
