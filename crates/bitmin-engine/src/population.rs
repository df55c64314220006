use std::array;

use rand::Rng;

use crate::{Individual, POPULATION_SIZE, fitness};

/// A generation of exactly [`POPULATION_SIZE`] individuals.
///
/// Populations are never edited in place; reproduction builds a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    individuals: [Individual; POPULATION_SIZE],
}

impl Population {
    #[must_use]
    pub const fn new(individuals: [Individual; POPULATION_SIZE]) -> Self {
        Self { individuals }
    }

    /// Creates a population of independently randomized individuals.
    #[must_use]
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            individuals: array::from_fn(|_| Individual::random(rng)),
        }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual; POPULATION_SIZE] {
        &self.individuals
    }

    /// Computes the fitness of every individual, positionally aligned.
    #[must_use]
    pub fn evaluate(&self) -> [f64; POPULATION_SIZE] {
        self.individuals.map(|individual| fitness::evaluate(&individual))
    }
}
