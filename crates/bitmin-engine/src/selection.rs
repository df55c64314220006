//! Roulette-wheel parent selection for a minimization problem.
//!
//! Each individual's slice of the wheel is proportional to the inverse of its fitness,
//! so lower fitness means a larger chance of being picked.
//!
//! # Fallback
//!
//! Walking the cumulative sum can, through floating-point rounding, end just below
//! the drawn value. In that case [`Probabilities::roulette_index`] returns the most
//! probable individual (first occurrence wins ties) and logs a warning, so selection
//! always yields a member of the population.

use rand::Rng;

use crate::{Individual, POPULATION_SIZE, Population};

/// Selection probabilities, positionally aligned with a [`Population`].
///
/// Every value is non-negative and the values sum to `1.0` up to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probabilities([f64; POPULATION_SIZE]);

/// Error returned when a fitness value cannot be inverted.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("fitness of individual {index} must be finite and positive, got {fitness}")]
pub struct InvalidFitnessError {
    pub index: usize,
    pub fitness: f64,
}

impl Probabilities {
    /// Normalizes inverted fitness values into selection probabilities.
    ///
    /// ```
    /// use bitmin_engine::Probabilities;
    ///
    /// let probabilities = Probabilities::from_fitness(&[1.0, 1.0, 2.0, 4.0]).unwrap();
    /// // inverted: 1, 1, 0.5, 0.25 (sum 2.75)
    /// assert!((probabilities.as_array()[0] - 1.0 / 2.75).abs() < 1e-12);
    /// ```
    pub fn from_fitness(fitness: &[f64; POPULATION_SIZE]) -> Result<Self, InvalidFitnessError> {
        let mut inverted = [0.0; POPULATION_SIZE];
        for (index, (slot, &fitness)) in inverted.iter_mut().zip(fitness).enumerate() {
            if !(fitness.is_finite() && fitness > 0.0) {
                return Err(InvalidFitnessError { index, fitness });
            }
            *slot = fitness.recip();
        }
        let total: f64 = inverted.iter().sum();
        Ok(Self(inverted.map(|value| value / total)))
    }

    #[must_use]
    pub fn as_array(&self) -> &[f64; POPULATION_SIZE] {
        &self.0
    }

    /// Maps a draw in `[0, 1)` to the index of the selected individual.
    ///
    /// Returns the first index whose cumulative probability is `>= draw`, or the most
    /// probable index if no cumulative sum reaches it.
    #[must_use]
    pub fn roulette_index(&self, draw: f64) -> usize {
        let mut cumulative = 0.0;
        for (index, probability) in self.0.iter().enumerate() {
            cumulative += probability;
            if draw <= cumulative {
                return index;
            }
        }
        let index = self.most_probable_index();
        tracing::warn!(
            draw,
            cumulative,
            index,
            "roulette draw not covered by cumulative probability, using most probable individual"
        );
        index
    }

    fn most_probable_index(&self) -> usize {
        let mut best = 0;
        for (index, &probability) in self.0.iter().enumerate().skip(1) {
            if probability > self.0[best] {
                best = index;
            }
        }
        best
    }
}

/// Computes selection probabilities for every individual in `population`.
pub fn compute_probabilities(population: &Population) -> Result<Probabilities, InvalidFitnessError> {
    Probabilities::from_fitness(&population.evaluate())
}

/// Spins the roulette wheel once and returns the selected individual.
pub fn select<'a, R>(
    population: &'a Population,
    probabilities: &Probabilities,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    let draw: f64 = rng.random();
    &population.individuals()[probabilities.roulette_index(draw)]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn population(texts: [&str; POPULATION_SIZE]) -> Population {
        Population::new(texts.map(|s| s.parse().unwrap()))
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let population = Population::random(&mut rng);
            let probabilities = compute_probabilities(&population).unwrap();
            let sum: f64 = probabilities.as_array().iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
            assert!(probabilities.as_array().iter().all(|&p| p >= 0.0));
        }
    }

    #[test]
    fn test_lower_fitness_gets_higher_probability() {
        // fitness: 1, 2, 3, 5146
        let probabilities =
            compute_probabilities(&population(["000000", "001000", "000001", "111111"])).unwrap();
        let p = probabilities.as_array();
        assert!(p[0] > p[1] && p[1] > p[2] && p[2] > p[3], "{p:?}");
    }

    #[test]
    fn test_equal_fitness_gives_uniform_probabilities() {
        let probabilities = Probabilities::from_fitness(&[7.0; POPULATION_SIZE]).unwrap();
        for &p in probabilities.as_array() {
            assert!((p - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_fitness_is_rejected() {
        assert_eq!(
            Probabilities::from_fitness(&[1.0, 0.0, 2.0, 3.0]),
            Err(InvalidFitnessError {
                index: 1,
                fitness: 0.0,
            })
        );
        assert!(Probabilities::from_fitness(&[1.0, 2.0, -3.0, 3.0]).is_err());
        assert!(Probabilities::from_fitness(&[1.0, 2.0, 3.0, f64::INFINITY]).is_err());
        assert!(Probabilities::from_fitness(&[f64::NAN, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn test_roulette_index_intervals() {
        let probabilities = Probabilities::from_fitness(&[1.0; POPULATION_SIZE]).unwrap();
        assert_eq!(probabilities.roulette_index(0.0), 0);
        assert_eq!(probabilities.roulette_index(0.1), 0);
        // Boundaries are inclusive on the right.
        assert_eq!(probabilities.roulette_index(0.25), 0);
        assert_eq!(probabilities.roulette_index(0.3), 1);
        assert_eq!(probabilities.roulette_index(0.6), 2);
        assert_eq!(probabilities.roulette_index(0.99), 3);
    }

    #[test]
    fn test_roulette_fallback_picks_first_most_probable() {
        // fitness: 2, 1, 1, 4 -> individuals 1 and 2 tie for the highest probability
        let probabilities = Probabilities::from_fitness(&[2.0, 1.0, 1.0, 4.0]).unwrap();
        assert_eq!(probabilities.roulette_index(1.5), 1);

        let probabilities = Probabilities::from_fitness(&[1.0; POPULATION_SIZE]).unwrap();
        assert_eq!(probabilities.roulette_index(2.0), 0);
    }

    #[test]
    fn test_select_returns_population_member() {
        let population = population(["000000", "010101", "111000", "000111"]);
        let probabilities = compute_probabilities(&population).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let selected = select(&population, &probabilities, &mut rng);
            assert!(population.individuals().contains(selected));
        }
    }

    #[test]
    fn test_select_favors_low_fitness() {
        // fitness 1 vs 5146: the optimum owns almost the whole wheel
        let population = population(["000000", "111111", "111111", "111111"]);
        let probabilities = compute_probabilities(&population).unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        let hits = (0..1000)
            .filter(|_| *select(&population, &probabilities, &mut rng) == Individual::OPTIMUM)
            .count();
        assert!(hits > 950, "optimum selected only {hits} times");
    }
}
