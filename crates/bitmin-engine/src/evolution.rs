//! The generation loop.
//!
//! [`Evolution`] owns the population, the random number generator and the best-so-far
//! trackers. Each call to [`Evolution::step`] evaluates one generation, decides
//! whether the run is over, and otherwise breeds the next generation:
//!
//! ```text
//! initialize ─→ evaluate ─┬─→ terminated (optimum found or generation cap hit)
//!                  ↑      │
//!                  └── reproduce
//! ```

use std::array;

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    FitnessStats, GenerationReport, Individual, MAX_GENERATIONS, MutationRate, POPULATION_SIZE,
    Population, Probabilities, RunSeed, ScoredIndividual, fitness, reproduction,
    selection::InvalidFitnessError,
};

/// An individual remembered together with where it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestRecord {
    pub individual: Individual,
    pub fitness: f64,
    /// 1-based generation index in which the individual was evaluated.
    pub generation: usize,
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum Outcome {
    /// The global minimum was reached.
    Found(BestRecord),
    /// The generation cap was hit; holds the best individual of the whole run.
    NotFound(BestRecord),
}

impl Outcome {
    #[must_use]
    pub fn record(&self) -> &BestRecord {
        match self {
            Outcome::Found(record) | Outcome::NotFound(record) => record,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvolutionError {
    #[display("cannot compute selection probabilities: {_0}")]
    InvalidFitness(InvalidFitnessError),
}

/// Drives a run of the genetic algorithm.
///
/// # Example
///
/// ```
/// use bitmin_engine::{Evolution, Individual, Population};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let population = Population::new([Individual::OPTIMUM; 4]);
/// let mut evolution = Evolution::with_population(population, Pcg32::seed_from_u64(0));
/// let outcome = evolution.run(|_| {}).unwrap();
/// assert!(outcome.is_found());
/// assert_eq!(outcome.record().generation, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Evolution<R> {
    rng: R,
    population: Population,
    mutation_rate: MutationRate,
    generation: usize,
    global_best: Option<BestRecord>,
    outcome: Option<Outcome>,
}

impl Evolution<Pcg32> {
    /// Starts a reproducible run from `seed`.
    #[must_use]
    pub fn with_seed(seed: RunSeed) -> Self {
        Self::new(Pcg32::from_seed(seed.to_bytes()))
    }
}

impl<R> Evolution<R>
where
    R: Rng,
{
    /// Starts a run with a randomly initialized population drawn from `rng`.
    #[must_use]
    pub fn new(mut rng: R) -> Self {
        let population = Population::random(&mut rng);
        Self::with_population(population, rng)
    }

    /// Starts a run from a given initial population.
    #[must_use]
    pub fn with_population(population: Population, rng: R) -> Self {
        Self {
            rng,
            population,
            mutation_rate: MutationRate::default(),
            generation: 0,
            global_best: None,
            outcome: None,
        }
    }

    /// Number of generations evaluated so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The population that the next [`step`](Self::step) will evaluate.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn global_best(&self) -> Option<&BestRecord> {
        self.global_best.as_ref()
    }

    /// The final outcome, once the run has terminated.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Evaluates the current generation and, unless the run ends here, replaces the
    /// population with the next generation.
    ///
    /// Returns `Ok(None)` without doing anything once the run has terminated.
    pub fn step(&mut self) -> Result<Option<GenerationReport>, EvolutionError> {
        if self.outcome.is_some() {
            return Ok(None);
        }

        let fitness_values = self.population.evaluate();
        let probabilities = Probabilities::from_fitness(&fitness_values)?;
        self.generation += 1;
        let generation = self.generation;

        let individuals: [ScoredIndividual; POPULATION_SIZE] =
            array::from_fn(|i| ScoredIndividual {
                individual: self.population.individuals()[i],
                fitness: fitness_values[i],
                probability: probabilities.as_array()[i],
            });
        let best = generation_best(&individuals);
        let global_best = match self.global_best {
            Some(record) if record.fitness <= best.fitness => record,
            _ => BestRecord {
                individual: best.individual,
                fitness: best.fitness,
                generation,
            },
        };
        self.global_best = Some(global_best);

        let report = GenerationReport {
            generation,
            individuals,
            best,
            global_best,
            stats: FitnessStats::new(&fitness_values),
        };
        tracing::debug!(
            generation,
            best = %best.individual,
            best_fitness = best.fitness,
            mean_fitness = report.stats.mean,
            "generation evaluated"
        );

        if fitness::is_global_optimum(best.fitness) {
            self.finish(Outcome::Found(BestRecord {
                individual: best.individual,
                fitness: best.fitness,
                generation,
            }));
        } else if generation >= MAX_GENERATIONS {
            self.finish(Outcome::NotFound(global_best));
        } else {
            self.population = reproduction::next_generation(
                &self.population,
                &probabilities,
                &self.mutation_rate,
                &mut self.rng,
            );
        }

        Ok(Some(report))
    }

    /// Steps until the run terminates, passing every generation report to
    /// `on_generation`.
    pub fn run<F>(&mut self, mut on_generation: F) -> Result<Outcome, EvolutionError>
    where
        F: FnMut(&GenerationReport),
    {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            if let Some(report) = self.step()? {
                on_generation(&report);
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        tracing::info!(
            generation = self.generation,
            found = outcome.is_found(),
            best = %outcome.record().individual,
            fitness = outcome.record().fitness,
            "evolution terminated"
        );
        self.outcome = Some(outcome);
    }
}

/// Returns the individual with strictly lowest fitness, first occurrence winning ties.
fn generation_best(individuals: &[ScoredIndividual]) -> ScoredIndividual {
    let mut best = individuals[0];
    for scored in &individuals[1..] {
        if scored.fitness < best.fitness {
            best = *scored;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    fn population(texts: [&str; POPULATION_SIZE]) -> Population {
        Population::new(texts.map(|s| s.parse().unwrap()))
    }

    fn seed(n: u8) -> RunSeed {
        RunSeed::from_bytes([n; 16])
    }

    #[test]
    fn test_optimum_in_initial_population_stops_immediately() {
        let mut evolution = Evolution::with_population(
            population(["111111", "010101", "000000", "000000"]),
            Pcg32::seed_from_u64(0),
        );
        let mut reports = vec![];
        let outcome = evolution.run(|report| reports.push(report.clone())).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(
            outcome,
            Outcome::Found(BestRecord {
                individual: Individual::OPTIMUM,
                fitness: 1.0,
                generation: 1,
            })
        );
        assert_eq!(evolution.generation(), 1);
        // Terminated runs do not step again.
        assert_eq!(evolution.step(), Ok(None));
    }

    #[test]
    fn test_generation_best_first_occurrence_wins() {
        let scored = |text: &str, probability| {
            let individual: Individual = text.parse().unwrap();
            ScoredIndividual {
                individual,
                fitness: fitness::evaluate(&individual),
                probability,
            }
        };
        let individuals = [
            scored("111111", 0.1),
            scored("001000", 0.3),
            scored("001000", 0.2),
            scored("000001", 0.4),
        ];
        assert_eq!(generation_best(&individuals), individuals[1]);
    }

    #[test]
    fn test_run_never_exceeds_generation_cap() {
        for n in 0..50 {
            let mut evolution = Evolution::with_seed(seed(n));
            let mut count = 0;
            let outcome = evolution.run(|_| count += 1).unwrap();
            assert!(count <= MAX_GENERATIONS, "seed {n} ran {count} generations");
            assert_eq!(count, evolution.generation());
            match outcome {
                Outcome::Found(record) => {
                    assert_eq!(record.individual, Individual::OPTIMUM);
                    assert_eq!(record.generation, count);
                }
                Outcome::NotFound(_) => assert_eq!(count, MAX_GENERATIONS),
            }
        }
    }

    #[test]
    fn test_global_best_tracks_earliest_strict_minimum() {
        for n in 0..50 {
            let mut evolution = Evolution::with_seed(seed(n));
            let mut reports = vec![];
            let outcome = evolution.run(|report| reports.push(report.clone())).unwrap();

            let mut expected: Option<BestRecord> = None;
            for report in &reports {
                if expected.is_none_or(|record| report.best.fitness < record.fitness) {
                    expected = Some(BestRecord {
                        individual: report.best.individual,
                        fitness: report.best.fitness,
                        generation: report.generation,
                    });
                }
                assert_eq!(Some(report.global_best), expected, "seed {n}");
            }
            assert_eq!(Some(outcome.record()), expected.as_ref(), "seed {n}");
            assert_eq!(evolution.global_best(), expected.as_ref());
        }
    }

    #[test]
    fn test_reports_are_consistent() {
        let mut evolution = Evolution::with_seed(seed(42));
        evolution
            .run(|report| {
                let sum: f64 = report.individuals.iter().map(|s| s.probability).sum();
                assert!((sum - 1.0).abs() < 1e-9);
                for scored in &report.individuals {
                    assert_eq!(scored.fitness, fitness::evaluate(&scored.individual));
                    assert!(scored.fitness >= report.best.fitness);
                }
                assert_eq!(report.stats.min, report.best.fitness);
            })
            .unwrap();
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let collect = |seed: RunSeed| {
            let mut reports = vec![];
            let outcome = Evolution::with_seed(seed)
                .run(|report| reports.push(report.clone()))
                .unwrap();
            (reports, outcome)
        };
        assert_eq!(collect(seed(9)), collect(seed(9)));
    }

    #[test]
    fn test_population_is_replaced_between_generations() {
        let mut evolution = Evolution::with_population(
            population(["111111", "111111", "111111", "111111"]),
            Pcg32::seed_from_u64(4),
        );
        let first = evolution.step().unwrap().unwrap();
        assert_eq!(first.generation, 1);
        assert!(evolution.outcome().is_none());

        let bred = evolution.population().clone();
        let second = evolution.step().unwrap().unwrap();
        assert_eq!(second.generation, 2);
        assert_eq!(
            second.individuals.map(|scored| scored.individual),
            *bred.individuals()
        );
    }
}
