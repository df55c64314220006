//! Per-generation and final reports.
//!
//! The [`Display`](fmt::Display) implementations here are the textual progress output
//! of a run: one block per generation, then one [`Outcome`] message.

use std::fmt;

use crate::{BestRecord, Individual, MAX_GENERATIONS, Outcome, POPULATION_SIZE};

/// An individual together with its fitness and selection probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredIndividual {
    pub individual: Individual,
    pub fitness: f64,
    pub probability: f64,
}

/// Summary of fitness values across one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl FitnessStats {
    #[must_use]
    pub fn new(fitness: &[f64; POPULATION_SIZE]) -> Self {
        let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        #[expect(clippy::cast_precision_loss)]
        let mean = fitness.iter().sum::<f64>() / POPULATION_SIZE as f64;
        Self { min, max, mean }
    }
}

/// Everything observed while evaluating one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// 1-based generation index.
    pub generation: usize,
    pub individuals: [ScoredIndividual; POPULATION_SIZE],
    /// Lowest fitness in this generation (first occurrence wins ties).
    pub best: ScoredIndividual,
    /// Best individual seen so far, this generation included.
    pub global_best: BestRecord,
    pub stats: FitnessStats,
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generation {}:", self.generation)?;
        for scored in &self.individuals {
            writeln!(
                f,
                "  Chromosome: {} -> Fitness: {} -> Probability: {:.6}",
                scored.individual, scored.fitness, scored.probability
            )?;
        }
        writeln!(
            f,
            "  Fitness: min {}, mean {:.2}, max {}",
            self.stats.min, self.stats.mean, self.stats.max
        )?;
        write!(
            f,
            "Best individual of generation {}: {} with fitness {}",
            self.generation, self.best.individual, self.best.fitness
        )
    }
}

impl fmt::Display for BestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.individual.decode();
        write!(
            f,
            "{} (x = {x}, y = {y}) with fitness {}",
            self.individual, self.fitness
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found(record) => write!(
                f,
                "Global minimum found in generation {}: {record}",
                record.generation
            ),
            Outcome::NotFound(record) => {
                writeln!(
                    f,
                    "Global minimum not found in {MAX_GENERATIONS} generations."
                )?;
                write!(
                    f,
                    "Best individual overall was found in generation {}: {record}",
                    record.generation
                )
            }
        }
    }
}
