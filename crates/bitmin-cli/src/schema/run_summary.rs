use bitmin_engine::{BestRecord, Outcome, RunSeed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunSummary {
    pub seed: RunSeed,
    pub run_at: DateTime<Utc>,
    pub generations: usize,
    pub optimum_found: bool,
    pub best: BestIndividual,
    /// Best fitness of each generation, in order.
    pub best_fitness_history: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BestIndividual {
    pub chromosome: String,
    pub x: u32,
    pub y: u32,
    pub fitness: f64,
    pub generation: usize,
}

impl RunSummary {
    pub(crate) fn new(
        seed: RunSeed,
        run_at: DateTime<Utc>,
        outcome: &Outcome,
        best_fitness_history: Vec<f64>,
    ) -> Self {
        Self {
            seed,
            run_at,
            generations: best_fitness_history.len(),
            optimum_found: outcome.is_found(),
            best: BestIndividual::from(outcome.record()),
            best_fitness_history,
        }
    }
}

impl From<&BestRecord> for BestIndividual {
    fn from(record: &BestRecord) -> Self {
        let (x, y) = record.individual.decode();
        Self {
            chromosome: record.individual.to_string(),
            x,
            y,
            fitness: record.fitness,
            generation: record.generation,
        }
    }
}
