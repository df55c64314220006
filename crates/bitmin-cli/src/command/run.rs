use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use bitmin_engine::{Evolution, RunSeed};
use chrono::Utc;
use rand::Rng as _;

use crate::{schema::run_summary::RunSummary, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    /// 128-bit seed as 32 hex digits (random if omitted)
    #[arg(long)]
    pub(crate) seed: Option<RunSeed>,
    /// Write a JSON summary of the run to this path
    #[arg(long)]
    pub(crate) summary: Option<PathBuf>,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg { seed, summary } = arg;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(%seed, "starting evolution");

    let mut out = io::stdout().lock();
    writeln!(out, "Seed: {seed}")?;

    let mut evolution = Evolution::with_seed(seed);
    let mut best_fitness_history = vec![];
    while let Some(report) = evolution.step()? {
        writeln!(out, "{report}")?;
        best_fitness_history.push(report.best.fitness);
    }
    let outcome = *evolution
        .outcome()
        .context("evolution stopped without an outcome")?;
    writeln!(out, "{outcome}")?;
    out.flush()?;

    if let Some(path) = summary {
        let summary = RunSummary::new(seed, Utc::now(), &outcome, best_fitness_history);
        util::save_json(&summary, path)?;
        eprintln!("Summary saved to {}", path.display());
    }

    Ok(())
}
