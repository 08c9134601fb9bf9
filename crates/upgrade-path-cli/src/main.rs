// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod logging;
mod record;
mod report;

use chrono::Utc;
use clap::Parser;
use record::RunRecord;
use report::Report;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use upgrade_path_model::prelude::*;
use upgrade_path_solver::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Searches for a high-scoring upgrade order", long_about = None)]
struct Args {
    /// Path to the JSON configuration
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Fixed RNG seed; overrides `seed` from the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Stall limit of the optimiser; overrides `maxOptimizationIterations`
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Only report the configured path
    #[arg(long)]
    no_optimize: bool,

    /// Write a JSON run record to this file
    #[arg(long)]
    results: Option<PathBuf>,

    /// Print the step-by-step readout of the final path
    #[arg(long)]
    trace: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(n) = self.max_iterations {
            settings.max_optimization_iterations = n;
        }
        if self.no_optimize {
            settings.run_optimization = false;
        }
    }
}

fn load_settings(path: &Path) -> Settings {
    match SettingsLoader::new().from_path(path) {
        Ok(s) => s,
        Err(e) if e.is_not_found() => {
            tracing::warn!(path = %path.display(), "configuration not found; using defaults");
            Settings::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read configuration; using defaults");
            Settings::default()
        }
    }
}

/// The configured path reconciled with the current levels, or a random one
/// when nothing is configured.
fn starting_path<R: rand::Rng>(settings: &Settings, rng: &mut R) -> UpgradePath {
    let path = if settings.is_full_path {
        settings.upgrade_path.strip_completed(&settings.current_levels)
    } else {
        settings.upgrade_path.clone()
    };
    if !path.is_empty() {
        return path;
    }

    let len = settings.total_seconds() / 3_600;
    tracing::info!(len, "no upgrade path configured; generating a random one");
    UpgradePath::random(len, settings.allow_speed_upgrades, rng)
}

fn pause() {
    println!("Press Enter to exit...");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut settings = tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
        load_settings(&args.config)
    });
    args.apply(&mut settings);
    logging::init(&settings);

    tracing::info!("{}", settings.resource_names.mapping());

    let started_at = Utc::now();
    let mut rng = seeded_rng(settings.seed);
    let evaluator = PathEvaluator::from_settings(&settings);
    let path = starting_path(&settings, &mut rng);

    let initial_score = evaluator.evaluate(&path);
    Report::new(
        "Initial",
        &settings,
        &path,
        &evaluator.run(&path, None),
        initial_score,
    )
    .log();

    let (path, outcome) = if settings.run_optimization {
        let mut state = SearchState::new(path, initial_score, rng);
        let mut observer =
            ThrottledObserver::from_millis(TracingObserver, settings.output_interval_ms);
        let outcome = LocalSearchOptimizer::new(&evaluator)
            .with_allow_speed(settings.allow_speed_upgrades)
            .with_max_stall(settings.max_optimization_iterations as u64)
            .run(&mut state, &mut observer);
        (state.into_path(), Some(outcome))
    } else {
        (path, None)
    };

    let mut trace = SimulationTrace::new();
    let last = evaluator.run(&path, args.trace.then_some(&mut trace));
    let final_score = evaluator.evaluate(&path);
    Report::new("Final", &settings, &path, &last, final_score).log();

    if args.trace {
        for line in trace.readout(&settings.resource_names) {
            tracing::info!("{line}");
        }
    }

    let mut code = ExitCode::SUCCESS;
    if let Some(out) = &args.results {
        let record = RunRecord::new(
            started_at,
            Utc::now(),
            settings.seed,
            initial_score,
            final_score,
            path,
            outcome.as_ref(),
        );
        match record.write(out) {
            Ok(()) => tracing::info!(path = %out.display(), "run record written"),
            Err(e) => {
                tracing::error!(error = %e, "failed to write run record");
                code = ExitCode::FAILURE;
            }
        }
    }

    if settings.pause_on_exit {
        pause();
    }
    code
}
