//! valiter
//!
//! Loads a text MDP definition, runs value iteration and prints the policy
//! and state values.

mod cli;

use std::{io, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use valiter_core::{
    ModelDump, SolveReport, extract_policy, format_policy, format_values, solve_with_hook,
};
use valiter_model::{Model, ModelError, PROB_TOLERANCE, load_path, parse_reader};

use crate::cli::Cli;

fn load_model(input: &Path) -> Result<Model, ModelError> {
    if input == Path::new("-") {
        parse_reader(io::stdin().lock())
    } else {
        load_path(input)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.solver_config().context("invalid solver configuration")?;
    info!(
        tolerance = config.tolerance,
        max_iterations = config.max_iterations,
        discount_factor = config.discount_factor,
        objective = ?config.objective,
        backup = ?config.backup,
        input = %cli.input.display(),
        "starting solve"
    );

    let mut model = load_model(&cli.input)
        .with_context(|| format!("failed to load model from {}", cli.input.display()))?;

    if !cli.json {
        print!("{}", ModelDump(&model));
    }
    for mismatch in model.check_distributions(PROB_TOLERANCE) {
        warn!(
            state = %mismatch.name,
            sum = mismatch.sum,
            "outgoing probabilities do not sum to 1"
        );
    }

    let print_sweeps = cli.trace && !cli.json;
    let outcome = solve_with_hook(&mut model, &config, |metrics| {
        if print_sweeps {
            println!("{metrics}");
        }
    });
    if !outcome.converged {
        warn!(
            sweeps = outcome.sweeps,
            max_delta = outcome.max_delta,
            "value iteration did not converge within max_iterations"
        );
    }

    let policy = extract_policy(&model, config.objective);

    if cli.json {
        let report = SolveReport::new(&model, &config, outcome, &policy);
        println!("{}", report.to_json_pretty()?);
    } else {
        println!("{}", format_policy(&model, &policy));
        println!();
        println!("{}", format_values(&model));
    }

    Ok(())
}
