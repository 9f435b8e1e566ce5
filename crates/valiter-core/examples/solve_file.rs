use std::path::PathBuf;

use valiter_core::{Backup, SolverConfig, extract_policy, format_policy, format_values, solve};
use valiter_model::load_path;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("models/robot.mdp"));

    let mut model = load_path(&path).expect("failed to load model");

    for backup in [Backup::EdgeMax, Backup::Expected] {
        let config = SolverConfig {
            backup,
            discount_factor: 0.9,
            ..SolverConfig::default()
        };
        let outcome = solve(&mut model, &config);
        let policy = extract_policy(&model, config.objective);

        println!(
            "backup={:?} sweeps={} converged={}",
            backup, outcome.sweeps, outcome.converged
        );
        println!("{}", format_policy(&model, &policy));
        println!("{}", format_values(&model));
    }
}
