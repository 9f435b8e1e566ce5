use proptest::prelude::*;
use valiter_model::{Model, ModelBuilder};

use crate::{Backup, SolverConfig, solve, solve_with_hook};

/// Chain-shaped model: every `N{i}` has edges to a few later states and to
/// one of the terminals, so the graph always has terminals to pin.
fn random_model(rewards: &[f64], fanout: usize, success: f64) -> Model {
    let mut builder = ModelBuilder::new();
    let n = rewards.len();
    for (i, reward) in rewards.iter().enumerate() {
        builder.reward(format!("N{i}"), *reward).unwrap();
    }
    builder.reward("T_good", 10.0).unwrap();
    builder.reward("T_bad", -10.0).unwrap();

    for i in 0..n {
        let mut targets: Vec<String> = ((i + 1)..n.min(i + 1 + fanout))
            .map(|j| format!("N{j}"))
            .collect();
        let terminal = if i % 2 == 0 { "T_good" } else { "T_bad" };
        targets.push(terminal.to_string());
        builder.edges(format!("N{i}"), &targets).unwrap();
        builder.decision(format!("N{i}"), success).unwrap();
    }
    builder.build()
}

proptest! {
    #[test]
    fn terminal_values_equal_declared_rewards(
        rewards in proptest::collection::vec(-20.0f64..20.0, 1..12),
        fanout in 1usize..4,
        success in 0.0f64..=1.0,
        iterations in 1usize..30,
        expected in any::<bool>(),
    ) {
        let mut model = random_model(&rewards, fanout, success);
        let config = SolverConfig {
            max_iterations: iterations,
            backup: if expected { Backup::Expected } else { Backup::EdgeMax },
            ..SolverConfig::default()
        };
        solve(&mut model, &config);

        for (_, state) in model.iter().filter(|(_, s)| s.is_terminal()) {
            prop_assert_eq!(state.value(), state.reward());
        }
    }

    #[test]
    fn sweeps_never_exceed_the_cap(
        rewards in proptest::collection::vec(-20.0f64..20.0, 1..12),
        fanout in 1usize..4,
        success in 0.0f64..=1.0,
        iterations in 1usize..50,
        discount in 0.0f64..1.5,
    ) {
        let mut model = random_model(&rewards, fanout, success);
        let config = SolverConfig {
            max_iterations: iterations,
            discount_factor: discount,
            ..SolverConfig::default()
        };

        let mut count = 0;
        let outcome = solve_with_hook(&mut model, &config, |_| count += 1);

        prop_assert!(outcome.sweeps <= iterations);
        prop_assert_eq!(outcome.sweeps, count);
        prop_assert!(outcome.converged || outcome.sweeps == iterations);
    }

    #[test]
    fn declared_rewards_survive_solving(
        rewards in proptest::collection::vec(-20.0f64..20.0, 1..12),
        fanout in 1usize..4,
    ) {
        let mut model = random_model(&rewards, fanout, 0.7);
        solve(&mut model, &SolverConfig::default());

        for (i, reward) in rewards.iter().enumerate() {
            prop_assert_eq!(model.get(&format!("N{i}")).unwrap().reward(), *reward);
        }
    }
}
