use valiter_model::{Model, ModelBuilder, parse_str};

use crate::{Objective, extract_policy};

fn with_values(model: &mut Model, values: &[(&str, f64)]) {
    for (name, value) in values {
        let key = model.key_of(name).expect("state exists");
        model.state_mut(key).expect("state exists").set_value(*value);
    }
}

fn greedy_model() -> Model {
    let mut builder = ModelBuilder::new();
    builder.edges("S", ["A", "B", "C"]).expect("edges");
    builder.build()
}

#[test]
fn policy_points_at_highest_valued_successor() {
    let mut model = greedy_model();
    with_values(&mut model, &[("A", 1.0), ("B", 5.0), ("C", 3.0)]);

    let policy = extract_policy(&model, Objective::Maximize);
    let s = model.key_of("S").unwrap();

    assert_eq!(policy.action(s), model.key_of("B"));
}

#[test]
fn minimize_points_at_lowest_valued_successor() {
    let mut model = greedy_model();
    with_values(&mut model, &[("A", 1.0), ("B", 5.0), ("C", 3.0)]);

    let policy = extract_policy(&model, Objective::Minimize);
    assert_eq!(policy.action(model.key_of("S").unwrap()), model.key_of("A"));
}

#[test]
fn ties_go_to_first_declared_edge() {
    let mut model = greedy_model();
    with_values(&mut model, &[("A", 2.0), ("B", 4.0), ("C", 4.0)]);

    let policy = extract_policy(&model, Objective::Maximize);
    assert_eq!(policy.action(model.key_of("S").unwrap()), model.key_of("B"));
}

#[test]
fn policy_ignores_probabilities_and_uses_successor_value_only() {
    // The 0.9 edge leads to the lower value; greedy extraction still picks the higher.
    let mut model = parse_str("S : [Low, High]\nS % 0.9\nLow = 1\nHigh = 2\n").expect("model");
    for key in model.keys().collect::<Vec<_>>() {
        let reward = model.state(key).unwrap().reward();
        model.state_mut(key).unwrap().set_value(reward);
    }

    let policy = extract_policy(&model, Objective::Maximize);
    assert_eq!(policy.action(model.key_of("S").unwrap()), model.key_of("High"));
}

#[test]
fn terminal_states_have_no_entry() {
    let model = greedy_model();
    let policy = extract_policy(&model, Objective::Maximize);

    assert_eq!(policy.len(), 1);
    for name in ["A", "B", "C"] {
        assert!(!policy.contains(model.key_of(name).unwrap()));
    }
}

#[test]
fn nan_successors_leave_entry_unset() {
    let mut model = greedy_model();
    with_values(&mut model, &[("A", f64::NAN), ("B", f64::NAN), ("C", f64::NAN)]);

    let policy = extract_policy(&model, Objective::Maximize);
    let s = model.key_of("S").unwrap();

    assert!(policy.contains(s));
    assert_eq!(policy.action(s), None);
}
