use super::*;
use crate::helpers::problem::*;

fn create_step(config: GeneticConfig) -> GeneticStep<TestObjective> {
    GeneticStep::new(config, Arc::new(TestOperators))
}

parameterized_test! {can_validate_configuration, (config, expected_field), {
    can_validate_configuration_impl(config, expected_field);
}}

can_validate_configuration! {
    case_01_default: (GeneticConfig::default(), None),
    case_02_mutation: (GeneticConfig::default().with_mutation_rate(1.5), Some("mutation")),
    case_03_crossover: (GeneticConfig::default().with_crossover_rate(-0.1), Some("crossover")),
    case_04_elitism: (GeneticConfig::default().with_population_size(5).with_elitism(5), Some("elitism")),
    case_05_population: (GeneticConfig::default().with_population_size(0), Some("population_size")),
    case_06_tournament: (GeneticConfig::default().with_selection(Selection::Tournament { size: 0 }), Some("tournament_size")),
    case_07_roulette: (GeneticConfig::default().with_selection(Selection::Roulette), None),
}

fn can_validate_configuration_impl(config: GeneticConfig, expected_field: Option<&str>) {
    let step = create_step(config);

    let result = step.validate_configuration();

    match (result, expected_field) {
        (Ok(()), None) => {}
        (Err(EngineError::Configuration { field, .. }), Some(expected)) => assert_eq!(field, expected),
        (result, expected) => panic!("unexpected result {result:?} for {expected:?}"),
    }
}

#[test]
fn can_validate_configuration_idempotently() {
    let step = create_step(GeneticConfig::default().with_mutation_rate(1.5));

    let first = step.validate_configuration();
    let second = step.validate_configuration();

    assert_eq!(first, second);
    assert_eq!(
        first.map_err(|err| err.to_string()),
        Err("invalid configuration: 'mutation' = 1.5, expected value in [0, 1] range".to_string())
    );
}

parameterized_test! {can_preserve_elites, (new_values, expected_scores), {
    can_preserve_elites_impl(new_values, expected_scores);
}}

can_preserve_elites! {
    case_01_worse_offspring: (
        vec![20., 21., 22., 23., 24., 25., 26., 27., 28., 29.],
        vec![1., 2., 3., 20., 21., 22., 23., 24., 25., 26.]
    ),
    case_02_elite_already_present: (
        vec![2., 21., 22., 23., 24., 25., 26., 27., 28., 29.],
        vec![1., 2., 3., 21., 22., 23., 24., 25., 26., 27.]
    ),
    case_03_better_offspring: (
        vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.95],
        vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.95]
    ),
    case_04_mixed_offspring: (
        vec![0.5, 2.5, 21., 22., 23., 24., 25., 26., 27., 28.],
        vec![0.5, 1., 2., 2.5, 3., 21., 22., 23., 24., 25.]
    ),
}

fn can_preserve_elites_impl(new_values: Vec<Float>, expected_scores: Vec<Float>) {
    let problem = create_test_problem(true);
    let old = create_evaluated_population(&[5., 3., 1., 4., 2., 6., 7., 8., 9., 10.]);
    let mut new = create_evaluated_population(new_values.as_slice());
    let mut step = create_step(GeneticConfig::default().with_population_size(10).with_elitism(3));
    let random = DefaultRandom::new_repeatable(0);

    step.post_evaluate(&problem, &old, &mut new, &random).unwrap();

    assert_eq!(new.len(), 10);
    assert_eq!(new.iter().map(|solution| solution.score()).collect::<Vec<_>>(), expected_scores);
}

#[test]
fn can_produce_population_of_configured_size() {
    let problem = create_test_problem(true);
    let random = DefaultRandom::new_repeatable(0);
    let mut step = create_step(GeneticConfig::default().with_population_size(7).with_selection(Selection::Roulette));

    let mut initial = step.initialise(&problem, &random).unwrap();
    problem.cost_all(initial.as_mut_slice()).unwrap();
    let offspring = step.step_epoch(&problem, &initial, &random).unwrap();

    assert_eq!(initial.len(), 7);
    assert_eq!(offspring.len(), 7);
}

#[test]
fn can_keep_clone_of_unchanged_parent_evaluated() {
    let problem = create_test_problem(true);
    let random = DefaultRandom::new_repeatable(0);
    let mut step =
        create_step(GeneticConfig::default().with_population_size(4).with_crossover_rate(0.).with_mutation_rate(0.));
    let population = create_evaluated_population(&[1., 2., 3., 4.]);

    let offspring = step.step_epoch(&problem, &population, &random).unwrap();

    assert!(offspring.iter().all(|solution| solution.is_evaluated()));
}

#[test]
fn can_reset_evaluation_of_mutated_child() {
    let problem = create_test_problem(true);
    let random = DefaultRandom::new_repeatable(0);
    let mut step =
        create_step(GeneticConfig::default().with_population_size(4).with_crossover_rate(0.).with_mutation_rate(1.));
    let population = create_evaluated_population(&[1., 2., 3., 4.]);

    let offspring = step.step_epoch(&problem, &population, &random).unwrap();

    assert!(offspring.iter().all(|solution| !solution.is_evaluated()));
}

parameterized_test! {can_pick_roulette_index, (weights, expected), {
    let random = DefaultRandom::new_repeatable(0);
    assert!((0..100).all(|_| roulette_index(weights.as_slice(), &random) == expected));
}}

can_pick_roulette_index! {
    case_01_single_weight: (vec![0., 1., 0.], 1),
    case_02_last_weight: (vec![0., 0., 2.], 2),
}

#[test]
fn can_pick_uniformly_when_all_weights_are_zero() {
    let random = DefaultRandom::new_repeatable(0);

    let indices = (0..100).map(|_| roulette_index(&[0., 0., 0.], &random)).collect::<Vec<_>>();

    assert!(indices.iter().all(|&index| index < 3));
}
