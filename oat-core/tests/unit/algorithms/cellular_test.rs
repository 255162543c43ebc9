use super::*;
use crate::helpers::problem::*;

parameterized_test! {can_repair_population_size_to_perfect_square, (population_size, expected_side), {
    let config = CellularConfig::new(population_size);

    assert_eq!(config.side(), expected_side);
    assert_eq!(config.population_size(), expected_side * expected_side);
}}

can_repair_population_size_to_perfect_square! {
    case_01_square: (16, 4),
    case_02_not_square: (10, 4),
    case_03_next_square: (17, 5),
    case_04_one: (1, 1),
    case_05_zero: (0, 0),
}

parameterized_test! {can_validate_configuration, (config, expected_field), {
    let result = CellularStep::new(config, Arc::new(TestOperators)).validate_configuration();

    match (result, expected_field) {
        (Ok(()), None) => {}
        (Err(EngineError::Configuration { field, .. }), Some(expected)) => assert_eq!(field, expected),
        (result, expected) => panic!("unexpected result {result:?} for {expected:?}"),
    }
}}

can_validate_configuration! {
    case_01_valid: (CellularConfig::new(9), None::<&str>),
    case_02_too_small: (CellularConfig::new(1), Some("population_size")),
    case_03_mutation: (CellularConfig::new(9).with_mutation_rate(1.5), Some("mutation")),
    case_04_crossover: (CellularConfig::new(9).with_crossover_rate(2.), Some("crossover")),
}

parameterized_test! {can_get_toroidal_neighbours, (cell, side, expected), {
    assert_eq!(von_neumann_neighbours(cell, side), expected);
}}

can_get_toroidal_neighbours! {
    case_01_center: (4, 3, [1, 7, 3, 5]),
    case_02_corner: (0, 3, [6, 3, 2, 1]),
    case_03_last: (8, 3, [5, 2, 7, 6]),
}

#[test]
fn can_initialise_full_lattice() {
    let problem = create_test_problem(true);
    let random = DefaultRandom::new_repeatable(0);
    let mut step = CellularStep::new(CellularConfig::new(10), Arc::new(TestOperators));

    let population = step.initialise(&problem, &random).unwrap();

    assert_eq!(population.len(), 16);
}

#[test]
fn can_reject_population_of_wrong_shape() {
    let problem = create_test_problem(true);
    let random = DefaultRandom::new_repeatable(0);
    let mut step = CellularStep::new(CellularConfig::new(9), Arc::new(TestOperators));

    let result = step.step_epoch(&problem, &create_evaluated_population(&[1., 2.]), &random);

    assert!(matches!(result, Err(EngineError::RunFatal(_))));
}

#[test]
fn can_replace_cell_only_with_better_child() {
    let problem = create_test_problem(true);
    let random = DefaultRandom::new_repeatable(0);
    let mut step = CellularStep::new(CellularConfig::new(4), Arc::new(TestOperators));
    let old = create_evaluated_population(&[5., 5., 5., 5.]);
    let mut new = create_evaluated_population(&[1., 9., 5., 4.]);

    step.post_evaluate(&problem, &old, &mut new, &random).unwrap();

    assert_eq!(new.iter().map(|solution| solution.score()).collect::<Vec<_>>(), vec![1., 5., 5., 4.]);
}
