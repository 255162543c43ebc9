use super::*;
use crate::helpers::utils::create_test_environment;
use std::io::Write;

const INSTANCE: &str = r#"NAME : square4
COMMENT : four cities on a rectangle
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 0 3.5
3 4 3.5
4 4 0
EOF
"#;

fn create_objective() -> TspObjective {
    TspObjective::new("rectangle", TspSource::Coordinates(vec![(0., 0.), (0., 3.), (4., 3.), (4., 0.)]))
}

#[test]
fn can_read_tsplib_instance() {
    let instance = read_tsplib(BufReader::new(INSTANCE.as_bytes())).unwrap();

    assert_eq!(instance.name, Some("square4".to_string()));
    assert_eq!(instance.coordinates, vec![(0., 0.), (0., 3.5), (4., 3.5), (4., 0.)]);
}

parameterized_test! {can_reject_unsupported_instance, (content, expected), {
    let result = read_tsplib(BufReader::new(content.as_bytes()));

    assert!(result.err().is_some_and(|err| err.to_string().contains(expected)));
}}

can_reject_unsupported_instance! {
    case_01_type: ("TYPE : ATSP\nDIMENSION : 1\nNODE_COORD_SECTION\n1 0 0\n", "TYPE"),
    case_02_edge_type: ("TYPE : TSP\nEDGE_WEIGHT_TYPE : GEO\nNODE_COORD_SECTION\n", "EDGE_WEIGHT_TYPE"),
    case_03_no_dimension: ("TYPE : TSP\nNODE_COORD_SECTION\n", "DIMENSION"),
    case_04_short_section: ("DIMENSION : 2\nNODE_COORD_SECTION\n1 0 0\n", "unexpected end"),
    case_05_bad_coord: ("DIMENSION : 1\nNODE_COORD_SECTION\n1 a 0\n", "cannot parse x"),
    case_06_no_section: ("TYPE : TSP\n", "NODE_COORD_SECTION"),
}

#[test]
fn can_calculate_closed_tour_length() {
    let mut objective = create_objective();
    objective.initialise_before_run().unwrap();

    assert_eq!(objective.fitness(&Tour::new(vec![0, 1, 2, 3])), 14.);
    assert_eq!(objective.fitness(&Tour::new(vec![0, 2, 1, 3])), 18.);
}

parameterized_test! {can_check_tour_safety, (cities, is_safe), {
    let mut objective = create_objective();
    objective.initialise_before_run().unwrap();

    assert_eq!(objective.check_safety(&Tour::new(cities)).is_ok(), is_safe);
}}

can_check_tour_safety! {
    case_01_permutation: (vec![3, 1, 0, 2], true),
    case_02_duplicate: (vec![0, 1, 1, 2], false),
    case_03_short: (vec![0, 1, 2], false),
    case_04_unknown_city: (vec![0, 1, 2, 7], false),
}

#[test]
fn can_load_instance_from_file_and_release_it() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(INSTANCE.as_bytes()).unwrap();
    let mut objective = TspObjective::new("file", TspSource::File(file.path().to_path_buf()));

    assert_eq!(objective.size(), 0);
    objective.initialise_before_run().unwrap();
    assert_eq!(objective.size(), 4);
    assert!(objective.has_distance_matrix());
    assert_eq!(objective.fitness(&Tour::new(vec![0, 1, 2, 3])), 15.);

    objective.cleanup_after_run();
    assert_eq!(objective.size(), 0);
    assert!(!objective.has_distance_matrix());
}

#[test]
fn can_fail_initialisation_for_missing_file() {
    let mut objective = TspObjective::new("missing", TspSource::File("/definitely/missing.tsp".into()));

    let result = objective.initialise_before_run();

    assert!(result.err().is_some_and(|err| err.to_string().contains("cannot open")));
}

#[test]
fn can_round_distances() {
    let mut objective =
        TspObjective::new("round", TspSource::Coordinates(vec![(0., 0.), (1., 1.), (2., 0.)])).with_rounding(true);
    objective.initialise_before_run().unwrap();

    assert_eq!(objective.distance(0, 1), 1.);
    assert_eq!(objective.distance(0, 2), 2.);
}

#[test]
fn can_keep_operators_producing_permutations() {
    let mut problem = Problem::new(create_objective());
    problem.initialise_before_run().unwrap();
    let random = create_test_environment().random.clone();
    let operators = TourOperators;

    (0..20).for_each(|_| {
        let first = operators.create(&problem, random.as_ref());
        let second = operators.create(&problem, random.as_ref());
        let mut child = operators.crossover(&problem, &first, &second, random.as_ref());
        operators.mutate(&problem, &mut child, random.as_ref());

        assert!(problem.objective().check_safety(&child).is_ok());
    });
}
