use crate::config::read_config;
use crate::experiment::{ExperimentOptions, run_experiment};
use crate::helpers::config::*;
use std::fs::File;
use std::io::BufReader;

#[test]
fn can_run_experiment_using_full_config() {
    let file = File::open(FULL_CONFIG_PATH).expect("cannot open config");
    let config = read_config(BufReader::new(file)).unwrap();
    let (logger, messages) = create_collecting_logger();

    let report = run_experiment(&config, ExperimentOptions { seed: 42, logger }, |_| Ok(())).unwrap();

    assert_eq!(report.problem, "rastrigin-4d");
    assert!(report.evaluations <= 2000);
    assert!(report.epochs <= 500);
    let metrics = report.metrics.as_ref().expect("no metrics");
    assert_eq!(metrics.epochs, report.epochs);
    assert!(!metrics.evolution.is_empty());
    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|msg| msg.contains("running 'genetic' on 'rastrigin-4d'")));
}

parameterized_test! {can_improve_sphere_with_every_algorithm, (algorithm, expected_algorithm), {
    let config = create_sphere_config(algorithm, 2000);

    let report = run_experiment(&config, create_silent_options(1), |_| Ok(())).unwrap();

    assert_eq!(report.algorithm, expected_algorithm);
    assert!(report.evaluations <= 2000);
    // sphere on [-5.12, 5.12]^3 has worst value close to 78.6
    assert!(report.best_score.is_some_and(|score| score < 10.), "best score: {:?}", report.best_score);
}}

can_improve_sphere_with_every_algorithm! {
    case_01_genetic: (r#"{ "type": "genetic", "populationSize": 20 }"#, "genetic"),
    case_02_roulette: (r#"{ "type": "genetic", "populationSize": 20, "selection": { "type": "roulette" } }"#, "genetic"),
    case_03_cellular: (r#"{ "type": "cellular", "populationSize": 16 }"#, "cellular"),
    case_04_random_search: (r#"{ "type": "random-search", "batchSize": 20 }"#, "random-search"),
}

#[test]
fn can_complete_random_search_with_max_samples() {
    let config = create_sphere_config(r#"{ "type": "random-search", "batchSize": 8, "maxSamples": 20 }"#, 100);

    let report = run_experiment(&config, create_silent_options(3), |_| Ok(())).unwrap();

    assert_eq!(report.stopped_by, "completed");
    assert_eq!(report.evaluations, 20);
    assert_eq!(report.epochs, 3);
}
