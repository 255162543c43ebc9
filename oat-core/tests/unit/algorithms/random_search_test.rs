use super::*;
use crate::engine::StopReason;
use crate::execution::AlgorithmExecutor;
use crate::helpers::problem::*;
use crate::helpers::utils::create_test_environment;
use crate::termination::{MaxEpochs, MaxEvaluations};

fn create_executor(search: RandomSearch<TestObjective>) -> AlgorithmExecutor<TestObjective> {
    AlgorithmExecutor::new(create_test_problem(true), Box::new(search)).with_environment(create_test_environment())
}

#[test]
fn can_complete_after_max_samples() {
    let mut executor = create_executor(RandomSearch::new(4, Arc::new(TestOperators)).with_max_samples(10))
        .with_stop_condition(Box::new(MaxEpochs::new(100)));

    let report = executor.execute().unwrap();

    assert_eq!(report.outcome.stopped_by, StopReason::Completed);
    assert_eq!(report.outcome.statistics.evaluations, 10);
    assert_eq!(report.outcome.statistics.epoch, 3);
}

#[test]
fn can_stop_by_budget() {
    let mut executor = create_executor(RandomSearch::new(4, Arc::new(TestOperators)))
        .with_stop_condition(Box::new(MaxEvaluations::new(10)));

    let report = executor.execute().unwrap();

    assert_eq!(report.outcome.stopped_by, StopReason::Budget);
    assert_eq!(report.outcome.statistics.evaluations, 10);
    assert!(report.outcome.best.is_some());
}

parameterized_test! {can_validate_configuration, (batch_size, max_samples, expected_field), {
    let mut search = RandomSearch::<TestObjective>::new(batch_size, Arc::new(TestOperators));
    if let Some(max_samples) = max_samples {
        search = search.with_max_samples(max_samples);
    }

    match (search.validate_configuration(), expected_field) {
        (Ok(()), None) => {}
        (Err(EngineError::Configuration { field, .. }), Some(expected)) => assert_eq!(field, expected),
        (result, expected) => panic!("unexpected result {result:?} for {expected:?}"),
    }
}}

can_validate_configuration! {
    case_01_valid: (1, None, None::<&str>),
    case_02_batch: (0, None, Some("batch_size")),
    case_03_samples: (1, Some(0), Some("max_samples")),
}
