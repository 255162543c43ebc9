use super::*;
use crate::helpers::problem::*;
use crate::helpers::utils::create_test_environment;
use crate::termination::{ExternalStop, MaxEpochs, StopRequest};
use crate::utils::Float;

fn create_monitor(conditions: Vec<Box<dyn StopCondition>>, is_minimization: bool) -> RunMonitor<TestSolution> {
    RunMonitor::new(
        CompositeStop::new(conditions),
        create_test_environment(),
        Telemetry::new(TelemetryMode::None),
        is_minimization,
    )
}

#[test]
fn can_report_budget_as_stop_reason() {
    let problem = create_test_problem_with_limit(2);
    let mut monitor = create_monitor(vec![Box::new(MaxEpochs::new(10))], true);
    let mut population = create_population(&[1., 2., 3.]);
    problem.cost_all(population.as_mut_slice()).unwrap();

    assert!(!monitor.is_running(&problem));
    assert_eq!(monitor.stopped_by(), Some(&StopReason::Budget));
}

#[test]
fn can_keep_stop_reason_once_stopped() {
    let problem = create_test_problem(true);
    let mut monitor = create_monitor(vec![Box::new(MaxEpochs::new(1))], true);

    monitor.on_epoch(&problem, &create_evaluated_population(&[1.]));
    assert!(!monitor.is_running(&problem));
    monitor.complete();

    assert_eq!(monitor.stopped_by(), Some(&StopReason::Condition("max-epochs".to_string())));
}

parameterized_test! {can_track_best_solution, (is_minimization, epochs, expected_best, expected_improvement_epoch), {
    can_track_best_solution_impl(is_minimization, epochs, expected_best, expected_improvement_epoch);
}}

can_track_best_solution! {
    case_01_min: (true, vec![vec![5., 3.], vec![4., 2.], vec![6., 7.]], 2., 2),
    case_02_max: (false, vec![vec![5., 3.], vec![4., 2.], vec![6., 7.]], 7., 3),
    case_03_tie_is_not_improvement: (true, vec![vec![1.], vec![1.]], 1., 1),
}

fn can_track_best_solution_impl(
    is_minimization: bool,
    epochs: Vec<Vec<Float>>,
    expected_best: Float,
    expected_improvement_epoch: usize,
) {
    let problem = create_test_problem(is_minimization);
    let mut monitor = create_monitor(vec![], is_minimization);

    epochs.iter().for_each(|values| monitor.on_epoch(&problem, &create_evaluated_population(values)));

    assert_eq!(monitor.best().map(|best| best.score()), Some(expected_best));
    assert_eq!(monitor.statistics().best_score, Some(expected_best));
    assert_eq!(monitor.statistics().last_improvement_epoch, expected_improvement_epoch);
    assert_eq!(monitor.statistics().epoch, epochs.len());
}

#[test]
fn can_ignore_unevaluated_members_when_tracking_best() {
    let problem = create_test_problem(true);
    let mut monitor = create_monitor(vec![], true);

    monitor.on_initial(&problem, &[TestSolution::new(-100.), TestSolution::evaluated(5.)]);

    assert_eq!(monitor.best().map(|best| best.score()), Some(5.));
    assert_eq!(monitor.statistics().epoch, 0);
}

#[test]
fn can_acknowledge_external_request_on_finish() {
    let problem = create_test_problem(true);
    let request = StopRequest::new();
    let monitor = create_monitor(vec![Box::new(ExternalStop::new(request.clone()))], true);

    let (outcome, termination) = monitor.finish(&problem);

    assert!(request.is_finished());
    assert_eq!(outcome.stopped_by, StopReason::Completed);
    assert_eq!(termination.len(), 1);
}

#[test]
fn can_acknowledge_external_request_on_drop() {
    let request = StopRequest::new();
    let monitor = create_monitor(vec![Box::new(ExternalStop::new(request.clone()))], true);

    drop(monitor);

    assert!(request.is_finished());
}

#[test]
fn can_render_stop_reason() {
    assert_eq!(StopReason::Budget.to_string(), "budget");
    assert_eq!(StopReason::Completed.to_string(), "completed");
    assert_eq!(StopReason::Condition("max-time".to_string()).to_string(), "max-time");
}
