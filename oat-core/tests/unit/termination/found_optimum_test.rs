use super::*;

parameterized_test! {can_detect_termination, (best_score, is_minimization, target, tolerance, expected), {
    can_detect_termination_impl(best_score, is_minimization, target, tolerance, expected);
}}

can_detect_termination! {
    case_01_min_reached: (Some(0.), true, 0., 0., true),
    case_02_min_within_tolerance: (Some(0.05), true, 0., 0.1, true),
    case_03_min_not_reached: (Some(0.5), true, 0., 0.1, false),
    case_04_max_reached: (Some(10.), false, 10., 0., true),
    case_05_max_not_reached: (Some(9.), false, 10., 0.5, false),
    case_06_no_best: (None, true, 0., 1., false),
}

fn can_detect_termination_impl(
    best_score: Option<Float>,
    is_minimization: bool,
    target: Float,
    tolerance: Float,
    expected: bool,
) {
    let mut statistics = RunStatistics::new(is_minimization);
    statistics.best_score = best_score;

    let result = FoundOptimum::new(target, tolerance).is_termination(&statistics);

    assert_eq!(result, expected);
}
