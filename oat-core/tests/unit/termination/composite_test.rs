use super::*;

struct FixedStop {
    name: &'static str,
    fires: bool,
    estimate: Float,
    limit: Option<usize>,
}

impl StopCondition for FixedStop {
    fn name(&self) -> &str {
        self.name
    }

    fn is_termination(&mut self, _: &RunStatistics) -> bool {
        self.fires
    }

    fn estimate(&self, _: &RunStatistics) -> Float {
        self.estimate
    }

    fn evaluation_limit(&self) -> Option<usize> {
        self.limit
    }
}

fn fixed(name: &'static str, fires: bool, estimate: Float, limit: Option<usize>) -> Box<dyn StopCondition> {
    Box::new(FixedStop { name, fires, estimate, limit })
}

#[test]
fn can_fire_when_any_condition_fires() {
    let mut composite = CompositeStop::new(vec![fixed("first", false, 0.1, None), fixed("second", true, 0.2, None)]);

    let result = composite.is_termination(&RunStatistics::new(true));

    assert!(result);
    assert_eq!(composite.fired_by(), Some("second"));
}

#[test]
fn can_not_fire_without_conditions() {
    let mut composite = CompositeStop::default();

    assert!(!composite.is_termination(&RunStatistics::new(true)));
    assert!(composite.is_empty());
    assert_eq!(composite.estimate(&RunStatistics::new(true)), 0.);
}

#[test]
fn can_use_max_estimate_and_min_limit() {
    let composite = CompositeStop::new(vec![
        fixed("first", false, 0.3, Some(100)),
        fixed("second", false, 0.7, None),
        fixed("third", false, 0.5, Some(50)),
    ]);
    let statistics = RunStatistics::new(true);

    assert_eq!(composite.estimate(&statistics), 0.7);
    assert_eq!(composite.evaluation_limit(), Some(50));
    assert_eq!(composite.len(), 3);
}

#[test]
fn can_forget_fired_condition_on_reset() {
    let mut composite = CompositeStop::new(vec![fixed("first", true, 0., None)]);
    composite.is_termination(&RunStatistics::new(true));

    composite.reset();

    assert_eq!(composite.fired_by(), None);
}

parameterized_test! {can_detect_evaluations_limit, (evaluations, limit, expected), {
    let mut statistics = RunStatistics::new(true);
    statistics.evaluations = evaluations;

    assert_eq!(MaxEvaluations::new(limit).is_termination(&statistics), expected);
}}

can_detect_evaluations_limit! {
    case_01: (9, 10, false),
    case_02: (10, 10, true),
    case_03: (11, 10, true),
}

#[test]
fn can_inject_evaluation_limit() {
    assert_eq!(MaxEvaluations::new(10).evaluation_limit(), Some(10));
    assert_eq!(MaxTime::new(10.).evaluation_limit(), None);
}

#[test]
fn can_detect_time_limit() {
    let statistics = RunStatistics::new(true);

    assert!(MaxTime::new(-1.).is_termination(&statistics));
    assert!(!MaxTime::new(3600.).is_termination(&statistics));
}
