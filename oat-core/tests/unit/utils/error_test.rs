use super::*;

#[test]
fn can_join_many_generic_errors() {
    let errors = vec![GenericError::from("first"), GenericError::from("second".to_string())];

    assert_eq!(GenericError::join_many(&errors, ", "), "first, second");
}

#[test]
fn can_render_configuration_error_with_field_and_value() {
    let error = EngineError::configuration("mutation", 1.5, "expected value in [0, 1] range");

    let message = error.to_string();

    assert!(message.contains("mutation"));
    assert!(message.contains("1.5"));
}

parameterized_test! {can_check_probability, (value, expected), {
    can_check_probability_impl(value, expected);
}}

can_check_probability! {
    case_01: (0., true),
    case_02: (0.5, true),
    case_03: (1., true),
    case_04: (1.5, false),
    case_05: (-0.1, false),
    case_06: (f64::NAN, false),
}

fn can_check_probability_impl(value: f64, expected: bool) {
    let result = check_probability("rate", value);

    assert_eq!(result.is_ok(), expected);
    if let Err(EngineError::Configuration { field, .. }) = result {
        assert_eq!(field, "rate");
    }
}

#[test]
fn can_check_positive_value() {
    assert!(check_positive("size", 1_usize).is_ok());
    assert_eq!(
        check_positive("size", 0_usize),
        Err(EngineError::Configuration {
            field: "size".to_string(),
            value: "0".to_string(),
            reason: "expected positive value".to_string()
        })
    );
}

#[test]
fn can_classify_errors_raised_before_run() {
    assert!(EngineError::configuration("a", 1, "b").is_before_run());
    assert!(EngineError::Initialization("file".to_string()).is_before_run());
    assert!(!EngineError::AlreadyEvaluated.is_before_run());
    assert!(!EngineError::BudgetExhausted { limit: 1 }.is_before_run());
}

#[test]
fn can_convert_generic_error_into_run_fatal() {
    let error: EngineError = GenericError::from("broken").into();

    assert_eq!(error, EngineError::RunFatal("broken".to_string()));
}
