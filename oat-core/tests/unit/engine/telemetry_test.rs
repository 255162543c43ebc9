use super::*;
use crate::helpers::utils::create_collecting_logger;

fn create_statistics(epoch: usize, evaluations: usize, best_score: Option<Float>) -> RunStatistics {
    let mut statistics = RunStatistics::new(true);
    statistics.epoch = epoch;
    statistics.evaluations = evaluations;
    statistics.best_score = best_score;

    statistics
}

#[test]
fn can_track_epochs_in_metrics_mode() {
    let mut telemetry = Telemetry::new(TelemetryMode::OnlyMetrics { track_epochs: 2 });

    (1..=5).for_each(|epoch| {
        telemetry.on_epoch(&create_statistics(epoch, epoch * 10, Some(1.)), 10, epoch == 1, 0.);
    });
    telemetry.on_result(&create_statistics(5, 50, Some(1.)));

    let metrics = telemetry.take_metrics().expect("metrics should be collected");
    assert_eq!(metrics.epochs, 5);
    assert_eq!(metrics.evaluations, 50);
    assert_eq!(metrics.evolution.iter().map(|epoch| epoch.number).collect::<Vec<_>>(), vec![2, 4]);
}

#[test]
fn can_not_return_metrics_in_logging_mode() {
    let (logger, _) = create_collecting_logger();
    let mut telemetry = Telemetry::new(TelemetryMode::OnlyLogging { logger, log_best: 1 });

    telemetry.on_result(&create_statistics(1, 1, None));

    assert!(telemetry.take_metrics().is_none());
}

#[test]
fn can_log_best_with_given_frequency() {
    let (logger, messages) = create_collecting_logger();
    let mut telemetry = Telemetry::new(TelemetryMode::All { logger, log_best: 3, track_epochs: 1 });

    telemetry.on_initial(&create_statistics(0, 5, Some(2.)), 5);
    (1..=6).for_each(|epoch| telemetry.on_epoch(&create_statistics(epoch, epoch, Some(1.)), 1, false, 0.5));

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("initial population of 5"));
    assert!(messages[1].contains("epoch 3"));
    assert!(messages[2].contains("epoch 6"));
}

#[test]
fn can_stay_silent_without_telemetry() {
    let mut telemetry = Telemetry::new(TelemetryMode::None);

    telemetry.on_epoch(&create_statistics(1, 1, None), 1, true, 1.);

    assert!(telemetry.take_metrics().is_none());
}
