//! A module which provides the logic to collect metrics about run execution and simple logging.

#[cfg(test)]
#[path = "../../tests/unit/engine/telemetry_test.rs"]
mod telemetry_test;

use crate::termination::RunStatistics;
use crate::utils::{Float, InfoLogger, Timer};
use serde::Serialize;

/// Encapsulates different measurements regarding run evaluation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryMetrics {
    /// Run duration in milliseconds.
    pub duration: usize,
    /// Total amount of epochs.
    pub epochs: usize,
    /// Total amount of evaluations.
    pub evaluations: usize,
    /// Speed: epochs per second.
    pub speed: Float,
    /// Evolution progress.
    pub evolution: Vec<TelemetryEpoch>,
}

/// Represents information about a single epoch.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEpoch {
    /// Epoch sequence number.
    pub number: usize,
    /// Time since run started.
    pub timestamp: Float,
    /// Evaluations performed so far.
    pub evaluations: usize,
    /// The best score found so far.
    pub best_score: Option<Float>,
    /// Size of the epoch population.
    pub population_size: usize,
    /// True if this epoch has improved the best score.
    pub is_improvement: bool,
}

/// Specifies a telemetry mode.
#[derive(Clone)]
pub enum TelemetryMode {
    /// No telemetry at all.
    None,
    /// Only logging.
    OnlyLogging {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often the best score is logged.
        log_best: usize,
    },
    /// Only metrics collection.
    OnlyMetrics {
        /// Specifies how often epochs are tracked.
        track_epochs: usize,
    },
    /// Both logging and metrics collection.
    All {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often the best score is logged.
        log_best: usize,
        /// Specifies how often epochs are tracked.
        track_epochs: usize,
    },
}

/// Provides way to collect metrics and write information into log.
pub struct Telemetry {
    metrics: TelemetryMetrics,
    time: Timer,
    mode: TelemetryMode,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode) -> Self {
        Self {
            time: Timer::start(),
            metrics: TelemetryMetrics { duration: 0, epochs: 0, evaluations: 0, speed: 0., evolution: vec![] },
            mode,
        }
    }

    /// Reports initial population statistics.
    pub fn on_initial(&mut self, statistics: &RunStatistics, population_size: usize) {
        self.log(
            format!(
                "created initial population of {population_size} in {}ms, evaluations: {}, best: {}",
                statistics.time.elapsed_millis(),
                statistics.evaluations,
                format_score(statistics.best_score)
            )
            .as_str(),
        );
    }

    /// Reports epoch statistics.
    pub fn on_epoch(
        &mut self,
        statistics: &RunStatistics,
        population_size: usize,
        is_improved: bool,
        termination_estimate: Float,
    ) {
        let epoch = statistics.epoch;
        self.metrics.epochs = epoch;
        self.metrics.evaluations = statistics.evaluations;

        let (log_best, track_epochs) = match &self.mode {
            TelemetryMode::None => return,
            TelemetryMode::OnlyLogging { log_best, .. } => (Some(*log_best), None),
            TelemetryMode::OnlyMetrics { track_epochs } => (None, Some(*track_epochs)),
            TelemetryMode::All { log_best, track_epochs, .. } => (Some(*log_best), Some(*track_epochs)),
        };

        if log_best.is_some_and(|log_best| log_best > 0 && epoch % log_best == 0) {
            self.log(
                format!(
                    "[{}s] epoch {epoch} took {:.2} epochs/sec, evaluations: {}, best: {}{}, progress: {:.1}%",
                    self.time.elapsed_secs(),
                    epoch as Float / self.time.elapsed_secs_as_float().max(Float::EPSILON),
                    statistics.evaluations,
                    format_score(statistics.best_score),
                    if is_improved { " (improved)" } else { "" },
                    termination_estimate * 100.
                )
                .as_str(),
            );
        }

        if track_epochs.is_some_and(|track_epochs| track_epochs > 0 && epoch % track_epochs == 0) {
            self.metrics.evolution.push(TelemetryEpoch {
                number: epoch,
                timestamp: self.time.elapsed_secs_as_float(),
                evaluations: statistics.evaluations,
                best_score: statistics.best_score,
                population_size,
                is_improvement: is_improved,
            });
        }
    }

    /// Reports final statistic.
    pub fn on_result(&mut self, statistics: &RunStatistics) {
        let elapsed = self.time.elapsed_secs_as_float().max(Float::EPSILON);

        self.metrics.duration = self.time.elapsed_millis() as usize;
        self.metrics.epochs = statistics.epoch;
        self.metrics.evaluations = statistics.evaluations;
        self.metrics.speed = statistics.epoch as Float / elapsed;

        self.log(
            format!(
                "[{}s] total epochs: {}, evaluations: {}, speed: {:.2} epochs/sec, best: {}",
                self.time.elapsed_secs(),
                statistics.epoch,
                statistics.evaluations,
                self.metrics.speed,
                format_score(statistics.best_score)
            )
            .as_str(),
        );
    }

    /// Returns collected metrics, if metrics collection is enabled.
    pub fn take_metrics(&mut self) -> Option<TelemetryMetrics> {
        match &self.mode {
            TelemetryMode::OnlyMetrics { .. } | TelemetryMode::All { .. } => Some(std::mem::replace(
                &mut self.metrics,
                TelemetryMetrics { duration: 0, epochs: 0, evaluations: 0, speed: 0., evolution: vec![] },
            )),
            _ => None,
        }
    }

    /// Writes message to the log if logging is enabled.
    pub fn log(&self, message: &str) {
        match &self.mode {
            TelemetryMode::OnlyLogging { logger, .. } => logger(message),
            TelemetryMode::All { logger, .. } => logger(message),
            _ => {}
        }
    }
}

fn format_score(score: Option<Float>) -> String {
    score.map_or_else(|| "none".to_string(), |score| format!("{score:.7}"))
}
