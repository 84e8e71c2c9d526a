//! Training status and the events reported while training.

use serde::Serialize;
use std::fmt;

/// Where a learner is in its train-on-demand cycle.
///
/// `ToTrain → Training → Trained`; only learning a new pattern leads back
/// to `ToTrain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingStatus {
    /// No network, or the network is stale.
    #[default]
    ToTrain,
    /// A run is in progress.
    Training,
    /// The last run finished.
    Trained,
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrainingStatus::ToTrain => "TO_TRAIN",
            TrainingStatus::Training => "TRAINING",
            TrainingStatus::Trained => "TRAINED",
        };
        f.write_str(s)
    }
}

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Epoch MSE dropped below the target.
    TargetReached,
    /// The run used up `max_training_time`.
    TimeBudgetExhausted,
    /// Held-out error started rising.
    Overfitting,
}

/// Snapshot sent to progress observers after every slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingProgress {
    pub status: TrainingStatus,
    /// MSE of the last completed epoch (`inf` before the first).
    pub mean_squared_error: f64,
    pub training_iterations: u64,
}

/// What a call to [`step`](crate::Learner::step) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing was scheduled.
    Idle,
    /// Work remains; call `step` again once the host has had a turn.
    Pending,
    /// This step finished the training run.
    Trained(StopReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(TrainingStatus::default().to_string(), "TO_TRAIN");
        assert_eq!(TrainingStatus::Trained.to_string(), "TRAINED");
    }

    #[test]
    fn test_progress_serializes() {
        let progress = TrainingProgress {
            status: TrainingStatus::Training,
            mean_squared_error: 0.25,
            training_iterations: 12,
        };
        let json = serde_json::to_value(progress).unwrap();
        assert_eq!(json["status"], "TRAINING");
        assert_eq!(json["training_iterations"], 12);
    }
}
