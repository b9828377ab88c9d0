use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    /// The mean epoch error reached the error threshold.
    Success,
    /// `max_epochs` ran out first. This is an outcome, not an error.
    Failure,
}

/// How a `train` call ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResult {
    pub status: TrainingStatus,
    /// 1-based number of the last completed epoch.
    pub epoch: usize,
    /// Mean per-sample error of that epoch.
    pub mean_error: f64,
}

impl TrainingResult {
    pub fn converged(&self) -> bool {
        self.status == TrainingStatus::Success
    }
}
