/// Failures raised by the network engine and its validator.
///
/// Validation errors are always returned before any weight is touched, so a
/// failed `train` call leaves the network exactly as it was.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{what} has length {actual}, expected {expected}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid training data: {0}")]
    InvalidTrainingData(String),

    #[error("Invalid training options: {0}")]
    InvalidTrainingOptions(String),

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// A hidden layer was corrected before the layer downstream of it had
    /// produced its deltas for the current pass.
    #[error("hidden layer corrected before its downstream layer")]
    CorrectionOrder,

    /// Raised from inside a training callback to abort the loop.
    #[error("Training aborted by callback: {0}")]
    Callback(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Convenience constructor used by the validator and the network.
    pub fn shape(what: impl Into<String>, expected: usize, actual: usize) -> Error {
        Error::ShapeMismatch { what: what.into(), expected, actual }
    }
}
