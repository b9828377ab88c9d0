use std::fmt;
use std::path::Path;

use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::validate;

/// Called with `(epoch, mean_error)`. Returning an error aborts training and
/// the error is returned from `train`.
pub type Callback = Box<dyn FnMut(usize, f64) -> Result<()>>;

/// When weight updates are applied.
///
/// Serialized the way the option is written in JSON: `false` for online,
/// `true` for one batch per epoch, or a number for a fixed batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BatchValue", into = "BatchValue")]
pub enum Batch {
    /// Update after every sample.
    #[default]
    Online,
    /// Accumulate over the whole training set, then update once.
    Epoch,
    /// Accumulate over this many samples at a time. 0 and 1 act as `Online`.
    Size(usize),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum BatchValue {
    Flag(bool),
    Size(usize),
}

impl From<BatchValue> for Batch {
    fn from(value: BatchValue) -> Batch {
        match value {
            BatchValue::Flag(false) => Batch::Online,
            BatchValue::Flag(true) => Batch::Epoch,
            BatchValue::Size(size) => Batch::Size(size),
        }
    }
}

impl From<Batch> for BatchValue {
    fn from(batch: Batch) -> BatchValue {
        match batch {
            Batch::Online => BatchValue::Flag(false),
            Batch::Epoch => BatchValue::Flag(true),
            Batch::Size(size) => BatchValue::Size(size),
        }
    }
}

impl Batch {
    /// Number of samples per weight update for a set of `samples` samples.
    pub fn size(&self, samples: usize) -> usize {
        match self {
            Batch::Online => 1,
            Batch::Epoch => samples.max(1),
            Batch::Size(size) => (*size).max(1),
        }
    }
}

/// Options for `Network::train`.
///
/// The numeric options (de)serialize with camelCase keys, so a JSON file such
/// as `{"batch": 4, "errorThreshold": 0.01, "maxEpochs": 5000}` can be loaded
/// with `load_json`. Callbacks are attached in code.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingOptions {
    pub batch: Batch,
    /// Training stops once the mean epoch error is at or below this.
    pub error_threshold: f64,
    /// Epochs between `on_progress` calls; 0 disables them.
    pub frequency: usize,
    pub max_epochs: usize,
    #[serde(skip)]
    pub on_progress: Option<Callback>,
    #[serde(skip)]
    pub on_success: Option<Callback>,
    #[serde(skip)]
    pub on_fail: Option<Callback>,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        TrainingOptions {
            batch: Batch::Online,
            error_threshold: 0.001,
            frequency: 100,
            max_epochs: 20_000,
            on_progress: None,
            on_success: None,
            on_fail: None,
        }
    }
}

impl fmt::Debug for TrainingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingOptions")
            .field("batch", &self.batch)
            .field("error_threshold", &self.error_threshold)
            .field("frequency", &self.frequency)
            .field("max_epochs", &self.max_epochs)
            .field("on_progress", &self.on_progress.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_fail", &self.on_fail.is_some())
            .finish()
    }
}

impl TrainingOptions {
    /// Parses options from an untyped JSON value, validating it first.
    pub fn from_value(value: &Value) -> Result<TrainingOptions> {
        validate::training_options(value)?;
        let options: TrainingOptions = serde_json::from_value(value.clone())
            .map_err(|e| Error::InvalidTrainingOptions(e.to_string()))?;
        options.check()?;
        Ok(options)
    }

    /// Reads options from a JSON file; see `from_value`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainingOptions> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let value: Value = serde_json::from_reader(reader)?;
        TrainingOptions::from_value(&value)
    }

    /// Range checks the type system doesn't cover.
    pub fn check(&self) -> Result<()> {
        if self.max_epochs == 0 {
            return Err(Error::InvalidTrainingOptions(
                "training option \"maxEpochs\" must be at least 1.".to_string(),
            ));
        }
        if self.error_threshold.is_nan() {
            return Err(Error::InvalidTrainingOptions(
                "training option \"errorThreshold\" must be a number.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn batch(mut self, batch: Batch) -> Self {
        self.batch = batch;
        self
    }

    pub fn error_threshold(mut self, error_threshold: f64) -> Self {
        self.error_threshold = error_threshold;
        self
    }

    pub fn frequency(mut self, frequency: usize) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, f64) -> Result<()> + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, f64) -> Result<()> + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_fail<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, f64) -> Result<()> + 'static,
    {
        self.on_fail = Some(Box::new(callback));
        self
    }
}

/// A progress callback that reports through `tracing` at info level.
pub fn log_progress() -> Callback {
    Box::new(|epoch, mean_error| {
        tracing::info!("Epoch {}: mean error = {:.6}", epoch, mean_error);
        Ok(())
    })
}
