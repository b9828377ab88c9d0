pub mod activation;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;
pub mod validate;

// Convenience re-exports
pub use activation::Activation;
pub use error::{Error, Result};
pub use layers::{Layer, Neuron};
pub use network::{Change, Network, Session};
pub use train::{Batch, TrainingOptions, TrainingResult, TrainingSample, TrainingStatus};
