pub mod loop_fn;
pub mod result;
pub mod sample;
pub mod train_config;

pub use loop_fn::train_loop;
pub use result::{TrainingResult, TrainingStatus};
pub use sample::TrainingSample;
pub use train_config::{log_progress, Batch, Callback, TrainingOptions};
