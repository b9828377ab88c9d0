//! Precondition checks run before training touches any weight.

pub mod data;
pub mod options;

pub use data::*;
pub use options::{training_options, TRAINING_OPTION_KEYS};
