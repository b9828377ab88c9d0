use serde::{Serialize, Deserialize};

/// One labelled example: `input` feeds the input layer, `output` is the
/// expected output layer activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
}

impl TrainingSample {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> TrainingSample {
        TrainingSample { input, output }
    }
}
