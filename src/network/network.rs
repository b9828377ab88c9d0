use rand::Rng;

use crate::activation::Activation;
use crate::error::{Error, Result};
use crate::layers::{Layer, Update};
use crate::train::{self, TrainingOptions, TrainingResult, TrainingSample};

pub const DEFAULT_LEARNING_RATE: f64 = 0.3;

/// A feed-forward network of fully-connected layers.
///
/// `layers[0]` is the input layer and the last layer is the output layer.
/// The topology is fixed at construction; to rewire, build a new network.
///
/// A network is a single-writer structure: `activate` and `train` both take
/// `&mut self`, so it can't be read while a training run is mutating it.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    learning_rate: f64,
}

impl Network {
    /// Builds and wires a network with `tanh` neurons, seeding weights from
    /// the thread RNG.
    pub fn new(layer_sizes: &[usize]) -> Result<Network> {
        Network::with_rng(layer_sizes, &mut rand::thread_rng())
    }

    /// As `new`, drawing initial weights and biases from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Network> {
        Network::with_activation(layer_sizes, Activation::default(), rng)
    }

    pub fn with_activation<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        activation: Activation,
        rng: &mut R,
    ) -> Result<Network> {
        if layer_sizes.len() < 2 {
            return Err(Error::InvalidTopology(format!(
                "a network needs at least 2 layers, got {}",
                layer_sizes.len()
            )));
        }
        if let Some(i) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(Error::InvalidTopology(format!("layer {i} has no neurons")));
        }

        let mut layers = Vec::with_capacity(layer_sizes.len());
        layers.push(Layer::input(layer_sizes[0]));
        for &size in &layer_sizes[1..] {
            layers.push(Layer::new(size, activation, rng));
        }

        for i in 1..layers.len() {
            let (head, tail) = layers.split_at_mut(i);
            head[i - 1].connect(&mut tail[0], rng);
        }

        tracing::debug!("Built network with layers {:?} ({})", layer_sizes, activation);
        Ok(Network { layers, learning_rate: DEFAULT_LEARNING_RATE })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    /// Forward pass. Activates the layers in order and returns the output
    /// layer's values.
    pub fn activate(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        if inputs.len() != self.input_size() {
            return Err(Error::shape("network input", self.input_size(), inputs.len()));
        }

        let mut outputs = self.layers[0].activate(Some(inputs), None)?;
        for i in 1..self.layers.len() {
            let (head, tail) = self.layers.split_at_mut(i);
            outputs = tail[0].activate(None, Some(&head[i - 1]))?;
        }
        Ok(outputs)
    }

    /// Back-propagates `errors` (`target - output`, one per output neuron)
    /// from the most recent `activate`, updating weights immediately.
    pub fn correct(&mut self, errors: &[f64]) -> Result<()> {
        self.correct_with(errors, Update::Immediate)
    }

    /// Walks the layers from the output back to the first hidden layer. The
    /// input layer has no incoming weights and is never corrected.
    pub(crate) fn correct_with(&mut self, errors: &[f64], update: Update) -> Result<()> {
        if errors.len() != self.output_size() {
            return Err(Error::shape("network errors", self.output_size(), errors.len()));
        }
        let rate = self.learning_rate;
        let last = self.layers.len() - 1;

        let (head, tail) = self.layers.split_at_mut(last);
        tail[0].correct(Some(errors), &mut head[last - 1], None, rate, update)?;

        for i in (1..last).rev() {
            let (head, tail) = self.layers.split_at_mut(i);
            let (current, downstream) = tail.split_at_mut(1);
            current[0].correct(None, &mut head[i - 1], Some(&downstream[0]), rate, update)?;
        }
        Ok(())
    }

    /// Applies weight changes accumulated by batch training, scaled by `scale`.
    pub(crate) fn apply_pending(&mut self, scale: f64) {
        for layer in &mut self.layers {
            layer.apply_pending(scale);
        }
    }

    /// Trains the network on `samples` until the mean epoch error drops to
    /// `options.error_threshold` or `options.max_epochs` is reached.
    ///
    /// Validation happens first; if it fails no weight is changed.
    pub fn train(&mut self, samples: &[TrainingSample], options: TrainingOptions) -> Result<TrainingResult> {
        train::train_loop(self, samples, options)
    }
}
