use std::sync::mpsc;

use rand::Rng;
use serde::Serialize;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::{log_progress, TrainingOptions, TrainingResult, TrainingSample};

/// Notification sent to subscribers after a session changes its network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    /// A new network replaced the old one.
    Rebuilt { layers: Vec<usize> },
    Activated { outputs: Vec<f64> },
    Trained { result: TrainingResult },
}

/// Owns a network on behalf of an interactive front end and tells
/// subscribers whenever it changes, so views can re-render.
pub struct Session {
    network: Network,
    subscribers: Vec<mpsc::Sender<Change>>,
}

impl Session {
    /// Starts with a randomly shaped network; see `random_layers`.
    pub fn new() -> Result<Session> {
        let layers = Session::random_layers(&mut rand::thread_rng());
        Ok(Session { network: Network::new(&layers)?, subscribers: Vec::new() })
    }

    pub fn with_network(network: Network) -> Session {
        Session { network, subscribers: Vec::new() }
    }

    /// One input, zero to two hidden layers of 2 to 4 neurons, one output.
    pub fn random_layers<R: Rng + ?Sized>(rng: &mut R) -> Vec<usize> {
        let hidden = rng.gen_range(0..=2);
        let mut layers = vec![1];
        layers.extend((0..hidden).map(|_| rng.gen_range(2..=4)));
        layers.push(1);
        layers
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Registers a new listener. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> mpsc::Receiver<Change> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Replaces the network, with random layers when `layers` is `None`.
    pub fn new_network(&mut self, layers: Option<Vec<usize>>) -> Result<()> {
        let layers = layers.unwrap_or_else(|| Session::random_layers(&mut rand::thread_rng()));
        self.network = Network::new(&layers)?;
        self.emit(Change::Rebuilt { layers });
        Ok(())
    }

    pub fn activate(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        let outputs = self.network.activate(inputs)?;
        self.emit(Change::Activated { outputs: outputs.clone() });
        Ok(outputs)
    }

    /// Trains with default options, logging progress every `frequency` epochs.
    pub fn train(&mut self, samples: &[TrainingSample], frequency: usize) -> Result<TrainingResult> {
        let mut options = TrainingOptions::default().frequency(frequency);
        options.on_progress = Some(log_progress());

        let result = self.network.train(samples, options)?;
        self.emit(Change::Trained { result: result.clone() });
        Ok(result)
    }

    fn emit(&mut self, change: Change) {
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }
}
