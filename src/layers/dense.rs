use rand::Rng;

use crate::activation::Activation;
use crate::error::{Error, Result};
use crate::layers::neuron::{Incoming, Neuron, Update};
use crate::math::init;

/// A fully-connected layer of neurons.
#[derive(Debug, Clone)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
    /// Set once `correct` has run for the current pass; cleared by `activate`.
    corrected: bool,
}

impl Layer {
    /// Builds `size` unconnected neurons with biases drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(size: usize, activation: Activation, rng: &mut R) -> Layer {
        let neurons = (0..size)
            .map(|_| Neuron::new(init::bias_with(rng), activation))
            .collect();
        Layer { neurons, corrected: false }
    }

    /// Input layers only pass values through, so they carry no bias.
    pub fn input(size: usize) -> Layer {
        let neurons = (0..size)
            .map(|_| Neuron::new(0.0, Activation::Identity))
            .collect();
        Layer { neurons, corrected: false }
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    /// Connects every neuron here to every neuron in `target`. The fan-in
    /// used to scale the initial weights is this layer's size.
    pub fn connect<R: Rng + ?Sized>(&mut self, target: &mut Layer, rng: &mut R) {
        let fan_in = self.neurons.len();
        for (s, source) in self.neurons.iter_mut().enumerate() {
            for (t, neuron) in target.neurons.iter_mut().enumerate() {
                let slot = source.connect(t, init::weight_with(rng, fan_in));
                neuron.incoming.push(Incoming { source: s, slot });
            }
        }
    }

    /// Activates every neuron, returning their outputs in order.
    ///
    /// `values` feeds an input layer directly. Otherwise each neuron pulls
    /// from `upstream`, which must already be activated for this pass.
    pub fn activate(&mut self, values: Option<&[f64]>, upstream: Option<&Layer>) -> Result<Vec<f64>> {
        let upstream: &[Neuron] = upstream.map_or(&[][..], |layer| &layer.neurons[..]);
        if values.is_none() {
            self.check_upstream(upstream)?;
        }
        self.corrected = false;

        match values {
            Some(values) => {
                if values.len() != self.size() {
                    return Err(Error::shape("layer input", self.size(), values.len()));
                }
                Ok(self.neurons.iter_mut()
                    .zip(values)
                    .map(|(neuron, &v)| neuron.activate(Some(v), upstream))
                    .collect())
            }
            None => Ok(self.neurons.iter_mut()
                .map(|neuron| neuron.activate(None, upstream))
                .collect()),
        }
    }

    /// Back-propagates through this layer, adjusting the weights from
    /// `upstream`.
    ///
    /// `errors` holds one `target - output` value per neuron for the output
    /// layer. Hidden layers pass `None` and derive their error from
    /// `downstream`, which must have been corrected first in this pass;
    /// otherwise `Error::CorrectionOrder` is returned and nothing changes.
    pub fn correct(
        &mut self,
        errors: Option<&[f64]>,
        upstream: &mut Layer,
        downstream: Option<&Layer>,
        learning_rate: f64,
        update: Update,
    ) -> Result<()> {
        let downstream: &[Neuron] = match (errors, downstream) {
            (Some(errors), _) if errors.len() != self.size() => {
                return Err(Error::shape("layer errors", self.size(), errors.len()));
            }
            (Some(_), d) => d.map_or(&[][..], |layer| &layer.neurons[..]),
            (None, Some(d)) if d.corrected => &d.neurons[..],
            (None, _) => return Err(Error::CorrectionOrder),
        };
        self.check_upstream(&upstream.neurons)?;
        if errors.is_none() {
            self.check_downstream(downstream)?;
        }

        for (i, neuron) in self.neurons.iter_mut().enumerate() {
            let error = errors.map(|e| e[i]);
            neuron.correct(error, &mut upstream.neurons, downstream, learning_rate, update);
        }
        self.corrected = true;
        Ok(())
    }

    /// Largest number of incoming connections on any neuron here.
    fn fan_in(&self) -> usize {
        self.neurons.iter().map(|n| n.incoming.len()).max().unwrap_or(0)
    }

    /// Every incoming connection must resolve to a neuron and slot in
    /// `upstream`, i.e. `upstream` is the layer this one was connected from.
    fn check_upstream(&self, upstream: &[Neuron]) -> Result<()> {
        let resolves = self.neurons.iter()
            .flat_map(|n| n.incoming.iter())
            .all(|c| upstream.get(c.source).map_or(false, |s| c.slot < s.outgoing.len()));
        if resolves {
            Ok(())
        } else {
            Err(Error::shape("upstream layer", self.fan_in(), upstream.len()))
        }
    }

    /// Every outgoing connection must land on a neuron in `downstream`.
    fn check_downstream(&self, downstream: &[Neuron]) -> Result<()> {
        let targets = self.neurons.iter()
            .flat_map(|n| n.outgoing.iter())
            .map(|c| c.target + 1)
            .max()
            .unwrap_or(0);
        if targets <= downstream.len() {
            Ok(())
        } else {
            Err(Error::shape("downstream layer", targets, downstream.len()))
        }
    }

    /// See `Neuron::apply_pending`.
    pub fn apply_pending(&mut self, scale: f64) {
        for neuron in &mut self.neurons {
            neuron.apply_pending(scale);
        }
    }
}
