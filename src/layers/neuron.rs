use crate::activation::Activation;

/// An edge to a neuron in the next layer. Owned by its source neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Index of the target neuron within the downstream layer.
    pub target: usize,
    pub weight: f64,
    /// Weight change accumulated while training in batches, applied later.
    pending: f64,
}

/// Back-reference from a target neuron to the connection feeding it: the
/// source neuron's index in the upstream layer, and the slot of the
/// connection in that neuron's `outgoing` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incoming {
    pub source: usize,
    pub slot: usize,
}

/// How `Neuron::correct` applies the weight changes it computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Adjust weights and bias straight away (online training).
    Immediate,
    /// Add the changes to the pending accumulators; see `Neuron::apply_pending`.
    Accumulate,
}

#[derive(Debug, Clone)]
pub struct Neuron {
    pub bias: f64,
    pub activation: Activation,
    pub outgoing: Vec<Connection>,
    pub incoming: Vec<Incoming>,
    /// Output from the most recent `activate`.
    pub output: f64,
    /// Error signal from the most recent `correct`, scaled by the derivative.
    pub delta: f64,
    pending_bias: f64,
}

impl Neuron {
    pub fn new(bias: f64, activation: Activation) -> Neuron {
        Neuron {
            bias,
            activation,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            output: 0.0,
            delta: 0.0,
            pending_bias: 0.0,
        }
    }

    /// Adds an outgoing connection and returns its slot.
    pub fn connect(&mut self, target: usize, weight: f64) -> usize {
        self.outgoing.push(Connection { target, weight, pending: 0.0 });
        self.outgoing.len() - 1
    }

    /// Fires the neuron.
    ///
    /// With `Some(input)` the value is passed straight through (input layer).
    /// With `None` the weighted sum of the upstream outputs plus bias is fed
    /// through the activation function. `upstream` is the previous layer's
    /// neurons, already activated for this pass.
    pub fn activate(&mut self, input: Option<f64>, upstream: &[Neuron]) -> f64 {
        self.output = match input {
            Some(value) => value,
            None => {
                let sum: f64 = self.incoming.iter()
                    .map(|c| {
                        let source = &upstream[c.source];
                        source.output * source.outgoing[c.slot].weight
                    })
                    .sum();
                self.activation.function(sum + self.bias)
            }
        };
        self.output
    }

    /// Computes this neuron's delta and adjusts the weights feeding it.
    ///
    /// `error` is `target - output` for an output neuron. When `None` the
    /// error is taken from the outgoing connections and the deltas in
    /// `downstream`, which must already hold this pass's values.
    /// The incoming weights live on the upstream neurons, hence `&mut`.
    pub fn correct(
        &mut self,
        error: Option<f64>,
        upstream: &mut [Neuron],
        downstream: &[Neuron],
        learning_rate: f64,
        update: Update,
    ) {
        let error = error.unwrap_or_else(|| {
            self.outgoing.iter()
                .map(|c| c.weight * downstream[c.target].delta)
                .sum()
        });
        self.delta = error * self.activation.derivative(self.output);
        let step = learning_rate * self.delta;

        for c in &self.incoming {
            let source = &mut upstream[c.source];
            let change = step * source.output;
            let connection = &mut source.outgoing[c.slot];
            match update {
                Update::Immediate => connection.weight += change,
                Update::Accumulate => connection.pending += change,
            }
        }

        match update {
            Update::Immediate => self.bias += step,
            Update::Accumulate => self.pending_bias += step,
        }
    }

    /// Applies accumulated changes to this neuron's bias and outgoing weights,
    /// multiplied by `scale`, and clears the accumulators.
    pub fn apply_pending(&mut self, scale: f64) {
        for connection in &mut self.outgoing {
            connection.weight += connection.pending * scale;
            connection.pending = 0.0;
        }
        self.bias += self.pending_bias * scale;
        self.pending_bias = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wired(weight: f64, bias: f64) -> (Vec<Neuron>, Neuron) {
        let mut source = Neuron::new(0.0, Activation::Identity);
        let slot = source.connect(0, weight);
        let mut target = Neuron::new(bias, Activation::Identity);
        target.incoming.push(Incoming { source: 0, slot });
        (vec![source], target)
    }

    #[test]
    fn input_is_passed_through() {
        let mut n = Neuron::new(0.5, Activation::Tanh);
        assert_eq!(n.activate(Some(3.0), &[]), 3.0);
        assert_eq!(n.output, 3.0);
    }

    #[test]
    fn weighted_sum_plus_bias() {
        let (mut upstream, mut target) = wired(0.5, 0.25);
        upstream[0].activate(Some(2.0), &[]);
        assert_relative_eq!(target.activate(None, &upstream), 1.25);
    }

    #[test]
    fn output_neuron_correction_moves_towards_target() {
        let (mut upstream, mut target) = wired(0.5, 0.0);
        upstream[0].activate(Some(1.0), &[]);
        let before = target.activate(None, &upstream);

        target.correct(Some(1.0 - before), &mut upstream, &[], 0.1, Update::Immediate);

        assert_relative_eq!(target.delta, 0.5);
        assert_relative_eq!(upstream[0].outgoing[0].weight, 0.55);
        assert_relative_eq!(target.bias, 0.05);
        assert!(target.activate(None, &upstream) > before);
    }

    #[test]
    fn accumulated_changes_wait_for_apply() {
        let (mut upstream, mut target) = wired(0.5, 0.0);
        upstream[0].activate(Some(1.0), &[]);
        target.activate(None, &upstream);

        target.correct(Some(1.0), &mut upstream, &[], 0.1, Update::Accumulate);
        target.correct(Some(1.0), &mut upstream, &[], 0.1, Update::Accumulate);
        assert_eq!(upstream[0].outgoing[0].weight, 0.5);
        assert_eq!(target.bias, 0.0);

        upstream[0].apply_pending(0.5);
        target.apply_pending(0.5);
        assert_relative_eq!(upstream[0].outgoing[0].weight, 0.6);
        assert_relative_eq!(target.bias, 0.1);
    }

    #[test]
    fn hidden_error_comes_from_downstream_deltas() {
        let mut hidden = Neuron::new(0.0, Activation::Identity);
        hidden.connect(0, 2.0);
        hidden.connect(1, -1.0);
        let mut downstream = vec![
            Neuron::new(0.0, Activation::Identity),
            Neuron::new(0.0, Activation::Identity),
        ];
        downstream[0].delta = 0.5;
        downstream[1].delta = 0.25;

        hidden.correct(None, &mut [], &downstream, 0.1, Update::Immediate);
        assert_relative_eq!(hidden.delta, 0.75);
    }
}
