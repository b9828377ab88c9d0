use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt;
use std::str::FromStr;

/// Above this input `ln(1 + e^x)` is indistinguishable from `x` in f64, and
/// `e^x` would eventually overflow.
const SOFTPLUS_LINEAR_FROM: f64 = 34.0;

const LEAKY_ALPHA: f64 = 0.01;

/// The catalog of neuron nonlinearities.
///
/// Every entry has a paired derivative. Derivatives are evaluated at the
/// activation's *output* `y = f(x)`, not at `x`, which is what back-prop has
/// on hand once a neuron has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Activation {
    Identity,
    Logistic,
    Tanh,
    Softsign,
    Softplus,
    Rectifier,
    LeakyRectifier,
}

impl Activation {
    pub const ALL: [Activation; 7] = [
        Activation::Identity,
        Activation::Logistic,
        Activation::Tanh,
        Activation::Softsign,
        Activation::Softplus,
        Activation::Rectifier,
        Activation::LeakyRectifier,
    ];

    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Identity => x,
            Activation::Logistic => 1.0 / (1.0 + E.powf(-x)),
            Activation::Tanh => x.tanh(),
            Activation::Softsign => x / (1.0 + x.abs()),
            Activation::Softplus => {
                if x > SOFTPLUS_LINEAR_FROM { x } else { (1.0 + x.exp()).ln() }
            }
            Activation::Rectifier => if x > 0.0 { x } else { 0.0 },
            Activation::LeakyRectifier => if x > 0.0 { x } else { LEAKY_ALPHA * x },
        }
    }

    /// Derivative expressed in terms of the output `y = self.function(x)`.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            Activation::Identity => 1.0,
            Activation::Logistic => y * (1.0 - y),
            Activation::Tanh => 1.0 - y * y,
            Activation::Softsign => {
                let r = 1.0 - y.abs();
                r * r
            }
            // d/dx ln(1 + e^x) = logistic(x) = 1 - e^-y
            Activation::Softplus => 1.0 - (-y).exp(),
            Activation::Rectifier => if y > 0.0 { 1.0 } else { 0.0 },
            Activation::LeakyRectifier => if y > 0.0 { 1.0 } else { LEAKY_ALPHA },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Identity => "identity",
            Activation::Logistic => "logistic",
            Activation::Tanh => "tanh",
            Activation::Softsign => "softsign",
            Activation::Softplus => "softplus",
            Activation::Rectifier => "rectifier",
            Activation::LeakyRectifier => "leakyRectifier",
        }
    }

    pub fn derivative_name(&self) -> String {
        format!("{}Derivative", self.name())
    }

    /// Flat `(name, fn)` listing of every function and every derivative, the
    /// shape the catalog is published in. Entry `2k` is a function and entry
    /// `2k + 1` its derivative.
    pub fn catalog() -> Vec<(String, Box<dyn Fn(f64) -> f64 + Send + Sync>)> {
        let mut entries: Vec<(String, Box<dyn Fn(f64) -> f64 + Send + Sync>)> = Vec::new();
        for activation in Activation::ALL {
            entries.push((activation.name().to_string(), Box::new(move |x| activation.function(x))));
            entries.push((activation.derivative_name(), Box::new(move |y| activation.derivative(y))));
        }
        entries
    }

    /// Resolves a catalog name. Derivative names resolve to the function they
    /// belong to, with the flag set.
    pub fn lookup(name: &str) -> Option<(Activation, bool)> {
        let (base, is_derivative) = match name.strip_suffix("Derivative") {
            Some(base) => (base, true),
            None => (name, false),
        };
        Activation::ALL.iter()
            .find(|a| a.name() == base)
            .map(|a| (*a, is_derivative))
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Tanh
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Activation::lookup(s) {
            Some((activation, false)) => Ok(activation),
            Some((_, true)) => Err(format!("\"{s}\" is a derivative, not an activation")),
            None => Err(format!("unknown activation \"{s}\"")),
        }
    }
}
