//! Network: layers of sigmoid neurons wired densely front to back.
//!
//! The input layer is stored separately from the computing layers because
//! its neurons carry nothing but a name and an output. Every other neuron
//! owns one [`Weight`] per neuron of the layer before it, in the same order.
//!
//! # Topology
//!
//! [`Network::build`] derives the shape from the patterns it will be trained
//! on: one input neuron per distinct input key, one output neuron per
//! distinct output key (both in first-seen order), and hidden layers from
//! [`HiddenLayers`].

use super::activation::Activation;
use super::pattern::{distinct_keys, Pattern};
use crate::error::{NeuriteError, Result};
use rand::Rng;
use serde::Deserialize;

/// Initial weights and biases are drawn uniformly from ±this.
pub const INIT_RANGE: f64 = 0.2;

/// Hidden layer layout.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "HiddenLayersRepr")]
pub enum HiddenLayers {
    /// One hidden layer of `max(3, ceil(inputs / 2))` neurons.
    #[default]
    Auto,
    /// Explicit sizes, input side first. Entries ≤ 0 are skipped.
    Explicit(Vec<i64>),
}

impl HiddenLayers {
    /// Concrete hidden layer sizes for a network with `input_count` inputs.
    pub fn sizes(&self, input_count: usize) -> Vec<usize> {
        match self {
            HiddenLayers::Auto => vec![3.max(input_count.div_ceil(2))],
            HiddenLayers::Explicit(sizes) => sizes
                .iter()
                .filter(|&&s| s > 0)
                .map(|&s| s as usize)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HiddenLayersRepr {
    Named(String),
    Sizes(Vec<i64>),
}

impl TryFrom<HiddenLayersRepr> for HiddenLayers {
    type Error = String;

    fn try_from(repr: HiddenLayersRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            HiddenLayersRepr::Named(name) if name == "auto" => Ok(HiddenLayers::Auto),
            HiddenLayersRepr::Named(name) => Err(format!(
                "hidden_layers must be \"auto\" or a list of sizes, got {name:?}"
            )),
            HiddenLayersRepr::Sizes(sizes) => Ok(HiddenLayers::Explicit(sizes)),
        }
    }
}

/// A connection from one neuron of the previous layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Weight {
    pub value: f64,
    /// Change applied on the previous update, carried forward as momentum.
    pub last_change: f64,
}

impl Weight {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            value: random_param(rng),
            last_change: 0.0,
        }
    }
}

/// A neuron of the input layer.
#[derive(Clone, Debug, PartialEq)]
pub struct InputNeuron {
    pub name: String,
    pub output: f64,
}

/// A hidden or output neuron.
#[derive(Clone, Debug, PartialEq)]
pub struct Neuron {
    /// Key name for output neurons, `None` for hidden ones.
    pub name: Option<String>,
    pub output: f64,
    pub bias: f64,
    pub error: f64,
    pub delta: f64,
    pub activation: Activation,
    pub weights: Vec<Weight>,
}

impl Neuron {
    fn random<R: Rng + ?Sized>(name: Option<String>, fan_in: usize, rng: &mut R) -> Self {
        Self {
            name,
            output: 0.0,
            bias: random_param(rng),
            error: f64::INFINITY,
            delta: 0.0,
            activation: Activation::Sigmoid,
            weights: (0..fan_in).map(|_| Weight::random(rng)).collect(),
        }
    }
}

/// A computing layer (hidden or output).
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    fn random<R: Rng + ?Sized>(names: Vec<Option<String>>, fan_in: usize, rng: &mut R) -> Self {
        Self {
            neurons: names
                .into_iter()
                .map(|name| Neuron::random(name, fan_in, rng))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }
}

/// A feedforward network.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    pub inputs: Vec<InputNeuron>,
    /// Hidden layers followed by the output layer. Never empty.
    pub layers: Vec<Layer>,
}

impl Network {
    /// Build a randomly initialised network shaped after `patterns`.
    ///
    /// Returns [`NeuriteError::NoData`] if there are no patterns.
    pub fn build<R: Rng + ?Sized>(
        patterns: &[Pattern],
        hidden: &HiddenLayers,
        rng: &mut R,
    ) -> Result<Self> {
        if patterns.is_empty() {
            return Err(NeuriteError::NoData);
        }

        let input_keys = distinct_keys(patterns.iter().map(Pattern::inputs));
        let output_keys = distinct_keys(patterns.iter().map(Pattern::outputs));

        let inputs: Vec<InputNeuron> = input_keys
            .into_iter()
            .map(|name| InputNeuron { name, output: 0.0 })
            .collect();

        let mut layers = Vec::new();
        let mut fan_in = inputs.len();
        for size in hidden.sizes(inputs.len()) {
            layers.push(Layer::random(vec![None; size], fan_in, rng));
            fan_in = size;
        }
        layers.push(Layer::random(
            output_keys.into_iter().map(Some).collect(),
            fan_in,
            rng,
        ));

        Ok(Self { inputs, layers })
    }

    /// Total layer count, input layer included.
    pub fn layer_count(&self) -> usize {
        self.layers.len() + 1
    }

    /// The output layer.
    pub fn output_layer(&self) -> &Layer {
        // `build` always pushes the output layer
        &self.layers[self.layers.len() - 1]
    }

    /// Names of the input neurons, in order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|n| n.name.as_str())
    }

    /// Names of the output neurons, in order.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.output_layer()
            .neurons
            .iter()
            .filter_map(|n| n.name.as_deref())
    }

    /// Current outputs of the input layer.
    pub(crate) fn input_outputs(&self) -> Vec<f64> {
        self.inputs.iter().map(|n| n.output).collect()
    }
}

fn random_param<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-INIT_RANGE..INIT_RANGE)
}
