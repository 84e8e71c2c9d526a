//! Backpropagation with momentum.
//!
//! Training a pattern is two passes after [`propagate`]:
//!
//! 1. [`backpropagate`] walks from the output layer toward the input and
//!    stores each neuron's `error` and `delta` (error scaled by the
//!    activation derivative).
//! 2. [`apply_updates`] moves every weight by
//!    `learning_rate * delta * input + momentum * last_change` and every bias
//!    by `learning_rate * delta`.
//!
//! The passes are split so held-out patterns can be measured with step 1
//! without ever reaching step 2.
//!
//! [`propagate`]: super::forward::propagate

use super::network::Network;
use crate::values::Values;

/// Compute `error` and `delta` for every non-input neuron.
///
/// Output neurons compare against `targets` (missing keys target 0).
/// Hidden neurons collect the deltas of the next layer through the weights
/// that connect them.
pub fn backpropagate(network: &mut Network, targets: &Values) {
    for i in (0..network.layers.len()).rev() {
        let (head, tail) = network.layers.split_at_mut(i + 1);
        let next = tail.first();

        for (j, neuron) in head[i].neurons.iter_mut().enumerate() {
            let error = match next {
                None => {
                    let target = neuron
                        .name
                        .as_deref()
                        .and_then(|name| targets.get(name))
                        .unwrap_or(0.0);
                    target - neuron.output
                }
                Some(next) => next
                    .neurons
                    .iter()
                    .map(|n| n.delta * n.weights[j].value)
                    .sum::<f64>(),
            };
            neuron.error = error;
            neuron.delta = error * neuron.activation.derivative(neuron.output);
        }
    }
}

/// Apply the weight and bias updates for the deltas from [`backpropagate`].
pub fn apply_updates(network: &mut Network, learning_rate: f64, momentum: f64) {
    let mut prev = network.input_outputs();
    for layer in &mut network.layers {
        for neuron in &mut layer.neurons {
            for (weight, &input) in neuron.weights.iter_mut().zip(&prev) {
                let change = learning_rate * neuron.delta * input + momentum * weight.last_change;
                weight.value += change;
                weight.last_change = change;
            }
            neuron.bias += learning_rate * neuron.delta;
        }
        prev.clear();
        prev.extend(layer.neurons.iter().map(|n| n.output));
    }
}
