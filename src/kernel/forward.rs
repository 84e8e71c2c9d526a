//! Forward propagation and output error measurement.

use super::network::Network;
use crate::values::Values;

/// Run `inputs` through the network and return the output activations.
///
/// Input neurons whose key is absent (or not a finite number) read 0.
/// Every neuron's `output` is overwritten; [`backpropagate`] relies on that.
///
/// [`backpropagate`]: super::backprop::backpropagate
pub fn propagate(network: &mut Network, inputs: &Values) -> Values {
    for neuron in &mut network.inputs {
        neuron.output = inputs
            .get(&neuron.name)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
    }

    let mut prev = network.input_outputs();
    for layer in &mut network.layers {
        for neuron in &mut layer.neurons {
            let sum = neuron.bias
                + neuron
                    .weights
                    .iter()
                    .zip(&prev)
                    .map(|(w, &o)| w.value * o)
                    .sum::<f64>();
            neuron.output = neuron.activation.apply(sum);
        }
        prev.clear();
        prev.extend(layer.neurons.iter().map(|n| n.output));
    }

    network
        .output_layer()
        .neurons
        .iter()
        .filter_map(|n| n.name.as_deref().map(|name| (name, n.output)))
        .collect()
}

/// Mean of the squared output-layer errors from the last backprop pass.
///
/// An empty output layer has no error.
pub fn mean_squared_error(network: &Network) -> f64 {
    let outputs = &network.output_layer().neurons;
    if outputs.is_empty() {
        return 0.0;
    }
    outputs.iter().map(|n| n.error * n.error).sum::<f64>() / outputs.len() as f64
}
