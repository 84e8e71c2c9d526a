//! Activation functions.
//!
//! Only the logistic sigmoid is implemented. The enum is closed on purpose so
//! a new variant forces every `match` in the kernel to be revisited.

/// Neuron activation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// Sigmoid: 1 / (1 + exp(-x))
    #[default]
    Sigmoid,
}

impl Activation {
    /// Apply the activation to a pre-activation sum.
    pub fn apply(self, sum: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-sum).exp()),
        }
    }

    /// Derivative expressed in terms of the activation's own output.
    ///
    /// Backprop only keeps neuron outputs around, so the derivative is
    /// computed from `output` rather than from the pre-activation sum.
    pub fn derivative(self, output: f64) -> f64 {
        match self {
            Activation::Sigmoid => output * (1.0 - output),
        }
    }
}
