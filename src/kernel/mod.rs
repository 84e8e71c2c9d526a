//! Kernel layer: the network and the math that trains it.
//!
//! - [`Network`] with its layers, neurons and weights, and the topology
//!   builder ([`Network::build`])
//! - Forward propagation ([`propagate`]) and output error ([`mean_squared_error`])
//! - Backpropagation with momentum ([`backpropagate`], [`apply_updates`])
//! - [`Activation`] functions
//! - [`Pattern`], the unit of training data
//!
//! This layer has no dependencies on [`memory`](crate::memory),
//! [`training`](crate::training) or [`highlevel`](crate::highlevel).
//!
//! # Example
//!
//! ```rust
//! use neurite::kernel::{apply_updates, backpropagate, propagate, HiddenLayers, Network, Pattern};
//! use neurite::Values;
//! use rand::SeedableRng;
//!
//! let patterns = vec![Pattern::new(Values::from([("a", 1.0)]), Values::from([("b", 0.0)]))];
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//! let mut net = Network::build(&patterns, &HiddenLayers::Auto, &mut rng).unwrap();
//!
//! propagate(&mut net, patterns[0].inputs());
//! backpropagate(&mut net, patterns[0].outputs());
//! apply_updates(&mut net, 0.3, 0.1);
//! ```

pub mod activation;
pub mod backprop;
pub mod forward;
pub mod network;
pub mod pattern;

pub use activation::Activation;
pub use backprop::{apply_updates, backpropagate};
pub use forward::{mean_squared_error, propagate};
pub use network::{HiddenLayers, InputNeuron, Layer, Network, Neuron, Weight};
pub use pattern::Pattern;
