//! # Neurite: an incremental-learning feedforward network
//!
//! Neurite is an embeddable neural network that learns from labelled
//! examples one at a time and trains itself on demand, in short time slices,
//! when asked for a prediction.
//!
//! ## Quick Start
//!
//! ```rust
//! use neurite::{Learner, LearnerConfig, Values};
//!
//! let config = LearnerConfig::default()
//!     .with_targeted_mse(0.01)
//!     .with_overfitting_protection(false);
//! let mut learner = Learner::new(config)?;
//!
//! for (a, b, out) in [(0.0, 0.0, 0.0), (0.0, 1.0, 1.0), (1.0, 0.0, 1.0), (1.0, 1.0, 0.0)] {
//!     learner.learn(Values::from([("a", a), ("b", b)]), Values::from([("xor", out)]))?;
//! }
//!
//! // Ask now, get the answer once training finishes
//! let pending = learner.guess(Values::from([("a", 0.0), ("b", 1.0)]))?;
//! while learner.step() == neurite::StepOutcome::Pending {
//!     // the host's own work goes here
//! }
//! let prediction = pending.try_take().expect("answered when trained");
//! println!("xor(0, 1) ≈ {:?}", prediction.outputs.get("xor"));
//! # Ok::<(), neurite::NeuriteError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Pattern**: one labelled example; some are held out to watch for overfitting
//! - **Topology**: layers are inferred from the keys the patterns use
//! - **Slice**: a bounded burst of training epochs run by one [`Learner::step`]
//! - **Invalidation**: every learned pattern discards the trained network
//!
//! ## Layers
//!
//! - [`kernel`] - network, propagation, backpropagation
//! - [`memory`] - pattern store and overfitting detection
//! - [`training`] - time-sliced trainer, clocks, notifications
//! - [`highlevel`] - the [`Learner`] facade

pub mod config;
pub mod error;
pub mod highlevel;
pub mod kernel;
pub mod memory;
pub mod training;
pub mod values;

// Re-exports for convenience
pub use config::{HiddenLayers, LearnerConfig};
pub use error::{NeuriteError, Result};
pub use highlevel::Learner;
pub use kernel::{Activation, Network, Pattern};
pub use memory::{OverfitTracker, PatternStore};
pub use training::{
    Clock, ManualClock, PendingGuess, Prediction, StepOutcome, StopReason, SystemClock,
    TrainingProgress, TrainingStatus,
};
pub use values::Values;
