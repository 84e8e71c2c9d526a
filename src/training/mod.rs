//! Training layer: the train-on-demand state machine and its plumbing.
//!
//! - [`Trainer`]: resumable, time-sliced training driven by `step()`
//! - [`Clock`]: injectable time source ([`SystemClock`], [`ManualClock`])
//! - [`Notifier`]: progress observers and deferred guesses
//! - [`TrainingStatus`], [`TrainingProgress`], [`StopReason`], [`StepOutcome`]

pub mod clock;
pub mod notify;
pub mod state;
pub mod trainer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use notify::{Notifier, PendingGuess, Prediction};
pub use state::{StepOutcome, StopReason, TrainingProgress, TrainingStatus};
pub use trainer::{SliceResult, Trainer};
