//! Train-on-demand learner that owns the pattern store, the trainer and
//! the notification queues.
//!
//! For full control, drive [`Trainer`](crate::training::Trainer) and the
//! [`kernel`](crate::kernel) functions directly.

use std::sync::mpsc::Receiver;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error};

use crate::config::LearnerConfig;
use crate::error::{NeuriteError, Result};
use crate::kernel::Network;
use crate::memory::PatternStore;
use crate::training::{
    Clock, Notifier, PendingGuess, Prediction, SliceResult, StepOutcome, SystemClock, Trainer,
    TrainingProgress, TrainingStatus,
};
use crate::values::Values;

/// An incremental-learning feedforward network.
///
/// Teach it with [`learn`](Learner::learn), ask with
/// [`guess`](Learner::guess), and give it turns with
/// [`step`](Learner::step) from the host's run loop. Training happens on
/// demand, one bounded slice per step, and any newly learned pattern
/// discards the trained network.
///
/// # Example
///
/// ```rust
/// use neurite::{Learner, LearnerConfig, Values};
///
/// let mut learner = Learner::new(LearnerConfig::default().with_seed(1)).unwrap();
/// learner.learn(Values::from([("x", 0.0)]), Values::from([("y", 1.0)])).unwrap();
/// learner.learn(Values::from([("x", 1.0)]), Values::from([("y", 0.0)])).unwrap();
///
/// let pending = learner.guess(Values::from([("x", 0.1)])).unwrap();
/// learner.train_until_done().unwrap();
///
/// let prediction = pending.try_take().unwrap();
/// assert!(prediction.outputs.get("y").is_some());
/// ```
pub struct Learner<C: Clock = SystemClock> {
    config: LearnerConfig,
    store: PatternStore,
    trainer: Trainer,
    notifier: Notifier,
    rng: ChaCha8Rng,
    clock: C,
}

impl Learner<SystemClock> {
    /// Create a learner timed by the wall clock.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> Learner<C> {
    /// Create a learner timed by `clock`.
    pub fn with_clock(config: LearnerConfig, clock: C) -> Result<Self> {
        config.validate().inspect_err(|e| error!("{e}"))?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            config,
            store: PatternStore::new(),
            trainer: Trainer::new(),
            notifier: Notifier::new(),
            rng,
            clock,
        })
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    // =========================================================================
    // Learning
    // =========================================================================

    /// Store a labelled example.
    ///
    /// Values must be numbers in `[0, 1]`; an invalid example is rejected
    /// and nothing changes. A stored example discards the current network.
    pub fn learn(&mut self, inputs: impl Into<Values>, outputs: impl Into<Values>) -> Result<()> {
        let inputs = inputs.into();
        let outputs = outputs.into();
        Self::check("inputs", &inputs)?;
        Self::check("outputs", &outputs)?;

        self.trainer.invalidate();
        let held_out = self.store.push(inputs, outputs).is_held_out();
        debug!(patterns = self.store.len(), held_out, "pattern learned");
        Ok(())
    }

    // =========================================================================
    // Guessing
    // =========================================================================

    /// Ask for a prediction, answered once training completes.
    ///
    /// Starts training if needed. If the network is already trained the
    /// returned handle holds the answer straight away.
    pub fn guess(&mut self, inputs: impl Into<Values>) -> Result<PendingGuess> {
        let inputs = inputs.into();
        Self::check("inputs", &inputs)?;
        self.ensure_training()?;

        match self.trained_network() {
            Some(network) => Ok(Notifier::answer_now(network, inputs)),
            None => Ok(self.notifier.defer(inputs)),
        }
    }

    /// Callback flavour of [`guess`](Learner::guess).
    pub fn guess_with<F>(&mut self, inputs: impl Into<Values>, callback: F) -> Result<()>
    where
        F: FnOnce(Prediction) + Send + 'static,
    {
        let inputs = inputs.into();
        Self::check("inputs", &inputs)?;
        self.ensure_training()?;

        match self.trained_network() {
            Some(network) => Notifier::answer_now_with(network, inputs, callback),
            None => self.notifier.defer_with(inputs, callback),
        }
        Ok(())
    }

    /// Answer right away with whatever network exists, trained or not.
    ///
    /// Starts training if needed, so the first call after
    /// [`learn`](Learner::learn) answers from a freshly built network.
    pub fn guess_now(&mut self, inputs: impl Into<Values>) -> Result<Prediction> {
        let inputs = inputs.into();
        Self::check("inputs", &inputs)?;
        self.ensure_training()?;

        let network = self.trainer.network_mut().ok_or(NeuriteError::NoData)?;
        Ok(Prediction::from_network(network, inputs))
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Call `callback` after every training slice.
    pub fn on_progress<F>(&mut self, callback: F)
    where
        F: FnMut(&TrainingProgress) + Send + 'static,
    {
        self.notifier.on_progress(callback);
    }

    /// Receive a [`TrainingProgress`] after every training slice.
    pub fn subscribe_progress(&mut self) -> Receiver<TrainingProgress> {
        self.notifier.subscribe()
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Give the learner one turn.
    ///
    /// Runs at most one training slice. When a `learn` discarded the
    /// network while guesses were still waiting, a new run is started here
    /// and this turn counts as its yield before the first slice.
    pub fn step(&mut self) -> StepOutcome {
        if self.trainer.status() == TrainingStatus::ToTrain && self.notifier.has_pending() {
            if self.ensure_training().is_err() {
                return StepOutcome::Idle;
            }
            let first = self.trainer.step(
                &mut self.store,
                &self.config,
                &mut self.rng,
                &self.clock,
            );
            debug_assert_eq!(first, SliceResult::Yielded);
            return StepOutcome::Pending;
        }

        let result = self.trainer.step(
            &mut self.store,
            &self.config,
            &mut self.rng,
            &self.clock,
        );
        match result {
            SliceResult::Idle => StepOutcome::Idle,
            SliceResult::Yielded => StepOutcome::Pending,
            SliceResult::Continue => {
                self.notify_progress();
                StepOutcome::Pending
            }
            SliceResult::Done(reason) => {
                self.notify_progress();
                if let Some(network) = self.trainer.network_mut() {
                    let answered = self.notifier.answer_pending(network);
                    debug!(answered, "pending guesses answered");
                }
                StepOutcome::Trained(reason)
            }
        }
    }

    /// Train to completion, yielding the thread between slices.
    pub fn train_until_done(&mut self) -> Result<()> {
        self.ensure_training()?;
        while self.step() == StepOutcome::Pending {
            std::thread::yield_now();
        }
        Ok(())
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn status(&self) -> TrainingStatus {
        self.trainer.status()
    }

    pub fn training_iterations(&self) -> u64 {
        self.trainer.iterations()
    }

    /// MSE of the last completed epoch.
    pub fn mean_squared_error(&self) -> f64 {
        self.trainer.epoch_mse()
    }

    pub fn pattern_count(&self) -> usize {
        self.store.len()
    }

    pub fn patterns(&self) -> &PatternStore {
        &self.store
    }

    pub fn network(&self) -> Option<&Network> {
        self.trainer.network()
    }

    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    pub fn pending_guesses(&self) -> usize {
        self.notifier.pending_count()
    }

    fn check(what: &str, values: &Values) -> Result<()> {
        values
            .validate()
            .inspect_err(|e| error!("{what} rejected: {e}"))
    }

    fn ensure_training(&mut self) -> Result<()> {
        self.trainer
            .start(&self.store, &self.config, &mut self.rng, &self.clock)
            .inspect_err(|e| error!("{e}"))?;
        Ok(())
    }

    fn trained_network(&mut self) -> Option<&mut Network> {
        if self.trainer.status() == TrainingStatus::Trained {
            self.trainer.network_mut()
        } else {
            None
        }
    }

    fn notify_progress(&mut self) {
        let progress = TrainingProgress {
            status: self.trainer.status(),
            mean_squared_error: self.trainer.epoch_mse(),
            training_iterations: self.trainer.iterations(),
        };
        self.notifier.progress(&progress);
    }
}

impl Default for Learner<SystemClock> {
    fn default() -> Self {
        Self {
            config: LearnerConfig::default(),
            store: PatternStore::new(),
            trainer: Trainer::new(),
            notifier: Notifier::new(),
            rng: ChaCha8Rng::from_entropy(),
            clock: SystemClock::new(),
        }
    }
}
