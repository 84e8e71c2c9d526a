//! Cooperative, time-sliced training.
//!
//! A [`Trainer`] is a resumable state machine. [`start`](Trainer::start)
//! builds a fresh network and schedules work; each [`step`](Trainer::step)
//! does one scheduled unit and returns so the host keeps control:
//!
//! 1. The first step after `start` only yields. Callers that register for
//!    results right after asking for a guess still see the first slice.
//! 2. Every later step runs one slice: whole epochs, back to back, until
//!    the slice budget is spent or a stop condition fires.
//!
//! A run stops when an epoch's MSE is below the target, when the run has
//! used up its time budget, or when held-out error starts rising.
//!
//! Work is stamped with the generation it was scheduled under.
//! [`invalidate`](Trainer::invalidate) bumps the generation, so a step left
//! over from a discarded network does nothing.

use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

use super::clock::Clock;
use super::state::{StopReason, TrainingStatus};
use crate::config::LearnerConfig;
use crate::error::Result;
use crate::kernel::{apply_updates, backpropagate, mean_squared_error, propagate, Network};
use crate::memory::{OverfitTracker, PatternStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Work {
    FirstTick,
    Slice,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    generation: u64,
    work: Work,
}

/// Result of one [`Trainer::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceResult {
    /// Nothing current was scheduled.
    Idle,
    /// Yielded before the first slice.
    Yielded,
    /// Ran a slice without reaching a stop condition.
    Continue,
    /// Ran a slice that ended the run.
    Done(StopReason),
}

/// Training state for one learner.
#[derive(Debug, Clone)]
pub struct Trainer {
    status: TrainingStatus,
    network: Option<Network>,
    iterations: u64,
    started_at: Option<Duration>,
    epoch_mse: f64,
    generation: u64,
    stop_reason: Option<StopReason>,
    overfit: OverfitTracker,
    scheduled: Option<Scheduled>,
}

impl Default for Trainer {
    fn default() -> Self {
        Self {
            status: TrainingStatus::ToTrain,
            network: None,
            iterations: 0,
            started_at: None,
            epoch_mse: f64::INFINITY,
            generation: 0,
            stop_reason: None,
            overfit: OverfitTracker::new(),
            scheduled: None,
        }
    }
}

impl Trainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> TrainingStatus {
        self.status
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn network_mut(&mut self) -> Option<&mut Network> {
        self.network.as_mut()
    }

    /// Patterns processed since the current network was built.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// MSE of the last completed epoch.
    pub fn epoch_mse(&self) -> f64 {
        self.epoch_mse
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn overfit(&self) -> &OverfitTracker {
        &self.overfit
    }

    /// Whether a step is scheduled for the current generation.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
            .is_some_and(|s| s.generation == self.generation)
    }

    /// Discard the network and return to `ToTrain`.
    ///
    /// Held-out error samples survive unless the next build clears them.
    /// Work already scheduled is left in place and turns into a no-op.
    pub fn invalidate(&mut self) {
        self.status = TrainingStatus::ToTrain;
        self.network = None;
        self.iterations = 0;
        self.started_at = None;
        self.epoch_mse = f64::INFINITY;
        self.stop_reason = None;
        self.generation += 1;
        debug!(generation = self.generation, "network invalidated");
    }

    /// Build a network and schedule training, if not already started.
    ///
    /// Returns `Ok(false)` when a run is in progress or finished. Fails with
    /// [`NoData`](crate::NeuriteError::NoData) on an empty store, leaving the
    /// trainer in `ToTrain`.
    pub fn start<R, C>(
        &mut self,
        store: &PatternStore,
        config: &LearnerConfig,
        rng: &mut R,
        clock: &C,
    ) -> Result<bool>
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        if self.status != TrainingStatus::ToTrain {
            return Ok(false);
        }

        let network = Network::build(store.patterns(), &config.hidden_layers, rng)?;
        debug!(
            inputs = network.inputs.len(),
            outputs = network.output_layer().len(),
            layers = network.layer_count(),
            patterns = store.len(),
            "network built"
        );

        if config.reset_overfit_samples_on_rebuild {
            self.overfit.clear();
        }
        self.network = Some(network);
        self.status = TrainingStatus::Training;
        self.started_at = Some(clock.now());
        self.scheduled = Some(Scheduled {
            generation: self.generation,
            work: Work::FirstTick,
        });
        Ok(true)
    }

    /// Run the scheduled unit of work, if any.
    pub fn step<R, C>(
        &mut self,
        store: &mut PatternStore,
        config: &LearnerConfig,
        rng: &mut R,
        clock: &C,
    ) -> SliceResult
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        let Some(scheduled) = self.scheduled.take() else {
            return SliceResult::Idle;
        };
        if scheduled.generation != self.generation || self.status != TrainingStatus::Training {
            debug!(
                scheduled = scheduled.generation,
                current = self.generation,
                "dropping stale training step"
            );
            return SliceResult::Idle;
        }

        if scheduled.work == Work::FirstTick {
            self.scheduled = Some(Scheduled {
                work: Work::Slice,
                ..scheduled
            });
            return SliceResult::Yielded;
        }

        match self.run_slice(store, config, rng, clock) {
            Some(reason) => {
                self.status = TrainingStatus::Trained;
                self.stop_reason = Some(reason);
                info!(
                    ?reason,
                    mse = self.epoch_mse,
                    iterations = self.iterations,
                    "training finished"
                );
                SliceResult::Done(reason)
            }
            None => {
                debug!(
                    mse = self.epoch_mse,
                    iterations = self.iterations,
                    "slice finished"
                );
                self.scheduled = Some(scheduled);
                SliceResult::Continue
            }
        }
    }

    fn run_slice<R, C>(
        &mut self,
        store: &mut PatternStore,
        config: &LearnerConfig,
        rng: &mut R,
        clock: &C,
    ) -> Option<StopReason>
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        let slice_end = clock.now() + config.slice_budget();
        while clock.now() < slice_end {
            self.epoch_mse = self.run_epoch(store, config, rng)?;
            if let Some(reason) = self.check_stop(store.len(), config, clock) {
                return Some(reason);
            }
        }
        None
    }

    /// One shuffled pass over every pattern. `None` without a network.
    fn run_epoch<R>(
        &mut self,
        store: &mut PatternStore,
        config: &LearnerConfig,
        rng: &mut R,
    ) -> Option<f64>
    where
        R: Rng + ?Sized,
    {
        let network = self.network.as_mut()?;
        if store.is_empty() {
            return Some(0.0);
        }

        store.shuffle(rng);
        let mut total = 0.0;
        for pattern in store.patterns() {
            propagate(network, pattern.inputs());
            backpropagate(network, pattern.outputs());
            let mse = mean_squared_error(network);
            total += mse;

            if config.overfitting_protection && pattern.is_held_out() {
                self.overfit.record(mse);
            } else {
                apply_updates(network, config.learning_rate, config.momentum);
            }
            self.iterations += 1;
        }
        Some(total / store.len() as f64)
    }

    fn check_stop<C>(
        &mut self,
        pattern_count: usize,
        config: &LearnerConfig,
        clock: &C,
    ) -> Option<StopReason>
    where
        C: Clock + ?Sized,
    {
        if self.epoch_mse < config.targeted_mse {
            return Some(StopReason::TargetReached);
        }
        let started_at = self.started_at.unwrap_or_default();
        if clock.now().saturating_sub(started_at) > config.max_training_time() {
            return Some(StopReason::TimeBudgetExhausted);
        }
        if config.overfitting_protection && self.overfit.is_overfitting(pattern_count) {
            return Some(StopReason::Overfitting);
        }
        None
    }
}
