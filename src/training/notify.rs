//! Delivery of progress events and deferred predictions.
//!
//! Progress observers are either callbacks or channel subscriptions; a
//! subscription whose receiver has been dropped is forgotten on the next
//! event. Deferred guesses wait in a FIFO queue and are answered, in the
//! order they were asked, once the network is trained.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::debug;

use super::state::TrainingProgress;
use crate::kernel::{propagate, Network};
use crate::values::Values;

/// A network's answer for one input.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Output activations by key.
    pub outputs: Values,
    /// The inputs that were asked about.
    pub inputs: Values,
}

impl Prediction {
    /// Propagate `inputs` through `network`.
    pub fn from_network(network: &mut Network, inputs: Values) -> Self {
        let outputs = propagate(network, &inputs);
        Self { outputs, inputs }
    }
}

/// Handle to a guess that will be answered when training completes.
#[derive(Debug)]
pub struct PendingGuess {
    rx: Receiver<Prediction>,
}

impl PendingGuess {
    /// Take the prediction if it has been delivered.
    pub fn try_take(&self) -> Option<Prediction> {
        self.rx.try_recv().ok()
    }

    /// Whether the learner dropped this guess without answering it.
    pub fn is_abandoned(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }
}

type ProgressCallback = Box<dyn FnMut(&TrainingProgress) + Send>;
type PredictionCallback = Box<dyn FnOnce(Prediction) + Send>;

enum Observer {
    Callback(ProgressCallback),
    Channel(Sender<TrainingProgress>),
}

enum Responder {
    Channel(Sender<Prediction>),
    Callback(PredictionCallback),
}

impl Responder {
    fn deliver(self, prediction: Prediction) {
        match self {
            Responder::Channel(tx) => {
                if tx.send(prediction).is_err() {
                    debug!("guess receiver dropped before the answer arrived");
                }
            }
            Responder::Callback(callback) => callback(prediction),
        }
    }
}

/// Progress observers and the queue of deferred guesses.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Observer>,
    pending: VecDeque<(Values, Responder)>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a progress callback.
    pub fn on_progress<F>(&mut self, callback: F)
    where
        F: FnMut(&TrainingProgress) + Send + 'static,
    {
        self.observers.push(Observer::Callback(Box::new(callback)));
    }

    /// Subscribe to progress events through a channel.
    pub fn subscribe(&mut self) -> Receiver<TrainingProgress> {
        let (tx, rx) = mpsc::channel();
        self.observers.push(Observer::Channel(tx));
        rx
    }

    /// Send `progress` to every observer.
    pub fn progress(&mut self, progress: &TrainingProgress) {
        self.observers.retain_mut(|observer| match observer {
            Observer::Callback(callback) => {
                callback(progress);
                true
            }
            Observer::Channel(tx) => tx.send(*progress).is_ok(),
        });
    }

    /// Queue a guess answered through the returned handle.
    pub fn defer(&mut self, inputs: Values) -> PendingGuess {
        let (tx, rx) = mpsc::channel();
        self.pending.push_back((inputs, Responder::Channel(tx)));
        PendingGuess { rx }
    }

    /// Queue a guess answered by calling `callback`.
    pub fn defer_with<F>(&mut self, inputs: Values, callback: F)
    where
        F: FnOnce(Prediction) + Send + 'static,
    {
        self.pending
            .push_back((inputs, Responder::Callback(Box::new(callback))));
    }

    /// Answer a guess immediately through a fresh handle.
    pub fn answer_now(network: &mut Network, inputs: Values) -> PendingGuess {
        let (tx, rx) = mpsc::channel();
        Responder::Channel(tx).deliver(Prediction::from_network(network, inputs));
        PendingGuess { rx }
    }

    /// Answer a guess immediately through `callback`.
    pub fn answer_now_with<F>(network: &mut Network, inputs: Values, callback: F)
    where
        F: FnOnce(Prediction) + Send + 'static,
    {
        callback(Prediction::from_network(network, inputs));
    }

    /// Answer and clear every queued guess, oldest first.
    pub fn answer_pending(&mut self, network: &mut Network) -> usize {
        let mut answered = 0;
        while let Some((inputs, responder)) = self.pending.pop_front() {
            responder.deliver(Prediction::from_network(network, inputs));
            answered += 1;
        }
        answered
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{HiddenLayers, Pattern};
    use crate::training::state::TrainingStatus;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::{Arc, Mutex};

    fn network() -> Network {
        let patterns = vec![Pattern::new(Values::from(0.2), Values::from(0.8))];
        Network::build(&patterns, &HiddenLayers::Auto, &mut ChaCha8Rng::seed_from_u64(1)).unwrap()
    }

    fn progress(iterations: u64) -> TrainingProgress {
        TrainingProgress {
            status: TrainingStatus::Training,
            mean_squared_error: 0.1,
            training_iterations: iterations,
        }
    }

    #[test]
    fn test_pending_answered_in_order_once() {
        let mut notifier = Notifier::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = Arc::clone(&order);
            notifier.defer_with(Values::from(i as f64 / 10.0), move |p| {
                order.lock().unwrap().push(p.inputs.get("0").unwrap());
            });
        }
        let handle = notifier.defer(Values::from(0.9));
        assert!(handle.try_take().is_none());

        let mut net = network();
        assert_eq!(notifier.answer_pending(&mut net), 4);
        assert_eq!(*order.lock().unwrap(), vec![0.0, 0.1, 0.2]);
        assert_eq!(handle.try_take().unwrap().inputs.get("0"), Some(0.9));

        assert_eq!(notifier.answer_pending(&mut net), 0);
        assert!(!notifier.has_pending());
    }

    #[test]
    fn test_progress_reaches_all_observers() {
        let mut notifier = Notifier::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        notifier.on_progress(move |p| sink.lock().unwrap().push(p.training_iterations));
        let rx = notifier.subscribe();

        notifier.progress(&progress(4));
        notifier.progress(&progress(8));

        assert_eq!(*seen.lock().unwrap(), vec![4, 8]);
        let received: Vec<u64> = rx.try_iter().map(|p| p.training_iterations).collect();
        assert_eq!(received, vec![4, 8]);
    }

    #[test]
    fn test_dropped_subscription_is_forgotten() {
        let mut notifier = Notifier::new();
        let rx = notifier.subscribe();
        assert_eq!(notifier.observer_count(), 1);
        drop(rx);
        notifier.progress(&progress(1));
        assert_eq!(notifier.observer_count(), 0);
    }

    #[test]
    fn test_answer_now() {
        let mut net = network();
        let handle = Notifier::answer_now(&mut net, Values::from(0.4));
        let p = handle.try_take().unwrap();
        assert_eq!(p.outputs.keys().collect::<Vec<_>>(), vec!["0"]);
        assert!(handle.is_abandoned());
    }
}
