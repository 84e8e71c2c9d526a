//! High-level API.
//!
//! This layer provides [`Learner`], which owns a
//! [`PatternStore`](crate::memory::PatternStore), a
//! [`Trainer`](crate::training::Trainer) and the notification queues, and
//! exposes the `learn` / `guess` / `step` cycle.
//!
//! For embedding the training loop somewhere unusual, use
//! [`kernel`](crate::kernel), [`memory`](crate::memory) and
//! [`training`](crate::training) directly.

pub mod client;

pub use client::Learner;
