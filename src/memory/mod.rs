//! Memory layer: what the learner has been taught and how well it generalises.
//!
//! - [`PatternStore`]: every learned [`Pattern`](crate::kernel::Pattern),
//!   with the hold-out decision made at insertion time.
//! - [`OverfitTracker`]: sliding window over held-out errors that flags a
//!   rising trend.

pub mod overfit;
pub mod store;

pub use overfit::OverfitTracker;
pub use store::PatternStore;
