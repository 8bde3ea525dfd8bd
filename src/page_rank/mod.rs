//! Random-surfer PageRank over a [`LinkGraph`](crate::LinkGraph).
//!
//! [`sampled`] estimates the stationary distribution by walking the
//! [`transition()`] chain; [`iterated`] solves the PageRank recurrence in
//! place until no page moves by more than [`EPSILON`].

mod traits;
pub use self::traits::*;
pub mod iterated;
pub use self::iterated::{iterate_rank, IteratedPageRank};
pub mod sampled;
pub use self::sampled::{sample_rank, SampledPageRank};
pub mod transition;
pub use self::transition::{transition, Distribution};

/// Probability that the surfer follows a link rather than jumping.
pub const DAMPING: f64 = 0.85;
/// Default length of the random walk.
pub const SAMPLES: usize = 10_000;
/// Largest per-page change of a pass the solver accepts as converged.
pub const EPSILON: f64 = 0.001;
