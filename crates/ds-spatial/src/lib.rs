//! `ds-spatial`: from raw map points to a weighted sample of spawn sites.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`candidate`] | `RawCandidate`, `CandidatePoint`, `TagRequirement`            |
//! | [`filter`]    | `filter_candidates`: coordinate, radius, and tag eligibility |
//! | [`weight`]    | `DistributionKind`, `DistributionConfig`, `compute_weights`   |
//! | [`sampler`]   | `normalize_weights`, `sample_indices` (roulette wheel)        |
//! | [`index`]     | `CandidateIndex`: R-tree nearest-candidate lookup            |
//! | [`error`]     | `SelectionError`, `SelectionResult<T>`                        |
//!
//! # Pipeline
//!
//! ```text
//! raw points ─► filter_candidates ─► compute_weights ─► sample_indices ─► indices
//! ```
//!
//! The sampler sees only the weight vector; it knows nothing about
//! distributions or geography.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod candidate;
pub mod error;
pub mod filter;
pub mod index;
pub mod sampler;
pub mod weight;

#[cfg(test)]
mod tests;

pub use candidate::{CandidatePoint, RawCandidate, TagRequirement};
pub use error::{SelectionError, SelectionResult};
pub use filter::{SPAWN_VICINITY_KM, filter_candidates};
pub use index::CandidateIndex;
pub use sampler::{normalize_weights, sample_indices};
pub use weight::{DistributionConfig, DistributionKind, compute_weights};
