//! Inference-only ensemble backends.
//!
//! Artifacts are trained elsewhere; these types only evaluate them. Both
//! backends share the same decision convention: a raw score strictly above
//! zero labels `Positive`, everything else (ties included) `Negative`.

pub mod oblivious;
pub mod stump;

pub use oblivious::{ObliviousEnsemble, ObliviousSplit, ObliviousTree};
pub use stump::{DecisionStump, StumpDirection, StumpEnsemble};
