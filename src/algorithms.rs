// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe
use thiserror::Error;

mod annealing;
mod jabeja;
mod partner;
mod sampler;

pub use annealing::{AnnealingState, TemperatureSchedule};
pub use jabeja::{Jabeja, RunSummary, SimulationState};
pub use partner::PartnerSelector;
pub use sampler::Sampler;

/// Common errors thrown by algorithms.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A sample without replacement was requested from a population that is too small.
    #[error("cannot sample {requested} distinct nodes out of {available}")]
    InvalidSampleSize { requested: usize, available: usize },

    /// A policy name outside the recognized set.
    #[error("unknown policy '{0}'")]
    UnknownPolicy(String),

    /// A configuration value outside its valid range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The graph topology is malformed.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Input sets don't have matching lengths.
    #[error("input sets don't have the same length (expected {expected} items, got {actual})")]
    InputLenMismatch { expected: usize, actual: usize },

    /// The report sink failed to record a round.
    #[error("failed to report round: {0}")]
    Report(#[source] Box<dyn std::error::Error + Send + Sync>),
}
