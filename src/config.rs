// Run configuration and policy enumerations.

use std::fmt;
use std::str::FromStr;
use clap::ValueEnum;
use crate::algorithms::Error;

/// Normalize a policy name so that `improved-exp`, `Improved_Exp` and
/// `IMPROVED_EXP` all compare equal.
fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_uppercase().replace('-', "_")
}

/// Which pool of candidates a node draws swap partners from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeSelectionPolicy {
    /// Neighbors only.
    Local,
    /// A uniform sample of the whole graph only.
    Random,
    /// Neighbors first, falling back to the whole graph when no neighbor is accepted.
    Hybrid,
}

impl NodeSelectionPolicy {
    pub fn samples_neighbors(self) -> bool {
        matches!(self, NodeSelectionPolicy::Local | NodeSelectionPolicy::Hybrid)
    }

    pub fn samples_graph(self) -> bool {
        matches!(self, NodeSelectionPolicy::Random | NodeSelectionPolicy::Hybrid)
    }
}

impl fmt::Display for NodeSelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeSelectionPolicy::Local => write!(f, "LOCAL"),
            NodeSelectionPolicy::Random => write!(f, "RANDOM"),
            NodeSelectionPolicy::Hybrid => write!(f, "HYBRID"),
        }
    }
}

impl FromStr for NodeSelectionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_name(s).as_str() {
            "LOCAL" => Ok(NodeSelectionPolicy::Local),
            "RANDOM" => Ok(NodeSelectionPolicy::Random),
            "HYBRID" => Ok(NodeSelectionPolicy::Hybrid),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

/// How the acceptance of a swap and the temperature evolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnealingPolicy {
    Linear,
    Exponential,
    ImprovedExp,
}

impl fmt::Display for AnnealingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnealingPolicy::Linear => write!(f, "LINEAR"),
            AnnealingPolicy::Exponential => write!(f, "EXPONENTIAL"),
            AnnealingPolicy::ImprovedExp => write!(f, "IMPROVED_EXP"),
        }
    }
}

impl FromStr for AnnealingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_name(s).as_str() {
            "LINEAR" => Ok(AnnealingPolicy::Linear),
            "EXPONENTIAL" => Ok(AnnealingPolicy::Exponential),
            "IMPROVED_EXP" => Ok(AnnealingPolicy::ImprovedExp),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

/// How colors are handed out before the first round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InitColorPolicy {
    RoundRobin,
    Random,
    Batch,
}

impl fmt::Display for InitColorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitColorPolicy::RoundRobin => write!(f, "ROUND_ROBIN"),
            InitColorPolicy::Random => write!(f, "RANDOM"),
            InitColorPolicy::Batch => write!(f, "BATCH"),
        }
    }
}

impl FromStr for InitColorPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical_name(s).as_str() {
            "ROUND_ROBIN" => Ok(InitColorPolicy::RoundRobin),
            "RANDOM" => Ok(InitColorPolicy::Random),
            "BATCH" => Ok(InitColorPolicy::Batch),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

/// Parameters of a Ja-be-ja run.
#[derive(Debug, Clone, PartialEq)]
pub struct JabejaConfig {
    /// Number of rounds. Every node attempts one swap per round.
    pub rounds: u32,

    pub node_selection_policy: NodeSelectionPolicy,

    pub annealing_policy: AnnealingPolicy,

    /// Initial temperature, also the value a restart resets to.
    pub temperature: f64,

    /// Cooling step: subtracted each round under linear annealing, multiplied in
    /// under the exponential policies.
    pub delta: f64,

    /// On every restart `delta` is divided by `1 + delta_decay`.
    pub delta_decay: f64,

    /// Exponent applied to same-color degrees when scoring a swap.
    pub alpha: f64,

    /// Maximum number of neighbors considered per step.
    pub random_neighbor_sample_size: usize,

    /// Number of graph-wide nodes considered per step.
    pub uniform_random_sample_size: usize,

    /// Reset the temperature when the edge cut stagnates.
    pub restart_temp: bool,

    /// Number of consecutive rounds with an unchanged edge cut before a restart.
    pub rounds_restart: u32,

    pub seed: u64,
}

impl Default for JabejaConfig {
    fn default() -> Self {
        JabejaConfig {
            rounds: 1000,
            node_selection_policy: NodeSelectionPolicy::Hybrid,
            annealing_policy: AnnealingPolicy::Linear,
            temperature: 2.0,
            delta: 0.003,
            delta_decay: 0.0,
            alpha: 2.0,
            random_neighbor_sample_size: 3,
            uniform_random_sample_size: 6,
            restart_temp: false,
            rounds_restart: 100,
            seed: 0,
        }
    }
}

fn positive_finite(name: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            reason: format!("expected a positive finite value, got {value}"),
        })
    }
}

fn non_negative_finite(name: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            reason: format!("expected a non-negative finite value, got {value}"),
        })
    }
}

impl JabejaConfig {
    /// Check the configuration against a graph of `graph_size` nodes.
    pub fn validate(&self, graph_size: usize) -> Result<(), Error> {
        positive_finite("temperature", self.temperature)?;
        positive_finite("delta", self.delta)?;
        non_negative_finite("delta_decay", self.delta_decay)?;
        non_negative_finite("alpha", self.alpha)?;

        if self.restart_temp && self.rounds_restart == 0 {
            return Err(Error::InvalidParameter {
                name: "rounds_restart",
                reason: "must be at least 1 when temperature restarts are enabled".to_string(),
            });
        }

        let available = graph_size.saturating_sub(1);
        if self.node_selection_policy.samples_graph() && self.uniform_random_sample_size > available {
            return Err(Error::InvalidSampleSize {
                requested: self.uniform_random_sample_size,
                available,
            });
        }

        Ok(())
    }
}
