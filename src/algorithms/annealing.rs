// Temperature control: per-round cool-down and restart on edge-cut stagnation.

use crate::config::{AnnealingPolicy, JabejaConfig};

/// Lowest temperature under linear annealing.
pub const LINEAR_MIN_TEMPERATURE: f64 = 1.0;

/// Lowest temperature under the exponential policies.
pub const EXPONENTIAL_MIN_TEMPERATURE: f64 = 0.0001;

/// The mutable part of the annealing process, updated once per round.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingState {
    pub temperature: f64,

    /// Current cooling step. Shrinks on every restart and is never restored.
    pub delta: f64,

    pub same_edge_cut_rounds: u32,
    pub previous_edge_cut: usize,
    pub current_edge_cut: usize,
}

/// The fixed parameters driving an [`AnnealingState`].
#[derive(Debug, Clone, Copy)]
pub struct TemperatureSchedule {
    pub policy: AnnealingPolicy,
    pub initial_temperature: f64,
    pub delta_decay: f64,
    pub restart_temp: bool,
    pub rounds_restart: u32,
}

impl From<&JabejaConfig> for TemperatureSchedule {
    fn from(config: &JabejaConfig) -> Self {
        TemperatureSchedule {
            policy: config.annealing_policy,
            initial_temperature: config.temperature,
            delta_decay: config.delta_decay,
            restart_temp: config.restart_temp,
            rounds_restart: config.rounds_restart,
        }
    }
}

impl TemperatureSchedule {
    pub fn min_temperature(&self) -> f64 {
        match self.policy {
            AnnealingPolicy::Linear => LINEAR_MIN_TEMPERATURE,
            AnnealingPolicy::Exponential | AnnealingPolicy::ImprovedExp => EXPONENTIAL_MIN_TEMPERATURE,
        }
    }

    /// State at the start of a run.
    pub fn initial_state(&self, delta: f64) -> AnnealingState {
        AnnealingState {
            temperature: self.initial_temperature,
            delta,
            same_edge_cut_rounds: 0,
            previous_edge_cut: 0,
            current_edge_cut: 0,
        }
    }

    /// Lower the temperature by one step, never below the policy's floor.
    pub fn cool_down(&self, state: &mut AnnealingState) {
        let min_temperature = self.min_temperature();

        state.temperature = if state.temperature > min_temperature {
            let cooled = match self.policy {
                AnnealingPolicy::Linear => state.temperature - state.delta,
                AnnealingPolicy::Exponential | AnnealingPolicy::ImprovedExp => state.temperature * state.delta,
            };
            cooled.max(min_temperature)
        } else {
            min_temperature
        };
    }

    /// Reset the temperature after `rounds_restart` consecutive rounds with the
    /// same edge cut. Returns whether a restart happened.
    ///
    /// Does nothing when restarts are disabled.
    pub fn restart_temperature(&self, state: &mut AnnealingState) -> bool {
        if !self.restart_temp {
            return false;
        }

        let mut restarted = false;
        if state.current_edge_cut == state.previous_edge_cut {
            state.same_edge_cut_rounds += 1;

            if state.same_edge_cut_rounds >= self.rounds_restart {
                state.temperature = self.initial_temperature;
                state.delta /= 1.0 + self.delta_decay;
                state.same_edge_cut_rounds = 0;
                restarted = true;
            }
        } else {
            state.same_edge_cut_rounds = 0;
        }
        state.previous_edge_cut = state.current_edge_cut;

        restarted
    }
}
