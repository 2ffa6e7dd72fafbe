// Ja-be-ja round driver.
//
// # Reference
//
// Rahimian, Fatemeh, et al. "Ja-be-ja: A distributed algorithm for balanced graph partitioning."
// IEEE 7th International Conference on Self-Adaptive and Self-Organizing Systems (2013): 51-60.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};
use crate::algorithms::{AnnealingState, Error, PartnerSelector, Sampler, TemperatureSchedule};
use crate::config::JabejaConfig;
use crate::graph::Graph;
use crate::report::{NullSink, ReportSink, RoundReport};
use crate::Partition;

/// Run state, created at the start of a run and updated once per round.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Index of the next round to run.
    pub round: u32,

    /// Swaps performed since the start of the run.
    pub number_of_swaps: u64,

    pub annealing: AnnealingState,

    // Single generator for all sampling and acceptance draws.
    rng: SmallRng,
}

/// Final metrics of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub rounds: u32,
    pub edge_cut: usize,
    pub number_of_swaps: u64,
    pub migrations: usize,
    pub temperature: f64,
}

/// Ja-be-ja partitioner
///
/// Every node repeatedly tries to swap its color with a sampled peer so that the
/// number of edges joining different colors drops. Swaps only exchange colors,
/// so the size of each color class never changes.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use jabeja::algorithms::Jabeja;
/// use jabeja::config::{InitColorPolicy, JabejaConfig};
/// use jabeja::init_color::assign_initial_colors;
/// use jabeja::io::read_metis_graph;
/// use jabeja::report::MemorySink;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
///
///     let mut graph = read_metis_graph(Path::new("./graphs/3elt.graph"))?;
///     let colors = assign_initial_colors(graph.len(), 4, InitColorPolicy::RoundRobin, 0);
///     graph.set_initial_colors(&colors)?;
///
///     let mut sink = MemorySink::default();
///     let summary = Jabeja::new(JabejaConfig::default()).run(&mut graph, &mut sink)?;
///
///     assert_eq!(summary.edge_cut, graph.edge_cut());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Jabeja {
    config: JabejaConfig,
    sampler: Sampler,
    selector: PartnerSelector,
    schedule: TemperatureSchedule,
}

impl Jabeja {
    pub fn new(config: JabejaConfig) -> Self {
        Jabeja {
            sampler: Sampler {
                neighbor_sample_size: config.random_neighbor_sample_size,
                uniform_sample_size: config.uniform_random_sample_size,
            },
            selector: PartnerSelector {
                policy: config.annealing_policy,
                alpha: config.alpha,
            },
            schedule: TemperatureSchedule::from(&config),
            config,
        }
    }

    pub fn config(&self) -> &JabejaConfig {
        &self.config
    }

    /// Fresh state for a run, seeded from the configuration.
    pub fn init_state(&self) -> SimulationState {
        SimulationState {
            round: 0,
            number_of_swaps: 0,
            annealing: self.schedule.initial_state(self.config.delta),
            rng: SmallRng::seed_from_u64(self.config.seed),
        }
    }

    /// Let the node at index `p` look for a partner and swap colors with it.
    ///
    /// Returns the partner, if any. Under the hybrid policy the graph-wide stage
    /// only runs when the neighbor stage accepted nobody.
    fn step_node(&self, graph: &mut Graph, p: usize, state: &mut SimulationState) -> Result<Option<usize>, Error> {
        let policy = self.config.node_selection_policy;
        let temperature = state.annealing.temperature;
        let mut partner = None;

        if policy.samples_neighbors() {
            let candidates = self.sampler.sample_neighbors(&mut state.rng, graph.neighbors(p));
            partner = self.selector.select(graph, p, &candidates, temperature, &mut state.rng);
        }

        if partner.is_none() && policy.samples_graph() {
            let candidates = self.sampler.sample_graph(&mut state.rng, graph.len(), p)?;
            partner = self.selector.select(graph, p, &candidates, temperature, &mut state.rng);
        }

        if let Some(q) = partner {
            graph.swap_colors(p, q);
            state.number_of_swaps += 1;
            trace!(
                round = state.round,
                p = graph.node_at(p).id,
                q = graph.node_at(q).id,
                "swapped colors"
            );
        }

        Ok(partner)
    }

    /// Run one round: every node steps once in index order, then the
    /// temperature cools, the round is reported and a restart is considered.
    pub fn run_round<S: ReportSink>(
        &self,
        graph: &mut Graph,
        state: &mut SimulationState,
        sink: &mut S,
    ) -> Result<RoundReport, Error> {
        for p in 0..graph.len() {
            self.step_node(graph, p, state)?;
        }

        self.schedule.cool_down(&mut state.annealing);

        let report = RoundReport {
            round: state.round,
            edge_cut: graph.edge_cut(),
            number_of_swaps: state.number_of_swaps,
            migrations: graph.migrations(),
        };
        info!(
            "round: {}, edge cut: {}, swaps: {}, migrations: {}",
            report.round, report.edge_cut, report.number_of_swaps, report.migrations
        );
        sink.report(&report).map_err(|e| Error::Report(Box::new(e)))?;

        state.annealing.current_edge_cut = report.edge_cut;
        if self.schedule.restart_temperature(&mut state.annealing) {
            debug!(
                round = state.round,
                temperature = state.annealing.temperature,
                delta = state.annealing.delta,
                "edge cut stagnated, temperature restarted"
            );
        }

        state.round += 1;
        Ok(report)
    }

    /// Run all configured rounds on `graph`, reporting each one to `sink`.
    ///
    /// The configuration is validated against the graph before the first round.
    pub fn run<S: ReportSink>(&self, graph: &mut Graph, mut sink: S) -> Result<RunSummary, Error> {
        self.config.validate(graph.len())?;

        info!(
            nodes = graph.len(),
            edge_cut = graph.edge_cut(),
            annealing = %self.config.annealing_policy,
            node_selection = %self.config.node_selection_policy,
            "starting ja-be-ja"
        );

        let mut state = self.init_state();
        while state.round < self.config.rounds {
            self.run_round(graph, &mut state, &mut sink)?;
        }

        Ok(RunSummary {
            rounds: state.round,
            edge_cut: graph.edge_cut(),
            number_of_swaps: state.number_of_swaps,
            migrations: graph.migrations(),
            temperature: state.annealing.temperature,
        })
    }
}

impl<'a> Partition<&'a Graph> for Jabeja {
    type Metadata = RunSummary;
    type Error = Error;

    fn partition(&mut self, part_ids: &mut [usize], graph: &'a Graph) -> Result<Self::Metadata, Self::Error> {
        if part_ids.len() != graph.len() {
            return Err(Error::InputLenMismatch {
                expected: graph.len(),
                actual: part_ids.len(),
            });
        }

        let mut colored = graph.clone();
        colored.set_initial_colors(part_ids)?;
        let summary = self.run(&mut colored, NullSink)?;
        part_ids.copy_from_slice(&colored.colors());

        Ok(summary)
    }
}
