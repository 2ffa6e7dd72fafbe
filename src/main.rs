use std::path::PathBuf;
use std::time::Instant;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use jabeja::algorithms::Jabeja;
use jabeja::balance::imbalance;
use jabeja::config::{AnnealingPolicy, InitColorPolicy, JabejaConfig, NodeSelectionPolicy};
use jabeja::init_color::assign_initial_colors;
use jabeja::io::{read_graph, write_partition_data_to_file, ReportFile};

#[derive(Parser, Debug)]
#[command(version, about = "Ja-be-ja graph partitioning", long_about = None)]
struct Args {
    /// Path of the graph file (METIS .graph or matrix market .mtx)
    #[arg(long, default_value = "./graphs/ws-250.graph")]
    graph: PathBuf,

    /// Number of rounds
    #[arg(long, default_value_t = 1000)]
    rounds: u32,

    /// Number of partitions (colors)
    #[arg(long, default_value_t = 4)]
    num_partitions: usize,

    /// Node selection policy
    #[arg(long, value_enum, ignore_case = true, default_value_t = NodeSelectionPolicy::Hybrid)]
    node_selection_policy: NodeSelectionPolicy,

    /// Annealing policy
    #[arg(long, value_enum, ignore_case = true, default_value_t = AnnealingPolicy::Linear)]
    annealing_policy: AnnealingPolicy,

    /// Initial color assignment policy
    #[arg(long, value_enum, ignore_case = true, default_value_t = InitColorPolicy::RoundRobin)]
    init_color_policy: InitColorPolicy,

    /// Initial temperature
    #[arg(long, default_value_t = 2.0)]
    temperature: f64,

    /// Cooling step
    #[arg(long, default_value_t = 0.003)]
    delta: f64,

    /// Decay of the cooling step on every temperature restart
    #[arg(long, default_value_t = 0.0)]
    delta_decay: f64,

    /// Exponent of the swap benefit
    #[arg(long, default_value_t = 2.0)]
    alpha: f64,

    /// Number of neighbors sampled per step
    #[arg(long, default_value_t = 3)]
    random_neighbor_sample_size: usize,

    /// Number of graph-wide nodes sampled per step
    #[arg(long, default_value_t = 6)]
    uniform_random_sample_size: usize,

    /// Restart the temperature when the edge cut stagnates
    #[arg(long)]
    restart_temp: bool,

    /// Rounds with an unchanged edge cut before a restart
    #[arg(long, default_value_t = 100)]
    rounds_restart: u32,

    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory of the per-round report file
    #[arg(long, default_value = "./output")]
    output_dir: PathBuf,

    /// Filename where the final color mapping can be stored
    #[arg(long)]
    partition_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> JabejaConfig {
        JabejaConfig {
            rounds: self.rounds,
            node_selection_policy: self.node_selection_policy,
            annealing_policy: self.annealing_policy,
            temperature: self.temperature,
            delta: self.delta,
            delta_decay: self.delta_decay,
            alpha: self.alpha,
            random_neighbor_sample_size: self.random_neighbor_sample_size,
            uniform_random_sample_size: self.uniform_random_sample_size,
            restart_temp: self.restart_temp,
            rounds_restart: self.rounds_restart,
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.config();
    info!(?config, "configuration");

    let mut graph = read_graph(&args.graph)?;
    let colors = assign_initial_colors(graph.len(), args.num_partitions, args.init_color_policy, args.seed);
    graph.set_initial_colors(&colors)?;
    info!(
        nodes = graph.len(),
        imbalance = imbalance(args.num_partitions, &colors),
        "loaded {}",
        args.graph.display()
    );

    let report_file = ReportFile::create(&args.output_dir, &args.graph, &config, args.init_color_policy)?;
    info!("writing report to {}", report_file.path().display());

    let start = Instant::now();
    let summary = Jabeja::new(config).run(&mut graph, report_file)?;
    let elapsed_time = start.elapsed();

    if let Some(partition_file) = &args.partition_file {
        write_partition_data_to_file(&graph, partition_file)?;
    }
    info!("Edge cut {}", summary.edge_cut);
    info!("Swaps {}", summary.number_of_swaps);
    info!("Migrations {}", summary.migrations);
    info!("Imbalance {}", imbalance(args.num_partitions, &graph.colors()));
    info!("Execution time {:?}", elapsed_time);
    Ok(())
}
