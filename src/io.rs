use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use sprs::io::{read_matrix_market, IoError};
use sprs::TriMat;
use thiserror::Error;
use crate::algorithms;
use crate::config::{InitColorPolicy, JabejaConfig};
use crate::graph::{Graph, NodeId};
use crate::report::{ReportSink, RoundReport};

/// Errors raised while reading graphs or writing results.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("matrix market: {0}")]
    MatrixMarket(#[from] IoError),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Graph(#[from] algorithms::Error),
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse { line, message: message.into() }
}

/// Read a graph in METIS format.
///
/// The first non-comment line is the header `n m [fmt]`; it is followed by one
/// line per node listing its 1-based neighbor ids. Node ids are `1..=n`. Lines
/// starting with `%` are comments, an empty line is a node without neighbors.
pub fn read_metis_graph(file_path: &Path) -> Result<Graph, Error> {
    let reader = BufReader::new(File::open(file_path)?);

    let mut num_nodes = None;
    let mut adjacency: Vec<(NodeId, Vec<NodeId>)> = Vec::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_index + 1;
        if line.trim_start().starts_with('%') {
            continue;
        }

        let Some(n) = num_nodes else {
            num_nodes = Some(parse_metis_header(&line, line_number)?);
            continue;
        };

        if adjacency.len() == n {
            if line.trim().is_empty() {
                continue;
            }
            return Err(parse_error(line_number, format!("more than {n} adjacency lines")));
        }

        let id = adjacency.len() + 1;
        let mut neighbors = Vec::new();
        for token in line.split_whitespace() {
            let neighbor: NodeId = token
                .parse()
                .map_err(|_| parse_error(line_number, format!("invalid node id '{token}'")))?;
            if neighbor == 0 || neighbor > n {
                return Err(parse_error(line_number, format!("node id {neighbor} outside 1..={n}")));
            }
            neighbors.push(neighbor);
        }
        adjacency.push((id, neighbors));
    }

    let n = num_nodes.ok_or_else(|| parse_error(0, "missing header"))?;
    // Trailing nodes without an adjacency line are isolated.
    while adjacency.len() < n {
        adjacency.push((adjacency.len() + 1, Vec::new()));
    }

    Ok(Graph::from_adjacency(adjacency)?)
}

fn parse_metis_header(line: &str, line_number: usize) -> Result<usize, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let num_nodes = tokens
        .first()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(|| parse_error(line_number, format!("invalid header '{line}'")))?;

    if let Some(fmt) = tokens.get(2) {
        if !fmt.trim_start_matches('0').is_empty() {
            return Err(parse_error(line_number, format!("weighted graphs (fmt {fmt}) are not supported")));
        }
    }

    Ok(num_nodes)
}

/// Read a matrix market file as an undirected graph.
///
/// Node ids are the 0-based row indices. Every stored entry (i, j) with i != j
/// becomes the undirected edge {i, j}; values and the diagonal are ignored.
/// `integer` files are read with integer values, every other field as `f64`.
pub fn read_matrix_market_as_graph(file_path: &Path) -> Result<Graph, Error> {
    let neighbors = if matrix_market_field(file_path)?.eq_ignore_ascii_case("integer") {
        let tri_matrix: TriMat<i64> = read_matrix_market(file_path)?;
        undirected_neighbors(&tri_matrix)
    } else {
        let tri_matrix: TriMat<f64> = read_matrix_market(file_path)?;
        undirected_neighbors(&tri_matrix)
    };

    Ok(Graph::from_adjacency(neighbors.into_iter().enumerate())?)
}

// The field of the banner `%%MatrixMarket matrix coordinate <field> <symmetry>`.
fn matrix_market_field(file_path: &Path) -> Result<String, Error> {
    let mut banner = String::new();
    BufReader::new(File::open(file_path)?).read_line(&mut banner)?;

    Ok(banner.split_whitespace().nth(3).unwrap_or_default().to_string())
}

// Neighbor lists of the symmetrized sparsity pattern, without the diagonal.
fn undirected_neighbors<N>(tri_matrix: &TriMat<N>) -> Vec<Vec<usize>> {
    let num_nodes = tri_matrix.rows().max(tri_matrix.cols());
    let mut neighbors = vec![Vec::new(); num_nodes];
    for (&row, &col) in tri_matrix.row_inds().iter().zip(tri_matrix.col_inds()) {
        if row != col {
            neighbors[row].push(col);
            neighbors[col].push(row);
        }
    }
    for list in neighbors.iter_mut() {
        list.sort_unstable();
        list.dedup();
    }
    neighbors
}

/// Read a graph, picking the format from the extension: `.mtx` is matrix
/// market, anything else METIS.
pub fn read_graph(file_path: &Path) -> Result<Graph, Error> {
    match file_path.extension().and_then(|extension| extension.to_str()) {
        Some("mtx") => read_matrix_market_as_graph(file_path),
        _ => read_metis_graph(file_path),
    }
}

/// Write the final color of every node to a file.
pub fn write_partition_data_to_file(graph: &Graph, file_name: &Path) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(file_name)?);
    for node in graph.nodes() {
        writeln!(file, "node {} => color {}", node.id, node.color)?;
    }
    file.flush()
}

const DELIMITER: &str = "\t\t";

/// Name of the report file of a run, encoding the run parameters.
pub fn report_file_name(graph_path: &Path, config: &JabejaConfig, init_color_policy: InitColorPolicy) -> String {
    let graph_name = graph_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        "{}_AP_{}_NS_{}_GICP_{}_T_{:?}_D_{:?}_RNSS_{}_URSS_{}_RT_{}_DD_{:?}_A_{:?}_R_{}.txt",
        graph_name,
        config.annealing_policy,
        config.node_selection_policy,
        init_color_policy,
        config.temperature,
        config.delta,
        config.random_neighbor_sample_size,
        config.uniform_random_sample_size,
        config.restart_temp,
        config.delta_decay,
        config.alpha,
        config.rounds,
    )
}

/// Report sink writing one delimited row per round.
#[derive(Debug)]
pub struct ReportFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReportFile {
    /// Create `output_dir` if needed and start the report file with its header.
    pub fn create(
        output_dir: &Path,
        graph_path: &Path,
        config: &JabejaConfig,
        init_color_policy: InitColorPolicy,
    ) -> std::io::Result<Self> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(report_file_name(graph_path, config, init_color_policy));

        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "# Migration is number of nodes that have changed color.")?;
        writeln!(writer)?;
        writeln!(writer, "Round{DELIMITER}Edge-Cut{DELIMITER}Swaps{DELIMITER}Migrations")?;
        writer.flush()?;

        Ok(ReportFile { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for ReportFile {
    type Error = std::io::Error;

    fn report(&mut self, report: &RoundReport) -> Result<(), Self::Error> {
        writeln!(
            self.writer,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            report.round, report.edge_cut, report.number_of_swaps, report.migrations
        )?;
        self.writer.flush()
    }
}
