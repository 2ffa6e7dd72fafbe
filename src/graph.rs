use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator};
use rayon::iter::ParallelIterator as _;
use rustc_hash::FxHashMap;
use crate::algorithms::Error;

/// Identity of a node, as found in the input graph.
pub type NodeId = usize;

/// A partition label.
pub type Color = usize;

/// A vertex of the graph together with its partition state.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identity of the node, fixed at construction.
    pub id: NodeId,

    /// The color the node held when the run started. Only used to count migrations.
    pub init_color: Color,

    /// The current color, only changed by a swap.
    pub color: Color,

    /// Ids of the adjacent nodes.
    pub neighbors: Vec<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, color: Color, neighbors: Vec<NodeId>) -> Self {
        Self {
            id,
            init_color: color,
            color,
            neighbors,
        }
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Struct that represents a colored graph.
///
/// Nodes are kept in ascending id order and addressed by their position
/// ("index") in that order. The id to index mapping and the index adjacency are
/// resolved once, so that lookups during the simulation never hash.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    index_of: FxHashMap<NodeId, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {

    /// Build a graph from nodes.
    ///
    /// Fails with [`Error::InvalidGraph`] on a duplicate id, a self-loop, a
    /// neighbor id that does not belong to the graph, a neighbor listed twice or
    /// an edge listed from only one of its ends.
    pub fn from_nodes(mut nodes: Vec<Node>) -> Result<Self, Error> {
        nodes.sort_by_key(|node| node.id);

        let mut index_of = FxHashMap::with_capacity_and_hasher(nodes.len(), Default::default());
        for (index, node) in nodes.iter().enumerate() {
            if index_of.insert(node.id, index).is_some() {
                return Err(Error::InvalidGraph(format!("duplicate node id {}", node.id)));
            }
        }

        let mut adjacency = Vec::with_capacity(nodes.len());
        for node in &nodes {
            let mut neighbor_indices = Vec::with_capacity(node.neighbors.len());
            for neighbor in &node.neighbors {
                if *neighbor == node.id {
                    return Err(Error::InvalidGraph(format!("node {} is its own neighbor", node.id)));
                }
                match index_of.get(neighbor) {
                    Some(&index) => neighbor_indices.push(index),
                    None => {
                        return Err(Error::InvalidGraph(format!(
                            "node {} has unknown neighbor {}",
                            node.id, neighbor
                        )))
                    }
                }
            }
            adjacency.push(neighbor_indices);
        }

        // Sorted copies of the neighbor lists, for the duplicate and symmetry checks.
        let sorted: Vec<Vec<usize>> = adjacency
            .iter()
            .map(|neighbors| {
                let mut neighbors = neighbors.clone();
                neighbors.sort_unstable();
                neighbors
            })
            .collect();

        for (index, neighbors) in sorted.iter().enumerate() {
            if let Some(pair) = neighbors.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(Error::InvalidGraph(format!(
                    "node {} lists neighbor {} twice",
                    nodes[index].id, nodes[pair[0]].id
                )));
            }
            for &neighbor in neighbors {
                if sorted[neighbor].binary_search(&index).is_err() {
                    return Err(Error::InvalidGraph(format!(
                        "edge {} - {} is only listed by node {}",
                        nodes[index].id, nodes[neighbor].id, nodes[index].id
                    )));
                }
            }
        }

        Ok(Self {
            nodes,
            index_of,
            adjacency,
        })
    }

    /// Build a graph from `(id, neighbors)` pairs, all colored with color 0.
    pub fn from_adjacency<I>(adjacency: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (NodeId, Vec<NodeId>)>,
    {
        Self::from_nodes(
            adjacency
                .into_iter()
                .map(|(id, neighbors)| Node::new(id, 0, neighbors))
                .collect(),
        )
    }

    /// The number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn node_at(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Neighbor indices of the node at `index`, in the order of its neighbor list.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    pub fn color(&self, index: usize) -> Color {
        self.nodes[index].color
    }

    /// Current colors, by node index.
    pub fn colors(&self) -> Vec<Color> {
        self.nodes.iter().map(|node| node.color).collect()
    }

    /// Number of neighbors of the node at `index` currently colored `color`.
    pub fn degree_in_color(&self, index: usize, color: Color) -> usize {
        self.adjacency[index]
            .iter()
            .filter(|&&neighbor| self.nodes[neighbor].color == color)
            .count()
    }

    /// Exchange the colors of two nodes.
    pub fn swap_colors(&mut self, a: usize, b: usize) {
        let color_a = self.nodes[a].color;
        self.nodes[a].color = self.nodes[b].color;
        self.nodes[b].color = color_a;
    }

    /// Assign colors by node index and make them the initial colors of the run.
    pub fn set_initial_colors(&mut self, colors: &[Color]) -> Result<(), Error> {
        if colors.len() != self.nodes.len() {
            return Err(Error::InputLenMismatch {
                expected: self.nodes.len(),
                actual: colors.len(),
            });
        }
        for (node, &color) in self.nodes.iter_mut().zip(colors) {
            node.color = color;
            node.init_color = color;
        }
        Ok(())
    }

    /// The number of gray links: neighbor pairs of different color, counted
    /// from both endpoints.
    pub fn gray_links(&self) -> usize {
        self.adjacency
            .par_iter()
            .zip(self.nodes.par_iter())
            .map(|(neighbors, node)| {
                neighbors
                    .iter()
                    .filter(|&&neighbor| self.nodes[neighbor].color != node.color)
                    .count()
            })
            .sum()
    }

    /// The edge cut of the current coloring.
    ///
    /// Every cut edge is seen once from each endpoint, so the gray link count
    /// is halved.
    ///
    /// # Example
    ///
    /// Two colors (0 and 1) on a 4-cycle
    /// ```text,ignore
    ///    0*────*0
    ///     │    │      edges 0-1 and 2-3 join equal colors,
    ///     │    │      edges 1-2 and 3-0 are cut: edge_cut = 2
    ///    1*────*1
    /// ```
    pub fn edge_cut(&self) -> usize {
        self.gray_links() / 2
    }

    /// Number of nodes whose color differs from their initial color.
    pub fn migrations(&self) -> usize {
        self.nodes
            .par_iter()
            .filter(|node| node.color != node.init_color)
            .count()
    }
}
