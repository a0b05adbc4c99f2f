use crate::graph_traits::NodeKey;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// An undirected, unweighted simple graph whose nodes are identified by keys of type `K`.
///
/// Storage is a petgraph [`UnGraph`]; the key index maps every key to its `NodeIndex`.
#[derive(Debug, Clone)]
pub struct OwnedGraph<K: NodeKey> {
    graph: UnGraph<K, ()>,
    index: BTreeMap<K, NodeIndex>,
}

impl<K: NodeKey> OwnedGraph<K> {
    pub fn new() -> OwnedGraph<K> {
        OwnedGraph {
            graph: UnGraph::default(),
            index: BTreeMap::new(),
        }
    }

    /// Builds a graph from an edge list. Nodes are created on first mention.
    pub fn from_edges<I>(edges: I) -> OwnedGraph<K>
    where
        I: IntoIterator<Item = (K, K)>,
    {
        let mut builder = GraphBuilder::new();
        for (a, b) in edges {
            builder.add_edge(a, b);
        }
        builder.graph()
    }

    /// Builds the graph formed by the union of the given paths: every node on a path, and an
    /// edge between each pair of consecutive path nodes.
    pub fn from_paths<'a, I>(paths: I) -> OwnedGraph<K>
    where
        I: IntoIterator<Item = &'a [K]>,
        K: 'a,
    {
        let mut builder = GraphBuilder::new();
        for path in paths {
            if let Some(first) = path.first() {
                builder.add_node(first.clone());
            }
            for pair in path.windows(2) {
                builder.add_edge(pair[0].clone(), pair[1].clone());
            }
        }
        builder.graph()
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    pub fn node_index(&self, key: &K) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    #[inline]
    pub fn key(&self, idx: NodeIndex) -> &K {
        &self.graph[idx]
    }

    /// All node keys in ascending key order.
    pub fn node_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.index.keys()
    }

    /// Number of distinct neighbors of `key`, or `None` if the node does not exist.
    pub fn degree(&self, key: &K) -> Option<usize> {
        self.node_index(key).map(|idx| self.degree_of(idx))
    }

    #[inline]
    pub fn degree_of(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    /// Neighbors of `idx`, ordered by key.
    pub fn sorted_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        neighbors.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        neighbors
    }

    /// The subgraph induced by `keys`. Keys that are not part of this graph are ignored.
    pub fn induced_subgraph<'a, I>(&self, keys: I) -> OwnedGraph<K>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let kept: BTreeSet<NodeIndex> = keys
            .into_iter()
            .filter_map(|key| self.node_index(key))
            .collect();

        let mut builder = GraphBuilder::new();
        for &idx in &kept {
            builder.add_node(self.graph[idx].clone());
        }
        for &idx in &kept {
            for neighbor in self.graph.neighbors(idx) {
                if idx < neighbor && kept.contains(&neighbor) {
                    builder.add_edge(self.graph[idx].clone(), self.graph[neighbor].clone());
                }
            }
        }
        builder.graph()
    }

    /// The underlying petgraph graph, for handing to petgraph algorithms.
    pub fn as_petgraph(&self) -> &UnGraph<K, ()> {
        &self.graph
    }
}

impl<K: NodeKey> Default for OwnedGraph<K> {
    fn default() -> Self {
        OwnedGraph::new()
    }
}

pub struct GraphBuilder<K: NodeKey> {
    graph: OwnedGraph<K>,
}

impl<K: NodeKey> GraphBuilder<K> {
    pub fn new() -> GraphBuilder<K> {
        GraphBuilder {
            graph: OwnedGraph::new(),
        }
    }

    pub fn graph(self) -> OwnedGraph<K> {
        self.graph
    }

    /// Returns the index of the node with `key`, adding it if it does not exist yet.
    pub fn add_node(&mut self, key: K) -> NodeIndex {
        let graph = &mut self.graph.graph;
        match self.graph.index.entry(key) {
            Entry::Vacant(e) => {
                let idx = graph.add_node(e.key().clone());
                e.insert(idx);
                idx
            }
            Entry::Occupied(e) => *e.get(),
        }
    }

    /// Adds an undirected edge. Repeated edges collapse into one, self-loops are dropped.
    pub fn add_edge(&mut self, a: K, b: K) {
        if a == b {
            debug!(node = ?a, "dropping self-loop");
            self.add_node(a);
            return;
        }
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.graph.graph.update_edge(a, b, ());
    }
}

impl<K: NodeKey> Default for GraphBuilder<K> {
    fn default() -> Self {
        GraphBuilder::new()
    }
}
