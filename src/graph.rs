//! Small fixed graphs used as engine input.

use std::fmt::Debug;

/// Nodes are dense ids in 0..n.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W = i64> {
    pub u: NodeId,
    pub v: NodeId,
    pub w: W,
}

#[derive(Debug, Clone)]
pub struct Graph<W = i64> {
    n: usize,
    edges: Vec<Edge<W>>,
    directed: bool,
    labels: Vec<String>,
}

impl<W: Copy + Debug> Graph<W> {
    fn from_edges(
        n: usize,
        edges: impl IntoIterator<Item = (NodeId, NodeId, W)>,
        directed: bool,
    ) -> Self {
        let edges: Vec<_> = edges
            .into_iter()
            .map(|(u, v, w)| {
                assert!(u < n && v < n, "edge ({u}, {v}) out of range for {n} nodes");
                Edge { u, v, w }
            })
            .collect();
        Self {
            n,
            edges,
            directed,
            labels: Vec::new(),
        }
    }

    pub fn directed(n: usize, edges: impl IntoIterator<Item = (NodeId, NodeId, W)>) -> Self {
        Self::from_edges(n, edges, true)
    }

    pub fn undirected(n: usize, edges: impl IntoIterator<Item = (NodeId, NodeId, W)>) -> Self {
        Self::from_edges(n, edges, false)
    }

    /// Names the nodes, in id order.
    pub fn with_labels<L: Into<String>>(mut self, labels: impl IntoIterator<Item = L>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        assert_eq!(self.labels.len(), self.n, "one label per node");
        self
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Label of u, or its id if the graph has no labels.
    pub fn label(&self, u: NodeId) -> String {
        self.labels.get(u).cloned().unwrap_or_else(|| u.to_string())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Out-neighbours of every node as (neighbour, weight, edge index), sorted
    /// by neighbour id. Parallel edges keep their input order. Undirected edges
    /// appear in both lists.
    pub fn adjacency(&self) -> Vec<Vec<(NodeId, W, usize)>> {
        let mut adj = vec![Vec::new(); self.n];
        for (id, e) in self.edges.iter().enumerate() {
            adj[e.u].push((e.v, e.w, id));
            if !self.directed && e.u != e.v {
                adj[e.v].push((e.u, e.w, id));
            }
        }
        for list in &mut adj {
            list.sort_by_key(|&(v, _, id)| (v, id));
        }
        adj
    }

    /// Out-neighbours only, sorted the same way as [`Graph::adjacency`].
    pub fn neighbours(&self) -> Vec<Vec<NodeId>> {
        self.adjacency()
            .into_iter()
            .map(|list| list.into_iter().map(|(v, _, _)| v).collect())
            .collect()
    }

    pub fn out_degree(&self) -> Vec<usize> {
        let mut deg = vec![0; self.n];
        for e in &self.edges {
            deg[e.u] += 1;
        }
        deg
    }

    pub fn in_degree(&self) -> Vec<usize> {
        let mut deg = vec![0; self.n];
        for e in &self.edges {
            deg[e.v] += 1;
        }
        deg
    }
}
