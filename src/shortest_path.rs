//! Shortest paths: all-pairs relaxation, 0-1 BFS and bidirectional BFS.

use std::fmt::{Display, Formatter};

use crate::graph::NodeId;

pub mod bidirectional_bfs;
pub mod floyd_warshall;
pub mod zero_one_bfs;

/// A path length that may be unbounded. Every finite distance orders before
/// [`Dist::Infinite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Dist {
    Finite(i64),
    #[default]
    Infinite,
}

impl Dist {
    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }
    pub fn finite(self) -> Option<i64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Infinite => None,
        }
    }
    /// Length of this path extended by w. Stays infinite.
    pub fn plus(self, w: i64) -> Self {
        match self {
            Self::Finite(d) => Self::Finite(d + w),
            Self::Infinite => Self::Infinite,
        }
    }
}

impl Display for Dist {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{d}"),
            Self::Infinite => write!(f, "∞"),
        }
    }
}

/// Walks parent pointers back from `to` and returns the path in forward
/// order. Stops at the first node without a parent.
pub(crate) fn walk_back(parent: &[Option<NodeId>], to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut u = to;
    while let Some(p) = parent[u] {
        path.push(p);
        u = p;
    }
    path.reverse();
    path
}

pub(crate) fn fmt_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|u| u.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}
