pub mod bipartite;
pub mod dp;
pub mod eulerian;
pub mod graph;
pub mod mst;
pub mod segment_tree;
pub mod shortest_path;
pub mod trace;
pub mod union_find;

pub use graph::{Graph, NodeId};
pub use trace::{Highlight, Phase, Player, Recorder, Step, Trace};
