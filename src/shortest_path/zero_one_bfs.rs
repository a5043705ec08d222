//! 0-1 BFS: shortest paths when every edge weighs 0 or 1.
//!
//! A deque replaces the priority queue. Zero-weight relaxations go to the
//! front and unit-weight ones to the back, which keeps the deque sorted by
//! distance. The search stops as soon as the goal is popped.

use std::collections::VecDeque;

use super::{fmt_path, walk_back, Dist};
use crate::{
    graph::{Graph, NodeId},
    trace::{Highlight, Phase, Recorder, Trace},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ZeroOneState {
    pub dist: Vec<Dist>,
    pub parent: Vec<Option<NodeId>>,
    /// Nodes already popped with their final distance.
    pub settled: Vec<bool>,
    pub deque: VecDeque<NodeId>,
    pub current: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroOneResult {
    pub dist: Dist,
    /// Source to goal, empty if the goal is unreachable.
    pub path: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroOnePhase {
    Init,
    Pop,
    /// Popped a node that was already settled through a shorter entry.
    Skip,
    PushFront,
    PushBack,
    Done,
    Fail,
}

impl Phase for ZeroOnePhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Fail)
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Pop => "pop",
            Self::Skip => "skip",
            Self::PushFront => "push_front",
            Self::PushBack => "push_back",
            Self::Done => "done",
            Self::Fail => "fail",
        }
    }
}

pub type ZeroOneTrace = Trace<ZeroOnePhase, ZeroOneState, ZeroOneResult>;

/// Panics if an edge weight is not 0 or 1.
pub fn build_steps(graph: &Graph<u8>, source: NodeId, goal: NodeId) -> ZeroOneTrace {
    let n = graph.len();
    assert!(source < n && goal < n, "source or goal out of range");
    assert!(
        graph.edges().iter().all(|e| e.w <= 1),
        "0-1 BFS needs weights in {{0, 1}}"
    );
    let adj = graph.adjacency();
    let mut state = ZeroOneState {
        dist: vec![Dist::Infinite; n],
        parent: vec![None; n],
        settled: vec![false; n],
        deque: VecDeque::from([source]),
        current: None,
    };
    state.dist[source] = Dist::Finite(0);
    let mut rec = Recorder::new(
        "Seed the deque",
        format!("dist[{source}] = 0, every other node is ∞; looking for {goal}"),
        &state,
    );
    while let Some(u) = state.deque.pop_front() {
        state.current = Some(u);
        if u == goal {
            let path = walk_back(&state.parent, goal);
            let dist = state.dist[goal];
            let highlights: Vec<_> = path
                .windows(2)
                .map(|w| Highlight::Edge(w[0], w[1]))
                .chain([Highlight::Node(goal)])
                .collect();
            return rec.finish(
                ZeroOnePhase::Done,
                format!("Reached {goal}"),
                format!("distance {dist}, path {}", fmt_path(&path)),
                &state,
                highlights,
                ZeroOneResult { dist, path },
            );
        }
        if state.settled[u] {
            rec.record(
                ZeroOnePhase::Skip,
                format!("Pop {u}"),
                format!("{u} was already settled at {}", state.dist[u]),
                &state,
                [Highlight::Node(u)],
            );
            continue;
        }
        state.settled[u] = true;
        rec.record(
            ZeroOnePhase::Pop,
            format!("Pop {u}"),
            format!("settle {u} at distance {}", state.dist[u]),
            &state,
            [Highlight::Node(u)],
        );
        for &(v, w, _) in &adj[u] {
            let candidate = state.dist[u].plus(w.into());
            if candidate >= state.dist[v] {
                continue;
            }
            state.dist[v] = candidate;
            state.parent[v] = Some(u);
            let phase = if w == 0 {
                state.deque.push_front(v);
                ZeroOnePhase::PushFront
            } else {
                state.deque.push_back(v);
                ZeroOnePhase::PushBack
            };
            rec.record(
                phase,
                format!("Relax {u} → {v} (w = {w})"),
                format!(
                    "dist[{v}] = {candidate}, pushed to the {}",
                    if w == 0 { "front" } else { "back" }
                ),
                &state,
                [Highlight::Edge(u, v), Highlight::Node(v), Highlight::Index(v)],
            );
        }
    }
    state.current = None;
    rec.finish(
        ZeroOnePhase::Fail,
        format!("{goal} is unreachable"),
        format!("the deque ran dry before {goal} was popped"),
        &state,
        [Highlight::Node(goal)],
        ZeroOneResult {
            dist: Dist::Infinite,
            path: Vec::new(),
        },
    )
}

/// Grid-like map where 0 edges are free roads and 1 edges need a wall broken.
pub fn showcase() -> (Graph<u8>, NodeId, NodeId) {
    let g = Graph::undirected(
        7,
        [
            (0, 1, 1),
            (0, 2, 0),
            (1, 3, 0),
            (2, 3, 1),
            (2, 4, 0),
            (4, 5, 1),
            (3, 5, 0),
            (5, 6, 0),
            (1, 6, 1),
        ],
    );
    (g, 0, 6)
}
