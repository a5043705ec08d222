//! Bidirectional BFS on an unweighted graph.
//!
//! Each round expands one full level of the forward search and then one full
//! level of the backward search, always in that order. Both searches stop the
//! moment one of them discovers a node the other side has already visited.

use super::{fmt_path, walk_back};
use crate::{
    graph::{Graph, NodeId},
    trace::{Highlight, Phase, Recorder, Trace},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One of the two searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    pub frontier: Vec<NodeId>,
    pub visited: Vec<bool>,
    pub parent: Vec<Option<NodeId>>,
}

impl Side {
    fn new(n: usize, start: NodeId) -> Self {
        let mut visited = vec![false; n];
        visited[start] = true;
        Self {
            frontier: vec![start],
            visited,
            parent: vec![None; n],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiState {
    pub forward: Side,
    pub backward: Side,
    pub round: usize,
}

impl BiState {
    fn sides(&mut self, dir: Direction) -> (&mut Side, &Side) {
        match dir {
            Direction::Forward => (&mut self.forward, &self.backward),
            Direction::Backward => (&mut self.backward, &self.forward),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiResult {
    /// Source to target, empty if they are not connected.
    pub path: Vec<NodeId>,
    pub meeting: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiPhase {
    Init,
    Round,
    Forward,
    Backward,
    Meet,
    Fail,
}

impl Phase for BiPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        matches!(self, Self::Meet | Self::Fail)
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Round => "round",
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Meet => "meet",
            Self::Fail => "fail",
        }
    }
}

pub type BiTrace = Trace<BiPhase, BiState, BiResult>;

/// Path through the meeting node: forward parents back to the source, then
/// backward parents on to the target.
fn join(state: &BiState, meeting: NodeId) -> Vec<NodeId> {
    let mut path = walk_back(&state.forward.parent, meeting);
    let mut u = meeting;
    while let Some(p) = state.backward.parent[u] {
        path.push(p);
        u = p;
    }
    path
}

fn meet(rec: Recorder<BiPhase, BiState, BiResult>, state: &BiState, meeting: NodeId) -> BiTrace {
    let path = join(state, meeting);
    log::debug!("searches met at {meeting} in round {}", state.round);
    let highlights: Vec<_> = path
        .windows(2)
        .map(|w| Highlight::Edge(w[0], w[1]))
        .chain([Highlight::Node(meeting)])
        .collect();
    rec.finish(
        BiPhase::Meet,
        format!("Met at {meeting}"),
        format!("path {} ({} edges)", fmt_path(&path), path.len() - 1),
        state,
        highlights,
        BiResult {
            path,
            meeting: Some(meeting),
        },
    )
}

/// Expands one full level of `dir`. Returns the meeting node if found.
fn expand_level(
    rec: &mut Recorder<BiPhase, BiState, BiResult>,
    state: &mut BiState,
    adj: &[Vec<NodeId>],
    dir: Direction,
) -> Option<NodeId> {
    let phase = match dir {
        Direction::Forward => BiPhase::Forward,
        Direction::Backward => BiPhase::Backward,
    };
    let frontier = std::mem::take(&mut state.sides(dir).0.frontier);
    for u in frontier {
        for &v in &adj[u] {
            let (side, other) = state.sides(dir);
            if side.visited[v] {
                continue;
            }
            side.visited[v] = true;
            side.parent[v] = Some(u);
            side.frontier.push(v);
            let met = other.visited[v];
            rec.record(
                phase,
                format!("{} {u} → {v}", phase.name()),
                if met {
                    format!("{v} was already reached by the other side")
                } else {
                    format!("discover {v}")
                },
                state,
                [Highlight::Edge(u, v), Highlight::Node(v)],
            );
            if met {
                return Some(v);
            }
        }
    }
    None
}

pub fn build_steps(graph: &Graph<()>, source: NodeId, target: NodeId) -> BiTrace {
    let n = graph.len();
    assert!(source < n && target < n, "source or target out of range");
    assert!(!graph.is_directed(), "the backward search needs undirected edges");
    let adj = graph.neighbours();
    let mut state = BiState {
        forward: Side::new(n, source),
        backward: Side::new(n, target),
        round: 0,
    };
    let mut rec = Recorder::new(
        "Two searches",
        format!("forward from {source}, backward from {target}"),
        &state,
    );
    if source == target {
        return meet(rec, &state, source);
    }
    while !state.forward.frontier.is_empty() && !state.backward.frontier.is_empty() {
        state.round += 1;
        rec.record(
            BiPhase::Round,
            format!("Round {}", state.round),
            format!(
                "forward frontier {:?}, backward frontier {:?}",
                state.forward.frontier, state.backward.frontier
            ),
            &state,
            [],
        );
        for dir in [Direction::Forward, Direction::Backward] {
            if let Some(m) = expand_level(&mut rec, &mut state, &adj, dir) {
                return meet(rec, &state, m);
            }
        }
    }
    rec.finish(
        BiPhase::Fail,
        "No path",
        format!("a frontier emptied before the searches met after {} rounds", state.round),
        &state,
        [],
        BiResult {
            path: Vec::new(),
            meeting: None,
        },
    )
}

/// Word-ladder style graph: 0 is "hit", 7 is "cog".
pub fn showcase() -> (Graph<()>, NodeId, NodeId) {
    let g = Graph::undirected(
        8,
        [
            (0, 1, ()),
            (1, 2, ()),
            (1, 3, ()),
            (2, 3, ()),
            (2, 4, ()),
            (3, 5, ()),
            (4, 5, ()),
            (4, 7, ()),
            (5, 7, ()),
            (5, 6, ()),
        ],
    )
    .with_labels(["hit", "hot", "dot", "lot", "dog", "log", "lag", "cog"]);
    (g, 0, 7)
}
