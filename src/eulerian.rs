//! Eulerian trails with Hierholzer's algorithm on directed multigraphs.
//!
//! Follow unused edges until stuck, then pop the stuck node onto the front of
//! the answer. Existence is not checked up front, the result is validated at
//! the end instead.

use std::collections::VecDeque;

use crate::{
    graph::{Graph, NodeId},
    trace::{Highlight, Phase, Recorder, Trace},
};

/// Order in which a node's outgoing edges are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOrder {
    /// Ascending destination id.
    ByDestination,
    /// Ascending destination label, for lexically smallest answers.
    ByLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailKind {
    /// Starts and ends at the same node.
    Circuit,
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerState {
    pub stack: Vec<NodeId>,
    /// Edge used to reach each stack entry after the first.
    pub edge_stack: Vec<usize>,
    /// Unused outgoing edge ids of each node, next one first.
    pub unused: Vec<VecDeque<usize>>,
    pub trail: VecDeque<NodeId>,
    pub trail_edges: VecDeque<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerResult {
    pub trail: Vec<NodeId>,
    /// Edge ids in walking order.
    pub edges: Vec<usize>,
    /// None if the walk doesn't use every edge.
    pub kind: Option<TrailKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerPhase {
    Init,
    Follow,
    /// A stuck node was moved to the front of the trail.
    Circuit,
    Done,
    Fail,
}

impl Phase for EulerPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Fail)
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Follow => "follow",
            Self::Circuit => "circuit",
            Self::Done => "done",
            Self::Fail => "fail",
        }
    }
}

pub type EulerTrace = Trace<EulerPhase, EulerState, EulerResult>;

/// Which trail the degrees allow, with a node it must start from. Only degrees
/// are looked at; connectivity of the edges is assumed.
pub fn trail_kind(graph: &Graph<()>) -> Option<(TrailKind, NodeId)> {
    let (out, inc) = (graph.out_degree(), graph.in_degree());
    let mut starts = Vec::new();
    let mut ends = 0;
    for u in 0..graph.len() {
        match out[u] as i64 - inc[u] as i64 {
            0 => {}
            1 => starts.push(u),
            -1 => ends += 1,
            _ => return None,
        }
    }
    match (starts.as_slice(), ends) {
        ([], 0) => Some((
            TrailKind::Circuit,
            (0..graph.len()).find(|&u| out[u] > 0).unwrap_or(0),
        )),
        ([s], 1) => Some((TrailKind::Path, *s)),
        _ => None,
    }
}

fn unused_edges(graph: &Graph<()>, order: EdgeOrder) -> Vec<VecDeque<usize>> {
    graph
        .adjacency()
        .into_iter()
        .map(|mut list| {
            if order == EdgeOrder::ByLabel {
                list.sort_by_key(|&(v, _, id)| (graph.label(v), id));
            }
            list.into_iter().map(|(_, _, id)| id).collect()
        })
        .collect()
}

/// Checks the trail uses every edge once, in a connected walk.
fn validate(graph: &Graph<()>, trail: &[NodeId], edges: &[usize]) -> Option<TrailKind> {
    if edges.len() != graph.edges().len() || trail.len() != edges.len() + 1 {
        return None;
    }
    let walks = edges.iter().enumerate().all(|(k, &id)| {
        let e = graph.edges()[id];
        e.u == trail[k] && e.v == trail[k + 1]
    });
    if !walks {
        return None;
    }
    Some(if trail.first() == trail.last() {
        TrailKind::Circuit
    } else {
        TrailKind::Path
    })
}

pub fn build_steps(graph: &Graph<()>, start: NodeId, order: EdgeOrder) -> EulerTrace {
    assert!(graph.is_directed(), "Hierholzer runs on directed graphs");
    assert!(start < graph.len(), "start {start} out of range");
    let label = |u: NodeId| graph.label(u);
    let mut state = EulerState {
        stack: vec![start],
        edge_stack: Vec::new(),
        unused: unused_edges(graph, order),
        trail: VecDeque::new(),
        trail_edges: VecDeque::new(),
    };
    let mut rec = Recorder::new(
        format!("Start at {}", label(start)),
        format!("{} edges to use, stack = [{}]", graph.edges().len(), label(start)),
        &state,
    );
    if graph.edges().is_empty() {
        state.stack.clear();
        state.trail.push_back(start);
        return rec.finish(
            EulerPhase::Done,
            "Nothing to walk",
            "no edges, the trail is the start node alone",
            &state,
            [Highlight::Node(start)],
            EulerResult {
                trail: vec![start],
                edges: Vec::new(),
                kind: Some(TrailKind::Circuit),
            },
        );
    }
    while let Some(&u) = state.stack.last() {
        if let Some(id) = state.unused[u].pop_front() {
            let v = graph.edges()[id].v;
            state.stack.push(v);
            state.edge_stack.push(id);
            rec.record(
                EulerPhase::Follow,
                format!("Follow {} → {}", label(u), label(v)),
                format!("{} unused edges left at {}", state.unused[u].len(), label(u)),
                &state,
                [Highlight::Edge(u, v), Highlight::Node(v)],
            );
        } else {
            state.stack.pop();
            state.trail.push_front(u);
            if let Some(id) = state.edge_stack.pop() {
                state.trail_edges.push_front(id);
            }
            rec.record(
                EulerPhase::Circuit,
                format!("{} is stuck", label(u)),
                format!("prepend it, trail has {} nodes", state.trail.len()),
                &state,
                [Highlight::Node(u)],
            );
        }
    }
    let trail: Vec<_> = state.trail.iter().copied().collect();
    let edges: Vec<_> = state.trail_edges.iter().copied().collect();
    let kind = validate(graph, &trail, &edges);
    let shown = trail.iter().map(|&u| label(u)).collect::<Vec<_>>().join(" → ");
    let highlights: Vec<_> = trail.windows(2).map(|w| Highlight::Edge(w[0], w[1])).collect();
    let result = EulerResult { trail, edges, kind };
    match kind {
        Some(kind) => rec.finish(
            EulerPhase::Done,
            match kind {
                TrailKind::Circuit => "Eulerian circuit",
                TrailKind::Path => "Eulerian path",
            },
            shown,
            &state,
            highlights,
            result,
        ),
        None => {
            log::debug!(
                "walk used {} of {} edges",
                result.edges.len(),
                graph.edges().len()
            );
            rec.finish(
                EulerPhase::Fail,
                "No Eulerian trail from here",
                format!(
                    "the walk {shown} uses {} of {} edges",
                    result.edges.len(),
                    graph.edges().len()
                ),
                &state,
                highlights,
                result,
            )
        }
    }
}

/// Two loops through node 0.
pub fn showcase() -> (Graph<()>, NodeId, EdgeOrder) {
    let g = Graph::directed(
        5,
        [(0, 1, ()), (1, 2, ()), (2, 0, ()), (0, 3, ()), (3, 4, ()), (4, 0, ())],
    );
    (g, 0, EdgeOrder::ByDestination)
}

/// Flight tickets to chain into one itinerary from JFK, lexically smallest
/// first. Airports get ids in order of first appearance.
pub fn itinerary_showcase() -> (Graph<()>, NodeId, EdgeOrder) {
    let tickets = [
        ("JFK", "SFO"),
        ("JFK", "ATL"),
        ("SFO", "ATL"),
        ("ATL", "JFK"),
        ("ATL", "SFO"),
    ];
    let mut airports: Vec<&str> = Vec::new();
    let mut id = |a: &'static str| match airports.iter().position(|&b| b == a) {
        Some(i) => i,
        None => {
            airports.push(a);
            airports.len() - 1
        }
    };
    let edges: Vec<_> = tickets
        .into_iter()
        .map(|(from, to)| (id(from), id(to), ()))
        .collect();
    let g = Graph::directed(airports.len(), edges).with_labels(airports);
    (g, 0, EdgeOrder::ByLabel)
}
