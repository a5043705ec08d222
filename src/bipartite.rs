//! BFS two-colouring with odd cycle detection.

use std::collections::VecDeque;

use crate::{
    graph::{Graph, NodeId},
    trace::{Highlight, Phase, Recorder, Trace},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorState {
    pub colors: Vec<Option<Color>>,
    pub queue: VecDeque<NodeId>,
    pub current: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bipartition {
    Bipartite {
        colors: Vec<Color>,
    },
    /// Colouring stopped at an edge whose endpoints got the same colour.
    OddCycle {
        edge: (NodeId, NodeId),
        colors: Vec<Option<Color>>,
    },
}

impl Bipartition {
    pub fn is_bipartite(&self) -> bool {
        matches!(self, Self::Bipartite { .. })
    }

    /// Red and blue classes, each in id order.
    pub fn sides(&self) -> Option<[Vec<NodeId>; 2]> {
        let Self::Bipartite { colors } = self else {
            return None;
        };
        let side = |c: Color| -> Vec<NodeId> {
            (0..colors.len()).filter(|&u| colors[u] == c).collect()
        };
        Some([side(Color::Red), side(Color::Blue)])
    }
}

/// Whether no edge joins two nodes of the same colour.
pub fn is_valid_coloring<W: Copy + std::fmt::Debug>(graph: &Graph<W>, colors: &[Color]) -> bool {
    colors.len() == graph.len() && graph.edges().iter().all(|e| colors[e.u] != colors[e.v])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPhase {
    Init,
    /// BFS restarted from an uncoloured node.
    Start,
    Dequeue,
    Color,
    Conflict,
    Done,
}

impl Phase for ColorPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        matches!(self, Self::Conflict | Self::Done)
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Start => "start",
            Self::Dequeue => "dequeue",
            Self::Color => "color",
            Self::Conflict => "conflict",
            Self::Done => "done",
        }
    }
}

pub type ColorTrace = Trace<ColorPhase, ColorState, Bipartition>;

pub fn build_steps(graph: &Graph<()>) -> ColorTrace {
    assert!(!graph.is_directed(), "two-colouring needs an undirected graph");
    let n = graph.len();
    let label = |u: NodeId| graph.label(u);
    let adj = graph.neighbours();
    let mut state = ColorState {
        colors: vec![None; n],
        queue: VecDeque::new(),
        current: None,
    };
    let mut rec = Recorder::new(
        "Nothing coloured",
        format!("{n} nodes, {} edges", graph.edges().len()),
        &state,
    );
    for s in 0..n {
        if state.colors[s].is_some() {
            continue;
        }
        state.colors[s] = Some(Color::Red);
        state.queue.push_back(s);
        state.current = None;
        rec.record(
            ColorPhase::Start,
            format!("Start at {}", label(s)),
            format!("{} is uncoloured, paint it red", label(s)),
            &state,
            [Highlight::Node(s)],
        );
        while let Some(u) = state.queue.pop_front() {
            state.current = Some(u);
            let cu = state.colors[u].unwrap_or_else(|| unreachable!("queued nodes are coloured"));
            rec.record(
                ColorPhase::Dequeue,
                format!("Dequeue {}", label(u)),
                format!("{} is {cu:?}, look at {:?}", label(u), adj[u]),
                &state,
                [Highlight::Node(u)],
            );
            for &v in &adj[u] {
                match state.colors[v] {
                    None => {
                        let cv = cu.opposite();
                        state.colors[v] = Some(cv);
                        state.queue.push_back(v);
                        rec.record(
                            ColorPhase::Color,
                            format!("Paint {} {cv:?}", label(v)),
                            format!("opposite of {}", label(u)),
                            &state,
                            [Highlight::Edge(u, v), Highlight::Node(v)],
                        );
                    }
                    Some(cv) if cv == cu => {
                        log::debug!("odd cycle through edge ({u}, {v})");
                        return rec.finish(
                            ColorPhase::Conflict,
                            format!("Conflict on {} – {}", label(u), label(v)),
                            format!("both ends are {cu:?}, the graph has an odd cycle"),
                            &state,
                            [Highlight::Edge(u, v), Highlight::Node(u), Highlight::Node(v)],
                            Bipartition::OddCycle {
                                edge: (u, v),
                                colors: state.colors.clone(),
                            },
                        );
                    }
                    Some(_) => {}
                }
            }
        }
    }
    state.current = None;
    let colors: Vec<_> = state.colors.iter().flatten().copied().collect();
    let reds = colors.iter().filter(|&&c| c == Color::Red).count();
    rec.finish(
        ColorPhase::Done,
        "Bipartite",
        format!("{reds} red and {} blue nodes", n - reds),
        &state,
        [],
        Bipartition::Bipartite { colors },
    )
}

/// Six-cycle with one even chord.
pub fn showcase() -> Graph<()> {
    Graph::undirected(
        6,
        [
            (0, 1, ()),
            (1, 2, ()),
            (2, 3, ()),
            (3, 4, ()),
            (4, 5, ()),
            (5, 0, ()),
            (0, 3, ()),
        ],
    )
}

/// Five-cycle, so colouring must fail.
pub fn odd_cycle_showcase() -> Graph<()> {
    Graph::undirected(
        5,
        [(0, 1, ()), (1, 2, ()), (2, 3, ()), (3, 4, ()), (4, 0, ())],
    )
}
