//! Floyd-Warshall over a pluggable path algebra.
//!
//! The same triple loop computes shortest distances (min/+), transitive
//! closure (or/and) and ratio propagation (first known product). Every
//! improving relaxation becomes its own step.

use std::fmt::{Debug, Formatter};

use derivative::Derivative;

use super::Dist;
use crate::{
    graph::{Graph, NodeId},
    trace::{Highlight, Phase, Recorder, Trace},
};

/// How path values are built and compared.
pub trait PathAlgebra {
    /// Weight stored on graph edges.
    type Weight: Copy + Debug;
    /// Value stored in the all-pairs matrix.
    type Value: Clone + PartialEq + Debug;
    /// Value of a pair with no known path.
    fn absent() -> Self::Value;
    /// Value of the empty path from a node to itself.
    fn identity() -> Self::Value;
    fn from_weight(w: Self::Weight) -> Self::Value;
    /// Value of walking a and then b.
    fn extend(a: &Self::Value, b: &Self::Value) -> Self::Value;
    /// Whether candidate should replace current.
    fn improves(candidate: &Self::Value, current: &Self::Value) -> bool;
    fn show(v: &Self::Value) -> String;
}

/// Shortest distances.
#[derive(Debug, Clone, Copy)]
pub struct MinPlus;

impl PathAlgebra for MinPlus {
    type Weight = i64;
    type Value = Dist;
    fn absent() -> Dist {
        Dist::Infinite
    }
    fn identity() -> Dist {
        Dist::Finite(0)
    }
    fn from_weight(w: i64) -> Dist {
        Dist::Finite(w)
    }
    fn extend(a: &Dist, b: &Dist) -> Dist {
        match b {
            Dist::Finite(w) => a.plus(*w),
            Dist::Infinite => Dist::Infinite,
        }
    }
    fn improves(candidate: &Dist, current: &Dist) -> bool {
        candidate < current
    }
    fn show(v: &Dist) -> String {
        v.to_string()
    }
}

/// Transitive closure. Edge weights carry no information.
#[derive(Debug, Clone, Copy)]
pub struct Reachability;

impl PathAlgebra for Reachability {
    type Weight = ();
    type Value = bool;
    fn absent() -> bool {
        false
    }
    fn identity() -> bool {
        true
    }
    fn from_weight(_: ()) -> bool {
        true
    }
    fn extend(a: &bool, b: &bool) -> bool {
        *a && *b
    }
    fn improves(candidate: &bool, current: &bool) -> bool {
        *candidate && !*current
    }
    fn show(v: &bool) -> String {
        u8::from(*v).to_string()
    }
}

/// Ratio propagation: an edge u → v with weight w means u / v = w. Weights
/// must be positive. A known ratio is never replaced.
#[derive(Debug, Clone, Copy)]
pub struct RatioProduct;

impl PathAlgebra for RatioProduct {
    type Weight = f64;
    type Value = Option<f64>;
    fn absent() -> Option<f64> {
        None
    }
    fn identity() -> Option<f64> {
        Some(1.0)
    }
    fn from_weight(w: f64) -> Option<f64> {
        assert!(w > 0.0, "ratios must be positive, got {w}");
        Some(w)
    }
    fn extend(a: &Option<f64>, b: &Option<f64>) -> Option<f64> {
        Some((*a)? * (*b)?)
    }
    fn improves(candidate: &Option<f64>, current: &Option<f64>) -> bool {
        candidate.is_some() && current.is_none()
    }
    fn show(v: &Option<f64>) -> String {
        v.map_or_else(|| "?".to_owned(), |r| format!("{r:.3}"))
    }
}

#[allow(clippy::ptr_arg)]
fn fmt_matrix<V: Debug>(m: &Vec<Vec<V>>, f: &mut Formatter) -> std::fmt::Result {
    for row in m {
        writeln!(f)?;
        for v in row {
            write!(f, "{v:?} ")?;
        }
    }
    Ok(())
}

#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug(bound = "V: Debug"))]
pub struct FwState<V> {
    /// Intermediate node of the current round.
    pub k: Option<NodeId>,
    #[derivative(Debug(format_with = "fmt_matrix"))]
    pub dist: Vec<Vec<V>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FwResult<V> {
    pub dist: Vec<Vec<V>>,
    /// Number of improving relaxations.
    pub relaxations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FwPhase {
    Init,
    Round,
    Relax,
    Done,
}

impl Phase for FwPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        self == Self::Done
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Round => "round",
            Self::Relax => "relax",
            Self::Done => "done",
        }
    }
}

pub type FwTrace<A> = Trace<
    FwPhase,
    FwState<<A as PathAlgebra>::Value>,
    FwResult<<A as PathAlgebra>::Value>,
>;

/// Matrix before any relaxation: identity on the diagonal, the best edge
/// value where an edge exists and absent elsewhere.
pub fn initial_matrix<A: PathAlgebra>(graph: &Graph<A::Weight>) -> Vec<Vec<A::Value>> {
    let n = graph.len();
    let mut dist = vec![vec![A::absent(); n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = A::identity();
    }
    for e in graph.edges() {
        let w = A::from_weight(e.w);
        let mut pairs = vec![(e.u, e.v)];
        if !graph.is_directed() {
            pairs.push((e.v, e.u));
        }
        for (a, b) in pairs {
            if a != b && A::improves(&w, &dist[a][b]) {
                dist[a][b] = w.clone();
            }
        }
    }
    dist
}

pub fn build_steps<A: PathAlgebra>(graph: &Graph<A::Weight>) -> FwTrace<A> {
    let n = graph.len();
    let mut state = FwState {
        k: None,
        dist: initial_matrix::<A>(graph),
    };
    let mut rec = Recorder::new(
        "Initial matrix",
        format!(
            "{n} nodes, {} edges: diagonal is the identity, edges give direct values",
            graph.edges().len()
        ),
        &state,
    );
    let mut relaxations = 0;
    if n >= 3 && !graph.edges().is_empty() {
        for k in 0..n {
            state.k = Some(k);
            rec.record(
                FwPhase::Round,
                format!("Round k = {}", graph.label(k)),
                format!("try every path that passes through {}", graph.label(k)),
                &state,
                [Highlight::Node(k)],
            );
            for i in (0..n).filter(|&i| i != k) {
                for j in (0..n).filter(|&j| j != k && j != i) {
                    let candidate = A::extend(&state.dist[i][k], &state.dist[k][j]);
                    if !A::improves(&candidate, &state.dist[i][j]) {
                        continue;
                    }
                    let old = std::mem::replace(&mut state.dist[i][j], candidate);
                    relaxations += 1;
                    rec.record(
                        FwPhase::Relax,
                        format!(
                            "{} → {} → {}",
                            graph.label(i),
                            graph.label(k),
                            graph.label(j)
                        ),
                        format!(
                            "dist[{i}][{j}] {} → {} ({} via {})",
                            A::show(&old),
                            A::show(&state.dist[i][j]),
                            A::show(&state.dist[i][k]),
                            A::show(&state.dist[k][j]),
                        ),
                        &state,
                        [
                            Highlight::Cell(i, j),
                            Highlight::Node(i),
                            Highlight::Node(k),
                            Highlight::Node(j),
                        ],
                    );
                }
            }
        }
    }
    state.k = None;
    let dist = state.dist.clone();
    rec.finish(
        FwPhase::Done,
        "All pairs settled",
        format!("{relaxations} relaxations improved the matrix"),
        &state,
        [],
        FwResult { dist, relaxations },
    )
}

/// Four cities with one-way roads.
pub fn showcase() -> Graph<i64> {
    Graph::directed(
        4,
        [
            (0, 1, 3),
            (0, 3, 7),
            (1, 0, 8),
            (1, 2, 2),
            (2, 0, 5),
            (2, 3, 1),
            (3, 0, 2),
        ],
    )
}

/// Prerequisite chains; node 4 is reachable from 3 only.
pub fn closure_showcase() -> Graph<()> {
    Graph::directed(5, [(0, 1, ()), (1, 2, ()), (2, 0, ()), (2, 3, ()), (3, 4, ())])
}

/// a / b = 2, b / c = 3, d / e = 0.5, with both directions of each equation.
pub fn ratio_showcase() -> Graph<f64> {
    let equations = [(0, 1, 2.0), (1, 2, 3.0), (3, 4, 0.5)];
    Graph::directed(
        5,
        equations
            .into_iter()
            .flat_map(|(u, v, r)| [(u, v, r), (v, u, 1.0 / r)]),
    )
    .with_labels(["a", "b", "c", "d", "e"])
}
