//! Kruskal's minimum spanning tree, and the classification of every edge as
//! critical, pseudo-critical or in no minimum spanning tree at all.
//!
//! The classifier reruns Kruskal once or twice per edge, each time on a fresh
//! [`UnionFind`]. That is O(E² log E), fine for showcase sizes. Keeping an MST
//! up to date incrementally would be the way to scale this.

use crate::{
    graph::{Edge, Graph},
    trace::{Highlight, Phase, Recorder, Trace},
    union_find::UnionFind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Free,
    /// Run as if this edge didn't exist.
    Exclude(usize),
    /// Take this edge before any other.
    Force(usize),
}

/// A spanning tree (or forest, when incomplete) as edge indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spanning {
    pub edges: Vec<usize>,
    pub cost: i64,
}

/// Edge indices by ascending weight. Equal weights keep their input order.
pub fn sorted_edges(edges: &[Edge<i64>]) -> Vec<usize> {
    let mut order: Vec<_> = (0..edges.len()).collect();
    order.sort_by_key(|&i| edges[i].w);
    order
}

/// Plain Kruskal on a fresh union-find. None if the result doesn't span all n
/// nodes, or if a forced edge is a self-loop.
pub fn kruskal(n: usize, edges: &[Edge<i64>], constraint: Constraint) -> Option<Spanning> {
    let mut uf = UnionFind::new(n);
    let mut tree = Spanning::default();
    let target = n.saturating_sub(1);
    if let Constraint::Force(f) = constraint {
        let e = edges[f];
        if !uf.union(e.u, e.v) {
            return None;
        }
        tree.edges.push(f);
        tree.cost += e.w;
    }
    for i in sorted_edges(edges) {
        if tree.edges.len() >= target {
            break;
        }
        if matches!(constraint, Constraint::Exclude(x) | Constraint::Force(x) if x == i) {
            continue;
        }
        let e = edges[i];
        if uf.union(e.u, e.v) {
            tree.edges.push(i);
            tree.cost += e.w;
        }
    }
    (tree.edges.len() == target).then_some(tree)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KruskalState {
    /// Edge indices in processing order.
    pub order: Vec<usize>,
    /// Position in `order` of the edge being looked at.
    pub cursor: Option<usize>,
    pub dsu: UnionFind,
    pub tree: Spanning,
    pub rejected: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KruskalResult {
    pub tree: Spanning,
    /// False if the edges only gave a forest.
    pub spanning: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KruskalPhase {
    Init,
    Sort,
    Accept,
    Reject,
    Done,
    Fail,
}

impl Phase for KruskalPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Fail)
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Sort => "sort",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Done => "done",
            Self::Fail => "fail",
        }
    }
}

pub type KruskalTrace = Trace<KruskalPhase, KruskalState, KruskalResult>;

fn edge_str(e: &Edge<i64>) -> String {
    format!("{}–{} ({})", e.u, e.v, e.w)
}

pub fn build_steps(graph: &Graph<i64>) -> KruskalTrace {
    let n = graph.len();
    let edges = graph.edges();
    let target = n.saturating_sub(1);
    let mut state = KruskalState {
        order: (0..edges.len()).collect(),
        cursor: None,
        dsu: UnionFind::new(n),
        tree: Spanning::default(),
        rejected: Vec::new(),
    };
    let mut rec = Recorder::new(
        "Start",
        format!("{n} nodes, {} edges, every node is its own component", edges.len()),
        &state,
    );
    if target > 0 && !edges.is_empty() {
        state.order = sorted_edges(edges);
        rec.record(
            KruskalPhase::Sort,
            "Sort edges by weight",
            state
                .order
                .iter()
                .map(|&i| edge_str(&edges[i]))
                .collect::<Vec<_>>()
                .join(", "),
            &state,
            [],
        );
        for pos in 0..state.order.len() {
            if state.tree.edges.len() == target {
                break;
            }
            let i = state.order[pos];
            let e = edges[i];
            state.cursor = Some(pos);
            if state.dsu.union(e.u, e.v) {
                state.tree.edges.push(i);
                state.tree.cost += e.w;
                rec.record(
                    KruskalPhase::Accept,
                    format!("Take {}", edge_str(&e)),
                    format!(
                        "joins two components, tree cost {} with {}/{target} edges",
                        state.tree.cost,
                        state.tree.edges.len()
                    ),
                    &state,
                    [Highlight::Edge(e.u, e.v), Highlight::Index(i)],
                );
            } else {
                state.rejected.push(i);
                rec.record(
                    KruskalPhase::Reject,
                    format!("Skip {}", edge_str(&e)),
                    format!("{} and {} are already connected, it would close a cycle", e.u, e.v),
                    &state,
                    [Highlight::Edge(e.u, e.v), Highlight::Index(i)],
                );
            }
        }
    }
    state.cursor = None;
    let spanning = state.tree.edges.len() == target;
    let result = KruskalResult {
        tree: state.tree.clone(),
        spanning,
    };
    let highlights: Vec<_> = state
        .tree
        .edges
        .iter()
        .map(|&i| Highlight::Edge(edges[i].u, edges[i].v))
        .collect();
    if spanning {
        rec.finish(
            KruskalPhase::Done,
            "Spanning tree complete",
            format!("total weight {}", state.tree.cost),
            &state,
            highlights,
            result,
        )
    } else {
        rec.finish(
            KruskalPhase::Fail,
            "Graph is disconnected",
            format!(
                "edges ran out with {}/{target} tree edges, only a forest exists",
                state.tree.edges.len()
            ),
            &state,
            highlights,
            result,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    /// In every minimum spanning tree.
    Critical,
    /// In some but not all minimum spanning trees.
    PseudoCritical,
    /// In no minimum spanning tree.
    Unused,
}

/// Classifies one edge against the base cost using fresh reruns. Also
/// returns the exclude rerun and, if it happened, the force rerun.
fn classify_edge(
    n: usize,
    edges: &[Edge<i64>],
    base: i64,
    i: usize,
) -> (EdgeClass, Option<Spanning>, Option<Spanning>) {
    let without = kruskal(n, edges, Constraint::Exclude(i));
    if without.as_ref().map_or(true, |t| t.cost > base) {
        return (EdgeClass::Critical, without, None);
    }
    let forced = kruskal(n, edges, Constraint::Force(i));
    let class = if forced.as_ref().is_some_and(|t| t.cost == base) {
        EdgeClass::PseudoCritical
    } else {
        EdgeClass::Unused
    };
    (class, without, forced)
}

/// Class of every edge, or None if the graph has no spanning tree.
pub fn classify(n: usize, edges: &[Edge<i64>]) -> Option<Vec<EdgeClass>> {
    let base = kruskal(n, edges, Constraint::Free)?.cost;
    Some(
        (0..edges.len())
            .map(|i| classify_edge(n, edges, base, i).0)
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyState {
    pub base: Option<Spanning>,
    pub current: Option<usize>,
    /// Tree found by the last rerun, None if that rerun didn't span.
    pub rerun: Option<Spanning>,
    pub classes: Vec<Option<EdgeClass>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub base_cost: Option<i64>,
    pub classes: Vec<EdgeClass>,
    pub critical: Vec<usize>,
    pub pseudo_critical: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyPhase {
    Init,
    Base,
    Exclude,
    Force,
    Done,
    Fail,
}

impl Phase for ClassifyPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Fail)
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Base => "base",
            Self::Exclude => "exclude",
            Self::Force => "force",
            Self::Done => "done",
            Self::Fail => "fail",
        }
    }
}

pub type ClassifyTrace = Trace<ClassifyPhase, ClassifyState, Classification>;

fn run_str(run: &Option<Spanning>) -> String {
    run.as_ref()
        .map_or_else(|| "no spanning tree".to_owned(), |t| format!("cost {}", t.cost))
}

pub fn classification_steps(graph: &Graph<i64>) -> ClassifyTrace {
    let n = graph.len();
    let edges = graph.edges();
    let mut state = ClassifyState {
        base: None,
        current: None,
        rerun: None,
        classes: vec![None; edges.len()],
    };
    let mut rec = Recorder::new(
        "Classify edges",
        format!("{} edges: compare reruns against the base MST cost", edges.len()),
        &state,
    );
    let Some(base) = kruskal(n, edges, Constraint::Free) else {
        return rec.finish(
            ClassifyPhase::Fail,
            "No spanning tree",
            "the graph is disconnected, no edge can be classified",
            &state,
            [],
            Classification {
                base_cost: None,
                classes: Vec::new(),
                critical: Vec::new(),
                pseudo_critical: Vec::new(),
            },
        );
    };
    let base_cost = base.cost;
    state.base = Some(base);
    if !edges.is_empty() {
        rec.record(
            ClassifyPhase::Base,
            "Base MST",
            format!("Kruskal over all edges costs {base_cost}"),
            &state,
            [],
        );
    }
    for (i, e) in edges.iter().enumerate() {
        state.current = Some(i);
        let (class, without, forced) = classify_edge(n, edges, base_cost, i);
        let hl = [Highlight::Edge(e.u, e.v), Highlight::Index(i)];
        state.rerun = without.clone();
        if class == EdgeClass::Critical {
            state.classes[i] = Some(class);
        }
        rec.record(
            ClassifyPhase::Exclude,
            format!("Without {}", edge_str(e)),
            format!(
                "{}: {}",
                run_str(&without),
                if class == EdgeClass::Critical {
                    "critical"
                } else {
                    "not critical, try forcing it"
                }
            ),
            &state,
            hl,
        );
        if class == EdgeClass::Critical {
            continue;
        }
        state.rerun = forced.clone();
        state.classes[i] = Some(class);
        rec.record(
            ClassifyPhase::Force,
            format!("Force {}", edge_str(e)),
            format!(
                "{}: {}",
                run_str(&forced),
                if class == EdgeClass::PseudoCritical {
                    "pseudo-critical"
                } else {
                    "in no minimum spanning tree"
                }
            ),
            &state,
            hl,
        );
    }
    state.current = None;
    state.rerun = None;
    let classes: Vec<EdgeClass> = state.classes.iter().flatten().copied().collect();
    let of = |c| (0..classes.len()).filter(|&i| classes[i] == c).collect::<Vec<_>>();
    let (critical, pseudo_critical) = (of(EdgeClass::Critical), of(EdgeClass::PseudoCritical));
    rec.finish(
        ClassifyPhase::Done,
        "Classified",
        format!("critical {critical:?}, pseudo-critical {pseudo_critical:?}"),
        &state,
        [],
        Classification {
            base_cost: Some(base_cost),
            classes,
            critical,
            pseudo_critical,
        },
    )
}

/// Five nodes with several equal-weight alternatives.
pub fn showcase() -> Graph<i64> {
    Graph::undirected(
        5,
        [
            (0, 1, 1),
            (1, 2, 1),
            (2, 3, 2),
            (0, 3, 2),
            (0, 4, 3),
            (3, 4, 3),
            (1, 4, 6),
        ],
    )
}
