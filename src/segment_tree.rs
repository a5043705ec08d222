//! Array-backed segment tree over any associative [`AggregatedData`].
//!
//! Node 1 is the root and covers the whole array, node u has children 2u and
//! 2u + 1. The backing array has 4n slots. Build, query and update report
//! every node they touch to an observer, which is how the traced showcase
//! records its steps without a second copy of the algorithm.

use std::fmt::{Debug, Formatter};
use std::ops::{Range, RangeBounds};

use debug_tree::{add_branch_to, add_leaf_to, AsTree, TreeBuilder};
use derivative::Derivative;

use crate::trace::{Highlight, Phase, Recorder, Trace};

pub trait AggregatedData: Debug + Clone + Default + PartialEq {
    type Data: Debug + Clone + PartialEq;
    /// Create aggregated data from a single data item
    fn from(data: &Self::Data) -> Self;
    /// Merge two aggregated data items. The other item contains data of the
    /// items immediately to the right. Must be associative, and `default()`
    /// must be its identity.
    fn merge(self, right: Self) -> Self;
}

/// Range sum, identity 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum(pub i64);

impl AggregatedData for Sum {
    type Data = i64;
    fn from(data: &i64) -> Self {
        Self(*data)
    }
    fn merge(self, right: Self) -> Self {
        Self(self.0 + right.0)
    }
}

/// Range minimum, identity +∞ (`i64::MAX`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Min(pub i64);

impl Default for Min {
    fn default() -> Self {
        Self(i64::MAX)
    }
}

impl AggregatedData for Min {
    type Data = i64;
    fn from(data: &i64) -> Self {
        Self(*data)
    }
    fn merge(self, right: Self) -> Self {
        Self(self.0.min(right.0))
    }
}

fn range_to_lr(range: impl RangeBounds<usize>, len: usize) -> [usize; 2] {
    use std::ops::Bound::*;
    let start = match range.start_bound() {
        Included(start) => *start,
        Excluded(start) => *start + 1,
        Unbounded => 0,
    };
    let end = match range.end_bound() {
        Included(end) => *end + 1,
        Excluded(end) => *end,
        Unbounded => len,
    };
    [start, end]
}

/// How a node's range relates to the queried range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cover {
    Disjoint,
    Inside,
    /// Overlaps without being contained, so both children are visited.
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The node's value was (re)computed. `changed` is false when the new
    /// value equals the one it replaced.
    Set { changed: bool },
    Visit(Cover),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEvent {
    pub node: usize,
    /// Inclusive range covered by the node.
    pub range: (usize, usize),
    pub kind: EventKind,
}

impl TreeEvent {
    /// Root is at depth 0.
    pub fn depth(&self) -> u32 {
        usize::BITS - 1 - self.node.leading_zeros()
    }
}

#[derive(Clone, PartialEq)]
pub struct SegmentTree<Ag: AggregatedData> {
    n: usize,
    tree: Vec<Ag>,
}

impl<Ag: AggregatedData> Debug for SegmentTree<Ag> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        let _b = builder.add_branch("SegmentTree");
        if self.n > 0 {
            self.tree_dbg(1, 0, self.n - 1, &builder);
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<Ag: AggregatedData> SegmentTree<Ag> {
    fn tree_dbg<T: AsTree>(&self, node: usize, s: usize, e: usize, tree: &T) {
        let agg = &self.tree[node];
        if s == e {
            add_leaf_to!(*tree, "[{s}] {agg:?}");
            return;
        }
        add_branch_to!(*tree, "[{s}..={e}] {agg:?}");
        let m = (s + e) / 2;
        self.tree_dbg(2 * node, s, m, tree);
        self.tree_dbg(2 * node + 1, m + 1, e, tree);
    }

    /// Tree over n items with every slot at the identity.
    fn empty(n: usize) -> Self {
        Self {
            n,
            tree: vec![Ag::default(); 4 * n],
        }
    }

    pub fn new(data: &[Ag::Data]) -> Self {
        Self::build_with(data, |_, _| {})
    }

    /// Builds the tree, reporting each node once its value is final.
    pub fn build_with(data: &[Ag::Data], mut on: impl FnMut(&Self, TreeEvent)) -> Self {
        let mut t = Self::empty(data.len());
        if !data.is_empty() {
            t.build_rec(data, 1, 0, data.len() - 1, &mut on);
        }
        t
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The 4n backing slots. Slot 0 is never used.
    pub fn nodes(&self) -> &[Ag] {
        &self.tree
    }

    /// Aggregate of the whole array.
    pub fn total(&self) -> Ag {
        self.tree.get(1).cloned().unwrap_or_default()
    }

    pub fn query(&self, range: impl RangeBounds<usize>) -> Ag {
        self.query_with(range, |_, _| {})
    }

    /// Aggregate of the items in range, reporting every visited node.
    /// Panics if the range ends past the array.
    pub fn query_with(
        &self,
        range: impl RangeBounds<usize>,
        mut on: impl FnMut(&Self, TreeEvent),
    ) -> Ag {
        let [l, r] = range_to_lr(range, self.n);
        assert!(r <= self.n, "query end {r} past length {}", self.n);
        if l >= r {
            return Ag::default();
        }
        self.query_rec(1, 0, self.n - 1, l, r - 1, &mut on)
    }

    pub fn update(&mut self, idx: usize, data: &Ag::Data) {
        self.update_with(idx, data, |_, _| {})
    }

    /// Sets item idx and recomputes its ancestors, reporting the leaf first
    /// and then each ancestor on the way up.
    pub fn update_with(
        &mut self,
        idx: usize,
        data: &Ag::Data,
        mut on: impl FnMut(&Self, TreeEvent),
    ) {
        assert!(idx < self.n, "index {idx} out of range for {}", self.n);
        self.update_rec(1, 0, self.n - 1, idx, data, &mut on);
    }

    /// Stores a node's value and reports it.
    fn write(
        &mut self,
        node: usize,
        value: Ag,
        range: (usize, usize),
        on: &mut impl FnMut(&Self, TreeEvent),
    ) {
        let changed = self.tree[node] != value;
        self.tree[node] = value;
        on(self, TreeEvent {
            node,
            range,
            kind: EventKind::Set { changed },
        });
    }

    fn pull(&mut self, node: usize, range: (usize, usize), on: &mut impl FnMut(&Self, TreeEvent)) {
        let value = self.tree[2 * node]
            .clone()
            .merge(self.tree[2 * node + 1].clone());
        self.write(node, value, range, on);
    }

    fn build_rec(
        &mut self,
        data: &[Ag::Data],
        node: usize,
        s: usize,
        e: usize,
        on: &mut impl FnMut(&Self, TreeEvent),
    ) {
        if s == e {
            self.write(node, Ag::from(&data[s]), (s, e), on);
        } else {
            let m = (s + e) / 2;
            self.build_rec(data, 2 * node, s, m, on);
            self.build_rec(data, 2 * node + 1, m + 1, e, on);
            self.pull(node, (s, e), on);
        }
    }

    fn query_rec(
        &self,
        node: usize,
        s: usize,
        e: usize,
        l: usize,
        r: usize,
        on: &mut impl FnMut(&Self, TreeEvent),
    ) -> Ag {
        let visit = |cover| TreeEvent {
            node,
            range: (s, e),
            kind: EventKind::Visit(cover),
        };
        if r < s || e < l {
            on(self, visit(Cover::Disjoint));
            return Ag::default();
        }
        if l <= s && e <= r {
            on(self, visit(Cover::Inside));
            return self.tree[node].clone();
        }
        on(self, visit(Cover::Partial));
        let m = (s + e) / 2;
        let left = self.query_rec(2 * node, s, m, l, r, on);
        let right = self.query_rec(2 * node + 1, m + 1, e, l, r, on);
        left.merge(right)
    }

    fn update_rec(
        &mut self,
        node: usize,
        s: usize,
        e: usize,
        idx: usize,
        data: &Ag::Data,
        on: &mut impl FnMut(&Self, TreeEvent),
    ) {
        if s == e {
            self.write(node, Ag::from(data), (s, e), on);
        } else {
            let m = (s + e) / 2;
            if idx <= m {
                self.update_rec(2 * node, s, m, idx, data, on);
            } else {
                self.update_rec(2 * node + 1, m + 1, e, idx, data, on);
            }
            self.pull(node, (s, e), on);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOp<D> {
    Query(Range<usize>),
    Update(usize, D),
}

#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct SegmentInput<Ag: AggregatedData> {
    pub data: Vec<Ag::Data>,
    pub ops: Vec<SegmentOp<Ag::Data>>,
}

#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""), PartialEq(bound = ""))]
pub struct SegState<Ag: AggregatedData> {
    pub data: Vec<Ag::Data>,
    pub tree: SegmentTree<Ag>,
    /// Last event, if any.
    pub event: Option<TreeEvent>,
}

#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""), PartialEq(bound = ""))]
pub struct SegResult<Ag: AggregatedData> {
    /// One answer per query, in order.
    pub answers: Vec<Ag>,
    pub data: Vec<Ag::Data>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegPhase {
    Init,
    Build,
    Visit,
    Answer,
    Update,
    Done,
}

impl Phase for SegPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        self == Self::Done
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Build => "build",
            Self::Visit => "visit",
            Self::Answer => "answer",
            Self::Update => "update",
            Self::Done => "done",
        }
    }
}

pub type SegTrace<Ag> = Trace<SegPhase, SegState<Ag>, SegResult<Ag>>;

fn snapshot<Ag: AggregatedData>(
    data: &[Ag::Data],
    t: &SegmentTree<Ag>,
    ev: TreeEvent,
) -> SegState<Ag> {
    SegState {
        data: data.to_vec(),
        tree: t.clone(),
        event: Some(ev),
    }
}

/// Only a write that changed the slot is highlighted.
fn written(ev: TreeEvent) -> Option<Highlight> {
    (ev.kind == EventKind::Set { changed: true }).then_some(Highlight::Index(ev.node))
}

fn range_str((s, e): (usize, usize)) -> String {
    if s == e {
        format!("[{s}]")
    } else {
        format!("[{s}..={e}]")
    }
}

pub fn build_steps<Ag: AggregatedData>(input: &SegmentInput<Ag>) -> SegTrace<Ag> {
    let mut data = input.data.clone();
    let n = data.len();
    let mut state = SegState {
        data: data.clone(),
        tree: SegmentTree::empty(n),
        event: None,
    };
    let mut rec = Recorder::new(
        "Input array",
        format!("{n} items, {} operations", input.ops.len()),
        &state,
    );
    let mut answers = Vec::new();
    if n == 0 {
        answers = input
            .ops
            .iter()
            .filter(|op| matches!(op, SegmentOp::Query(_)))
            .map(|_| Ag::default())
            .collect();
        return rec.finish(
            SegPhase::Done,
            "Empty array",
            "every query is the identity",
            &state,
            [],
            SegResult { answers, data },
        );
    }
    state.tree = SegmentTree::build_with(&data, |t, ev| {
        rec.record(
            SegPhase::Build,
            format!("Node {} {}", ev.node, range_str(ev.range)),
            format!("holds {:?}", t.tree[ev.node]),
            &snapshot(&data, t, ev),
            written(ev),
        );
    });
    for op in &input.ops {
        match op {
            SegmentOp::Query(range) => {
                let mut used = Vec::new();
                let agg = state.tree.query_with(range.clone(), |t, ev| {
                    let EventKind::Visit(cover) = ev.kind else {
                        return;
                    };
                    let detail = match cover {
                        Cover::Disjoint => "disjoint, contributes the identity".to_owned(),
                        Cover::Inside => {
                            used.push(ev.node);
                            format!("fully inside, contributes {:?}", t.tree[ev.node])
                        }
                        Cover::Partial => "partial overlap, split into both children".to_owned(),
                    };
                    rec.record(
                        SegPhase::Visit,
                        format!(
                            "query {range:?}: node {} {}",
                            ev.node,
                            range_str(ev.range)
                        ),
                        detail,
                        &snapshot(&data, t, ev),
                        [Highlight::Index(ev.node)],
                    );
                });
                state.event = None;
                rec.record(
                    SegPhase::Answer,
                    format!("query {range:?} = {agg:?}"),
                    format!("merged from nodes {used:?}"),
                    &state,
                    used.iter().map(|&u| Highlight::Index(u)),
                );
                answers.push(agg);
            }
            SegmentOp::Update(idx, value) => {
                data[*idx] = value.clone();
                state.data = data.clone();
                state.tree.update_with(*idx, value, |t, ev| {
                    rec.record(
                        SegPhase::Update,
                        format!("update [{idx}] = {value:?}: node {}", ev.node),
                        format!("{} now holds {:?}", range_str(ev.range), t.tree[ev.node]),
                        &snapshot(&data, t, ev),
                        written(ev),
                    );
                });
                state.event = None;
            }
        }
    }
    rec.finish(
        SegPhase::Done,
        "Done",
        format!("answers {answers:?}"),
        &state,
        [],
        SegResult { answers, data },
    )
}

/// Range sums with one point update in between.
pub fn sum_showcase() -> SegmentInput<Sum> {
    use SegmentOp::*;
    SegmentInput {
        data: vec![1, 3, 5, 7, 9, 11],
        ops: vec![Query(1..4), Update(1, 10), Query(1..4), Query(0..6)],
    }
}

/// Range minimums over the same machinery.
pub fn min_showcase() -> SegmentInput<Min> {
    use SegmentOp::*;
    SegmentInput {
        data: vec![5, 2, 8, 1, 9, 3],
        ops: vec![Query(0..3), Query(2..6), Update(3, 7), Query(2..6)],
    }
}
