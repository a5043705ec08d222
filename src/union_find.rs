//! Disjoint-set forest with path halving and union by rank.

use crate::trace::{changed_indices, Highlight, Phase, Recorder, Trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    /// n singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn parent(&self) -> &[usize] {
        &self.parent
    }

    pub fn rank(&self) -> &[usize] {
        &self.rank
    }

    /// Representative of x. Every node on the way points to its grandparent
    /// afterwards.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Representative of x without touching the forest.
    pub fn root(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets of a and b. Returns whether they were different sets.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        if self.rank[ra] == self.rank[rb] {
            self.rank[ra] += 1;
        }
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// All sets, each sorted, ordered by their smallest member.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut by_root = vec![Vec::new(); self.len()];
        for x in 0..self.len() {
            by_root[self.root(x)].push(x);
        }
        let mut groups: Vec<_> = by_root.into_iter().filter(|g| !g.is_empty()).collect();
        groups.sort();
        groups
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsuOp {
    Union(usize, usize),
    Connected(usize, usize),
}

#[derive(Debug, Clone)]
pub struct DsuInput {
    pub n: usize,
    pub ops: Vec<DsuOp>,
}

/// Eight friends merging into circles, with two membership questions.
pub fn showcase() -> DsuInput {
    use DsuOp::*;
    DsuInput {
        n: 8,
        ops: vec![
            Union(0, 1),
            Union(2, 3),
            Union(1, 3),
            Union(4, 5),
            Connected(0, 2),
            Union(0, 3),
            Union(5, 6),
            Connected(3, 6),
            Union(6, 7),
            Union(7, 2),
            Connected(0, 7),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsuPhase {
    Init,
    Union,
    Redundant,
    Query,
    Done,
}

impl Phase for DsuPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        self == Self::Done
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Union => "union",
            Self::Redundant => "redundant",
            Self::Query => "query",
            Self::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsuOutcome {
    pub groups: Vec<Vec<usize>>,
    /// One answer per Connected operation, in order.
    pub answers: Vec<bool>,
}

/// Highlights the operands and every parent/rank slot the operation touched.
fn touched(before: &UnionFind, after: &UnionFind, a: usize, b: usize) -> Vec<Highlight> {
    let mut idx = changed_indices(&before.parent, &after.parent);
    idx.extend(changed_indices(&before.rank, &after.rank));
    idx.sort();
    idx.dedup();
    [Highlight::Node(a), Highlight::Node(b)]
        .into_iter()
        .chain(idx.into_iter().map(Highlight::Index))
        .collect()
}

pub fn build_steps(input: &DsuInput) -> Trace<DsuPhase, UnionFind, DsuOutcome> {
    let mut uf = UnionFind::new(input.n);
    let mut rec = Recorder::new(
        "Start",
        format!("{} singleton sets, every node is its own root", input.n),
        &uf,
    );
    let mut answers = Vec::new();
    for &op in &input.ops {
        let before = uf.clone();
        match op {
            DsuOp::Union(a, b) => {
                let (ra, rb) = (uf.find(a), uf.find(b));
                if uf.union(a, b) {
                    let root = uf.root(a);
                    rec.record(
                        DsuPhase::Union,
                        format!("union({a}, {b})"),
                        format!(
                            "roots {ra} and {rb} differ, {} now hangs under {root} (rank {})",
                            if root == ra { rb } else { ra },
                            uf.rank[root]
                        ),
                        &uf,
                        touched(&before, &uf, a, b),
                    );
                } else {
                    rec.record(
                        DsuPhase::Redundant,
                        format!("union({a}, {b})"),
                        format!("both already have root {ra}, nothing to merge"),
                        &uf,
                        touched(&before, &uf, a, b),
                    );
                }
            }
            DsuOp::Connected(a, b) => {
                let answer = uf.connected(a, b);
                answers.push(answer);
                rec.record(
                    DsuPhase::Query,
                    format!("connected({a}, {b})"),
                    format!(
                        "find({a}) = {}, find({b}) = {}: {}",
                        uf.root(a),
                        uf.root(b),
                        if answer { "same set" } else { "different sets" }
                    ),
                    &uf,
                    touched(&before, &uf, a, b),
                );
            }
        }
    }
    let groups = uf.groups();
    rec.finish(
        DsuPhase::Done,
        "Done",
        format!("{} sets remain", groups.len()),
        &uf,
        [],
        DsuOutcome { groups, answers },
    )
}
