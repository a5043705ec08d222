//! Recorded executions.
//!
//! Every engine in this crate produces a [`Trace`]: an ordered list of
//! [`Step`]s, each holding its own copy of the engine state at that point.
//! Steps are built through a [`Recorder`], which is append-only, and the trace
//! it yields has no way to mutate them afterwards. Playback is done by a
//! [`Player`], which only moves an index around.

use std::fmt::{Debug, Display, Formatter};

/// Phase tag of a step. Each engine family has its own closed set of phases.
pub trait Phase: Debug + Copy + Eq {
    /// Phase of the first step of every trace.
    const INIT: Self;
    /// Whether a trace ends on this phase.
    fn is_terminal(self) -> bool;
    /// Lowercase name used in narration.
    fn name(self) -> &'static str;
}

/// What the renderer should draw attention to. These are hints only, the same
/// information can be recovered by diffing consecutive snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Highlight {
    Node(usize),
    Edge(usize, usize),
    Cell(usize, usize),
    Index(usize),
}

/// One snapshot of an execution.
#[derive(Debug, Clone)]
pub struct Step<P, S, R> {
    title: String,
    detail: String,
    phase: P,
    state: S,
    highlights: Vec<Highlight>,
    /// Only set on the terminal step.
    result: Option<R>,
}

impl<P: Phase, S, R> Step<P, S, R> {
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn detail(&self) -> &str {
        &self.detail
    }
    pub fn phase(&self) -> P {
        self.phase
    }
    /// Copy of the engine state taken when this step was recorded.
    pub fn state(&self) -> &S {
        &self.state
    }
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }
    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }
    /// Highlighted table cells, in recording order.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        self.highlights
            .iter()
            .filter_map(|h| match *h {
                Highlight::Cell(i, j) => Some((i, j)),
                _ => None,
            })
            .collect()
    }
    /// Highlighted array indices, in recording order.
    pub fn indices(&self) -> Vec<usize> {
        self.highlights
            .iter()
            .filter_map(|h| match *h {
                Highlight::Index(i) => Some(i),
                _ => None,
            })
            .collect()
    }
    /// Highlighted nodes, in recording order.
    pub fn nodes(&self) -> Vec<usize> {
        self.highlights
            .iter()
            .filter_map(|h| match *h {
                Highlight::Node(u) => Some(u),
                _ => None,
            })
            .collect()
    }
}

impl<P: Phase, S, R> Display for Step<P, S, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase.name(), self.title)?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

fn unfinished_panic() -> ! {
    panic!("trace was built without a terminal step")
}

/// Finite, read-only sequence of steps. The first step is always the init
/// phase and the last one is always terminal and carries the result.
#[derive(Debug, Clone)]
pub struct Trace<P, S, R> {
    steps: Vec<Step<P, S, R>>,
}

impl<P: Phase, S, R> Trace<P, S, R> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    /// Never true for a trace produced by a [`Recorder`].
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    pub fn steps(&self) -> &[Step<P, S, R>] {
        &self.steps
    }
    pub fn get(&self, k: usize) -> Option<&Step<P, S, R>> {
        self.steps.get(k)
    }
    pub fn first(&self) -> &Step<P, S, R> {
        &self.steps[0]
    }
    pub fn last(&self) -> &Step<P, S, R> {
        &self.steps[self.steps.len() - 1]
    }
    /// Result stored on the terminal step.
    pub fn result(&self) -> &R {
        self.last()
            .result
            .as_ref()
            .unwrap_or_else(|| unfinished_panic())
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Step<P, S, R>> {
        self.steps.iter()
    }
    pub fn phases(&self) -> impl Iterator<Item = P> + '_ {
        self.steps.iter().map(|s| s.phase)
    }
    /// Number of steps with the given phase.
    pub fn count(&self, phase: P) -> usize {
        self.phases().filter(|&p| p == phase).count()
    }
    pub fn player(&self) -> Player<'_, P, S, R> {
        Player::new(self)
    }
}

impl<'a, P, S, R> IntoIterator for &'a Trace<P, S, R> {
    type Item = &'a Step<P, S, R>;
    type IntoIter = std::slice::Iter<'a, Step<P, S, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Append-only builder for a [`Trace`].
///
/// Every recorded state is cloned, so later mutations of the live structures
/// never show up in earlier steps.
#[derive(Debug)]
pub struct Recorder<P, S, R> {
    steps: Vec<Step<P, S, R>>,
}

impl<P: Phase, S: Clone, R> Recorder<P, S, R> {
    /// Starts a trace with its init step.
    pub fn new(title: impl Into<String>, detail: impl Into<String>, state: &S) -> Self {
        let mut rec = Self { steps: Vec::new() };
        rec.push(P::INIT, title.into(), detail.into(), state, Vec::new(), None);
        rec
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Appends a non-terminal step.
    pub fn record(
        &mut self,
        phase: P,
        title: impl Into<String>,
        detail: impl Into<String>,
        state: &S,
        highlights: impl IntoIterator<Item = Highlight>,
    ) {
        assert!(
            !phase.is_terminal(),
            "{phase:?} ends a trace, use Recorder::finish"
        );
        assert!(phase != P::INIT, "only the first step may be {phase:?}");
        let highlights = highlights.into_iter().collect();
        self.push(phase, title.into(), detail.into(), state, highlights, None);
    }

    /// Appends the terminal step and seals the trace.
    pub fn finish(
        mut self,
        phase: P,
        title: impl Into<String>,
        detail: impl Into<String>,
        state: &S,
        highlights: impl IntoIterator<Item = Highlight>,
        result: R,
    ) -> Trace<P, S, R> {
        assert!(phase.is_terminal(), "{phase:?} cannot end a trace");
        let highlights = highlights.into_iter().collect();
        self.push(
            phase,
            title.into(),
            detail.into(),
            state,
            highlights,
            Some(result),
        );
        log::debug!(
            "trace finished on '{}' after {} steps",
            phase.name(),
            self.steps.len()
        );
        Trace { steps: self.steps }
    }

    fn push(
        &mut self,
        phase: P,
        title: String,
        detail: String,
        state: &S,
        highlights: Vec<Highlight>,
        result: Option<R>,
    ) {
        log::trace!("step {} [{}] {}", self.steps.len(), phase.name(), title);
        self.steps.push(Step {
            title,
            detail,
            phase,
            state: state.clone(),
            highlights,
            result,
        });
    }
}

/// Playback cursor over a trace. It never re-runs anything, it only moves
/// between recorded steps.
#[derive(Debug)]
pub struct Player<'a, P, S, R> {
    trace: &'a Trace<P, S, R>,
    index: usize,
}

impl<'a, P: Phase, S, R> Player<'a, P, S, R> {
    pub fn new(trace: &'a Trace<P, S, R>) -> Self {
        Self { trace, index: 0 }
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn current(&self) -> &'a Step<P, S, R> {
        &self.trace.steps[self.index]
    }
    pub fn at_start(&self) -> bool {
        self.index == 0
    }
    pub fn at_end(&self) -> bool {
        self.index + 1 == self.trace.len()
    }
    /// Moves one step forward. Returns false if already at the end.
    pub fn forward(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.index += 1;
        true
    }
    /// Moves one step back. Returns false if already at the start.
    pub fn back(&mut self) -> bool {
        if self.at_start() {
            return false;
        }
        self.index -= 1;
        true
    }
    /// Jumps to step k, clamped to the last step.
    pub fn seek(&mut self, k: usize) -> &'a Step<P, S, R> {
        self.index = k.min(self.trace.len() - 1);
        self.current()
    }
}

/// Positions where two snapshots of an array differ.
pub fn changed_indices<T: PartialEq>(before: &[T], after: &[T]) -> Vec<usize> {
    assert_eq!(before.len(), after.len(), "snapshots of different sizes");
    (0..before.len())
        .filter(|&i| before[i] != after[i])
        .collect()
}

/// Cells where two snapshots of a table differ, in row-major order.
pub fn changed_cells<T: PartialEq>(before: &[Vec<T>], after: &[Vec<T>]) -> Vec<(usize, usize)> {
    assert_eq!(before.len(), after.len(), "snapshots of different sizes");
    before
        .iter()
        .zip(after)
        .enumerate()
        .flat_map(|(i, (b, a))| changed_indices(b, a).into_iter().map(move |j| (i, j)))
        .collect()
}
