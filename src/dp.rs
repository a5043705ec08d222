//! Dynamic programming tables whose cells remember which branch of the
//! recurrence produced them.
//!
//! Every engine fills a [`Table`] in an order where each dependency is already
//! final, then reconstructs its answer by following the stored provenance
//! tags instead of re-evaluating the recurrence.

use std::fmt::{Debug, Formatter};

use derivative::Derivative;

use crate::trace::{Highlight, Phase, Recorder, Trace};

pub mod edit_distance;
pub mod interval;
pub mod lcs;
pub mod stock;

/// A filled value and the recurrence branch that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<M> {
    pub value: i64,
    pub from: M,
}

#[allow(clippy::ptr_arg)]
fn fmt_cells<M>(cells: &Vec<Vec<Option<Cell<M>>>>, f: &mut Formatter) -> std::fmt::Result {
    for row in cells {
        writeln!(f)?;
        for c in row {
            match c {
                Some(c) => write!(f, "{:>4}", c.value)?,
                None => write!(f, "{:>4}", "·")?,
            }
        }
    }
    Ok(())
}

/// Rectangular table of cells that are each written exactly once.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug(bound = ""))]
pub struct Table<M> {
    #[derivative(Debug(format_with = "fmt_cells"))]
    cells: Vec<Vec<Option<Cell<M>>>>,
}

impl<M: Copy> Table<M> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![None; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn is_filled(&self, i: usize, j: usize) -> bool {
        self.cells[i][j].is_some()
    }

    /// Panics if the cell was not filled yet.
    pub fn get(&self, i: usize, j: usize) -> Cell<M> {
        self.cells[i][j]
            .unwrap_or_else(|| panic!("cell ({i}, {j}) read before it was filled"))
    }

    pub fn value(&self, i: usize, j: usize) -> i64 {
        self.get(i, j).value
    }

    /// Panics if the cell was already filled.
    pub fn set(&mut self, i: usize, j: usize, value: i64, from: M) {
        assert!(self.cells[i][j].is_none(), "cell ({i}, {j}) filled twice");
        self.cells[i][j] = Some(Cell { value, from });
    }

    pub fn cells(&self) -> &[Vec<Option<Cell<M>>>] {
        &self.cells
    }

    /// Values only, for diffing snapshots.
    pub fn values(&self) -> Vec<Vec<Option<i64>>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.map(|c| c.value)).collect())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpState<M> {
    pub table: Table<M>,
    /// Cells walked so far by the traceback.
    pub path: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpPhase {
    Init,
    Base,
    /// Interval engines announce each diagonal before filling it.
    Gap,
    Fill,
    Traceback,
    Done,
}

impl Phase for DpPhase {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        self == Self::Done
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Base => "base",
            Self::Gap => "gap",
            Self::Fill => "fill",
            Self::Traceback => "traceback",
            Self::Done => "done",
        }
    }
}

pub type DpTrace<M, R> = Trace<DpPhase, DpState<M>, R>;

/// Recorder plus the state it snapshots, shared by every engine.
pub(crate) struct Filler<M, R> {
    pub rec: Recorder<DpPhase, DpState<M>, R>,
    pub state: DpState<M>,
}

impl<M: Copy + Debug, R> Filler<M, R> {
    pub fn new(rows: usize, cols: usize, title: &str, detail: String) -> Self {
        let state = DpState {
            table: Table::new(rows, cols),
            path: Vec::new(),
        };
        Self {
            rec: Recorder::new(title, detail, &state),
            state,
        }
    }

    /// Fills base cells in one step.
    pub fn base(
        &mut self,
        cells: impl IntoIterator<Item = (usize, usize, i64, M)>,
        detail: String,
    ) {
        let mut hl = Vec::new();
        for (i, j, value, from) in cells {
            self.state.table.set(i, j, value, from);
            hl.push(Highlight::Cell(i, j));
        }
        self.rec
            .record(DpPhase::Base, "Base cases", detail, &self.state, hl);
    }

    pub fn gap(&mut self, gap: usize, detail: String) {
        self.rec.record(
            DpPhase::Gap,
            format!("Intervals of gap {gap}"),
            detail,
            &self.state,
            [],
        );
    }

    /// Fills one cell in its own step.
    pub fn fill(&mut self, (i, j): (usize, usize), value: i64, from: M, detail: String) {
        self.state.table.set(i, j, value, from);
        self.rec.record(
            DpPhase::Fill,
            format!("dp[{i}][{j}] = {value}"),
            detail,
            &self.state,
            [Highlight::Cell(i, j)],
        );
    }

    /// Fills several cells of the same column in one step, e.g. one day of a
    /// state machine.
    pub fn fill_column(
        &mut self,
        j: usize,
        cells: impl IntoIterator<Item = (usize, i64, M)>,
        title: String,
        detail: String,
    ) {
        let mut hl = vec![Highlight::Index(j)];
        for (i, value, from) in cells {
            self.state.table.set(i, j, value, from);
            hl.push(Highlight::Cell(i, j));
        }
        self.rec
            .record(DpPhase::Fill, title, detail, &self.state, hl);
    }

    /// Provenance of a traceback cell, which is appended to the path.
    pub fn walk(&mut self, (i, j): (usize, usize)) -> M {
        let cell = self.state.table.get(i, j);
        self.state.path.push((i, j));
        self.rec.record(
            DpPhase::Traceback,
            format!("Back through dp[{i}][{j}] = {}", cell.value),
            format!("came from {:?}", cell.from),
            &self.state,
            [Highlight::Cell(i, j)],
        );
        cell.from
    }

    pub fn done(self, title: String, detail: String, result: R) -> DpTrace<M, R> {
        let hl: Vec<_> = self
            .state
            .path
            .iter()
            .map(|&(i, j)| Highlight::Cell(i, j))
            .collect();
        self.rec
            .finish(DpPhase::Done, title, detail, &self.state, hl, result)
    }
}
