use algo_replay::{
    trace::{changed_cells, changed_indices},
    Highlight, Phase, Recorder, Trace,
};
use common::init_logger;

mod common;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    Init,
    Bump,
    Done,
}

impl Phase for Count {
    const INIT: Self = Self::Init;
    fn is_terminal(self) -> bool {
        self == Self::Done
    }
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Bump => "bump",
            Self::Done => "done",
        }
    }
}

/// Bumps one slot per step.
fn counting(n: usize) -> Trace<Count, Vec<i32>, i32> {
    let mut live = vec![0; n];
    let mut rec = Recorder::new("zeros", "", &live);
    for i in 0..n {
        live[i] += i as i32 + 1;
        rec.record(Count::Bump, format!("bump {i}"), "", &live, [Highlight::Index(i)]);
    }
    let total: i32 = live.iter().sum();
    live.clear();
    rec.finish(Count::Done, "total", format!("{total}"), &live, [], total)
}

#[test]
fn test_recorder_counts_steps() {
    let mut rec = Recorder::new("start", "", &vec![0]);
    assert_eq!(rec.len(), 1);
    assert!(!rec.is_empty());
    rec.record(Count::Bump, "bump", "", &vec![1], [Highlight::Index(0)]);
    assert_eq!(rec.len(), 2);
    let t = rec.finish(Count::Done, "done", "", &vec![1], [], 1);
    assert_eq!(t.len(), 3);
}

#[test]
fn test_snapshots_are_copies() {
    init_logger();
    let t = counting(4);
    assert_eq!(t.len(), 6);
    assert_eq!(t.first().state(), &vec![0; 4]);
    assert_eq!(t.get(2).unwrap().state(), &vec![1, 2, 0, 0]);
    assert_eq!(t.get(4).unwrap().state(), &vec![1, 2, 3, 4]);
    // Clearing the live vector only shows up in the last step.
    assert!(t.last().state().is_empty());
    assert_eq!(*t.result(), 10);
    assert_eq!(t.count(Count::Bump), 4);
    assert_eq!(
        t.phases().collect::<Vec<_>>(),
        [Count::Init, Count::Bump, Count::Bump, Count::Bump, Count::Bump, Count::Done]
    );
}

#[test]
fn test_result_only_on_last() {
    let t = counting(2);
    common::assert_well_formed(&t);
    assert!(t.first().result().is_none());
    assert_eq!(t.last().result(), Some(&3));
    assert_eq!(t.get(1).unwrap().to_string(), "[bump] bump 0");
    assert_eq!(t.last().to_string(), "[done] total: 3");
}

#[test]
fn test_highlights_match_diffs() {
    let t = counting(5);
    for k in 1..t.len() - 1 {
        let (prev, cur) = (&t.steps()[k - 1], &t.steps()[k]);
        assert_eq!(changed_indices(prev.state(), cur.state()), cur.indices());
    }
}

#[test]
fn test_player() {
    let t = counting(3);
    let mut p = t.player();
    assert!(p.at_start());
    assert!(!p.back());
    assert_eq!(p.current().phase(), Count::Init);
    assert!(p.forward());
    assert!(p.forward());
    assert_eq!(p.index(), 2);
    assert!(p.back());
    assert_eq!(p.current().title(), "bump 0");
    assert_eq!(p.seek(100).phase(), Count::Done);
    assert!(p.at_end());
    assert!(!p.forward());
    assert_eq!(p.seek(0).phase(), Count::Init);
}

#[test]
fn test_empty_run() {
    let t = counting(0);
    common::assert_well_formed(&t);
    assert_eq!(t.len(), 2);
    assert_eq!(*t.result(), 0);
}

#[test]
#[should_panic(expected = "use Recorder::finish")]
fn test_record_terminal_panics() {
    let mut rec: Recorder<Count, (), ()> = Recorder::new("", "", &());
    rec.record(Count::Done, "", "", &(), []);
}

#[test]
#[should_panic(expected = "cannot end a trace")]
fn test_finish_non_terminal_panics() {
    let rec: Recorder<Count, (), ()> = Recorder::new("", "", &());
    rec.finish(Count::Bump, "", "", &(), [], ());
}

#[test]
fn test_changed_cells() {
    let a = vec![vec![1, 2], vec![3, 4]];
    let b = vec![vec![1, 5], vec![6, 4]];
    assert_eq!(changed_cells(&a, &b), [(0, 1), (1, 0)]);
    assert!(changed_cells(&a, &a).is_empty());
}
