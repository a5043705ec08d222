#![allow(dead_code)]

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
    fmt::Debug,
    ops::Range,
    sync::{LazyLock, Mutex},
};

use algo_replay::{graph::Edge, shortest_path::Dist, Phase, Trace};
use flexi_logger::{Logger, LoggerHandle};
use rand::Rng;
use scopeguard::{OnUnwind, ScopeGuard};

pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .set_palette("196;208;3;7;8".to_owned())
            .format(|w, now, record| {
                let style = flexi_logger::style(record.level());
                write!(
                    w,
                    "{} {pref}[{}] {}{suf}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                    pref = style.prefix(),
                    suf = style.suffix(),
                )
            })
            .start()
            .unwrap(),
    )
});

pub fn init_logger() {
    let _ = &*LOGGER;
}

/// Logs the value if the test panics while it is alive.
pub fn guard<T: Debug>(t: T) -> ScopeGuard<T, impl FnOnce(T), OnUnwind> {
    scopeguard::guard_on_unwind(t, |t| log::error!("Crash with {t:?}"))
}

/// Init first, exactly one terminal step at the end, result only there.
pub fn assert_well_formed<P: Phase, S, R>(trace: &Trace<P, S, R>) {
    assert!(!trace.is_empty());
    assert_eq!(trace.first().phase(), P::INIT);
    let last = trace.len() - 1;
    for (k, step) in trace.iter().enumerate() {
        assert_eq!(step.phase().is_terminal(), k == last, "step {k}: {step}");
        assert_eq!(step.result().is_some(), k == last, "step {k}: {step}");
        if k > 0 {
            assert_ne!(step.phase(), P::INIT, "step {k}: {step}");
        }
    }
}

/// m random edges without self-loops. Empty if n < 2.
pub fn random_edges(
    rng: &mut impl Rng,
    n: usize,
    m: usize,
    weights: Range<i64>,
) -> Vec<(usize, usize, i64)> {
    if n < 2 {
        return vec![];
    }
    (0..m)
        .map(|_| {
            let u = rng.gen_range(0..n);
            let mut v = rng.gen_range(0..n - 1);
            if v >= u {
                v += 1;
            }
            (u, v, rng.gen_range(weights.clone()))
        })
        .collect()
}

fn adjacency(n: usize, edges: &[(usize, usize, i64)], directed: bool) -> Vec<Vec<(usize, i64)>> {
    let mut adj = vec![vec![]; n];
    for &(u, v, w) in edges {
        adj[u].push((v, w));
        if !directed {
            adj[v].push((u, w));
        }
    }
    adj
}

/// Single source distances for non-negative weights.
pub fn dijkstra(n: usize, edges: &[(usize, usize, i64)], directed: bool, src: usize) -> Vec<Dist> {
    let adj = adjacency(n, edges, directed);
    let mut dist = vec![Dist::Infinite; n];
    let mut pq = BinaryHeap::new();
    dist[src] = Dist::Finite(0);
    pq.push(Reverse((0, src)));
    while let Some(Reverse((d, u))) = pq.pop() {
        if Dist::Finite(d) > dist[u] {
            continue;
        }
        for &(v, w) in &adj[u] {
            if Dist::Finite(d + w) < dist[v] {
                dist[v] = Dist::Finite(d + w);
                pq.push(Reverse((d + w, v)));
            }
        }
    }
    dist
}

/// Hop counts from src, None where unreachable.
pub fn bfs(
    n: usize,
    edges: &[(usize, usize, i64)],
    directed: bool,
    src: usize,
) -> Vec<Option<usize>> {
    let adj = adjacency(n, edges, directed);
    let mut dist = vec![None; n];
    let mut q = VecDeque::from([src]);
    dist[src] = Some(0);
    while let Some(u) = q.pop_front() {
        for &(v, _) in &adj[u] {
            if dist[v].is_none() {
                dist[v] = Some(dist[u].unwrap() + 1);
                q.push_back(v);
            }
        }
    }
    dist
}

/// Whether the chosen edges connect all n nodes, by relabelling components.
fn spans(n: usize, edges: &[Edge<i64>], chosen: impl Iterator<Item = usize>) -> bool {
    let mut comp: Vec<usize> = (0..n).collect();
    for i in chosen {
        let (a, b) = (comp[edges[i].u], comp[edges[i].v]);
        if a != b {
            comp.iter_mut().filter(|c| **c == b).for_each(|c| *c = a);
        }
    }
    comp.iter().all(|&c| c == comp[0])
}

/// Cheapest spanning tree by trying every subset of n - 1 edges. Subsets
/// containing `without` are skipped, subsets missing `with` too.
pub fn brute_mst(
    n: usize,
    edges: &[Edge<i64>],
    without: Option<usize>,
    with: Option<usize>,
) -> Option<i64> {
    let m = edges.len();
    assert!(m <= 16, "too many edges to brute force");
    if n <= 1 {
        return with.is_none().then_some(0);
    }
    (0u32..1 << m)
        .filter(|mask| mask.count_ones() as usize == n - 1)
        .filter(|mask| without.map_or(true, |i| mask & (1 << i) == 0))
        .filter(|mask| with.map_or(true, |i| mask & (1 << i) != 0))
        .filter(|mask| spans(n, edges, (0..m).filter(|i| mask & (1 << i) != 0)))
        .map(|mask| {
            (0..m)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| edges[i].w)
                .sum::<i64>()
        })
        .min()
}
