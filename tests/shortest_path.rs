use algo_replay::{
    shortest_path::{
        bidirectional_bfs::{self, BiPhase, BiTrace},
        floyd_warshall::{self, FwPhase, MinPlus, RatioProduct, Reachability},
        zero_one_bfs::{self, ZeroOnePhase, ZeroOneTrace},
        Dist,
    },
    trace::{changed_cells, changed_indices},
    Graph,
};
use common::{assert_well_formed, bfs, dijkstra, guard, init_logger, random_edges};
use rand::prelude::*;

mod common;

fn finite(rows: &[[i64; 4]]) -> Vec<Vec<Dist>> {
    rows.iter()
        .map(|r| r.iter().map(|&d| Dist::Finite(d)).collect())
        .collect()
}

#[test]
fn test_floyd_warshall_showcase() {
    init_logger();
    let t = floyd_warshall::build_steps::<MinPlus>(&floyd_warshall::showcase());
    assert_well_formed(&t);
    assert_eq!(t.count(FwPhase::Round), 4);
    assert_eq!(
        t.result().dist,
        finite(&[[0, 3, 5, 6], [5, 0, 2, 3], [3, 6, 0, 1], [2, 5, 7, 0]])
    );
    assert_eq!(t.result().relaxations, t.count(FwPhase::Relax));
}

#[test]
fn test_floyd_warshall_one_relaxation_per_step() {
    let t = floyd_warshall::build_steps::<MinPlus>(&floyd_warshall::showcase());
    for k in 1..t.len() {
        let (prev, cur) = (&t.steps()[k - 1], &t.steps()[k]);
        let changed = changed_cells(&prev.state().dist, &cur.state().dist);
        if cur.phase() == FwPhase::Relax {
            assert_eq!(changed, cur.cells(), "step {k}: {cur}");
            let (i, j) = changed[0];
            let nodes = cur.nodes();
            assert_eq!((nodes[0], nodes[2]), (i, j));
            assert!(nodes[1] != i && nodes[1] != j);
        } else {
            assert!(changed.is_empty(), "step {k}: {cur}");
        }
    }
}

fn compare_with_dijkstra(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..30 {
        let n = rng.gen_range(1..8);
        let m = rng.gen_range(0..2 * n);
        let edges = random_edges(&mut rng, n, m, 0..10);
        let directed = rng.gen_bool(0.5);
        let g = guard(if directed {
            Graph::directed(n, edges.clone())
        } else {
            Graph::undirected(n, edges.clone())
        });
        let t = floyd_warshall::build_steps::<MinPlus>(&g);
        assert_well_formed(&t);
        for i in 0..n {
            assert_eq!(t.result().dist[i], dijkstra(n, &edges, directed, i), "from {i}");
        }
    }
}

#[test]
fn test_floyd_warshall_cmp1() {
    compare_with_dijkstra(9232345);
}

#[test]
fn test_floyd_warshall_cmp2() {
    compare_with_dijkstra(4815162342);
}

#[test]
fn test_transitive_closure() {
    let t = floyd_warshall::build_steps::<Reachability>(&floyd_warshall::closure_showcase());
    let reach = &t.result().dist;
    for i in 0..3 {
        assert_eq!(reach[i], [true; 5]);
    }
    assert_eq!(reach[3], [false, false, false, true, true]);
    assert_eq!(reach[4], [false, false, false, false, true]);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let n = rng.gen_range(1..8);
        let m = rng.gen_range(0..2 * n);
        let edges = random_edges(&mut rng, n, m, 0..1);
        let g = Graph::directed(n, edges.iter().map(|&(u, v, _)| (u, v, ())));
        let t = floyd_warshall::build_steps::<Reachability>(&g);
        for i in 0..n {
            let expected: Vec<bool> =
                bfs(n, &edges, true, i).iter().map(Option::is_some).collect();
            assert_eq!(t.result().dist[i], expected);
        }
    }
}

#[test]
fn test_ratios() {
    let t = floyd_warshall::build_steps::<RatioProduct>(&floyd_warshall::ratio_showcase());
    let r = &t.result().dist;
    let close = |v: Option<f64>, expected: f64| (v.unwrap() - expected).abs() < 1e-9;
    assert!(close(r[0][2], 6.0));
    assert!(close(r[2][0], 1.0 / 6.0));
    assert!(close(r[4][3], 2.0));
    assert_eq!(r[0][3], None);
    assert_eq!(r[4][1], None);
}

#[test]
fn test_floyd_warshall_degenerate() {
    let t = floyd_warshall::build_steps::<MinPlus>(&Graph::directed(1, []));
    assert_well_formed(&t);
    assert_eq!(t.len(), 2);
    let t = floyd_warshall::build_steps::<MinPlus>(&Graph::directed(4, []));
    assert_eq!(t.len(), 2);
    assert_eq!(t.result().dist[0][1], Dist::Infinite);
}

#[test]
fn test_zero_one_showcase() {
    init_logger();
    let (g, s, goal) = zero_one_bfs::showcase();
    let t = zero_one_bfs::build_steps(&g, s, goal);
    assert_well_formed(&t);
    assert_zero_one_highlights(&t);
    assert_eq!(t.last().phase(), ZeroOnePhase::Done);
    assert_eq!(t.result().dist, Dist::Finite(1));
    assert_eq!(t.result().path, [0, 2, 4, 5, 6]);
}

/// Length of a path through the cheapest edge between each pair.
fn path_cost(edges: &[(usize, usize, i64)], path: &[usize]) -> Option<i64> {
    path.windows(2)
        .map(|w| {
            edges
                .iter()
                .filter(|&&(u, v, _)| (u, v) == (w[0], w[1]) || (v, u) == (w[0], w[1]))
                .map(|e| e.2)
                .min()
        })
        .sum()
}

/// Pops highlight the node they settle, pushes the node whose distance
/// dropped. Skips and terminal steps change no distance.
fn assert_zero_one_highlights(t: &ZeroOneTrace) {
    for k in 1..t.len() {
        let (prev, cur) = (t.steps()[k - 1].state(), &t.steps()[k]);
        let state = cur.state();
        let settled = changed_indices(&prev.settled, &state.settled);
        let lowered = changed_indices(&prev.dist, &state.dist);
        match cur.phase() {
            ZeroOnePhase::Pop => {
                assert_eq!(settled, cur.nodes(), "step {k}");
                assert!(lowered.is_empty(), "step {k}");
            }
            ZeroOnePhase::PushFront | ZeroOnePhase::PushBack => {
                assert_eq!(lowered, cur.indices(), "step {k}");
                assert!(settled.is_empty(), "step {k}");
            }
            _ => assert!(settled.is_empty() && lowered.is_empty(), "step {k}"),
        }
    }
}

fn compare_zero_one(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..50 {
        let n = rng.gen_range(1..10);
        let m = rng.gen_range(0..2 * n);
        let edges = random_edges(&mut rng, n, m, 0..2);
        let g = guard(Graph::undirected(
            n,
            edges.iter().map(|&(u, v, w)| (u, v, w as u8)),
        ));
        let (s, goal) = (rng.gen_range(0..n), rng.gen_range(0..n));
        let t = zero_one_bfs::build_steps(&g, s, goal);
        assert_well_formed(&t);
        assert_zero_one_highlights(&t);
        let expected = dijkstra(n, &edges, false, s)[goal];
        let res = t.result();
        assert_eq!(res.dist, expected, "{s} → {goal}");
        if let Dist::Finite(d) = expected {
            assert_eq!(t.last().phase(), ZeroOnePhase::Done);
            assert_eq!((res.path[0], *res.path.last().unwrap()), (s, goal));
            assert_eq!(path_cost(&edges, &res.path), Some(d));
        } else {
            assert_eq!(t.last().phase(), ZeroOnePhase::Fail);
            assert!(res.path.is_empty());
        }
    }
}

#[test]
fn test_zero_one_cmp1() {
    compare_zero_one(100000007);
}

#[test]
fn test_zero_one_cmp2() {
    compare_zero_one(1);
}

#[test]
#[should_panic(expected = "0-1 BFS needs weights")]
fn test_zero_one_rejects_weights() {
    let g = Graph::directed(2, [(0, 1, 2u8)]);
    zero_one_bfs::build_steps(&g, 0, 1);
}

#[test]
fn test_bidirectional_showcase() {
    init_logger();
    let (g, from, to) = bidirectional_bfs::showcase();
    let t = bidirectional_bfs::build_steps(&g, from, to);
    assert_well_formed(&t);
    assert_bidirectional_highlights(&t);
    assert_eq!(t.last().phase(), BiPhase::Meet);
    assert_eq!(t.result().path, [0, 1, 2, 4, 7]);
    assert_eq!(t.result().meeting, Some(2));
    assert_eq!(t.count(BiPhase::Round), 2);
    assert_eq!(t.last().state().round, 2);
}

#[test]
fn test_bidirectional_forward_level_first() {
    let (g, from, to) = bidirectional_bfs::showcase();
    let t = bidirectional_bfs::build_steps(&g, from, to);
    // Within a round, no forward step follows a backward step.
    let mut last_round = vec![];
    for p in t.phases() {
        match p {
            BiPhase::Round => last_round.clear(),
            BiPhase::Forward | BiPhase::Backward => last_round.push(p),
            _ => {}
        }
        assert!(last_round
            .windows(2)
            .all(|w| !(w[0] == BiPhase::Backward && w[1] == BiPhase::Forward)));
    }
}

/// Forward and backward steps highlight the node their side just visited.
/// Nothing else marks a node visited.
fn assert_bidirectional_highlights(t: &BiTrace) {
    for k in 1..t.len() {
        let (prev, cur) = (t.steps()[k - 1].state(), &t.steps()[k]);
        let state = cur.state();
        let forward = changed_indices(&prev.forward.visited, &state.forward.visited);
        let backward = changed_indices(&prev.backward.visited, &state.backward.visited);
        match cur.phase() {
            BiPhase::Forward => assert_eq!((forward, backward), (cur.nodes(), vec![]), "step {k}"),
            BiPhase::Backward => assert_eq!((forward, backward), (vec![], cur.nodes()), "step {k}"),
            _ => assert!(forward.is_empty() && backward.is_empty(), "step {k}"),
        }
    }
}

fn compare_bidirectional(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..50 {
        let n = rng.gen_range(1..12);
        let m = rng.gen_range(0..2 * n);
        let edges = random_edges(&mut rng, n, m, 0..1);
        let g = guard(Graph::undirected(n, edges.iter().map(|&(u, v, _)| (u, v, ()))));
        let (s, goal) = (rng.gen_range(0..n), rng.gen_range(0..n));
        let t = bidirectional_bfs::build_steps(&g, s, goal);
        assert_well_formed(&t);
        assert_bidirectional_highlights(&t);
        let res = t.result();
        match bfs(n, &edges, false, s)[goal] {
            Some(d) => {
                assert_eq!(t.last().phase(), BiPhase::Meet);
                assert_eq!(res.path.len(), d + 1, "{s} → {goal}: {:?}", res.path);
                assert_eq!((res.path[0], res.path[d]), (s, goal));
                assert_eq!(path_cost(&edges, &res.path), Some(0));
                assert!(res.path.contains(&res.meeting.unwrap()));
            }
            None => {
                assert_eq!(t.last().phase(), BiPhase::Fail);
                assert!(res.path.is_empty());
            }
        }
    }
}

#[test]
fn test_bidirectional_cmp1() {
    compare_bidirectional(9232345);
}

#[test]
fn test_bidirectional_cmp2() {
    compare_bidirectional(3);
}

#[test]
fn test_bidirectional_same_node() {
    let g = Graph::undirected(3, [(0, 1, ())]);
    let t = bidirectional_bfs::build_steps(&g, 2, 2);
    assert_eq!(t.len(), 2);
    assert_eq!(t.result().path, [2]);
}

fn stress() {
    init_logger();
    loop {
        let seed: u64 = thread_rng().gen();
        log::info!("seed = {seed}");
        compare_with_dijkstra(seed);
        compare_zero_one(seed);
        compare_bidirectional(seed);
    }
}

#[test]
#[ignore]
fn test_stress() {
    stress()
}
