use algo_replay::{
    dp::edit_distance,
    mst,
    segment_tree::{self, SegmentInput, SegmentOp, SegmentTree, Sum},
    shortest_path::floyd_warshall::{self, MinPlus},
    Graph,
};
use criterion::{black_box, criterion_group, criterion_main, Bencher, BenchmarkId, Criterion};
use flexi_logger::Logger;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use std::sync::{LazyLock, Mutex};

fn random_ops(rng: &mut impl Rng, n: usize, q: usize) -> Vec<SegmentOp<i64>> {
    (0..q)
        .map(|_| {
            if rng.gen_bool(0.3) {
                SegmentOp::Update(rng.gen_range(0..n), rng.gen_range(-100..100))
            } else {
                let l = rng.gen_range(0..n);
                SegmentOp::Query(l..rng.gen_range(l..=n))
            }
        })
        .collect()
}

fn untraced_impl(b: &mut Bencher, input: &SegmentInput<Sum>) {
    b.iter(|| {
        let mut st = SegmentTree::<Sum>::new(black_box(&input.data));
        for op in &input.ops {
            match op {
                SegmentOp::Query(r) => {
                    black_box(st.query(r.clone()));
                }
                SegmentOp::Update(i, v) => st.update(*i, v),
            }
        }
    });
}

fn traced_impl(b: &mut Bencher, input: &SegmentInput<Sum>) {
    b.iter(|| black_box(segment_tree::build_steps(black_box(input))));
}

/// Cost of recording every step against running the bare structure.
fn segment_tree_recording(c: &mut Criterion) {
    let _ = &*LOGGER;
    let mut g = c.benchmark_group("Segment tree, 50 operations");
    let mut rng = rand::rngs::StdRng::seed_from_u64(4815162342);
    for n in [16usize, 64, 256] {
        let input = SegmentInput::<Sum> {
            data: (0..n).map(|_| rng.gen_range(-100..100)).collect(),
            ops: random_ops(&mut rng, n, 50),
        };
        log::debug!("{n} items, {} ops", input.ops.len());
        g.throughput(criterion::Throughput::Elements(input.ops.len() as u64));
        let input_str = format!("N {n}");
        g.bench_with_input(BenchmarkId::new("untraced", &input_str), &input, |b, input| {
            untraced_impl(b, input)
        });
        g.bench_with_input(BenchmarkId::new("traced", &input_str), &input, |b, input| {
            traced_impl(b, input)
        });
    }
    g.finish();
}

fn random_graph(rng: &mut impl Rng, n: usize, m: usize) -> Graph<i64> {
    let mut nodes: Vec<usize> = (0..n).collect();
    let edges: Vec<_> = (0..m)
        .map(|_| {
            nodes.shuffle(rng);
            (nodes[0], nodes[1], rng.gen_range(1..20))
        })
        .collect();
    Graph::undirected(n, edges)
}

fn random_word(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| *b"acgt".choose(rng).unwrap() as char)
        .collect()
}

/// Whole traces of the graph and table engines, by input size.
fn engines(c: &mut Criterion) {
    let _ = &*LOGGER;
    let mut g = c.benchmark_group("Trace per input size");
    let mut rng = rand::rngs::StdRng::seed_from_u64(4815162342);
    for n in [8usize, 16, 32] {
        let graph = random_graph(&mut rng, n, 3 * n);
        let input_str = format!("N {n}");
        g.bench_with_input(
            BenchmarkId::new("floyd-warshall", &input_str),
            &graph,
            |b, graph| b.iter(|| black_box(floyd_warshall::build_steps::<MinPlus>(graph))),
        );
        g.bench_with_input(BenchmarkId::new("kruskal", &input_str), &graph, |b, graph| {
            b.iter(|| black_box(mst::build_steps(graph)))
        });
        g.bench_with_input(
            BenchmarkId::new("critical-edges", &input_str),
            &graph,
            |b, graph| b.iter(|| black_box(mst::classification_steps(graph))),
        );
        let words = (random_word(&mut rng, n), random_word(&mut rng, n));
        g.bench_with_input(
            BenchmarkId::new("edit-distance", &input_str),
            &words,
            |b, (s1, s2)| b.iter(|| black_box(edit_distance::build_steps(s1, s2))),
        );
    }
    g.finish();
}

criterion_group!(benches, segment_tree_recording, engines);
criterion_main!(benches);

pub static LOGGER: LazyLock<Mutex<flexi_logger::LoggerHandle>> = LazyLock::new(|| {
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
