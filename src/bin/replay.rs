use std::fmt::Debug;

use algo_replay::{
    bipartite,
    dp::{edit_distance, interval, lcs, stock},
    eulerian, mst, segment_tree,
    shortest_path::{
        bidirectional_bfs,
        floyd_warshall::{self, MinPlus, RatioProduct, Reachability},
        zero_one_bfs,
    },
    union_find, Phase, Trace,
};
use clap::{Parser, ValueEnum};

fn print_trace<P: Phase, S: Debug, R: Debug>(trace: &Trace<P, S, R>, states: bool) {
    for (k, step) in trace.iter().enumerate() {
        println!("{k:>4} {step}");
        if states {
            println!("{:#?}", step.state());
        }
    }
    println!("Result: {:#?}", trace.result());
}

/// Print the recorded steps of an algorithm showcase.
#[derive(Debug, Parser)]
#[command(name = "replay")]
struct Args {
    /// Showcase to replay.
    #[arg(value_enum)]
    showcase: Showcase,
    /// Also print the state snapshot of every step.
    #[arg(long)]
    states: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Showcase {
    UnionFind,
    FloydWarshall,
    TransitiveClosure,
    Ratios,
    ZeroOneBfs,
    BidirectionalBfs,
    Kruskal,
    CriticalEdges,
    Hierholzer,
    Itinerary,
    SegmentSum,
    SegmentMin,
    Bipartite,
    OddCycle,
    EditDistance,
    Lcs,
    BurstBalloons,
    Palindrome,
    StockCooldown,
}

fn run(showcase: Showcase, s: bool) {
    use Showcase::*;
    match showcase {
        UnionFind => print_trace(&union_find::build_steps(&union_find::showcase()), s),
        FloydWarshall => print_trace(
            &floyd_warshall::build_steps::<MinPlus>(&floyd_warshall::showcase()),
            s,
        ),
        TransitiveClosure => print_trace(
            &floyd_warshall::build_steps::<Reachability>(&floyd_warshall::closure_showcase()),
            s,
        ),
        Ratios => print_trace(
            &floyd_warshall::build_steps::<RatioProduct>(&floyd_warshall::ratio_showcase()),
            s,
        ),
        ZeroOneBfs => {
            let (g, from, to) = zero_one_bfs::showcase();
            print_trace(&zero_one_bfs::build_steps(&g, from, to), s)
        }
        BidirectionalBfs => {
            let (g, from, to) = bidirectional_bfs::showcase();
            print_trace(&bidirectional_bfs::build_steps(&g, from, to), s)
        }
        Kruskal => print_trace(&mst::build_steps(&mst::showcase()), s),
        CriticalEdges => print_trace(&mst::classification_steps(&mst::showcase()), s),
        Hierholzer => {
            let (g, start, order) = eulerian::showcase();
            print_trace(&eulerian::build_steps(&g, start, order), s)
        }
        Itinerary => {
            let (g, start, order) = eulerian::itinerary_showcase();
            print_trace(&eulerian::build_steps(&g, start, order), s)
        }
        SegmentSum => print_trace(&segment_tree::build_steps(&segment_tree::sum_showcase()), s),
        SegmentMin => print_trace(&segment_tree::build_steps(&segment_tree::min_showcase()), s),
        Bipartite => print_trace(&bipartite::build_steps(&bipartite::showcase()), s),
        OddCycle => print_trace(&bipartite::build_steps(&bipartite::odd_cycle_showcase()), s),
        EditDistance => {
            let (a, b) = edit_distance::showcase();
            print_trace(&edit_distance::build_steps(a, b), s)
        }
        Lcs => {
            let (a, b) = lcs::showcase();
            print_trace(&lcs::build_steps(a, b), s)
        }
        BurstBalloons => {
            print_trace(&interval::burst_balloons(&interval::balloons_showcase()), s)
        }
        Palindrome => {
            print_trace(&interval::longest_palindrome(interval::palindrome_showcase()), s)
        }
        StockCooldown => print_trace(&stock::build_steps(&stock::showcase()), s),
    }
}

fn main() {
    let args = Args::parse();
    run(args.showcase, args.states);
}
