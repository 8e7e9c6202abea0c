//! Max-flow timing probe on one generated network.
//!
//! Purpose
//! - Reproduce the classic experiment: 1000 vertices, 20000 edges, source 0,
//!   sink 999, a guaranteed source→sink path, then solve and time it.
//! - Print the phase profile so layering depth and augmentation counts are
//!   visible next to the wall-clock numbers.
//!
//! Usage: `cargo run --release --example max_flow_timing [seed]`

use std::time::Instant;

use flownet::dinic::SolveCfg;
use flownet::rand::{generate_network, NetworkGenCfg, ReplayToken};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0u64);
    let cfg = NetworkGenCfg::default();

    let gen_start = Instant::now();
    let net = generate_network(cfg, ReplayToken { seed, index: 0 }).expect("valid generator cfg");
    let gen_elapsed = gen_start.elapsed().as_secs_f64() * 1e3;

    let mut solver = net.solver();
    let solve_start = Instant::now();
    let out = solver
        .solve(net.source(), net.sink(), SolveCfg::default())
        .expect("validated network");
    let solve_elapsed = solve_start.elapsed().as_secs_f64() * 1e3;
    let cut = solver.min_cut(net.source()).expect("source in range");

    println!(
        "nodes={} edges={} seed={seed}",
        net.vertex_count(),
        net.edges().len()
    );
    println!(
        "max_flow={} cut_capacity={} cut_arcs={} source_side={}",
        out.value,
        cut.capacity,
        cut.arcs.len(),
        cut.source_vertices().count()
    );
    for (i, p) in out.report.phases.iter().enumerate() {
        println!(
            "phase={i} sink_level={} pushed={} augmentations={}",
            p.sink_level, p.pushed, p.augmentations
        );
    }
    println!("generate_time_ms={gen_elapsed:.3}");
    println!("solve_time_ms={solve_elapsed:.3}");
}
