//! Maximum flow on directed capacitated graphs (Dinic's algorithm).
//!
//! Layout
//! - `residual`: paired forward/reverse arcs; the only mutable state.
//! - `dinic`: BFS layering, blocking-flow search, and the phase loop.
//! - `cut`: minimum cut from the final residual graph.
//! - `network` / `fixture`: validated input and its text format.
//! - `rand`: reproducible random networks for experiments and benches.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; the CLI
//!   and the Python binding are its only consumers.

pub mod cut;
pub mod dinic;
pub mod error;
pub mod fixture;
pub mod network;
pub mod rand;
pub mod residual;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use dinic::{Dinic, FlowOutcome, SolveCfg, Termination};
pub use error::FlowError;
pub use network::{EdgeSpec, FlowNetwork};
pub use residual::{Arc, ArcRef, ResidualGraph};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cut::{CutArc, MinCut};
    pub use crate::dinic::{Dinic, FlowOutcome, PhaseRecord, SolveCfg, SolveReport, Termination};
    pub use crate::error::FlowError;
    pub use crate::network::{EdgeSpec, FlowNetwork};
    pub use crate::rand::{generate_network, CapRange, NetworkGenCfg, PathLen, ReplayToken};
    pub use crate::residual::{Arc, ArcRef, ResidualGraph};
}

/// Convenience: max flow of an edge list without keeping the solver.
pub fn max_flow(
    vertex_count: usize,
    source: usize,
    sink: usize,
    edges: &[(usize, usize, i64)],
) -> Result<i64, FlowError> {
    let edges = edges.iter().copied().map(EdgeSpec::from).collect();
    FlowNetwork::new(vertex_count, source, sink, edges)?.max_flow()
}
