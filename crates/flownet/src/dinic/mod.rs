//! Dinic's maximum flow: BFS layering plus blocking flows.
//!
//! Purpose
//! - Compute a maximum source→sink flow on a `ResidualGraph` by alternating a
//!   breadth-first layering (`level.rs`) with a blocking-flow search
//!   (`blocking.rs`) until the sink is unreachable (`solver.rs`).
//!
//! Why this design
//! - Level, pointer, and path buffers are fields of one `Dinic` instance and
//!   are reset per phase; nothing is global, so independent solvers never
//!   share state.
//! - The depth-first search is iterative so path length is bounded by the heap,
//!   not the call stack.
//! - The flow ceiling is an `Option<i64>` (`None` = unbounded) instead of a
//!   sentinel integer.
//!
//! Complexity
//! - At most `n - 1` phases, O(V·E) work per phase, O(V²·E) overall.

mod blocking;
mod level;
mod solver;
mod types;

pub use solver::Dinic;
pub use types::{FlowOutcome, Levels, PhaseRecord, SolveCfg, SolveReport, Termination};
