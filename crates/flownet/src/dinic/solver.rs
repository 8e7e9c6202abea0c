//! Phase loop: layer, then augment until blocked, until the sink is cut off.

use std::time::Instant;

use crate::cut::{min_cut, MinCut};
use crate::error::FlowError;
use crate::residual::{ArcRef, ResidualGraph};

use super::blocking::BlockingFlowRunner;
use super::level::assign_levels;
use super::types::{FlowOutcome, Levels, PhaseRecord, SolveCfg, SolveReport, Termination};

/// Max-flow solver owning one residual graph and its phase-scoped scratch.
///
/// Calling `solve` again on the same instance continues from the current
/// flow; on an already maximal graph it adds 0.
#[derive(Clone, Debug, Default)]
pub struct Dinic {
    g: ResidualGraph,
    levels: Levels,
    ptr: Vec<usize>,
    path: Vec<ArcRef>,
}

impl Dinic {
    pub fn new(vertex_count: usize) -> Self {
        Self::from_graph(ResidualGraph::new(vertex_count))
    }

    pub fn from_graph(g: ResidualGraph) -> Self {
        Self {
            g,
            levels: Levels::new(),
            ptr: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn add_arc(&mut self, u: usize, v: usize, capacity: i64) -> Result<ArcRef, FlowError> {
        self.g.add_arc(u, v, capacity)
    }

    #[inline]
    pub fn graph(&self) -> &ResidualGraph {
        &self.g
    }

    pub fn into_graph(self) -> ResidualGraph {
        self.g
    }

    /// Run to optimality and return the flow added by this call.
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Result<i64, FlowError> {
        Ok(self.solve(source, sink, SolveCfg::default())?.value)
    }

    /// Run the phase loop under `cfg`.
    ///
    /// Each phase strictly raises the sink's level, so at most `n - 1` phases
    /// run before the sink becomes unreachable. The returned value saturates
    /// at `i64::MAX`; the flows on the arcs themselves are always exact.
    pub fn solve(
        &mut self,
        source: usize,
        sink: usize,
        cfg: SolveCfg,
    ) -> Result<FlowOutcome, FlowError> {
        self.g.check_vertex(source)?;
        self.g.check_vertex(sink)?;
        if source == sink {
            return Err(FlowError::DegenerateQuery { vertex: source });
        }
        let started = Instant::now();
        let mut report = SolveReport::default();
        let mut total: i64 = 0;
        let termination = loop {
            if !assign_levels(&self.g, source, sink, &mut self.levels) {
                break Termination::Maximum;
            }
            if cfg.max_phases.is_some_and(|m| report.phases.len() >= m) {
                break Termination::PhaseLimit;
            }
            if cfg.time_budget.is_some_and(|b| started.elapsed() >= b) {
                break Termination::TimeBudget;
            }
            let record = self.run_phase(source, sink);
            tracing::debug!(
                phase = report.phases.len(),
                sink_level = record.sink_level,
                pushed = record.pushed,
                augmentations = record.augmentations,
                "phase"
            );
            total = total.saturating_add(record.pushed);
            report.phases.push(record);
        };
        tracing::debug!(
            source,
            sink,
            flow = total,
            phases = report.phases.len(),
            termination = termination.as_str(),
            "solve"
        );
        Ok(FlowOutcome {
            value: total,
            termination,
            report,
        })
    }

    /// One blocking-flow phase over the current `levels`.
    fn run_phase(&mut self, source: usize, sink: usize) -> PhaseRecord {
        let sink_level = self.levels[sink].unwrap_or_default();
        self.ptr.clear();
        self.ptr.resize(self.g.vertex_count(), 0);
        let mut runner = BlockingFlowRunner::new(
            &mut self.g,
            &self.levels,
            &mut self.ptr,
            &mut self.path,
            sink,
        );
        let mut pushed: i64 = 0;
        let mut augmentations = 0;
        loop {
            let f = runner.augment(source, None);
            if f == 0 {
                break;
            }
            pushed = pushed.saturating_add(f);
            augmentations += 1;
        }
        PhaseRecord {
            sink_level,
            pushed,
            augmentations,
        }
    }

    /// Minimum cut read off the current residual graph.
    pub fn min_cut(&self, source: usize) -> Result<MinCut, FlowError> {
        self.g.check_vertex(source)?;
        Ok(min_cut(&self.g, source))
    }
}
