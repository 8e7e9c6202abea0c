//! Configuration and result types for the phase loop.

use std::time::Duration;

/// Level of each vertex in the current phase; `None` means unreachable.
pub type Levels = Vec<Option<usize>>;

/// Solve configuration.
///
/// Both limits are checked between phases only, so a truncated run leaves a
/// valid (if not maximum) flow behind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveCfg {
    /// Stop after this many phases even if an augmenting path remains.
    pub max_phases: Option<usize>,
    /// Stop starting new phases once this much wall-clock time has elapsed.
    pub time_budget: Option<Duration>,
}

/// Why the phase loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Sink unreachable in the residual graph: the flow is maximum.
    Maximum,
    /// `max_phases` reached; best flow so far, not necessarily maximum.
    PhaseLimit,
    /// `time_budget` exhausted; best flow so far, not necessarily maximum.
    TimeBudget,
}

impl Termination {
    #[inline]
    pub fn is_maximum(self) -> bool {
        matches!(self, Termination::Maximum)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Termination::Maximum => "maximum",
            Termination::PhaseLimit => "phase_limit",
            Termination::TimeBudget => "time_budget",
        }
    }
}

/// One completed blocking-flow phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseRecord {
    /// Sink level in this phase's layering.
    pub sink_level: usize,
    /// Flow added by the phase.
    pub pushed: i64,
    /// Number of augmenting paths saturated.
    pub augmentations: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveReport {
    pub phases: Vec<PhaseRecord>,
}

impl SolveReport {
    pub fn augmentations(&self) -> usize {
        self.phases.iter().map(|p| p.augmentations).sum()
    }
}

/// Result of one `Dinic::solve` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowOutcome {
    /// Flow added by this call.
    pub value: i64,
    pub termination: Termination,
    pub report: SolveReport,
}
