//! Blocking-flow search over the level graph with current-arc pointers.
//!
//! The search is an explicit stack machine instead of recursion: `path` holds
//! the admissible arcs taken from the source, and backing out of a dead end
//! advances the parent's pointer past the arc that led there. Pointers are
//! shared by every augmentation of one phase, so each arc is skipped at most
//! once per phase and total phase work is O(E + paths · depth).

use crate::residual::{ArcRef, ResidualGraph};

use super::types::Levels;

/// Phase-scoped search context. Borrowed from the solver for one phase.
pub(crate) struct BlockingFlowRunner<'a> {
    g: &'a mut ResidualGraph,
    levels: &'a Levels,
    ptr: &'a mut [usize],
    path: &'a mut Vec<ArcRef>,
    sink: usize,
}

impl<'a> BlockingFlowRunner<'a> {
    /// `ptr` must be zeroed for a fresh phase; `levels` must come from
    /// `assign_levels` on the current residual graph.
    pub(crate) fn new(
        g: &'a mut ResidualGraph,
        levels: &'a Levels,
        ptr: &'a mut [usize],
        path: &'a mut Vec<ArcRef>,
        sink: usize,
    ) -> Self {
        debug_assert_eq!(ptr.len(), g.vertex_count());
        debug_assert_eq!(levels.len(), g.vertex_count());
        Self {
            g,
            levels,
            ptr,
            path,
            sink,
        }
    }

    /// Find one admissible source→sink path and saturate its bottleneck.
    ///
    /// `limit` caps the amount pushed; `None` is unbounded. Returns 0 once no
    /// admissible path remains reachable under the current pointers.
    pub(crate) fn augment(&mut self, source: usize, limit: Option<i64>) -> i64 {
        debug_assert_ne!(source, self.sink);
        self.path.clear();
        let mut v = source;
        loop {
            if v == self.sink {
                return self.push_path(limit);
            }
            match self.next_admissible(v) {
                Some(slot) => {
                    let a = ArcRef { from: v, slot };
                    self.path.push(a);
                    v = self.g.arc(a).to;
                }
                None => match self.path.pop() {
                    None => return 0,
                    Some(dead) => {
                        // `dead.to` is exhausted for this phase; never retry it from here.
                        self.ptr[dead.from] += 1;
                        v = dead.from;
                    }
                },
            }
        }
    }

    /// First arc at or after `ptr[v]` that is unsaturated and leads one level up.
    /// Everything skipped on the way stays skipped for the rest of the phase.
    fn next_admissible(&mut self, v: usize) -> Option<usize> {
        let want = self.levels[v].map(|l| l + 1);
        let arcs = self.g.arcs(v);
        while self.ptr[v] < arcs.len() {
            let arc = &arcs[self.ptr[v]];
            if arc.residual() > 0 && self.levels[arc.to] == want {
                return Some(self.ptr[v]);
            }
            self.ptr[v] += 1;
        }
        None
    }

    fn push_path(&mut self, limit: Option<i64>) -> i64 {
        let bottleneck = self.path.iter().fold(limit, |acc, &a| {
            let r = self.g.residual_capacity(a);
            Some(acc.map_or(r, |l| l.min(r)))
        });
        let amount = bottleneck.unwrap_or(0);
        if amount > 0 {
            for &a in self.path.iter() {
                self.g.push_flow(a, amount);
            }
        }
        amount
    }
}
