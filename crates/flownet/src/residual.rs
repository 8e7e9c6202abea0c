//! Residual graph with paired forward/reverse arcs.
//!
//! Purpose
//! - Own the adjacency structure mutated by the solver. Each `add_arc` appends a
//!   forward arc `u→v` and a zero-capacity reverse arc `v→u`; each records the
//!   other's slot so the pair is found in O(1).
//!
//! Invariants
//! - `0 ≤ flow ≤ capacity` on forward arcs, `-capacity(pair) ≤ flow ≤ 0` on
//!   reverse arcs; residual capacity `capacity - flow` is never negative.
//! - Skew symmetry: `flow(a) == -flow(pair(a))` after every `push_flow`.
//! - Insertion order is preserved; parallel arcs stay distinct.
//! - Every single flow fits in `i64`; sums over many arcs may not, so
//!   `net_outflow` widens to `i128`.

use crate::error::FlowError;

/// Position of an arc: the slot inside its origin's adjacency list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArcRef {
    pub from: usize,
    pub slot: usize,
}

/// One directed residual arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arc {
    pub to: usize,
    /// Slot of the paired arc inside `adj[to]`.
    pub pair: usize,
    pub capacity: i64,
    pub flow: i64,
    /// `true` for arcs added by the caller, `false` for synthesized reverse arcs.
    pub forward: bool,
}

impl Arc {
    #[inline]
    pub fn residual(&self) -> i64 {
        self.capacity - self.flow
    }

    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.residual() == 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResidualGraph {
    adj: Vec<Vec<Arc>>,
}

impl ResidualGraph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adj: vec![Vec::new(); vertex_count],
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of caller-added arcs (reverse arcs not counted).
    pub fn arc_count(&self) -> usize {
        self.adj.iter().map(|arcs| arcs.len()).sum::<usize>() / 2
    }

    pub(crate) fn check_vertex(&self, v: usize) -> Result<(), FlowError> {
        if v < self.adj.len() {
            Ok(())
        } else {
            Err(FlowError::UnknownVertex {
                vertex: v as i64,
                vertex_count: self.adj.len(),
            })
        }
    }

    /// Append arc `u→v` with `capacity` and its zero-capacity reverse arc.
    ///
    /// Self-loops are accepted; their pair lives in the same adjacency list and
    /// they never change the flow value.
    pub fn add_arc(&mut self, u: usize, v: usize, capacity: i64) -> Result<ArcRef, FlowError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if capacity < 0 {
            return Err(FlowError::InvalidCapacity {
                from: u,
                to: v,
                capacity,
            });
        }
        let fwd_slot = self.adj[u].len();
        let rev_slot = if u == v { fwd_slot + 1 } else { self.adj[v].len() };
        self.adj[u].push(Arc {
            to: v,
            pair: rev_slot,
            capacity,
            flow: 0,
            forward: true,
        });
        self.adj[v].push(Arc {
            to: u,
            pair: fwd_slot,
            capacity: 0,
            flow: 0,
            forward: false,
        });
        Ok(ArcRef {
            from: u,
            slot: fwd_slot,
        })
    }

    /// Outgoing arcs of `v` in insertion order.
    #[inline]
    pub fn arcs(&self, v: usize) -> &[Arc] {
        &self.adj[v]
    }

    #[inline]
    pub fn arc(&self, a: ArcRef) -> &Arc {
        &self.adj[a.from][a.slot]
    }

    #[inline]
    pub fn pair(&self, a: ArcRef) -> ArcRef {
        let arc = self.arc(a);
        ArcRef {
            from: arc.to,
            slot: arc.pair,
        }
    }

    #[inline]
    pub fn residual_capacity(&self, a: ArcRef) -> i64 {
        self.arc(a).residual()
    }

    /// Push `amount` along `a` and cancel it on the paired arc.
    ///
    /// Panics if `amount` is negative or exceeds the residual capacity of `a`.
    pub fn push_flow(&mut self, a: ArcRef, amount: i64) {
        let residual = self.residual_capacity(a);
        assert!(
            (0..=residual).contains(&amount),
            "push of {amount} outside residual capacity {residual} on {a:?}"
        );
        let p = self.pair(a);
        self.adj[a.from][a.slot].flow += amount;
        self.adj[p.from][p.slot].flow -= amount;
    }

    /// All arcs with their positions, reverse arcs included.
    pub fn iter(&self) -> impl Iterator<Item = (ArcRef, &Arc)> + '_ {
        self.adj.iter().enumerate().flat_map(|(from, arcs)| {
            arcs.iter()
                .enumerate()
                .map(move |(slot, arc)| (ArcRef { from, slot }, arc))
        })
    }

    /// Caller-added arcs only, in per-vertex insertion order.
    pub fn forward_arcs(&self) -> impl Iterator<Item = (ArcRef, &Arc)> + '_ {
        self.iter().filter(|(_, arc)| arc.forward)
    }

    /// Net flow leaving `v`. By skew symmetry this is the sum over all of
    /// `v`'s arcs, reverse arcs included.
    pub fn net_outflow(&self, v: usize) -> i128 {
        self.adj[v].iter().map(|arc| i128::from(arc.flow)).sum()
    }

    /// Zero every flow, keeping the arcs.
    pub fn reset_flows(&mut self) {
        for arcs in &mut self.adj {
            for arc in arcs.iter_mut() {
                arc.flow = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_arc_links_pairs() {
        let mut g = ResidualGraph::new(3);
        let a = g.add_arc(0, 1, 5).unwrap();
        let b = g.add_arc(1, 2, 4).unwrap();
        assert_eq!(g.pair(g.pair(a)), a);
        assert_eq!(g.pair(b), ArcRef { from: 2, slot: 0 });
        assert_eq!(g.arc(g.pair(b)).capacity, 0);
        assert!(!g.arc(g.pair(b)).forward);
        assert_eq!(g.arc_count(), 2);
    }

    #[test]
    fn push_flow_keeps_skew_symmetry() {
        let mut g = ResidualGraph::new(2);
        let a = g.add_arc(0, 1, 7).unwrap();
        g.push_flow(a, 3);
        let p = g.pair(a);
        assert_eq!(g.arc(a).flow, 3);
        assert_eq!(g.arc(p).flow, -3);
        assert_eq!(g.residual_capacity(a), 4);
        assert_eq!(g.residual_capacity(p), 3);
        // cancel part of it through the reverse arc
        g.push_flow(p, 2);
        assert_eq!(g.arc(a).flow, 1);
        assert_eq!(g.arc(p).flow, -1);
        assert_eq!(g.net_outflow(0), 1);
        assert_eq!(g.net_outflow(1), -1);
    }

    #[test]
    #[should_panic]
    fn push_flow_rejects_overpush() {
        let mut g = ResidualGraph::new(2);
        let a = g.add_arc(0, 1, 2).unwrap();
        g.push_flow(a, 3);
    }

    #[test]
    fn self_loop_pairs_inside_one_list() {
        let mut g = ResidualGraph::new(1);
        let a = g.add_arc(0, 0, 9).unwrap();
        let p = g.pair(a);
        assert_eq!(p, ArcRef { from: 0, slot: 1 });
        assert_eq!(g.pair(p), a);
        g.push_flow(a, 9);
        assert_eq!(g.net_outflow(0), 0);
    }

    #[test]
    fn parallel_arcs_are_distinct() {
        let mut g = ResidualGraph::new(2);
        let a = g.add_arc(0, 1, 3).unwrap();
        let b = g.add_arc(0, 1, 4).unwrap();
        assert_ne!(a, b);
        assert_eq!(g.arcs(0).len(), 2);
        assert_eq!(g.arcs(1).len(), 2);
    }

    #[test]
    fn rejects_bad_input() {
        let mut g = ResidualGraph::new(2);
        assert_eq!(
            g.add_arc(0, 2, 1),
            Err(FlowError::UnknownVertex {
                vertex: 2,
                vertex_count: 2
            })
        );
        assert_eq!(
            g.add_arc(0, 1, -1),
            Err(FlowError::InvalidCapacity {
                from: 0,
                to: 1,
                capacity: -1
            })
        );
        // failed inserts leave no arcs behind
        assert_eq!(g.arc_count(), 0);
    }

    #[test]
    fn out_capacity_may_exceed_i64() {
        let mut g = ResidualGraph::new(2);
        let a = g.add_arc(0, 1, i64::MAX).unwrap();
        let b = g.add_arc(0, 1, i64::MAX).unwrap();
        g.push_flow(a, i64::MAX);
        g.push_flow(b, i64::MAX);
        assert_eq!(g.net_outflow(0), 2 * i128::from(i64::MAX));
        assert_eq!(g.net_outflow(1), -2 * i128::from(i64::MAX));
    }
}
