//! Minimum cut from a residual graph.
//!
//! After a maximum flow, the vertices reachable from the source through arcs
//! with positive residual capacity form the source side. Every caller-added
//! arc leaving that side is saturated and their capacities sum to the flow.

use std::collections::VecDeque;

use crate::residual::{ArcRef, ResidualGraph};

/// One arc crossing the cut, source side to sink side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CutArc {
    pub arc: ArcRef,
    pub from: usize,
    pub to: usize,
    pub capacity: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinCut {
    /// `source_side[v]` is true when `v` is reachable from the source.
    pub source_side: Vec<bool>,
    pub arcs: Vec<CutArc>,
    pub capacity: i64,
}

impl MinCut {
    pub fn source_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.source_side
            .iter()
            .enumerate()
            .filter_map(|(v, &s)| s.then_some(v))
    }
}

/// Compute the source-side reachability cut of `g`; `source` must be in range.
///
/// Only meaningful as a *minimum* cut once no augmenting path remains. Callers
/// outside the crate go through `Dinic::min_cut`, which checks `source`.
pub(crate) fn min_cut(g: &ResidualGraph, source: usize) -> MinCut {
    let mut source_side = vec![false; g.vertex_count()];
    source_side[source] = true;
    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        for arc in g.arcs(v) {
            if arc.residual() > 0 && !source_side[arc.to] {
                source_side[arc.to] = true;
                queue.push_back(arc.to);
            }
        }
    }
    let arcs: Vec<CutArc> = g
        .forward_arcs()
        .filter(|(r, arc)| source_side[r.from] && !source_side[arc.to])
        .map(|(r, arc)| CutArc {
            arc: r,
            from: r.from,
            to: arc.to,
            capacity: arc.capacity,
        })
        .collect();
    // Saturates the same way the solver's flow value does.
    let capacity = arcs
        .iter()
        .fold(0i64, |acc, a| acc.saturating_add(a.capacity));
    MinCut {
        source_side,
        arcs,
        capacity,
    }
}
