//! Breadth-first layering over arcs with spare residual capacity.

use std::collections::VecDeque;

use crate::residual::ResidualGraph;

use super::types::Levels;

/// Recompute `levels` from `source` and report whether `sink` was reached.
///
/// Levels are shortest residual-hop distances, so the result does not depend
/// on adjacency order even though discovery order does.
pub(crate) fn assign_levels(
    graph: &ResidualGraph,
    source: usize,
    sink: usize,
    levels: &mut Levels,
) -> bool {
    levels.clear();
    levels.resize(graph.vertex_count(), None);
    levels[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let next = levels[v].map(|l| l + 1);
        for arc in graph.arcs(v) {
            if arc.residual() > 0 && levels[arc.to].is_none() {
                levels[arc.to] = next;
                queue.push_back(arc.to);
            }
        }
    }
    levels[sink].is_some()
}
