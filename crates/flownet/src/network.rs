//! Validated max-flow instance: vertex count, terminals, and edge list.

use crate::dinic::Dinic;
use crate::error::FlowError;
use crate::residual::ResidualGraph;

/// One input edge `from → to` with its capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSpec {
    pub from: usize,
    pub to: usize,
    pub capacity: i64,
}

impl EdgeSpec {
    #[inline]
    pub fn new(from: usize, to: usize, capacity: i64) -> Self {
        Self { from, to, capacity }
    }
}

impl From<(usize, usize, i64)> for EdgeSpec {
    fn from((from, to, capacity): (usize, usize, i64)) -> Self {
        Self { from, to, capacity }
    }
}

/// A network that passed every construction check. Edges keep input order.
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    source: usize,
    sink: usize,
    edges: Vec<EdgeSpec>,
    graph: ResidualGraph,
}

impl FlowNetwork {
    /// Validate terminals and edges and build the residual graph.
    ///
    /// Errors: `UnknownVertex` for any out-of-range id, `DegenerateQuery` when
    /// `source == sink`, and `InvalidCapacity` for negative capacities.
    pub fn new(
        vertex_count: usize,
        source: usize,
        sink: usize,
        edges: Vec<EdgeSpec>,
    ) -> Result<Self, FlowError> {
        let mut graph = ResidualGraph::new(vertex_count);
        graph.check_vertex(source)?;
        graph.check_vertex(sink)?;
        if source == sink {
            return Err(FlowError::DegenerateQuery { vertex: source });
        }
        for e in &edges {
            graph.add_arc(e.from, e.to, e.capacity)?;
        }
        Ok(Self {
            source,
            sink,
            edges,
            graph,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    #[inline]
    pub fn sink(&self) -> usize {
        self.sink
    }

    #[inline]
    pub fn edges(&self) -> &[EdgeSpec] {
        &self.edges
    }

    /// Fresh solver over a zero-flow copy of the residual graph.
    pub fn solver(&self) -> Dinic {
        Dinic::from_graph(self.graph.clone())
    }

    pub fn max_flow(&self) -> Result<i64, FlowError> {
        self.solver().max_flow(self.source, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(list: &[(usize, usize, i64)]) -> Vec<EdgeSpec> {
        list.iter().copied().map(EdgeSpec::from).collect()
    }

    #[test]
    fn builds_and_solves() {
        let net = FlowNetwork::new(2, 0, 1, edges(&[(0, 1, 3), (0, 1, 4)])).unwrap();
        assert_eq!(net.edges().len(), 2);
        assert_eq!(net.max_flow().unwrap(), 7);
        // the network itself is untouched by solving
        assert_eq!(net.max_flow().unwrap(), 7);
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            FlowNetwork::new(3, 0, 3, Vec::new()).unwrap_err(),
            FlowError::UnknownVertex {
                vertex: 3,
                vertex_count: 3
            }
        );
        assert_eq!(
            FlowNetwork::new(3, 2, 2, Vec::new()).unwrap_err(),
            FlowError::DegenerateQuery { vertex: 2 }
        );
        assert_eq!(
            FlowNetwork::new(3, 0, 2, edges(&[(0, 1, 1), (1, 2, -4)])).unwrap_err(),
            FlowError::InvalidCapacity {
                from: 1,
                to: 2,
                capacity: -4
            }
        );
        assert_eq!(
            FlowNetwork::new(3, 0, 2, edges(&[(0, 7, 1)])).unwrap_err(),
            FlowError::UnknownVertex {
                vertex: 7,
                vertex_count: 3
            }
        );
    }
}
