//! PyO3 bindings for the `flownet` solver.
//!
//! Notes
//! - Keep bindings thin: edge lists come in as `(from, to, capacity)` tuples
//!   and every `FlowError` surfaces as `ValueError`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn map_flow_err(err: flownet::FlowError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Maximum flow from `source` to `sink` over `n` vertices.
#[pyfunction]
fn max_flow(
    n: usize,
    source: usize,
    sink: usize,
    edges: Vec<(usize, usize, i64)>,
) -> PyResult<i64> {
    flownet::max_flow(n, source, sink, &edges).map_err(map_flow_err)
}

/// Maximum flow plus the source side of a minimum cut.
#[pyfunction]
fn max_flow_with_cut(
    n: usize,
    source: usize,
    sink: usize,
    edges: Vec<(usize, usize, i64)>,
) -> PyResult<(i64, Vec<usize>)> {
    let net = flownet::FlowNetwork::new(
        n,
        source,
        sink,
        edges.into_iter().map(flownet::EdgeSpec::from).collect(),
    )
    .map_err(map_flow_err)?;
    let mut solver = net.solver();
    let value = solver.max_flow(source, sink).map_err(map_flow_err)?;
    let cut = solver.min_cut(source).map_err(map_flow_err)?;
    Ok((value, cut.source_vertices().collect()))
}

#[pymodule]
fn flownet_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(max_flow, m)?)?;
    m.add_function(wrap_pyfunction!(max_flow_with_cut, m)?)?;
    m.add("__version__", flownet::VERSION)?;
    Ok(())
}
