//! Plain-text network fixtures.
//!
//! Format
//! - Line 1: `vertex_count edge_count`
//! - Line 2: `source sink`
//! - Then exactly `edge_count` lines `from to capacity`.
//!
//! Fields are separated by spaces, tabs, or commas; blank lines are skipped.
//! `write` emits the space-separated form.

use std::fmt::Write as _;

use crate::error::FlowError;
use crate::network::{EdgeSpec, FlowNetwork};

/// Largest vertex count a fixture header may declare.
pub const MAX_VERTICES: usize = 1 << 26;

/// Parse and validate a fixture.
pub fn parse(text: &str) -> Result<FlowNetwork, FlowError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (lno, header) = lines
        .next()
        .ok_or_else(|| FlowError::malformed(1, "missing header line"))?;
    let [n, m] = fields::<2>(lno, header)?;
    let n = count(lno, n, "vertex count")?;
    if n > MAX_VERTICES {
        return Err(FlowError::malformed(
            lno,
            format!("vertex count {n} exceeds the limit of {MAX_VERTICES}"),
        ));
    }
    let m = count(lno, m, "edge count")?;

    let (lno, terminals) = lines
        .next()
        .ok_or_else(|| FlowError::malformed(lno + 1, "missing source/sink line"))?;
    let [s, t] = fields::<2>(lno, terminals)?;
    let source = vertex(s, n)?;
    let sink = vertex(t, n)?;

    // `m` is untrusted until the edge lines are counted.
    let mut edges = Vec::with_capacity(m.min(text.lines().count()));
    let mut last = lno;
    for (lno, line) in lines {
        if edges.len() == m {
            return Err(FlowError::malformed(
                lno,
                format!("more edge lines than the declared {m}"),
            ));
        }
        let [u, v, c] = fields::<3>(lno, line)?;
        edges.push(EdgeSpec::new(vertex(u, n)?, vertex(v, n)?, c));
        last = lno;
    }
    if edges.len() < m {
        return Err(FlowError::malformed(
            last + 1,
            format!("expected {m} edge lines, found {}", edges.len()),
        ));
    }
    FlowNetwork::new(n, source, sink, edges)
}

/// Render `net` in the fixture format; `parse(&write(net))` yields the same edges.
pub fn write(net: &FlowNetwork) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} {}", net.vertex_count(), net.edges().len());
    let _ = writeln!(out, "{} {}", net.source(), net.sink());
    for e in net.edges() {
        let _ = writeln!(out, "{} {} {}", e.from, e.to, e.capacity);
    }
    out
}

fn fields<const N: usize>(lno: usize, line: &str) -> Result<[i64; N], FlowError> {
    let raw: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if raw.len() != N {
        return Err(FlowError::malformed(
            lno,
            format!("expected {N} fields, found {}", raw.len()),
        ));
    }
    let mut out = [0i64; N];
    for (slot, tok) in out.iter_mut().zip(raw) {
        *slot = tok
            .parse()
            .map_err(|_| FlowError::malformed(lno, format!("`{tok}` is not an integer")))?;
    }
    Ok(out)
}

fn count(lno: usize, value: i64, what: &str) -> Result<usize, FlowError> {
    usize::try_from(value)
        .map_err(|_| FlowError::malformed(lno, format!("{what} {value} is negative")))
}

fn vertex(value: i64, vertex_count: usize) -> Result<usize, FlowError> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v < vertex_count)
        .ok_or(FlowError::UnknownVertex {
            vertex: value,
            vertex_count,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str = "\
6 10
0 5
0 1 16
0 2 13
1 2 10
1 3 12
2 1 4
2 4 14
3 2 9
3 5 20
4 3 7
4 5 4
";

    #[test]
    fn parses_and_solves_classic() {
        let net = parse(CLASSIC).unwrap();
        assert_eq!(net.vertex_count(), 6);
        assert_eq!((net.source(), net.sink()), (0, 5));
        assert_eq!(net.edges()[4], EdgeSpec::new(2, 1, 4));
        assert_eq!(net.max_flow().unwrap(), 23);
        assert_eq!(write(&net), CLASSIC);
    }

    #[test]
    fn accepts_commas_and_blank_lines() {
        let net = parse("2,2\n\n0, 1\n0,1,3\n 0 ,1, 4 \n\n").unwrap();
        assert_eq!(net.max_flow().unwrap(), 7);
    }

    #[test]
    fn reports_malformed_lines() {
        assert_eq!(
            parse("2 1\n0 1\n0 1\n").unwrap_err(),
            FlowError::malformed(3, "expected 3 fields, found 2")
        );
        assert_eq!(
            parse("2 1\n0 1\n0 x 3\n").unwrap_err(),
            FlowError::malformed(3, "`x` is not an integer")
        );
        assert_eq!(
            parse("2 2\n0 1\n0 1 3\n").unwrap_err(),
            FlowError::malformed(4, "expected 2 edge lines, found 1")
        );
        assert_eq!(
            parse("2 1\n0 1\n0 1 3\n0 1 3\n").unwrap_err(),
            FlowError::malformed(4, "more edge lines than the declared 1")
        );
        assert_eq!(
            parse("").unwrap_err(),
            FlowError::malformed(1, "missing header line")
        );
        assert_eq!(
            parse("-1 0\n").unwrap_err(),
            FlowError::malformed(1, "vertex count -1 is negative")
        );
    }

    #[test]
    fn huge_declared_edge_count_is_malformed() {
        assert_eq!(
            parse("2 4611686018427387903\n0 1\n0 1 3\n").unwrap_err(),
            FlowError::malformed(4, "expected 4611686018427387903 edge lines, found 1")
        );
        let m = usize::MAX;
        assert_eq!(
            parse(&format!("2 {m}\n0 1\n")).unwrap_err(),
            FlowError::malformed(3, format!("expected {m} edge lines, found 0"))
        );
        assert_eq!(
            parse("1000000000000 0\n0 1\n").unwrap_err(),
            FlowError::malformed(
                1,
                format!("vertex count 1000000000000 exceeds the limit of {MAX_VERTICES}")
            )
        );
    }

    #[test]
    fn reports_validation_errors() {
        assert_eq!(
            parse("2 1\n0 1\n0 -1 3\n").unwrap_err(),
            FlowError::UnknownVertex {
                vertex: -1,
                vertex_count: 2
            }
        );
        assert_eq!(
            parse("2 1\n0 1\n0 1 -3\n").unwrap_err(),
            FlowError::InvalidCapacity {
                from: 0,
                to: 1,
                capacity: -3
            }
        );
        assert_eq!(
            parse("2 0\n1 1\n").unwrap_err(),
            FlowError::DegenerateQuery { vertex: 1 }
        );
    }
}
