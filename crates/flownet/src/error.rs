//! Error type shared by network construction, fixtures, and generators.
//!
//! Every variant is detected before or at graph construction. Once a
//! `ResidualGraph` exists the max-flow computation itself cannot fail.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowError {
    /// A fixture line has the wrong field count or a non-integer field.
    MalformedInput { line: usize, reason: String },
    /// Negative arc capacity.
    InvalidCapacity { from: usize, to: usize, capacity: i64 },
    /// Vertex id outside `[0, vertex_count)`.
    UnknownVertex { vertex: i64, vertex_count: usize },
    /// Source and sink coincide.
    DegenerateQuery { vertex: usize },
    /// Random generator parameters cannot produce a network.
    Generator { reason: String },
}

impl FlowError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn generator(reason: impl Into<String>) -> Self {
        Self::Generator {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput { line, reason } => {
                write!(f, "malformed input on line {line}: {reason}")
            }
            Self::InvalidCapacity { from, to, capacity } => write!(
                f,
                "arc {from}->{to} has negative capacity {capacity}"
            ),
            Self::UnknownVertex {
                vertex,
                vertex_count,
            } => write!(
                f,
                "vertex {vertex} is outside [0, {vertex_count})"
            ),
            Self::DegenerateQuery { vertex } => {
                write!(f, "source and sink are both vertex {vertex}")
            }
            Self::Generator { reason } => write!(f, "invalid generator params: {reason}"),
        }
    }
}

impl std::error::Error for FlowError {}
