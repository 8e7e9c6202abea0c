//! Random capacitated networks with a guaranteed source→sink path.
//!
//! Model
//! - Source is vertex 0, sink is `nodes - 1`.
//! - A chain `0 → 1 → … → len-1 → sink` of `len` hops is laid first, with
//!   capacities drawn from `path_capacity`. `len` comes from `path_len` and is
//!   clamped to `nodes - 1` so the chain never revisits a vertex.
//! - The remaining `edges - len` edges have uniform endpoints, excluding
//!   self-loops and the direct source→sink pair, with capacities drawn from
//!   `extra_capacity`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::FlowError;
use crate::network::{EdgeSpec, FlowNetwork};

/// Guaranteed-path length distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathLen {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl PathLen {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            PathLen::Fixed(n) => n.max(1),
            PathLen::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }

    fn upper(&self) -> usize {
        match *self {
            PathLen::Fixed(n) => n.max(1),
            PathLen::Uniform { min, max } => max.max(min).max(1),
        }
    }
}

/// Inclusive capacity range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapRange {
    pub min: i64,
    pub max: i64,
}

impl CapRange {
    fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Upper bound on `NetworkGenCfg::edges`; edges are buffered before validation.
pub const MAX_EDGES: usize = 1 << 24;

/// Generator configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkGenCfg {
    pub nodes: usize,
    pub edges: usize,
    pub path_len: PathLen,
    pub path_capacity: CapRange,
    pub extra_capacity: CapRange,
}

impl Default for NetworkGenCfg {
    fn default() -> Self {
        Self {
            nodes: 1000,
            edges: 20000,
            path_len: PathLen::Uniform { min: 5, max: 9 },
            path_capacity: CapRange { min: 50, max: 99 },
            extra_capacity: CapRange { min: 1, max: 100 },
        }
    }
}

impl NetworkGenCfg {
    fn validate(&self) -> Result<(), FlowError> {
        if self.nodes < 2 {
            return Err(FlowError::generator(format!(
                "need at least 2 nodes, got {}",
                self.nodes
            )));
        }
        if self.edges > MAX_EDGES {
            return Err(FlowError::generator(format!(
                "{} edges exceeds the limit of {MAX_EDGES}",
                self.edges
            )));
        }
        let longest = self.path_len.upper().min(self.nodes - 1);
        if self.edges < longest {
            return Err(FlowError::generator(format!(
                "{} edges cannot hold a guaranteed path of up to {longest} hops",
                self.edges
            )));
        }
        for (name, r) in [("path", self.path_capacity), ("extra", self.extra_capacity)] {
            if r.min < 0 || r.min > r.max {
                return Err(FlowError::generator(format!(
                    "{name} capacity range [{}, {}] is empty or negative",
                    r.min, r.max
                )));
            }
        }
        Ok(())
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one network. The same `(cfg, tok)` always yields the same edges.
pub fn generate_network(cfg: NetworkGenCfg, tok: ReplayToken) -> Result<FlowNetwork, FlowError> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let n = cfg.nodes;
    let (source, sink) = (0, n - 1);
    let len = cfg.path_len.sample(&mut rng).min(n - 1);

    let mut edges = Vec::with_capacity(cfg.edges);
    let mut prev = source;
    for hop in 1..=len {
        let next = if hop == len { sink } else { hop };
        edges.push(EdgeSpec::new(prev, next, cfg.path_capacity.sample(&mut rng)));
        prev = next;
    }
    for _ in len..cfg.edges {
        let (from, to) = loop {
            let from = rng.gen_range(0..n);
            let to = rng.gen_range(0..n);
            if from != to && !(from == source && to == sink) {
                break (from, to);
            }
        };
        edges.push(EdgeSpec::new(from, to, cfg.extra_capacity.sample(&mut rng)));
    }
    FlowNetwork::new(n, source, sink, edges)
}

/// Endless stream of networks sharing one seed, indexed from `start`.
#[derive(Clone, Debug)]
pub struct NetworkStream {
    cfg: NetworkGenCfg,
    next: ReplayToken,
}

impl NetworkStream {
    pub fn new(cfg: NetworkGenCfg, seed: u64, start: u64) -> Self {
        Self {
            cfg,
            next: ReplayToken { seed, index: start },
        }
    }
}

impl Iterator for NetworkStream {
    type Item = Result<(ReplayToken, FlowNetwork), FlowError>;

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.next;
        self.next.index = self.next.index.wrapping_add(1);
        Some(generate_network(self.cfg, tok).map(|net| (tok, net)))
    }
}
