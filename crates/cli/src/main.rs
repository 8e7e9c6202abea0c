mod provenance;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flownet::cut::MinCut;
use flownet::dinic::{FlowOutcome, SolveCfg};
use flownet::fixture;
use flownet::rand::{generate_network, NetworkGenCfg, ReplayToken};
use flownet::ResidualGraph;
use polars::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::{create_parent_dir, write_sidecar, RunInfo};

#[derive(Parser)]
#[command(name = "flownet")]
#[command(about = "Max-flow runner and network generator")]
struct Cmd {
    /// Optional experiment tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a fixture and print a JSON summary
    Solve(SolveArgs),
    /// Write a random network fixture
    Generate(GenerateArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct SolveArgs {
    #[arg(long)]
    input: PathBuf,
    /// Stop after this many phases (result flagged as not necessarily maximum)
    #[arg(long)]
    max_phases: Option<usize>,
    /// Stop starting phases after this many milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,
    /// Include the minimum cut in the summary
    #[arg(long)]
    cut: bool,
    /// Write per-arc flows; `.parquet` or CSV otherwise
    #[arg(long)]
    arcs: Option<PathBuf>,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, default_value_t = 1000)]
    nodes: usize,
    #[arg(long, default_value_t = 20000)]
    edges: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    index: u64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Serialize)]
struct SolveSummary {
    input: String,
    vertices: usize,
    edges: usize,
    source: usize,
    sink: usize,
    max_flow: i64,
    termination: &'static str,
    is_maximum: bool,
    phases: Vec<PhaseSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cut: Option<CutSummary>,
}

#[derive(Debug, Serialize)]
struct PhaseSummary {
    sink_level: usize,
    pushed: i64,
    augmentations: usize,
}

#[derive(Debug, Serialize)]
struct CutSummary {
    capacity: i64,
    source_side: Vec<usize>,
    arcs: Vec<(usize, usize, i64)>,
}

impl CutSummary {
    fn from_cut(cut: &MinCut) -> Self {
        Self {
            capacity: cut.capacity,
            source_side: cut.source_vertices().collect(),
            arcs: cut.arcs.iter().map(|a| (a.from, a.to, a.capacity)).collect(),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let run = RunInfo::collect(cmd.tag.as_deref());
    match cmd.action {
        Action::Solve(args) => {
            let summary = solve(&args, &run)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Action::Generate(args) => generate(&args, &run),
        Action::Report => {
            println!("{}", serde_json::to_string_pretty(&run)?);
            Ok(())
        }
    }
}

fn solve(args: &SolveArgs, run: &RunInfo) -> Result<SolveSummary> {
    tracing::info!(input = %args.input.display(), max_phases = ?args.max_phases, tags = ?run.tags, "solve");
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let net = fixture::parse(&text).with_context(|| format!("parsing {}", args.input.display()))?;
    let cfg = SolveCfg {
        max_phases: args.max_phases,
        time_budget: args.time_budget_ms.map(Duration::from_millis),
    };
    let mut solver = net.solver();
    let out: FlowOutcome = solver.solve(net.source(), net.sink(), cfg)?;
    tracing::info!(
        max_flow = out.value,
        phases = out.report.phases.len(),
        termination = out.termination.as_str(),
        "solved"
    );
    if !out.termination.is_maximum() {
        tracing::warn!(
            termination = out.termination.as_str(),
            "run stopped early; flow is not necessarily maximum"
        );
    }
    let cut = if args.cut {
        Some(CutSummary::from_cut(&solver.min_cut(net.source())?))
    } else {
        None
    };

    if let Some(path) = &args.arcs {
        write_arc_table(solver.graph(), path)?;
        let params = serde_json::json!({
            "input": args.input.to_string_lossy(),
            "max_phases": args.max_phases,
            "time_budget_ms": args.time_budget_ms,
            "max_flow": out.value,
            "termination": out.termination.as_str(),
        });
        write_sidecar(run, path, params)?;
    }

    Ok(SolveSummary {
        input: args.input.to_string_lossy().into_owned(),
        vertices: net.vertex_count(),
        edges: net.edges().len(),
        source: net.source(),
        sink: net.sink(),
        max_flow: out.value,
        termination: out.termination.as_str(),
        is_maximum: out.termination.is_maximum(),
        phases: out
            .report
            .phases
            .iter()
            .map(|p| PhaseSummary {
                sink_level: p.sink_level,
                pushed: p.pushed,
                augmentations: p.augmentations,
            })
            .collect(),
        cut,
    })
}

/// One row per caller-added arc: endpoints, capacity, final flow, saturation.
fn arc_table(g: &ResidualGraph) -> PolarsResult<DataFrame> {
    let mut from: Vec<u64> = Vec::new();
    let mut to: Vec<u64> = Vec::new();
    let mut capacity: Vec<i64> = Vec::new();
    let mut flow: Vec<i64> = Vec::new();
    let mut saturated: Vec<bool> = Vec::new();
    for (r, arc) in g.forward_arcs() {
        from.push(r.from as u64);
        to.push(arc.to as u64);
        capacity.push(arc.capacity);
        flow.push(arc.flow);
        saturated.push(arc.is_saturated());
    }
    df!(
        "from" => from,
        "to" => to,
        "capacity" => capacity,
        "flow" => flow,
        "saturated" => saturated
    )
}

fn write_arc_table(g: &ResidualGraph, path: &Path) -> Result<()> {
    let mut df = arc_table(g)?;
    create_parent_dir(path)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    if path.extension().is_some_and(|e| e == "parquet") {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
    }
    tracing::info!(rows = df.height(), out = %path.display(), "arc_table");
    Ok(())
}

fn generate(args: &GenerateArgs, run: &RunInfo) -> Result<()> {
    tracing::info!(
        nodes = args.nodes,
        edges = args.edges,
        seed = args.seed,
        index = args.index,
        out = %args.out.display(),
        tags = ?run.tags,
        "generate"
    );
    let cfg = NetworkGenCfg {
        nodes: args.nodes,
        edges: args.edges,
        ..NetworkGenCfg::default()
    };
    let tok = ReplayToken {
        seed: args.seed,
        index: args.index,
    };
    let net = generate_network(cfg, tok)?;
    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, fixture::write(&net))
        .with_context(|| format!("writing {}", args.out.display()))?;
    let params = serde_json::json!({
        "nodes": args.nodes,
        "edges": args.edges,
        "seed": args.seed,
        "index": args.index,
    });
    write_sidecar(run, &args.out, params)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn run() -> RunInfo {
        RunInfo::collect(Some("t"))
    }

    const CLASSIC: &str = "6 10\n0 5\n0 1 16\n0 2 13\n1 2 10\n1 3 12\n2 1 4\n2 4 14\n3 2 9\n3 5 20\n4 3 7\n4 5 4\n";

    fn solve_args(input: PathBuf) -> SolveArgs {
        SolveArgs {
            input,
            max_phases: None,
            time_budget_ms: None,
            cut: false,
            arcs: None,
        }
    }

    #[test]
    fn solve_classic_with_cut_and_arc_table() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("classic.txt");
        std::fs::write(&input, CLASSIC).unwrap();
        let arcs = dir.path().join("out").join("flows.csv");
        let args = SolveArgs {
            cut: true,
            arcs: Some(arcs.clone()),
            ..solve_args(input)
        };
        let summary = solve(&args, &run()).unwrap();
        assert_eq!(summary.max_flow, 23);
        assert!(summary.is_maximum);
        assert_eq!(summary.cut.as_ref().unwrap().capacity, 23);

        let df = LazyCsvReader::new(&arcs)
            .with_infer_schema_length(Some(100))
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(df.height(), 10);
        assert!(dir.path().join("out").join("flows.provenance.json").exists());
    }

    #[test]
    fn solve_with_phase_limit_is_flagged() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("classic.txt");
        std::fs::write(&input, CLASSIC).unwrap();
        let args = SolveArgs {
            max_phases: Some(0),
            ..solve_args(input)
        };
        let summary = solve(&args, &run()).unwrap();
        assert_eq!(summary.max_flow, 0);
        assert!(!summary.is_maximum);
        assert_eq!(summary.termination, "phase_limit");
    }

    #[test]
    fn solve_reports_malformed_fixture() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.txt");
        std::fs::write(&input, "2 1\n0 1\n0 1 -5\n").unwrap();
        let err = solve(&solve_args(input), &run()).unwrap_err();
        assert!(format!("{err:#}").contains("negative capacity -5"));
    }

    #[test]
    fn generate_then_solve_round_trip() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nets").join("g.txt");
        let args = GenerateArgs {
            nodes: 50,
            edges: 300,
            seed: 3,
            index: 1,
            out: out.clone(),
        };
        generate(&args, &run()).unwrap();
        assert!(dir.path().join("nets").join("g.provenance.json").exists());
        let summary = solve(&solve_args(out), &run()).unwrap();
        assert_eq!((summary.vertices, summary.edges), (50, 300));
        assert!(summary.max_flow >= 50);
    }

    #[test]
    fn generate_rejects_oversized_edge_count() {
        let dir = tempdir().unwrap();
        let args = GenerateArgs {
            nodes: 10,
            edges: usize::MAX,
            seed: 0,
            index: 0,
            out: dir.path().join("g.txt"),
        };
        let err = generate(&args, &run()).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds the limit"));
    }

    #[test]
    fn solve_reports_huge_declared_edge_count() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("huge.txt");
        std::fs::write(&input, "2 4611686018427387903\n0 1\n0 1 3\n").unwrap();
        let err = solve(&solve_args(input), &run()).unwrap_err();
        assert!(format!("{err:#}").contains("expected 4611686018427387903 edge lines"));
    }
}
