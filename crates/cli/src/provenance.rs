//! Provenance sidecars: every fixture or arc table the CLI writes gets a
//! `<stem>.provenance.json` next to it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Facts shared by every artifact of one CLI invocation; also the body of
/// `report`.
#[derive(Debug, Serialize)]
pub struct RunInfo {
    pub code_rev: String,
    pub flownet_version: &'static str,
    pub tags: Vec<String>,
}

impl RunInfo {
    pub fn collect(tag: Option<&str>) -> Self {
        Self {
            code_rev: git_rev(),
            flownet_version: flownet::VERSION,
            tags: tag.map(str::to_string).into_iter().collect(),
        }
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    #[serde(flatten)]
    run: &'a RunInfo,
    callsite: Callsite,
    params: Value,
    outputs: [String; 1],
}

/// Write the sidecar for `artifact` and return its path.
#[track_caller]
pub fn write_sidecar(run: &RunInfo, artifact: &Path, params: Value) -> Result<PathBuf> {
    let caller = Location::caller();
    let path = artifact.with_extension("provenance.json");
    let doc = Sidecar {
        run,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        params,
        outputs: [artifact.to_string_lossy().into_owned()],
    };
    create_parent_dir(&path)?;
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating dir {}", dir.display())),
        _ => Ok(()),
    }
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse`, else "unknown".
fn git_rev() -> String {
    let pinned = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .filter(|r| !r.is_empty())
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|r| !r.is_empty()));
    if let Some(rev) = pinned {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
