use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Parameters a basis artifact was built from.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BuildParams {
    pub ydeg: usize,
    pub udeg: usize,
    pub fdeg: usize,
    pub norm: f64,
    pub allow_high_degree: bool,
}

#[derive(Serialize, Debug)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Sidecar document stored next to a basis artifact.
#[derive(Serialize, Debug)]
struct Provenance<'a> {
    code_rev: String,
    callsite: Callsite,
    ylm_basis_version: &'static str,
    params: &'a BuildParams,
    output: String,
    output_bytes: u64,
}

/// Write `<stem>.provenance.json` next to an already written `artifact`.
#[track_caller]
pub fn write_sidecar(artifact: &Path, params: &BuildParams) -> Result<PathBuf> {
    let caller = Location::caller();
    let output_bytes = fs::metadata(artifact)
        .with_context(|| format!("artifact {} must exist before its sidecar", artifact.display()))?
        .len();
    let doc = Provenance {
        code_rev: current_git_rev(),
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        ylm_basis_version: ylm_basis::VERSION,
        params,
        output: artifact.display().to_string(),
        output_bytes,
    };
    let path = sidecar_path(artifact);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Commit of the build: `GIT_COMMIT` baked in at compile time, then the
/// runtime variable, then `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    let non_empty = |s: String| (!s.is_empty()).then_some(s);
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .and_then(non_empty)
        .or_else(|| std::env::var("GIT_COMMIT").ok().and_then(non_empty))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_owned())
}
