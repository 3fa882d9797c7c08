use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;
use ylm_basis::{Basis, BasisCfg};

mod export;
mod provenance;

use provenance::BuildParams;

#[derive(Parser)]
#[command(name = "ylm")]
#[command(about = "Build and inspect spherical-harmonic change-of-basis matrices")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build a basis and write its matrices as JSON (plus a provenance sidecar)
    Build {
        #[command(flatten)]
        degrees: Degrees,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print dimensions and self-check residuals as JSON
    Report {
        #[command(flatten)]
        degrees: Degrees,
    },
}

#[derive(Args, Debug)]
struct Degrees {
    /// Spherical-harmonic degree of the map
    #[arg(long)]
    ydeg: usize,
    /// Limb-darkening degree
    #[arg(long, default_value_t = 0)]
    udeg: usize,
    /// Filter degree
    #[arg(long, default_value_t = 0)]
    fdeg: usize,
    /// Map normalization (default 2/sqrt(pi))
    #[arg(long)]
    norm: Option<f64>,
    /// Build above the degree ceiling (logs a warning instead of failing)
    #[arg(long)]
    allow_high_degree: bool,
}

impl Degrees {
    fn build(&self) -> Result<Basis<f64>> {
        let mut cfg = BasisCfg::default();
        if let Some(norm) = self.norm {
            cfg.norm = norm;
        }
        cfg.enforce_max_degree = !self.allow_high_degree;
        Basis::with_cfg(self.ydeg, self.udeg, self.fdeg, cfg).with_context(|| {
            format!(
                "building basis (ydeg={}, udeg={}, fdeg={})",
                self.ydeg, self.udeg, self.fdeg
            )
        })
    }

    fn params(&self, norm: f64) -> BuildParams {
        BuildParams {
            ydeg: self.ydeg,
            udeg: self.udeg,
            fdeg: self.fdeg,
            norm,
            allow_high_degree: self.allow_high_degree,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Build { degrees, out } => build(&degrees, &out),
        Action::Report { degrees } => report(&degrees),
    }
}

fn build(degrees: &Degrees, out: &Path) -> Result<()> {
    tracing::info!(?degrees, out = %out.display(), "build");
    let basis = degrees.build()?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let doc = export::dump(&basis);
    std::fs::write(out, serde_json::to_vec(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sidecar = provenance::write_sidecar(out, &degrees.params(basis.norm()))?;
    tracing::info!(
        ny = basis.ny(),
        sidecar = %sidecar.display(),
        "basis written"
    );
    Ok(())
}

fn report(degrees: &Degrees) -> Result<()> {
    let basis = degrees.build()?;
    let rep = export::report(&basis);
    println!("{}", serde_json::to_string_pretty(&rep)?);
    Ok(())
}
